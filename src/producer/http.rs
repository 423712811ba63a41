//! HTTP producer - talks to a consultation backend over JSON

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ProducerError;
use crate::models::{Ack, Reply};
use crate::producer::ResponseProducer;

#[derive(Serialize)]
struct SubmitRequest<'a> {
    message: &'a str,
}

/// `POST {base}/api/messages` then `GET {base}/api/reply`
#[derive(Debug, Clone)]
pub struct HttpProducer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProducer {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        HttpProducer {
            client: create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn messages_url(&self) -> String {
        format!("{}/api/messages", self.base_url)
    }

    pub fn reply_url(&self) -> String {
        format!("{}/api/reply", self.base_url)
    }
}

#[async_trait]
impl ResponseProducer for HttpProducer {
    async fn submit(&self, text: &str) -> Result<Ack, ProducerError> {
        let url = self.messages_url();
        tracing::info!(url = %url, "POST message");

        let response = self
            .client
            .post(&url)
            .json(&SubmitRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProducerError::Status(status.as_u16()));
        }

        // Some backends answer 204 or a bare body; the ack content is optional.
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Ack::default());
        }
        parse_ack(&body)
    }

    async fn fetch_reply(&self) -> Result<Reply, ProducerError> {
        let url = self.reply_url();
        tracing::info!(url = %url, "GET reply");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProducerError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

/// Decode a reply body, validating any table it carries
pub fn parse_reply(body: &str) -> Result<Reply, ProducerError> {
    serde_json::from_str(body).map_err(|e| ProducerError::Malformed(e.to_string()))
}

/// Decode a non-empty acknowledgement body
pub fn parse_ack(body: &str) -> Result<Ack, ProducerError> {
    serde_json::from_str(body).map_err(|e| ProducerError::Malformed(e.to_string()))
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableData;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Serve one canned response per connection, in order, and hand back
    /// the request heads that were received
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut heads = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                heads.push(read_request(&mut socket).await);
                let response = format!(
                    "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            heads
        });

        (base, handle)
    }

    /// Read one request (head and body); returns the head
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).into_owned();
            let body_len = head
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return head;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn producer(base: &str) -> HttpProducer {
        HttpProducer::new(base, Duration::from_secs(5))
    }

    #[test]
    fn test_urls_drop_trailing_slash() {
        let producer = HttpProducer::new("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(producer.messages_url(), "http://localhost:8000/api/messages");
        assert_eq!(producer.reply_url(), "http://localhost:8000/api/reply");
    }

    #[test]
    fn test_parse_reply_rejects_ragged_table() {
        let body = r#"{"content":"x","table":{"headers":["a","b"],"rows":[["1","2","3"]]}}"#;
        assert!(matches!(parse_reply(body), Err(ProducerError::Malformed(_))));
    }

    #[test]
    fn test_parse_reply_plain_text() {
        let reply = parse_reply(r#"{"content":"just text"}"#).unwrap();
        assert_eq!(reply, Reply::new("just text", None));
    }

    #[test]
    fn test_parse_ack_rejects_non_json() {
        assert!(matches!(
            parse_ack("<html>gateway error page</html>"),
            Err(ProducerError::Malformed(_))
        ));
        assert_eq!(parse_ack(r#"{"id":"m-1"}"#).unwrap().id.as_deref(), Some("m-1"));
    }

    #[tokio::test]
    async fn test_submit_then_fetch_round_trip() {
        let reply_body = r#"{"content":"Here you go","table":{"headers":["k","v"],"rows":[["a","1"],["b","2"]]}}"#;
        let (base, server) = serve(vec![(200, r#"{"id":"m-7"}"#), (200, reply_body)]).await;
        let producer = producer(&base);

        let ack = producer.submit("hello").await.unwrap();
        assert_eq!(ack.id.as_deref(), Some("m-7"));

        let reply = producer.fetch_reply().await.unwrap();
        let table = TableData::from_strs(&["k", "v"], &[&["a", "1"], &["b", "2"]]).unwrap();
        assert_eq!(reply, Reply::new("Here you go", Some(table)));

        let heads = server.await.unwrap();
        assert!(heads[0].starts_with("POST /api/messages "));
        assert!(heads[1].starts_with("GET /api/reply "));
    }

    #[tokio::test]
    async fn test_submit_empty_body_is_ok() {
        let (base, _server) = serve(vec![(200, "")]).await;
        assert_eq!(producer(&base).submit("hi").await, Ok(Ack::default()));
    }

    #[tokio::test]
    async fn test_submit_malformed_body_is_an_error() {
        let (base, _server) = serve(vec![(200, "<html>gateway error page</html>")]).await;
        assert!(matches!(
            producer(&base).submit("hi").await,
            Err(ProducerError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (base, _server) = serve(vec![(500, r#"{"error":"boom"}"#)]).await;
        assert_eq!(
            producer(&base).fetch_reply().await,
            Err(ProducerError::Status(500))
        );
    }

    #[tokio::test]
    async fn test_fetch_ragged_table_is_malformed() {
        let body = r#"{"content":"x","table":{"headers":["a","b"],"rows":[["1"]]}}"#;
        let (base, _server) = serve(vec![(200, body)]).await;
        assert!(matches!(
            producer(&base).fetch_reply().await,
            Err(ProducerError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let producer = HttpProducer::new("http://127.0.0.1:9", Duration::from_millis(500));
        assert!(producer.submit("hi").await.is_err());
    }
}
