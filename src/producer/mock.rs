//! Canned producer with simulated latency

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::clock::{Clock, TokioClock};
use crate::constants::{DEFAULT_FETCH_DELAY_MS, DEFAULT_SUBMIT_DELAY_MS, MOCK_REPLY_TEXT};
use crate::error::{ProducerError, TableError, TurnStage};
use crate::models::{Ack, Reply, TableData};
use crate::producer::ResponseProducer;

/// The quarterly metrics table every mock reply carries
pub fn quarterly_table() -> Result<TableData, TableError> {
    TableData::from_strs(
        &["Metric", "Q1 2024", "Q2 2024", "Q3 2024", "Growth"],
        &[
            &["Revenue", "$125,000", "$142,000", "$168,000", "+34%"],
            &["Users", "12,500", "15,800", "19,200", "+54%"],
            &["Engagement", "78%", "82%", "87%", "+12%"],
            &["Satisfaction", "4.2/5", "4.5/5", "4.7/5", "+12%"],
        ],
    )
}

/// Answers every message with the same reply after fixed delays
#[derive(Debug)]
pub struct MockProducer {
    clock: Arc<dyn Clock>,
    submit_delay: Duration,
    fetch_delay: Duration,
    reply: Reply,
    fail_on: Option<TurnStage>,
    submit_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    last_submitted: std::sync::Mutex<Option<String>>,
}

impl MockProducer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        MockProducer {
            clock,
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            reply: Reply::new(MOCK_REPLY_TEXT, quarterly_table().ok()),
            fail_on: None,
            submit_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            last_submitted: std::sync::Mutex::new(None),
        }
    }

    pub fn with_delays(mut self, submit: Duration, fetch: Duration) -> Self {
        self.submit_delay = submit;
        self.fetch_delay = fetch;
        self
    }

    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }

    /// Make the given call fail on every turn
    pub fn failing_on(mut self, stage: TurnStage) -> Self {
        self.fail_on = Some(stage);
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn last_submitted(&self) -> Option<String> {
        self.last_submitted
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl Default for MockProducer {
    fn default() -> Self {
        MockProducer::new(Arc::new(TokioClock))
    }
}

#[async_trait]
impl ResponseProducer for MockProducer {
    async fn submit(&self, text: &str) -> Result<Ack, ProducerError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.clock.sleep(self.submit_delay).await;
        tracing::debug!(len = text.len(), "mock submit");

        if self.fail_on == Some(TurnStage::Submit) {
            return Err(ProducerError::Unavailable("mock submit failure".to_string()));
        }
        if let Ok(mut last) = self.last_submitted.lock() {
            *last = Some(text.to_string());
        }
        Ok(Ack::default())
    }

    async fn fetch_reply(&self) -> Result<Reply, ProducerError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.clock.sleep(self.fetch_delay).await;

        if self.fail_on == Some(TurnStage::Fetch) {
            return Err(ProducerError::Unavailable("mock fetch failure".to_string()));
        }
        Ok(self.reply.clone())
    }
}
