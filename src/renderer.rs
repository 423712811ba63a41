//! Stream renderer - reveals a fetched reply as a sequence of growing prefixes
//!
//! The renderer is a pure state machine: it never sleeps. Whoever owns it
//! waits one typing delay between calls to [`StreamRenderer::advance`].

use chrono::{DateTime, Utc};

use crate::models::{Message, Reply, Role, TableData};

/// Drives one assistant message from empty to its full text
#[derive(Clone, Debug)]
pub struct StreamRenderer {
    target: String,
    total_chars: usize,
    next_len: usize,
    chars_per_step: usize,
    table: Option<TableData>,
    timestamp: DateTime<Utc>,
    finished: bool,
}

impl StreamRenderer {
    /// Begin streaming `reply`.
    ///
    /// Returns the message to append right away and, unless the reply is
    /// empty, the renderer that will rewrite it. An empty reply is already
    /// terminal: no placeholder, no frames.
    pub fn start(reply: Reply, chars_per_step: usize) -> (Message, Option<StreamRenderer>) {
        let timestamp = Utc::now();
        let total_chars = reply.content.chars().count();

        if total_chars == 0 {
            let message = Message {
                role: Role::Assistant,
                content: String::new(),
                table: reply.table,
                is_streaming: false,
                timestamp,
            };
            return (message, None);
        }

        let placeholder = Message {
            role: Role::Assistant,
            content: String::new(),
            table: reply.table.clone(),
            is_streaming: true,
            timestamp,
        };

        let renderer = StreamRenderer {
            target: reply.content,
            total_chars,
            next_len: 0,
            chars_per_step: chars_per_step.max(1),
            table: reply.table,
            timestamp,
            finished: false,
        };

        (placeholder, Some(renderer))
    }

    /// Produce the next frame. After the terminal frame, keeps returning it.
    pub fn advance(&mut self) -> Message {
        let len = self.next_len.min(self.total_chars);
        if len == self.total_chars {
            self.finished = true;
        } else {
            self.next_len = len + self.chars_per_step;
        }
        self.frame(len)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn frame(&self, len: usize) -> Message {
        Message {
            role: Role::Assistant,
            content: char_prefix(&self.target, len).to_string(),
            table: self.table.clone(),
            is_streaming: len < self.total_chars,
            timestamp: self.timestamp,
        }
    }
}

/// First `n` characters of `text`, cut on a char boundary
fn char_prefix(text: &str, n: usize) -> &str {
    let end = text
        .char_indices()
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(renderer: &mut StreamRenderer) -> Vec<Message> {
        let mut frames = Vec::new();
        while !renderer.is_finished() {
            frames.push(renderer.advance());
        }
        frames
    }

    #[test]
    fn test_every_frame_is_a_prefix() {
        let text = "Hello";
        let (placeholder, renderer) = StreamRenderer::start(Reply::new(text, None), 1);
        assert!(placeholder.is_streaming);
        assert!(placeholder.content.is_empty());

        let frames = drain(&mut renderer.unwrap());
        assert_eq!(frames.len(), text.len() + 1);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.content, &text[..i]);
            assert_eq!(frame.is_streaming, i < text.len());
        }
    }

    #[test]
    fn test_table_rides_along_but_shows_at_end() {
        let table = TableData::from_strs(&["k", "v"], &[&["a", "1"]]).unwrap();
        let (placeholder, renderer) =
            StreamRenderer::start(Reply::new("ab", Some(table.clone())), 1);
        assert_eq!(placeholder.table.as_ref(), Some(&table));
        assert!(placeholder.visible_table().is_none());

        let frames = drain(&mut renderer.unwrap());
        let last = frames.last().unwrap();
        assert_eq!(last.visible_table(), Some(&table));
        assert!(frames[..frames.len() - 1]
            .iter()
            .all(|f| f.visible_table().is_none()));
    }

    #[test]
    fn test_empty_reply_is_terminal_immediately() {
        let (message, renderer) = StreamRenderer::start(Reply::new("", None), 1);
        assert!(renderer.is_none());
        assert!(!message.is_streaming);
        assert!(message.content.is_empty());
    }

    #[test]
    fn test_chunked_reveal_ends_on_full_text() {
        let text = "abcdefg";
        let (_, renderer) = StreamRenderer::start(Reply::new(text, None), 3);
        let frames = drain(&mut renderer.unwrap());
        let contents: Vec<&str> = frames.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["", "abc", "abcdef", "abcdefg"]);
        assert!(!frames.last().unwrap().is_streaming);
    }

    #[test]
    fn test_multibyte_text_cut_on_char_boundaries() {
        let text = "héllo 😊";
        let (_, renderer) = StreamRenderer::start(Reply::new(text, None), 1);
        let frames = drain(&mut renderer.unwrap());
        assert_eq!(frames.len(), text.chars().count() + 1);
        assert_eq!(frames[2].content, "hé");
        assert_eq!(frames.last().unwrap().content, text);
    }

    #[test]
    fn test_advance_after_finish_repeats_terminal_frame() {
        let (_, renderer) = StreamRenderer::start(Reply::new("x", None), 1);
        let mut renderer = renderer.unwrap();
        drain(&mut renderer);
        let again = renderer.advance();
        assert_eq!(again.content, "x");
        assert!(!again.is_streaming);
        assert!(renderer.is_finished());
    }
}
