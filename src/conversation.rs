//! Conversation store - ordered, append-only message log

use crate::error::ConversationError;
use crate::models::Message;

/// Messages in chronological order. Only the last one may be rewritten.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Conversation {
            messages: Vec::new(),
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Overwrite the final message
    pub fn replace_last(&mut self, message: Message) -> Result<(), ConversationError> {
        let last = self.messages.last_mut().ok_or(ConversationError::Empty)?;
        *last = message;
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
