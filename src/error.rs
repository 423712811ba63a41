//! Error types shared across layers

use thiserror::Error;

/// A table whose shape does not match its header row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table has no headers")]
    NoHeaders,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Conversation store misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("cannot replace the last message of an empty conversation")]
    Empty,
}

/// Failure of a single producer call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("producer unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProducerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProducerError::Timeout
        } else if e.is_connect() {
            ProducerError::Connect(e.to_string())
        } else if e.is_decode() {
            ProducerError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            ProducerError::Status(status.as_u16())
        } else {
            ProducerError::Transport(e.to_string())
        }
    }
}

/// Which producer call of a turn failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    Submit,
    Fetch,
}

impl TurnStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnStage::Submit => "submit",
            TurnStage::Fetch => "fetch",
        }
    }
}

/// The one failure kind a turn can end in. Only logged; the conversation
/// shows the fixed fallback text instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("turn failed during {}: {source}", .stage.as_str())]
pub struct TurnFailure {
    pub stage: TurnStage,
    #[source]
    pub source: ProducerError,
}

impl TurnFailure {
    pub fn new(stage: TurnStage, source: ProducerError) -> Self {
        TurnFailure { stage, source }
    }
}
