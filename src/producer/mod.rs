//! Producer layer - where assistant replies come from
//!
//! The Producer actor receives one turn command at a time, runs `submit`
//! then `fetch_reply` against a [`ResponseProducer`], and reports back.

pub mod actor;
pub mod http;
pub mod mock;

pub use actor::ProducerActor;
pub use http::HttpProducer;
pub use mock::MockProducer;

use async_trait::async_trait;

use crate::error::ProducerError;
use crate::models::{Ack, Reply};

/// Backend collaborator for a chat turn.
///
/// Callers must await `submit` before calling `fetch_reply`; the reply
/// answers the most recently submitted message.
#[async_trait]
pub trait ResponseProducer: Send + Sync + std::fmt::Debug {
    /// Deliver the user's message upstream
    async fn submit(&self, text: &str) -> Result<Ack, ProducerError>;

    /// Retrieve the answer to the last submitted message
    async fn fetch_reply(&self) -> Result<Reply, ProducerError>;
}
