//! Producer messages - communication between App and Producer layers

use crate::error::TurnFailure;
use crate::models::Reply;

/// Commands sent from App layer to Producer layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProducerCommand {
    /// Run one turn: submit `text`, then fetch the reply
    Turn { id: u64, text: String },
    /// Shutdown the producer actor
    Shutdown,
}

/// Responses sent from Producer layer to App layer, one per turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProducerResponse {
    Reply { id: u64, reply: Reply },
    Failed { id: u64, failure: TurnFailure },
}

impl ProducerResponse {
    /// Get the turn ID from the response
    pub fn id(&self) -> u64 {
        match self {
            ProducerResponse::Reply { id, .. } => *id,
            ProducerResponse::Failed { id, .. } => *id,
        }
    }
}
