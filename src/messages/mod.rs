//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Producer layers.

pub mod ui_events;
pub mod producer;
pub mod render;

pub use ui_events::UiEvent;
pub use producer::{ProducerCommand, ProducerResponse};
pub use render::RenderState;
