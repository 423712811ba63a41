//! # Consult TUI
//!
//! A terminal chat client for data consultations.
//!
//! ## Features
//! - Single conversation with user and assistant messages
//! - Replies revealed with a typing animation
//! - Tabular data attached to replies, shown once typing finishes
//! - Mock backend with simulated latency, or a JSON-over-HTTP backend
//! - YAML configuration
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (turn state machine, typing ticks)
//! - Producer Layer (Tokio runtime)

pub mod app;
pub mod clock;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod error;
pub mod messages;
pub mod models;
pub mod producer;
pub mod renderer;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use clock::{Clock, TokioClock};
pub use config::{Config, ProducerKind};
pub use conversation::Conversation;
pub use error::{ConversationError, ProducerError, TableError, TurnFailure, TurnStage};
pub use messages::{ProducerCommand, ProducerResponse, RenderState, UiEvent};
pub use models::{Ack, Message, Reply, Role, TableData};
pub use producer::{HttpProducer, MockProducer, ProducerActor, ResponseProducer};
pub use renderer::StreamRenderer;
