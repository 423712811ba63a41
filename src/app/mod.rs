//! App layer - central state management and turn orchestration
//!
//! The App actor receives UI events and producer responses,
//! updates state, and emits producer commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod turn;

pub use state::AppState;
pub use actor::AppActor;
