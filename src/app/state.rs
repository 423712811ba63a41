//! App state - pure data structure with no I/O logic

use crate::constants::WELCOME_TEXT;
use crate::conversation::Conversation;
use crate::error::TableError;
use crate::messages::RenderState;
use crate::models::{Message, TableData};
use crate::renderer::StreamRenderer;

/// Main application state - pure data, no I/O
#[derive(Debug)]
pub struct AppState {
    // Conversation
    pub conversation: Conversation,
    pub scroll_back: u16,

    // Input box
    pub input: String,
    pub cursor_position: usize,

    // Turn status
    pub awaiting_response: bool,
    pub next_turn_id: u64,
    pub pending_turn_id: Option<u64>,

    // Streaming state, at most one reply typing out
    pub renderer: Option<StreamRenderer>,
    pub chars_per_step: usize,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl AppState {
    pub fn new(chars_per_step: usize) -> Self {
        AppState {
            conversation: Conversation::new(),
            scroll_back: 0,
            input: String::new(),
            cursor_position: 0,
            awaiting_response: false,
            next_turn_id: 1,
            pending_turn_id: None,
            renderer: None,
            chars_per_step: chars_per_step.max(1),
            show_help: false,
        }
    }

    /// Seed the conversation with the welcome message and its sample table
    pub fn with_welcome(mut self) -> Self {
        match welcome_table() {
            Ok(table) => self
                .conversation
                .append(Message::assistant(WELCOME_TEXT, Some(table))),
            Err(e) => tracing::warn!(error = %e, "welcome table rejected"),
        }
        self
    }

    /// Generate a unique turn ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            messages: self.conversation.messages().to_vec(),
            scroll_back: self.scroll_back,
            input: self.input.clone(),
            cursor_position: self.cursor_position,
            awaiting_response: self.awaiting_response,
            streaming: self.is_streaming(),
            show_help: self.show_help,
        }
    }
}

fn welcome_table() -> Result<TableData, TableError> {
    TableData::from_strs(
        &["Category", "Status", "Priority", "Progress"],
        &[
            &["Analytics", "Active", "High", "85%"],
            &["Reports", "Pending", "Medium", "60%"],
            &["Dashboard", "Complete", "High", "100%"],
            &["API Integration", "In Progress", "Low", "45%"],
        ],
    )
}
