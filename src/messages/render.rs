//! Render state - data structure sent from App layer to UI for rendering

use crate::models::Message;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    // Transcript
    pub messages: Vec<Message>,
    /// Lines scrolled back from the bottom of the transcript
    pub scroll_back: u16,

    // Input box
    pub input: String,
    pub cursor_position: usize,

    // Turn status
    pub awaiting_response: bool,
    pub streaming: bool,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    /// Input is disabled while a turn is in flight or a reply is typing out
    pub fn input_enabled(&self) -> bool {
        !self.awaiting_response && !self.streaming
    }
}
