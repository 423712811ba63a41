//! Turn orchestration - the single-flight chat state machine
//!
//! A turn moves through `idle → awaiting response → streaming → idle`, or
//! `idle → awaiting response → idle` when the producer fails. New input is
//! accepted only when idle.

use crate::app::AppState;
use crate::constants::FALLBACK_TEXT;
use crate::messages::{ProducerCommand, ProducerResponse};
use crate::models::{Message, Reply};
use crate::renderer::StreamRenderer;

impl AppState {
    pub fn is_streaming(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn can_accept_input(&self) -> bool {
        !self.awaiting_response && !self.is_streaming()
    }

    /// Start a turn from the input box.
    ///
    /// Returns the command for the producer layer, or `None` when the input
    /// is blank or a turn is already in flight. A rejected submission leaves
    /// the conversation and the input untouched.
    pub fn begin_turn(&mut self) -> Option<ProducerCommand> {
        if !self.can_accept_input() {
            tracing::debug!("submission ignored, turn in flight");
            return None;
        }

        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.conversation.append(Message::user(text.clone()));
        self.input.clear();
        self.cursor_position = 0;
        self.scroll_back = 0;
        self.awaiting_response = true;

        let id = self.next_id();
        self.pending_turn_id = Some(id);
        tracing::info!(id, "Turn started");

        Some(ProducerCommand::Turn { id, text })
    }

    pub fn handle_producer_response(&mut self, response: ProducerResponse) {
        // Only process if it matches the pending turn
        if self.pending_turn_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "stale producer response dropped");
            return;
        }
        self.pending_turn_id = None;
        self.awaiting_response = false;

        match response {
            ProducerResponse::Reply { reply, .. } => self.start_stream(reply),
            ProducerResponse::Failed { .. } => {
                self.conversation
                    .append(Message::assistant(FALLBACK_TEXT, None));
            }
        }
    }

    fn start_stream(&mut self, reply: Reply) {
        let (message, renderer) = StreamRenderer::start(reply, self.chars_per_step);
        self.conversation.append(message);
        self.renderer = renderer;
    }

    /// Apply one typing frame. Returns true while more frames remain.
    pub fn advance_stream(&mut self) -> bool {
        let Some(renderer) = self.renderer.as_mut() else {
            return false;
        };

        let frame = renderer.advance();
        let finished = renderer.is_finished();

        if let Err(e) = self.conversation.replace_last(frame) {
            tracing::warn!(error = %e, "stream frame dropped");
        }
        if finished {
            tracing::debug!("stream finished");
            self.renderer = None;
        }
        !finished
    }
}
