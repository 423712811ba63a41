//! App actor - message loop processing UI events, producer responses and
//! typing ticks

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::clock::Clock;
use crate::messages::{ProducerCommand, ProducerResponse, RenderState, UiEvent};

/// App actor that owns the chat state and orchestrates turns
pub struct AppActor {
    state: AppState,
    clock: Arc<dyn Clock>,
    typing_delay: Duration,
    producer_tx: mpsc::UnboundedSender<ProducerCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        clock: Arc<dyn Clock>,
        typing_delay: Duration,
        producer_tx: mpsc::UnboundedSender<ProducerCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            clock,
            typing_delay,
            producer_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut producer_rx: mpsc::UnboundedReceiver<ProducerResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        // Pending typing tick, kept across iterations so other events
        // don't restart the delay.
        let mut tick: Option<BoxFuture<'static, ()>> = None;

        loop {
            if tick.is_none() && self.state.is_streaming() {
                tick = Some(self.clock.sleep(self.typing_delay));
            }

            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.producer_tx.send(ProducerCommand::Shutdown);
                        break;
                    }
                }
                Some(response) = producer_rx.recv() => {
                    self.state.handle_producer_response(response);
                }
                _ = wait_tick(&mut tick), if tick.is_some() => {
                    tick = None;
                    self.state.advance_stream();
                }
                else => break,
            }

            let _ = self.render_tx.send(self.state.to_render_state());
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Input editing
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Newline => self.state.insert_newline(),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Turn
            UiEvent::Send => {
                if let Some(cmd) = self.state.begin_turn() {
                    let _ = self.producer_tx.send(cmd);
                }
            }

            // Scrolling
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),
            UiEvent::PageUp => self.state.page_up(),
            UiEvent::PageDown => self.state.page_down(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

/// Resolve when the pending tick fires; never resolves without one
async fn wait_tick(tick: &mut Option<BoxFuture<'static, ()>>) {
    match tick {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::RecordingClock;
    use crate::constants::MOCK_REPLY_TEXT;
    use crate::models::Reply;

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        producer_tx: mpsc::UnboundedSender<ProducerResponse>,
        producer_rx: mpsc::UnboundedReceiver<ProducerCommand>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
        clock: RecordingClock,
    }

    fn spawn_actor() -> Harness {
        let clock = RecordingClock::default();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(
            AppState::new(1),
            Arc::new(clock.clone()),
            Duration::from_millis(20),
            cmd_tx,
            render_tx,
        );
        tokio::spawn(actor.run(ui_rx, resp_rx));

        Harness {
            ui_tx,
            producer_tx: resp_tx,
            producer_rx: cmd_rx,
            render_rx,
            clock,
        }
    }

    fn type_and_send(h: &Harness, text: &str) {
        for c in text.chars() {
            h.ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        h.ui_tx.send(UiEvent::Send).unwrap();
    }

    #[tokio::test]
    async fn test_stream_ticks_use_typing_delay() {
        let mut h = spawn_actor();
        type_and_send(&h, "hi");

        let cmd = h.producer_rx.recv().await.unwrap();
        let ProducerCommand::Turn { id, text } = cmd else {
            panic!("expected a turn command");
        };
        assert_eq!(text, "hi");

        h.producer_tx
            .send(ProducerResponse::Reply {
                id,
                reply: Reply::new(MOCK_REPLY_TEXT, None),
            })
            .unwrap();

        let final_state = loop {
            let state = h.render_rx.recv().await.unwrap();
            if state.messages.len() == 2 && !state.streaming {
                break state;
            }
        };
        assert_eq!(final_state.messages[1].content, MOCK_REPLY_TEXT);

        let ticks = MOCK_REPLY_TEXT.chars().count() + 1;
        assert_eq!(h.clock.requested(), vec![Duration::from_millis(20); ticks]);

        h.ui_tx.send(UiEvent::Quit).unwrap();
        assert_eq!(h.producer_rx.recv().await, Some(ProducerCommand::Shutdown));
    }

    #[tokio::test]
    async fn test_send_while_awaiting_emits_no_command() {
        let mut h = spawn_actor();
        type_and_send(&h, "first");
        type_and_send(&h, "second");
        h.ui_tx.send(UiEvent::Quit).unwrap();

        let mut commands = Vec::new();
        while let Some(cmd) = h.producer_rx.recv().await {
            commands.push(cmd);
        }
        assert_eq!(
            commands,
            vec![
                ProducerCommand::Turn { id: 1, text: "first".to_string() },
                ProducerCommand::Shutdown,
            ]
        );
    }
}
