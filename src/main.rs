//! Consult TUI - Actor-based chat client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - turn state machine and typing animation
//! - Producer Layer (Tokio) - async reply production

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use consult_tui::constants::APP_NAME;
use consult_tui::messages::ui_events::key_to_ui_event;
use consult_tui::ui::{message_lines, wrapped_height};
use consult_tui::{
    AppActor, AppState, Clock, Config, HttpProducer, MockProducer, ProducerActor,
    ProducerCommand, ProducerKind, ProducerResponse, RenderState, ResponseProducer, TokioClock,
    TurnStage, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file; stdout belongs to the terminal UI
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "consult.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(producer = ?config.producer, "Starting {}", APP_NAME);

    let clock: Arc<dyn Clock> = Arc::new(TokioClock);
    let producer = build_producer(&config, Arc::clone(&clock));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (prod_cmd_tx, prod_cmd_rx) = mpsc::unbounded_channel::<ProducerCommand>();
    let (prod_resp_tx, prod_resp_rx) = mpsc::unbounded_channel::<ProducerResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn producer actor
    let producer_actor = ProducerActor::new(producer, prod_resp_tx);
    tokio::spawn(producer_actor.run(prod_cmd_rx));

    // Spawn app actor
    let mut state = AppState::new(config.chars_per_step);
    if config.show_welcome {
        state = state.with_welcome();
    }
    let app_actor = AppActor::new(state, clock, config.typing_delay(), prod_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, prod_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

fn build_producer(config: &Config, clock: Arc<dyn Clock>) -> Arc<dyn ResponseProducer> {
    match config.producer {
        ProducerKind::Mock => Arc::new(
            MockProducer::new(clock).with_delays(config.submit_delay(), config.fetch_delay()),
        ),
        ProducerKind::MockFail => Arc::new(
            MockProducer::new(clock)
                .with_delays(config.submit_delay(), config.fetch_delay())
                .failing_on(TurnStage::Fetch),
        ),
        ProducerKind::Http => Arc::new(HttpProducer::new(
            &config.base_url,
            config.request_timeout(),
        )),
    }
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.show_help) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let input_rows = state.input.split('\n').count().clamp(1, 4) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Title
            Constraint::Min(3),                 // Transcript
            Constraint::Length(input_rows + 2), // Input
            Constraint::Length(1),              // Status bar
        ])
        .split(area);

    draw_title(f, chunks[0]);
    draw_transcript(f, state, chunks[1]);
    draw_input(f, state, chunks[2]);
    draw_status_bar(f, state, chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Line::from(Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Black).bg(Color::Green).bold(),
    ));
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

fn draw_transcript(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Conversation ");

    let mut lines: Vec<Line> = state.messages.iter().flat_map(message_lines).collect();

    if state.awaiting_response {
        lines.push(Line::from(Span::styled(
            "😊 Thinking...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No messages yet. Type below and press Enter.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the newest line in view unless the user scrolled back
    let inner = block.inner(area);
    let total = wrapped_height(&lines, inner.width);
    let bottom = total.saturating_sub(inner.height);
    let offset = bottom.saturating_sub(state.scroll_back);

    let transcript = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(transcript, area);
}

fn draw_input(f: &mut Frame, state: &RenderState, area: Rect) {
    let enabled = state.input_enabled();

    let (border_style, title) = if enabled {
        (Style::default().fg(Color::Green), " Message (Enter to send) ")
    } else {
        (Style::default().fg(Color::DarkGray), " Message (waiting…) ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let content: Text = if state.input.is_empty() && enabled {
        Text::styled("Type your message here...", Style::default().fg(Color::DarkGray))
    } else {
        Text::from(state.input.as_str())
    };

    let input = Paragraph::new(content)
        .block(block)
        .style(if enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        });
    f.render_widget(input, area);

    // Cursor
    if enabled {
        let before = &state.input[..state.cursor_position.min(state.input.len())];
        let row = before.matches('\n').count() as u16;
        let col = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0) as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let max_y = area.y + area.height.saturating_sub(2);
        let cursor_x = (area.x + col + 1).min(max_x);
        let cursor_y = (area.y + row + 1).min(max_y);
        f.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.awaiting_response {
        " Waiting for reply... "
    } else if state.streaming {
        " Typing... "
    } else {
        " Enter:send | Alt+Enter:newline | ↑/↓ PgUp/PgDn:scroll | F1:help | Esc:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 CONSULT AI - Keyboard Shortcuts

 MESSAGE
   Enter              Send message
   Alt+Enter          New line
   ← / →              Move cursor
   Backspace          Delete character

 CONVERSATION
   ↑ / ↓              Scroll one line
   PgUp / PgDn        Scroll one page

 GENERAL
   F1                 Toggle this help
   Esc / Ctrl+C       Quit

 Input is disabled while a reply is on its way.

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
