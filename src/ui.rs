use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Row, Table, Wrap};

use crate::models::{Message, Role, TableData};

/// Cursor glyph appended to a message that is still typing out
pub const TYPING_CURSOR: &str = "▌";

/// Role label color
pub fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Cyan,
        Role::Assistant => Color::Green,
    }
}

/// Transcript lines for one message: header, body, then the table once
/// streaming has finished
pub fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let icon = match message.role {
        Role::User => "😄",
        Role::Assistant => "😊",
    };
    lines.push(Line::from(vec![
        Span::raw(format!("{} ", icon)),
        Span::styled(
            message.role.label(),
            Style::default().fg(role_color(message.role)).bold(),
        ),
        Span::styled(
            format!("  {}", message.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let mut body: Vec<Line<'static>> = message
        .content
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();

    if message.is_streaming {
        let cursor = Span::styled(TYPING_CURSOR, Style::default().fg(Color::Green));
        if let Some(last) = body.last_mut() {
            last.spans.push(cursor);
        }
    }
    lines.extend(body);

    if let Some(table) = message.visible_table() {
        lines.push(Line::from(""));
        lines.extend(table_lines(table));
    }

    lines.push(Line::from(""));
    lines
}

/// Table rendered through the `Table` widget into an off-screen buffer, then
/// read back as styled lines so it scrolls with the transcript
pub fn table_lines(table: &TableData) -> Vec<Line<'static>> {
    let widths: Vec<u16> = (0..table.column_count())
        .map(|col| {
            std::iter::once(&table.headers()[col])
                .chain(table.rows().iter().map(|row| &row[col]))
                .map(|cell| Span::raw(cell.as_str()).width())
                .max()
                .unwrap_or(0) as u16
        })
        .collect();

    let spacing = COLUMN_SPACING * widths.len().saturating_sub(1) as u16;
    let width = widths.iter().sum::<u16>() + spacing + 2;
    let height = table.rows().len() as u16 + 3;
    let area = Rect::new(0, 0, width, height);

    let header = Row::new(table.headers().iter().cloned()).style(Style::default().bold());
    let rows = table.rows().iter().map(|row| Row::new(row.iter().cloned()));
    let widget = Table::new(rows, widths.iter().map(|w| Constraint::Length(*w)))
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(Block::bordered().border_style(Style::default().fg(Color::Green)));

    let mut buf = Buffer::empty(area);
    Widget::render(widget, area, &mut buf);
    buffer_lines(&buf)
}

const COLUMN_SPACING: u16 = 2;

/// Read a rendered buffer back into lines, merging runs of equal style
fn buffer_lines(buf: &Buffer) -> Vec<Line<'static>> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut skip = 0;
            for x in area.left()..area.right() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let cell = &buf[(x, y)];
                let symbol = cell.symbol();
                skip = Span::raw(symbol).width().saturating_sub(1);
                match spans.last_mut() {
                    Some(last) if last.style == cell.style() => {
                        last.content.to_mut().push_str(symbol);
                    }
                    _ => spans.push(Span::styled(symbol.to_string(), cell.style())),
                }
            }
            Line::from(spans)
        })
        .collect()
}

/// Rows the lines occupy once word-wrapped to `width` columns
pub fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let rows = Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1));
    u16::try_from(rows).unwrap_or(u16::MAX)
}
