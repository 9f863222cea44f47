use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::text::{display_width, sanitize_for_terminal};

/// Bordered input line with the priority selector in the title
pub fn render_input_row(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let bg = app.theme.background;
    let editing = app.mode == Mode::Edit;
    let shaking = app.cues.is_shaking(now);

    let border_color = if shaking {
        app.theme.red
    } else if editing {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let priority_style = Style::default()
        .fg(app.theme.priority_color(app.priority))
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Line::from(vec![
            Span::styled(" New task ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled(format!("[{}] ", app.priority), priority_style),
        ]))
        .style(Style::default().bg(bg));

    // Shake nudges the whole text left/right by a couple of cells
    let offset = app.cues.shake_offset(now);
    let pad = (2 + offset).max(0) as usize;

    let text = sanitize_for_terminal(&app.input.buffer);
    let line = if text.is_empty() && !editing {
        Line::from(Span::styled(
            format!("{}press a to add a task", " ".repeat(pad)),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::from(Span::styled(
            format!("{}{}", " ".repeat(pad), text),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
    };

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if editing && app.prompt.is_none() && inner.width > 0 {
        let col = pad + display_width(&sanitize_for_terminal(&app.input.buffer[..app.input.cursor]));
        let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}
