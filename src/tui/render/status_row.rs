use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::text::{display_width, sanitize_for_terminal, truncate_to_width};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    // A pending notice wins over the key hints
    if let Some(notice) = &app.notice {
        let text = truncate_to_width(&format!(" {}", sanitize_for_terminal(notice)), width);
        let line = Line::from(Span::styled(
            text,
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let (label, hint) = match app.mode {
        Mode::Navigate => ("", "a add  space toggle  d delete  ? help  q quit"),
        Mode::Edit => ("-- INSERT --", "Enter add  Tab priority  Esc done"),
        Mode::Confirm => ("-- CONFIRM --", "y yes  n no"),
    };

    let mut spans = vec![Span::styled(
        format!(" {label}"),
        Style::default().fg(app.theme.highlight).bg(bg),
    )];
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
