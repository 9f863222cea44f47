use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Title row plus the three animated counters
pub fn render_header(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let bg = app.theme.background;
    let title_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(app.theme.dim).bg(bg);

    let counter = |value: i64, color| {
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    };

    let title = Line::from(vec![
        Span::styled(" \u{2714} ", title_style),
        Span::styled("Chaos To-Do", title_style),
    ]);
    let counters = Line::from(vec![
        Span::styled(" Total ", label_style),
        counter(app.total.value_at(now), app.theme.text_bright),
        Span::styled("  Completed ", label_style),
        counter(app.completed.value_at(now), app.theme.green),
        Span::styled("  Remaining ", label_style),
        counter(app.remaining.value_at(now), app.theme.yellow),
    ]);

    let paragraph = Paragraph::new(vec![title, counters]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
