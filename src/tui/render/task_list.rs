use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::filter::Filter;
use crate::tui::app::{App, Mode};
use crate::util::text::{display_width, sanitize_for_terminal, truncate_to_width};
use crate::view::TaskRow;

/// Empty-state copy for each filter
fn empty_message(filter: Filter) -> (&'static str, &'static str) {
    match filter {
        Filter::All => ("No tasks yet", "press a to add your first task"),
        Filter::Active => ("Nothing active", "everything is done"),
        Filter::Completed => ("Nothing completed", "toggle a task with space"),
        Filter::High => ("No high priority tasks", "Tab cycles priority while typing"),
    }
}

/// Render the visible rows, or the empty state when there are none
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let bg = app.theme.background;
    if area.height == 0 {
        return;
    }

    if app.view.is_empty() {
        let (title, hint) = empty_message(app.view.filter);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default()
                    .fg(app.theme.text)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {hint}"),
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    // Keep the cursor in view
    let height = area.height as usize;
    let scroll = app.cursor.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = app
        .view
        .rows
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, row)| {
            let selected = i == app.cursor && app.mode == Mode::Navigate;
            let completing = app.cues.is_completing(row.id, now);
            render_row(app, row, selected, completing, area.width as usize)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_row<'a>(
    app: &App,
    row: &'a TaskRow,
    selected: bool,
    completing: bool,
    width: usize,
) -> Line<'a> {
    let row_bg = if completing {
        app.theme.completing_bg
    } else if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let marker = if selected { "\u{25B8}" } else { " " };
    let checkbox = if row.completed { "[x]" } else { "[ ]" };
    let badge = format!("{:<6}", row.priority.label());
    let age = format!(" {} ", row.age);

    // marker + space + checkbox + space + badge + space
    let fixed = 1 + 1 + 3 + 1 + badge.len() + 1;
    let text_room = width.saturating_sub(fixed + display_width(&age));
    let text = truncate_to_width(&sanitize_for_terminal(&row.text), text_room);
    let pad = text_room.saturating_sub(display_width(&text));

    let mut text_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
    if row.completed {
        text_style = text_style
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    Line::from(vec![
        Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
        Span::styled(" ", Style::default().bg(row_bg)),
        Span::styled(
            checkbox,
            Style::default()
                .fg(if row.completed {
                    app.theme.green
                } else {
                    app.theme.text
                })
                .bg(row_bg),
        ),
        Span::styled(" ", Style::default().bg(row_bg)),
        Span::styled(
            badge,
            Style::default()
                .fg(app.theme.priority_color(row.priority))
                .bg(row_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", Style::default().bg(row_bg)),
        Span::styled(text, text_style),
        Span::styled(" ".repeat(pad), Style::default().bg(row_bg)),
        Span::styled(age, Style::default().fg(app.theme.dim).bg(row_bg)),
    ])
}
