pub mod confirm_popup;
pub mod filter_bar;
pub mod header;
pub mod help_overlay;
pub mod input_row;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Draw the whole screen for the current app state
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | input | filter bar | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + counters
            Constraint::Length(3), // bordered input line
            Constraint::Length(1), // filter bar
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0], now);
    input_row::render_input_row(frame, app, chunks[1], now);
    filter_bar::render_filter_bar(frame, app, chunks[2]);
    task_list::render_task_list(frame, app, chunks[3], now);
    status_row::render_status_row(frame, app, chunks[4]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    if let Some(prompt) = &app.prompt {
        confirm_popup::render_confirm_popup(frame, app, prompt, area);
    }
}

/// Fixed-size rect centered in `area`
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
