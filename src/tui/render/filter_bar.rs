use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::filter::Filter;
use crate::tui::app::App;

fn filter_label(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "All",
        Filter::Active => "Active",
        Filter::Completed => "Completed",
        Filter::High => "High priority",
    }
}

/// Render the filter buttons; the active one is highlighted
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];

    for (i, filter) in Filter::ALL.iter().enumerate() {
        let is_current = app.view.filter == *filter;
        let style = if is_current {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        spans.push(Span::styled(
            format!("{}", i + 1),
            Style::default().fg(app.theme.cyan).bg(bg),
        ));
        spans.push(Span::styled(format!(" {} ", filter_label(*filter)), style));
        spans.push(Span::styled("  ", Style::default().bg(bg)));
    }

    spans.push(Span::styled(
        "C clear completed",
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn lists_every_filter() {
        let app = test_app(&[]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        assert!(output.starts_with(" 1 All   2 Active   3 Completed   4 High priority"));
    }

    #[test]
    fn current_filter_is_highlighted() {
        let mut app = test_app(&[]);
        app.view.filter = Filter::Active;
        let buf = render_to_buffer(TERM_W, 1, |frame, area| {
            render_filter_bar(frame, &app, area);
        });
        // " 1 All   2 Active" puts the space before "Active" at column 10
        assert_eq!(buf[(10, 0)].bg, app.theme.selection_bg);
        assert_eq!(buf[(3, 0)].bg, app.theme.background);
    }
}
