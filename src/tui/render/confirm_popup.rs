use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::util::text::{display_width, sanitize_for_terminal};

use super::centered_rect_fixed;

/// Render a yes/no confirmation popup over everything else
pub fn render_confirm_popup(frame: &mut Frame, app: &App, prompt: &str, area: Rect) {
    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4).max(1) as usize;

    let prompt = sanitize_for_terminal(prompt);
    let prompt_rows = display_width(&prompt).div_ceil(inner_w).max(1);

    let lines = vec![
        Line::from(Span::styled(" Confirm", header_style)),
        Line::from(""),
        Line::from(Span::styled(format!(" {prompt}"), text_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", header_style),
            Span::styled(" yes  ", text_style),
            Span::styled("n", header_style),
            Span::styled(" no", dim_style),
        ]),
    ];

    let popup_h = (4 + prompt_rows as u16 + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_prompt_and_answers() {
        let app = test_app(&[]);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, "Delete task: \"Buy milk\"?", area);
        });
        assert!(output.contains("Confirm"));
        assert!(output.contains("Delete task: \"Buy milk\"?"));
        assert!(output.contains("y yes  n no"));
    }

    #[test]
    fn fits_in_tiny_terminal() {
        let app = test_app(&[]);
        let output = render_to_string(10, 4, |frame, area| {
            render_confirm_popup(frame, &app, "Clear 3 completed task(s)?", area);
        });
        assert!(output.lines().count() <= 4);
    }
}
