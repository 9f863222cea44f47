use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::model::filter::Filter;
use crate::model::{Priority, TaskId, UiConfig};
use crate::tui::app::App;
use crate::view::{ListView, TaskRow};

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return it.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A row as the controller would hand it over for a fresh task.
pub fn row(id: i64, text: &str, priority: Priority, completed: bool) -> TaskRow {
    TaskRow {
        id: TaskId(id),
        text: text.to_string(),
        completed,
        priority,
        age: "Just now".into(),
    }
}

/// An App showing `rows` under the All filter.
pub fn test_app(rows: &[TaskRow]) -> App {
    let mut app = App::new(&UiConfig::default());
    app.set_view(ListView {
        filter: Filter::All,
        rows: rows.to_vec(),
    });
    app
}
