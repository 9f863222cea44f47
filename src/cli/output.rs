use crate::util::text::sanitize_for_terminal;
use crate::view::{Stats, TaskRow};

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single row as a one-line summary
pub fn format_task_line(row: &TaskRow) -> String {
    let check = if row.completed { 'x' } else { ' ' };
    format!(
        "[{}] {} {} {} ({})",
        check,
        row.id,
        row.priority,
        sanitize_for_terminal(&row.text),
        row.age
    )
}

pub fn format_stats(stats: Stats) -> String {
    format!(
        "total: {}\ncompleted: {}\nremaining: {}",
        stats.total, stats.completed, stats.remaining
    )
}

pub fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
