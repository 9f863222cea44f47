use crate::util::text::escape_html;
use crate::view::{ListView, Stats, TaskRow};

/// Render the list area as HTML. All user text is escaped.
pub fn render_list_html(view: &ListView) -> String {
    if view.is_empty() {
        return format!(
            "<div id=\"empty-state\" class=\"empty-state\">No tasks</div>\n\
             <div id=\"tasks-list\" data-filter=\"{}\"></div>\n",
            view.filter
        );
    }

    let mut out = String::from(
        "<div id=\"empty-state\" class=\"empty-state hidden\">No tasks</div>\n",
    );
    out.push_str(&format!(
        "<div id=\"tasks-list\" data-filter=\"{}\">\n",
        view.filter
    ));
    for row in &view.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str("</div>\n");
    out
}

fn render_row(row: &TaskRow) -> String {
    let done = if row.completed { " completed" } else { "" };
    let checked = if row.completed { " checked" } else { "" };
    format!(
        r#"<div class="task-item{done} priority-{p}" data-id="{id}"><div class="task-checkbox{checked}" data-action="toggle"></div><div class="task-content"><div class="task-text">{text}</div><div class="task-meta"><span class="priority-badge {p}">{p}</span><span class="task-time">{age}</span></div></div><button class="task-delete" data-action="delete">&times;</button></div>"#,
        p = row.priority,
        id = row.id,
        text = escape_html(&row.text),
        age = escape_html(&row.age),
    )
}

/// Render the three counters as HTML
pub fn render_stats_html(stats: Stats) -> String {
    format!(
        "<div class=\"stats\"><span id=\"total-tasks\">{}</span><span id=\"completed-tasks\">{}</span><span id=\"remaining-tasks\">{}</span></div>\n",
        stats.total, stats.completed, stats.remaining
    )
}
