//! View model handed from the controller to presentation surfaces.
//!
//! The controller never formats markup or touches a terminal. It builds the
//! plain values below and hands them to a [`Surface`], which decides how to
//! show them.

pub mod animation;
pub mod headless;
pub mod html;
pub mod relative_time;

use serde::Serialize;

use crate::model::filter::Filter;
use crate::model::task::{Priority, Task, TaskId};

pub use relative_time::format_relative_time;

/// Aggregate counts over the whole list (not the filtered view)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl Stats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Stats {
            total,
            completed,
            remaining: total - completed,
        }
    }
}

/// One display row. `text` is raw user text; escaping belongs to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    /// Relative-time label ("5m ago", "Yesterday", ...)
    pub age: String,
}

/// What the list area should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub filter: Filter,
    pub rows: Vec<TaskRow>,
}

impl ListView {
    /// Whether the empty-state affordance should be visible
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Immutable picture of the controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub filter: Filter,
    /// Tasks visible under `filter`, in list order
    pub tasks: Vec<Task>,
    pub stats: Stats,
}

/// Cosmetic, fire-and-forget affordances. Nothing reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Rejected input: wiggle the input line
    Shake,
    ClearInput,
    FocusInput,
    /// Briefly highlight a row whose completion just flipped
    Completing(TaskId),
}

/// Anything that can present the task list and talk to the user
pub trait Surface {
    fn render_list(&mut self, view: &ListView);
    fn show_stats(&mut self, stats: Stats);
    /// Block until the user answers; true means go ahead
    fn confirm(&mut self, message: &str) -> bool;
    fn notify(&mut self, message: &str);
    fn cue(&mut self, cue: Cue);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn render_list(&mut self, view: &ListView) {
        (**self).render_list(view)
    }

    fn show_stats(&mut self, stats: Stats) {
        (**self).show_stats(stats)
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }

    fn cue(&mut self, cue: Cue) {
        (**self).cue(cue)
    }
}
