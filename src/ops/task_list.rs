use std::collections::HashSet;

use chrono::Local;

use crate::io::store::KeyValueStore;
use crate::io::task_io::{load_tasks, save_tasks};
use crate::model::config::{AppConfig, DEFAULT_STORAGE_KEY};
use crate::model::filter::Filter;
use crate::model::task::{Priority, Task, TaskId};
use crate::util::clock::{Clock, SystemClock};
use crate::view::{Cue, ListView, Snapshot, Stats, Surface, TaskRow, format_relative_time};

/// Error type for task operations reported by command-style surfaces
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task text is empty")]
    EmptyText,
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
}

/// Settings the controller needs from config
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub storage_key: String,
    pub date_format: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ListOptions {
    fn from(config: &AppConfig) -> Self {
        ListOptions {
            storage_key: if config.storage.key.is_empty() {
                DEFAULT_STORAGE_KEY.to_string()
            } else {
                config.storage.key.clone()
            },
            date_format: config.ui.date_format.clone(),
        }
    }
}

/// The task list controller.
///
/// Owns the in-memory list (newest first) and the current filter. Every
/// mutation runs to completion in one call: mutate, persist, render, update
/// statistics. Surfaces are passed in per call.
pub struct TaskList<S> {
    tasks: Vec<Task>,
    filter: Filter,
    store: S,
    options: ListOptions,
    clock: Box<dyn Clock>,
    /// Highest id handed out or loaded this session
    last_id: i64,
}

impl<S: KeyValueStore> TaskList<S> {
    /// Create an empty controller over `store`. Call [`TaskList::initialize`]
    /// to load and show the stored list.
    pub fn new(store: S, options: ListOptions) -> Self {
        TaskList {
            tasks: Vec::new(),
            filter: Filter::All,
            store,
            options,
            clock: Box::new(SystemClock),
            last_id: 0,
        }
    }

    /// Replace the clock used for ids, timestamps and age labels
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Load stored tasks, reset the filter, render and show statistics.
    pub fn initialize(&mut self, surface: &mut dyn Surface) {
        self.tasks = load_tasks(&mut self.store, &self.options.storage_key);
        self.last_id = self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
        self.filter = Filter::All;
        self.render(surface);
        self.update_statistics(surface);
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a task at the head of the list.
    ///
    /// Text that trims to nothing is rejected with a shake cue and no change.
    pub fn add_task(
        &mut self,
        surface: &mut dyn Surface,
        raw_text: &str,
        priority: Priority,
    ) -> Option<TaskId> {
        let text = raw_text.trim();
        if text.is_empty() {
            tracing::debug!("rejected empty task text");
            surface.cue(Cue::Shake);
            return None;
        }

        let id = self.next_id();
        let task = Task::new(id, text.to_string(), priority, self.clock.now());
        self.tasks.insert(0, task);
        tracing::debug!("added task {id} ({priority})");

        self.persist(surface);
        surface.cue(Cue::ClearInput);
        self.render(surface);
        self.update_statistics(surface);
        surface.cue(Cue::FocusInput);
        Some(id)
    }

    /// Flip completion of task `id`. Unknown ids are ignored.
    /// Returns whether a task was toggled.
    pub fn toggle_task(&mut self, surface: &mut dyn Surface, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!("toggle of unknown task {id} ignored");
            return false;
        };
        task.completed = !task.completed;
        tracing::debug!("task {id} completed={}", task.completed);

        self.persist(surface);
        self.render(surface);
        self.update_statistics(surface);
        surface.cue(Cue::Completing(id));
        true
    }

    /// Delete task `id` after the user confirms. Unknown ids are ignored.
    /// Returns whether a task was removed.
    pub fn delete_task(&mut self, surface: &mut dyn Surface, id: TaskId) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!("delete of unknown task {id} ignored");
            return false;
        };
        let prompt = format!("Delete task: \"{}\"?", self.tasks[idx].text);
        if !surface.confirm(&prompt) {
            return false;
        }
        self.tasks.remove(idx);
        tracing::debug!("deleted task {id}");

        self.persist(surface);
        self.render(surface);
        self.update_statistics(surface);
        true
    }

    /// Remove every completed task after the user confirms.
    /// Returns how many were removed.
    pub fn clear_completed(&mut self, surface: &mut dyn Surface) -> usize {
        let count = self.tasks.iter().filter(|t| t.completed).count();
        if count == 0 {
            surface.notify("No completed tasks to clear!");
            return 0;
        }
        let plural = if count > 1 { "s" } else { "" };
        if !surface.confirm(&format!("Clear {count} completed task{plural}?")) {
            return 0;
        }
        self.tasks.retain(|t| !t.completed);
        tracing::debug!("cleared {count} completed task(s)");

        self.persist(surface);
        self.render(surface);
        self.update_statistics(surface);
        count
    }

    // -----------------------------------------------------------------------
    // Filtering and views
    // -----------------------------------------------------------------------

    /// Select a filter by name (unknown names select all) and re-render.
    pub fn set_filter(&mut self, surface: &mut dyn Surface, name: &str) {
        self.select_filter(surface, Filter::parse(name));
    }

    pub fn select_filter(&mut self, surface: &mut dyn Surface, filter: Filter) {
        self.filter = filter;
        self.render(surface);
    }

    /// Tasks visible under the current filter, in list order
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    /// Display rows for the current filter, age labels computed now
    pub fn list_view(&self) -> ListView {
        let now = self.clock.now().with_timezone(&Local);
        let rows = self
            .filtered_tasks()
            .into_iter()
            .map(|t| TaskRow {
                id: t.id,
                text: t.text.clone(),
                completed: t.completed,
                priority: t.priority,
                age: format_relative_time(t.created_at, &now, &self.options.date_format),
            })
            .collect();
        ListView {
            filter: self.filter,
            rows,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.render_list(&self.list_view());
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    pub fn update_statistics(&self, surface: &mut dyn Surface) {
        surface.show_stats(self.stats());
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            filter: self.filter,
            tasks: self.filtered_tasks().into_iter().cloned().collect(),
            stats: self.stats(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The whole list, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Millisecond timestamp, bumped past every id already used. Once ids
    /// reach `i64::MAX` the smallest positive id not in use is taken instead.
    fn next_id(&mut self) -> TaskId {
        let now_ms = self.clock.now().timestamp_millis();
        match self.last_id.checked_add(1) {
            Some(bumped) => {
                let id = now_ms.max(bumped);
                self.last_id = id;
                TaskId(id)
            }
            None => {
                let used: HashSet<i64> = self.tasks.iter().map(|t| t.id.0).collect();
                let id = (1..=i64::MAX)
                    .find(|id| !used.contains(id))
                    .unwrap_or(i64::MIN);
                tracing::warn!("task ids exhausted; reusing free id {id}");
                TaskId(id)
            }
        }
    }

    /// Write the whole list. A failed write keeps the in-memory change and
    /// tells the user; the operation still finishes rendering.
    fn persist(&mut self, surface: &mut dyn Surface) {
        if let Err(e) = save_tasks(&mut self.store, &self.options.storage_key, &self.tasks) {
            tracing::error!("could not save tasks: {e}");
            surface.notify(&format!("Could not save tasks: {e}"));
        }
    }
}
