use std::fmt;

use serde::Serialize;

use crate::model::task::{Priority, Task};

/// Named view predicate over the task list. Display state only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
    High,
}

impl Filter {
    /// Filters in filter-bar order
    pub const ALL: [Filter; 4] = [Filter::All, Filter::Active, Filter::Completed, Filter::High];

    /// Parse a filter name. Unrecognized names select `All`.
    pub fn parse(name: &str) -> Filter {
        match name.trim().to_ascii_lowercase().as_str() {
            "active" => Filter::Active,
            "completed" => Filter::Completed,
            "high" => Filter::High,
            _ => Filter::All,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
            Filter::High => "high",
        }
    }

    /// Whether `task` is visible under this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
            Filter::High => task.priority == Priority::High,
        }
    }

    /// The filter after this one in filter-bar order, wrapping around
    pub fn next(self) -> Filter {
        let idx = Filter::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Filter::ALL[(idx + 1) % Filter::ALL.len()]
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
