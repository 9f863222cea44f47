use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority, chosen once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities in selector order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// The label used on badges and in storage
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Next priority in selector order, wrapping around
    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Stable task identifier. Derived from creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// A single to-do item, in its persisted shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never empty
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an open task. `text` must already be trimmed and non-empty.
    pub fn new(id: TaskId, text: String, priority: Priority, created_at: DateTime<Utc>) -> Self {
        Task {
            id,
            text,
            completed: false,
            priority,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_storage_field_names() {
        let created = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();
        let task = Task::new(TaskId(1710063000000), "Buy milk".into(), Priority::High, created);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 1710063000000i64);
        assert_eq!(json["text"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["priority"], "high");
        assert_eq!(json["createdAt"], "2024-03-10T09:30:00Z");
    }

    #[test]
    fn reads_browser_style_timestamps() {
        let raw = r#"{"id":1,"text":"x","completed":true,"priority":"low","createdAt":"2024-03-10T09:30:00.000Z"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(task.completed);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(
            task.created_at,
            Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn rejects_unknown_priority() {
        let raw = r#"{"id":1,"text":"x","completed":false,"priority":"urgent","createdAt":"2024-03-10T09:30:00Z"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn priority_parse_and_cycle() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::High.next(), Priority::Low);
        assert_eq!(Priority::Low.next(), Priority::Medium);
    }
}
