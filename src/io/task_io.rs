use std::collections::HashSet;

use crate::io::store::{KeyValueStore, StoreError};
use crate::model::task::Task;

/// Why a stored task list could not be used
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("not a task array: {0}")]
    Json(#[from] serde_json::Error),
    #[error("task {0} has empty text")]
    EmptyText(i64),
    #[error("duplicate task id {0}")]
    DuplicateId(i64),
}

/// Key under which an undecodable value is preserved
pub fn corrupt_key(key: &str) -> String {
    format!("{key}.corrupt")
}

/// Decode a stored task array and check the list invariants.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, DecodeError> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    for task in &tasks {
        if task.text.trim().is_empty() {
            return Err(DecodeError::EmptyText(task.id.0));
        }
        if !seen.insert(task.id) {
            return Err(DecodeError::DuplicateId(task.id.0));
        }
    }
    Ok(tasks)
}

/// Load the task list stored under `key`.
///
/// Never fails: an absent key, an unreadable store, or an undecodable value
/// all yield an empty list. An undecodable value is copied to
/// [`corrupt_key`] first.
pub fn load_tasks<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> Vec<Task> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::info!("no stored tasks under {key}");
            return Vec::new();
        }
        Err(e) => {
            tracing::error!("could not read stored tasks: {e}");
            return Vec::new();
        }
    };

    match decode_tasks(&raw) {
        Ok(tasks) => {
            tracing::info!("loaded {} task(s) from {key}", tasks.len());
            tasks
        }
        Err(e) => {
            tracing::warn!("stored tasks under {key} are unusable ({e}); starting empty");
            if let Err(e) = store.set(&corrupt_key(key), &raw) {
                tracing::error!("could not preserve unusable tasks: {e}");
            }
            Vec::new()
        }
    }
}

/// Overwrite the stored task list under `key` with `tasks`.
pub fn save_tasks<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    tasks: &[Task],
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(tasks)?;
    store.set(key, &raw)?;
    tracing::debug!("saved {} task(s) to {key}", tasks.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::task::{Priority, TaskId};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    const KEY: &str = "chaosToDoTasks";

    fn sample() -> Vec<Task> {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 3, 9, 9, 0, 0).unwrap();
        let mut done = Task::new(TaskId(2), "Walk dog".into(), Priority::Low, t1);
        done.completed = true;
        vec![
            Task::new(TaskId(3), "Buy milk".into(), Priority::High, t0),
            done,
        ]
    }

    #[test]
    fn save_then_load_reproduces_sequence() {
        let mut store = MemoryStore::new();
        save_tasks(&mut store, KEY, &sample()).unwrap();
        assert_eq!(load_tasks(&mut store, KEY), sample());
    }

    #[test]
    fn absent_key_loads_empty() {
        let mut store = MemoryStore::new();
        assert!(load_tasks(&mut store, KEY).is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn malformed_value_loads_empty_and_is_preserved() {
        let mut store = MemoryStore::new().with_entry(KEY, "{not an array");
        assert!(load_tasks(&mut store, KEY).is_empty());
        assert_eq!(
            store.get(&corrupt_key(KEY)).unwrap().as_deref(),
            Some("{not an array")
        );
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let mut store = MemoryStore::new().with_entry(KEY, r#"{"tasks":[]}"#);
        assert!(load_tasks(&mut store, KEY).is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"[
            {"id":1,"text":"a","completed":false,"priority":"low","createdAt":"2024-03-10T09:00:00Z"},
            {"id":1,"text":"b","completed":false,"priority":"low","createdAt":"2024-03-10T09:00:00Z"}
        ]"#;
        assert!(matches!(decode_tasks(raw), Err(DecodeError::DuplicateId(1))));
    }

    #[test]
    fn blank_text_is_rejected() {
        let raw = r#"[{"id":7,"text":"  ","completed":false,"priority":"low","createdAt":"2024-03-10T09:00:00Z"}]"#;
        assert!(matches!(decode_tasks(raw), Err(DecodeError::EmptyText(7))));
    }
}
