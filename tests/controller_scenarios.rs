//! End-to-end scenarios for the task list controller against real stores.

use chaos_todo::io::store::{FileStore, KeyValueStore, MemoryStore};
use chaos_todo::model::{Filter, Priority, TaskId};
use chaos_todo::ops::task_list::{ListOptions, TaskList};
use chaos_todo::util::clock::FixedClock;
use chaos_todo::view::headless::HeadlessSurface;
use chaos_todo::view::{Cue, Stats};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap())
}

#[test]
fn buy_milk_scenario() {
    let mut list = TaskList::new(MemoryStore::new(), ListOptions::default()).with_clock(clock());
    let mut surface = HeadlessSurface::approving();
    list.initialize(&mut surface);
    assert_eq!(surface.last_stats(), Some(Stats::default()));

    let id = list
        .add_task(&mut surface, "  Buy milk  ", Priority::High)
        .unwrap();
    let view = surface.last_list().unwrap();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].text, "Buy milk");
    assert_eq!(view.rows[0].age, "Just now");

    assert!(list.toggle_task(&mut surface, id));
    assert_eq!(
        surface.last_stats(),
        Some(Stats {
            total: 1,
            completed: 1,
            remaining: 0
        })
    );

    list.set_filter(&mut surface, "active");
    assert!(surface.last_list().unwrap().is_empty());

    assert_eq!(list.clear_completed(&mut surface), 1);
    assert_eq!(surface.prompts(), vec!["Clear 1 completed task?"]);
    assert!(list.tasks().is_empty());
}

#[test]
fn file_store_round_trip_across_sessions() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("nested/store.json");

    let ids: Vec<TaskId> = {
        let store = FileStore::open(&path).unwrap();
        let mut list = TaskList::new(store, ListOptions::default());
        let mut surface = HeadlessSurface::approving();
        list.initialize(&mut surface);
        let a = list.add_task(&mut surface, "first", Priority::Low).unwrap();
        let b = list.add_task(&mut surface, "second", Priority::High).unwrap();
        list.toggle_task(&mut surface, a);
        vec![b, a]
    };

    let store = FileStore::open(&path).unwrap();
    let mut list = TaskList::new(store, ListOptions::default());
    let mut surface = HeadlessSurface::declining();
    list.initialize(&mut surface);

    let loaded: Vec<TaskId> = list.tasks().iter().map(|t| t.id).collect();
    assert_eq!(loaded, ids);
    assert!(list.tasks()[1].completed);
    assert_eq!(list.tasks()[0].priority, Priority::High);

    // New ids stay unique after reload even with a clock behind the stored ids
    let mut list = list.with_clock(FixedClock(Utc.timestamp_millis_opt(0).unwrap()));
    let c = list.add_task(&mut surface, "third", Priority::Medium).unwrap();
    assert!(!ids.contains(&c));
}

#[test]
fn declined_confirmations_change_nothing() {
    let mut list = TaskList::new(MemoryStore::new(), ListOptions::default()).with_clock(clock());
    let mut surface = HeadlessSurface::declining();
    list.initialize(&mut surface);
    let id = list.add_task(&mut surface, "keep me", Priority::Medium).unwrap();
    list.toggle_task(&mut surface, id);
    let writes = list.store().writes();

    assert!(!list.delete_task(&mut surface, id));
    assert_eq!(list.clear_completed(&mut surface), 0);
    assert_eq!(list.tasks().len(), 1);
    assert_eq!(list.store().writes(), writes);
}

#[test]
fn filters_are_order_preserving_subsequences() {
    let mut list = TaskList::new(MemoryStore::new(), ListOptions::default()).with_clock(clock());
    let mut surface = HeadlessSurface::approving();
    list.initialize(&mut surface);
    let a = list.add_task(&mut surface, "a", Priority::High).unwrap();
    list.add_task(&mut surface, "b", Priority::Low).unwrap();
    let c = list.add_task(&mut surface, "c", Priority::High).unwrap();
    list.toggle_task(&mut surface, a);

    let texts = |list: &TaskList<MemoryStore>| -> Vec<String> {
        list.filtered_tasks().iter().map(|t| t.text.clone()).collect()
    };

    list.select_filter(&mut surface, Filter::High);
    assert_eq!(texts(&list), vec!["c", "a"]);
    list.select_filter(&mut surface, Filter::Active);
    assert_eq!(texts(&list), vec!["c", "b"]);
    list.select_filter(&mut surface, Filter::Completed);
    assert_eq!(texts(&list), vec!["a"]);
    list.set_filter(&mut surface, "nonsense");
    assert_eq!(texts(&list), vec!["c", "b", "a"]);

    // Filtering never touches the list itself
    assert_eq!(list.tasks()[0].id, c);
}

#[test]
fn ages_follow_the_clock() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let mut store = MemoryStore::new();
    let created = [
        now - Duration::minutes(45),
        now - Duration::hours(3),
        now - Duration::days(8),
    ];
    let raw = serde_json::to_string(
        &created
            .iter()
            .enumerate()
            .map(|(i, at)| {
                serde_json::json!({
                    "id": i as i64 + 1,
                    "text": format!("t{i}"),
                    "completed": false,
                    "priority": "medium",
                    "createdAt": at,
                })
            })
            .collect::<Vec<_>>(),
    )
    .unwrap();
    store.set("chaosToDoTasks", &raw).unwrap();

    let mut list = TaskList::new(store, ListOptions::default()).with_clock(FixedClock(now));
    let mut surface = HeadlessSurface::approving();
    list.initialize(&mut surface);

    let ages: Vec<String> = list.list_view().rows.into_iter().map(|r| r.age).collect();
    assert_eq!(ages[0], "45m ago");
    assert_eq!(ages[1], "3h ago");
    assert!(ages[2].contains("/2024"));
}

#[test]
fn empty_add_only_shakes() {
    let mut list = TaskList::new(MemoryStore::new(), ListOptions::default());
    let mut surface = HeadlessSurface::approving();
    list.initialize(&mut surface);
    surface.clear();

    assert_eq!(list.add_task(&mut surface, " \t ", Priority::High), None);
    assert_eq!(surface.cues(), vec![Cue::Shake]);
    assert_eq!(list.store().writes(), 0);
}
