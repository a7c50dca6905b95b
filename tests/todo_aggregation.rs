// Tests for merging tasks and habits into the daily list.
use chrono::{DateTime, TimeZone, Utc};
use life_harmony::model::{
    Habit, HabitDuration, Task, TaskType, TodoItem, combine_items, filter_items,
};
use std::collections::HashSet;

fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap()
}

fn task(id: &str, hour: u32) -> Task {
    let mut t = Task::new(id, ts(hour));
    t.id = id.to_string();
    t
}

fn habit(id: &str, hour: u32) -> Habit {
    let mut h = Habit::new(id, ts(hour));
    h.id = id.to_string();
    h
}

fn ids(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn order(items: &[TodoItem]) -> Vec<&str> {
    items.iter().map(|i| i.id()).collect()
}

#[test]
fn test_incomplete_before_completed_regardless_of_age() {
    // Completed one is newer, still sinks.
    let tasks = vec![task("old_open", 8), task("new_done", 20)];
    let items = combine_items(&tasks, &[], &ids(&["new_done"]), &HashSet::new());

    assert_eq!(order(&items), vec!["old_open", "new_done"]);
    assert!(!items[0].is_completed());
    assert!(items[1].is_completed());
}

#[test]
fn test_newest_first_within_same_status() {
    let tasks = vec![task("t1", 8), task("t2", 12)];
    let habits = vec![habit("h1", 10)];
    let items = combine_items(&tasks, &habits, &HashSet::new(), &HashSet::new());

    assert_eq!(order(&items), vec!["t2", "h1", "t1"]);
}

#[test]
fn test_equal_keys_keep_input_order() {
    let tasks = vec![task("a", 9), task("b", 9)];
    let habits = vec![habit("c", 9)];
    let items = combine_items(&tasks, &habits, &HashSet::new(), &HashSet::new());

    assert_eq!(order(&items), vec!["a", "b", "c"]);
}

#[test]
fn test_completion_sets_are_per_kind() {
    // Same id in both lists: only the habit is marked through the habit set.
    let tasks = vec![task("shared", 9)];
    let habits = vec![habit("shared", 8)];
    let items = combine_items(&tasks, &habits, &HashSet::new(), &ids(&["shared"]));

    match (&items[0], &items[1]) {
        (TodoItem::Task(t), TodoItem::Habit(h)) => {
            assert!(!t.is_completed);
            assert!(h.is_completed);
        }
        other => panic!("unexpected order: {:?}", other),
    }
}

#[test]
fn test_habit_projection() {
    let mut h = habit("run", 7);
    h.description = Some("5km around the park".to_string());
    h.category = Some("health".to_string());
    h.duration = Some(HabitDuration::from(30u32));
    h.frequency = Some("daily".to_string());
    h.streak = 4;

    let items = combine_items(&[], &[h], &HashSet::new(), &HashSet::new());
    let TodoItem::Habit(item) = &items[0] else {
        panic!("expected a habit item");
    };

    assert_eq!(item.details, Some("5km around the park".to_string()));
    assert_eq!(item.kind, "routine");
    assert_eq!(items[0].kind(), "routine");
    assert_eq!(item.color, "#34A853");
    assert_eq!(item.duration, Some("30".to_string()));
    assert_eq!(item.streak, 4);
    assert_eq!(item.frequency, Some("daily".to_string()));
}

#[test]
fn test_habit_colors_by_area() {
    let cases = [
        (Some("business"), "#4285F4"),
        (Some("finances"), "#FBBC04"),
        (Some("spirituality"), "#9b87f5"),
        (Some("family"), "#FF9500"),
        (Some("gardening"), "#9b87f5"),
        (None, "#9b87f5"),
    ];
    for (category, expected) in cases {
        let mut h = habit("h", 7);
        h.category = category.map(str::to_string);
        let item = TodoItem::from_habit(&h, &HashSet::new());
        assert_eq!(item.color(), Some(expected), "category {:?}", category);
    }
}

#[test]
fn test_duration_normalization_number_vs_string() {
    let mut numeric = habit("n", 7);
    numeric.duration = Some(HabitDuration::Number(30.0));
    let mut text = habit("s", 7);
    text.duration = Some(HabitDuration::from("30"));
    let mut none = habit("x", 7);
    none.duration = None;

    let items = combine_items(&[], &[numeric, text, none], &HashSet::new(), &HashSet::new());
    let durations: Vec<Option<String>> = items
        .iter()
        .map(|i| match i {
            TodoItem::Habit(h) => h.duration.clone(),
            TodoItem::Task(_) => unreachable!(),
        })
        .collect();

    assert_eq!(durations[0], Some("30".to_string()));
    assert_eq!(durations[0], durations[1]);
    assert_eq!(durations[2], None);
}

#[test]
fn test_task_fields_pass_through() {
    let mut t = task("meet", 9);
    t.task_type = TaskType::Meeting;
    t.time = Some("14:00".to_string());
    t.location = Some("Escritório".to_string());

    let items = combine_items(&[t.clone()], &[], &HashSet::new(), &HashSet::new());
    let TodoItem::Task(item) = &items[0] else {
        panic!("expected a task item");
    };
    assert_eq!(item.task, t);
    assert_eq!(items[0].kind(), "meeting");
    assert_eq!(items[0].color(), None);
}

#[test]
fn test_filter_hides_completed_and_keeps_order() {
    let tasks = vec![task("a", 8), task("b", 9), task("c", 10)];
    let items = combine_items(&tasks, &[], &ids(&["b"]), &HashSet::new());

    let all = filter_items(items.clone(), true);
    assert_eq!(all, items);

    let pending = filter_items(items, false);
    assert_eq!(order(&pending), vec!["c", "a"]);
}

#[test]
fn test_filter_is_idempotent() {
    let tasks = vec![task("a", 8), task("b", 9)];
    let habits = vec![habit("h", 10)];
    let items = combine_items(&tasks, &habits, &ids(&["a"]), &ids(&["h"]));

    let once = filter_items(items, false);
    let twice = filter_items(once.clone(), false);
    assert_eq!(once, twice);
}

#[test]
fn test_serialized_shape() {
    let mut h = habit("h", 7);
    h.duration = Some(HabitDuration::Number(15.0));
    let items = combine_items(&[task("t", 8)], &[h], &ids(&["t"]), &HashSet::new());
    let json = serde_json::to_value(&items).unwrap();

    assert_eq!(json[0]["item_type"], "habit");
    assert_eq!(json[0]["type"], "routine");
    assert_eq!(json[0]["duration"], "15");
    assert_eq!(json[1]["item_type"], "task");
    assert_eq!(json[1]["type"], "task");
    assert_eq!(json[1]["is_completed"], true);
}

#[test]
fn test_empty_inputs() {
    let items = combine_items(&[], &[], &HashSet::new(), &HashSet::new());
    assert!(items.is_empty());
    assert!(filter_items(items, false).is_empty());
}
