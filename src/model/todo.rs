// File: ./src/model/todo.rs
//! Daily list: tasks and habits merged into one ordered sequence.
use crate::model::area::category_color;
use crate::model::item::{Habit, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const ROUTINE_TYPE: &str = "routine";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskItem {
    #[serde(flatten)]
    pub task: Task,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitItem {
    pub id: String,
    pub title: String,
    pub details: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<String>,
    pub streak: u32,
    pub time: Option<String>,
    pub inbox_only: bool,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "item_type", rename_all = "lowercase")]
pub enum TodoItem {
    Task(TaskItem),
    Habit(HabitItem),
}

impl TodoItem {
    pub fn from_task(task: &Task, completed_ids: &HashSet<String>) -> Self {
        TodoItem::Task(TaskItem {
            is_completed: completed_ids.contains(&task.id),
            task: task.clone(),
        })
    }

    pub fn from_habit(habit: &Habit, completed_ids: &HashSet<String>) -> Self {
        TodoItem::Habit(HabitItem {
            id: habit.id.clone(),
            title: habit.title.clone(),
            details: habit.description.clone(),
            kind: ROUTINE_TYPE.to_string(),
            color: category_color(habit.category.as_deref()).to_string(),
            duration: habit.duration.as_ref().map(|d| d.to_string()),
            category: habit.category.clone(),
            frequency: habit.frequency.clone(),
            streak: habit.streak,
            time: habit.time.clone(),
            inbox_only: habit.inbox_only,
            created_at: habit.created_at,
            is_completed: completed_ids.contains(&habit.id),
        })
    }

    pub fn id(&self) -> &str {
        match self {
            TodoItem::Task(t) => &t.task.id,
            TodoItem::Habit(h) => &h.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TodoItem::Task(t) => &t.task.title,
            TodoItem::Habit(h) => &h.title,
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            TodoItem::Task(t) => t.is_completed,
            TodoItem::Habit(h) => h.is_completed,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            TodoItem::Task(t) => t.task.created_at,
            TodoItem::Habit(h) => h.created_at,
        }
    }

    /// The display type: the task's own type, or "routine" for habits.
    pub fn kind(&self) -> String {
        match self {
            TodoItem::Task(t) => t.task.task_type.to_string(),
            TodoItem::Habit(h) => h.kind.clone(),
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            TodoItem::Task(_) => None,
            TodoItem::Habit(h) => Some(&h.color),
        }
    }

    /// Incomplete before completed, then newest first.
    pub fn compare_for_display(&self, other: &Self) -> Ordering {
        self.is_completed()
            .cmp(&other.is_completed())
            .then_with(|| other.created_at().cmp(&self.created_at()))
    }
}

pub fn combine_items(
    tasks: &[Task],
    habits: &[Habit],
    completed_task_ids: &HashSet<String>,
    completed_habit_ids: &HashSet<String>,
) -> Vec<TodoItem> {
    let mut items: Vec<TodoItem> = tasks
        .iter()
        .map(|t| TodoItem::from_task(t, completed_task_ids))
        .chain(
            habits
                .iter()
                .map(|h| TodoItem::from_habit(h, completed_habit_ids)),
        )
        .collect();

    // sort_by is stable: equal keys keep their input order.
    items.sort_by(|a, b| a.compare_for_display(b));

    log::debug!(
        "combined {} tasks and {} habits into {} items",
        tasks.len(),
        habits.len(),
        items.len()
    );
    items
}

pub fn filter_items(items: Vec<TodoItem>, show_completed: bool) -> Vec<TodoItem> {
    if show_completed {
        return items;
    }
    items.into_iter().filter(|i| !i.is_completed()).collect()
}
