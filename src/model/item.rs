// File: ./src/model/item.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskType {
    #[default]
    Task,
    Event,
    Habit,
    Meeting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>, // "HH:MM"
    #[serde(default)]
    pub location: Option<String>,
    // Free string: areas, but also "social" from the event extractor.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub inbox_only: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            title: title.to_string(),
            details: None,
            task_type: TaskType::Task,
            scheduled_date: None,
            time: None,
            location: None,
            category: None,
            inbox_only: false,
            created_at,
        }
    }
}

/// Habit durations were stored as numbers by some clients and strings by others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HabitDuration {
    Number(f64),
    Text(String),
}

impl fmt::Display for HabitDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 prints 30.0 as "30", so both forms end up identical.
            HabitDuration::Number(n) => write!(f, "{}", n),
            HabitDuration::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for HabitDuration {
    fn from(minutes: u32) -> Self {
        HabitDuration::Number(minutes.into())
    }
}

impl From<&str> for HabitDuration {
    fn from(s: &str) -> Self {
        HabitDuration::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub duration: Option<HabitDuration>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub inbox_only: bool,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(title: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            title: title.to_string(),
            description: None,
            category: None,
            duration: None,
            frequency: None,
            streak: 0,
            time: None,
            inbox_only: false,
            created_at,
        }
    }
}
