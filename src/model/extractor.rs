// File: ./src/model/extractor.rs
//! Heuristic event extraction from free Portuguese text.
//!
//! Recognizes meal keywords ("almoço", "jantar", "café"), who the meal is with
//! ("com família de Maria"), and a weekday name. Anything it does not
//! recognize falls through to defaults, so extraction never fails.
use crate::model::item::{Task, TaskType};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const DEFAULT_EVENT_TITLE: &str = "Novo Compromisso";

struct MealRule {
    keyword: &'static str,
    time: &'static str,
    category: &'static str,
}

// Order matters: first keyword present wins.
const MEALS: &[MealRule] = &[
    MealRule {
        keyword: "almoço",
        time: "12:30",
        category: "social",
    },
    MealRule {
        keyword: "jantar",
        time: "20:00",
        category: "social",
    },
    MealRule {
        keyword: "café",
        time: "09:00",
        category: "social",
    },
];

// Sunday-indexed, matching chrono's num_days_from_sunday.
const WEEKDAYS: &[(&str, u32)] = &[
    ("domingo", 0),
    ("segunda", 1),
    ("terça", 2),
    ("quarta", 3),
    ("quinta", 4),
    ("sexta", 5),
    ("sábado", 6),
];

static FAMILY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(família|pais|parentes)\s+(?:d[aeo]\s+)?(\p{Lu}\w*)").expect("valid family regex")
});

// Runs on the lowercased text, for input typed without diacritics.
static FAMILY_PLAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"familia\s+(\w+)").expect("valid plain family regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicEventInfo {
    pub title: String,
    pub date: NaiveDateTime,
    pub time: Option<String>,
    pub task_type: TaskType,
    pub location: Option<String>,
    pub details: Option<String>,
    pub category: Option<String>,
}

impl BasicEventInfo {
    fn with_defaults(now: NaiveDateTime) -> Self {
        Self {
            title: DEFAULT_EVENT_TITLE.to_string(),
            date: now,
            time: None,
            task_type: TaskType::Task,
            location: None,
            details: None,
            category: None,
        }
    }

    /// Pre-fills a new task the way the create form does.
    pub fn into_task(self, created_at: DateTime<Utc>) -> Task {
        let mut task = Task::new(&self.title, created_at);
        task.task_type = self.task_type;
        task.scheduled_date = Some(self.date.date());
        task.time = self.time;
        task.location = self.location;
        task.details = self.details;
        task.category = self.category;
        task
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Returns (relation, person) for "com família de Maria" style phrases.
fn find_companion(original: &str, lower: &str) -> Option<(String, String)> {
    if let Some(caps) = FAMILY_RE.captures(original) {
        return Some((caps[1].to_string(), caps[2].to_string()));
    }
    if lower.contains("familia")
        && let Some(caps) = FAMILY_PLAIN_RE.captures(lower)
    {
        return Some(("família".to_string(), title_case(&caps[1])));
    }
    None
}

fn apply_meal(info: &mut BasicEventInfo, original: &str, lower: &str) {
    let Some(meal) = MEALS.iter().find(|m| lower.contains(m.keyword)) else {
        return;
    };

    info.task_type = TaskType::Event;
    info.time = Some(meal.time.to_string());
    info.category = Some(meal.category.to_string());
    info.title = capitalize(meal.keyword);

    if let Some((relation, person)) = find_companion(original, lower) {
        info.title.push_str(&format!(" com {} de {}", relation, person));
        info.location = Some(format!("Casa de {}", person));
    }
}

fn apply_weekday(info: &mut BasicEventInfo, lower: &str, now: NaiveDateTime) {
    let Some(&(_, target)) = WEEKDAYS.iter().find(|(name, _)| lower.contains(*name)) else {
        return;
    };
    let today = now.weekday().num_days_from_sunday() as i64;
    let mut offset = target as i64 - today;
    // Today or already passed: next week.
    if offset <= 0 {
        offset += 7;
    }
    // Out of chrono's range: keep `now` rather than panic.
    info.date = now.checked_add_signed(Duration::days(offset)).unwrap_or(now);
}

/// Extracts title, date, time, category and location from `text`.
///
/// `now` is the reference moment: weekday names resolve relative to it and it
/// is the date returned when no weekday is mentioned.
pub fn extract_event_info(text: &str, now: NaiveDateTime) -> BasicEventInfo {
    let lower = text.to_lowercase();
    let mut info = BasicEventInfo::with_defaults(now);

    apply_meal(&mut info, text, &lower);
    apply_weekday(&mut info, &lower, now);

    log::debug!(
        "extracted '{}' -> title='{}' type={} date={}",
        text,
        info.title,
        info.task_type,
        info.date
    );
    info
}

pub fn extract_event_info_now(text: &str) -> BasicEventInfo {
    extract_event_info(text, Local::now().naive_local())
}
