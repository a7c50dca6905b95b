// File: ./src/model/mod.rs
pub mod area;
pub mod extractor;
pub mod item;
pub mod todo;

pub use area::{Area, DEFAULT_AREA_COLOR, category_color};
pub use extractor::{BasicEventInfo, extract_event_info, extract_event_info_now};
pub use item::{Habit, HabitDuration, Task, TaskType};
pub use todo::{HabitItem, TaskItem, TodoItem, combine_items, filter_items};
