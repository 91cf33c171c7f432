//! The task record (one dated to-do item)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned to tasks that were created without an explicit one.
pub const DEFAULT_CATEGORY: &str = "personal";

/// A dated to-do item.
///
/// The `date` is a pure calendar day: no time-of-day, no timezone. A task
/// belongs to exactly one day, and the rollover procedure may move that day
/// forward (never backward) while the task is unfinished.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, stable for the task's lifetime
    id: String,

    /// The display text of the task.
    /// Non-emptiness is enforced at the creation boundary (UI form, import commit), not re-checked by the engine
    text: String,

    /// Whether this task is done
    completed: bool,

    /// The calendar day this task belongs to
    date: NaiveDate,

    /// Free-text label, `"personal"` when the user did not pick one
    category: String,

    /// Insertion-ordered labels; duplicates are permitted, empty strings are not
    tags: Vec<String>,

    /// Pinned tasks stay visible beyond the 365-day cutoff
    pinned: bool,
}

impl Task {
    /// Create a brand new task with default category, no tags, not pinned.
    /// This picks a new (random) task ID.
    pub fn new<S: Into<String>>(text: S, date: NaiveDate) -> Self {
        Self::with_details(
            text,
            date,
            String::from(DEFAULT_CATEGORY),
            Vec::new(),
            false,
            false,
        )
    }

    /// Create a task with every field explicit (used by the import path and by tests).
    /// This also picks a new ID: an imported copy is a new task.
    pub fn with_details<S: Into<String>>(
        text: S,
        date: NaiveDate,
        category: String,
        tags: Vec<String>,
        completed: bool,
        pinned: bool,
    ) -> Self {
        let new_id = Uuid::new_v4().to_hyphenated().to_string();
        Self {
            id: new_id,
            text: text.into().trim().to_string(),
            completed,
            date,
            category,
            tags: tags.into_iter().filter(|t| !t.is_empty()).collect(),
            pinned,
        }
    }

    pub fn id(&self) -> &str        { &self.id       }
    pub fn text(&self) -> &str      { &self.text     }
    pub fn completed(&self) -> bool { self.completed }
    pub fn date(&self) -> NaiveDate { self.date      }
    pub fn category(&self) -> &str  { &self.category }
    pub fn tags(&self) -> &[String] { &self.tags     }
    pub fn pinned(&self) -> bool    { self.pinned    }

    pub fn set_text(&mut self, new_text: String) {
        self.text = new_text.trim().to_string();
    }

    /// Re-date a task (user edit or rollover)
    pub fn set_date(&mut self, new_date: NaiveDate) {
        self.date = new_date;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    pub fn set_category(&mut self, new_category: String) {
        self.category = new_category;
    }

    /// Replace the tag list. Empty strings are dropped, order and duplicates are kept.
    pub fn set_tags(&mut self, new_tags: Vec<String>) {
        self.tags = new_tags.into_iter().filter(|t| !t.is_empty()).collect();
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Water the plants", date(2024, 1, 15));
        assert_eq!(task.text(), "Water the plants");
        assert_eq!(task.completed(), false);
        assert_eq!(task.category(), DEFAULT_CATEGORY);
        assert!(task.tags().is_empty());
        assert_eq!(task.pinned(), false);
        assert!(!task.id().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new("same text", date(2024, 1, 15));
        let b = Task::new("same text", date(2024, 1, 15));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_empty_tags_are_dropped() {
        let mut task = Task::new("a", date(2024, 1, 15));
        task.set_tags(vec![
            String::from("urgent"),
            String::new(),
            String::from("urgent"),
        ]);
        assert_eq!(task.tags(), ["urgent", "urgent"]);
    }

    #[test]
    fn test_serde_keeps_date_as_plain_string() {
        let task = Task::new("a", date(2024, 1, 15));
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"2024-01-15\""));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
