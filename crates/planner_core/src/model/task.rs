//! Task domain model.
//!
//! # Responsibility
//! - Define the task record users schedule into weekly slots.
//! - Provide constructors for user-created and seeded tasks.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never blank for tasks created through this module.
//! - A missing `metricKey` on the wire decodes as `None`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a string alias because imported documents may carry ids produced
/// by other tools.
pub type TaskId = String;

/// Fixed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Reading about agents.
    Agent,
    /// Writing / book chapters.
    Writing,
    /// TOEIC preparation.
    Toeic,
    /// Algorithm practice.
    Leetcode,
    /// System design study.
    Sysdesign,
    /// Exercise and diet.
    Fitness,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Agent,
        Category::Writing,
        Category::Toeic,
        Category::Leetcode,
        Category::Sysdesign,
        Category::Fitness,
    ];

    /// Wire key (`agent`, `writing`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Writing => "writing",
            Self::Toeic => "toeic",
            Self::Leetcode => "leetcode",
            Self::Sysdesign => "sysdesign",
            Self::Fitness => "fitness",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Agent => "Agent reading",
            Self::Writing => "Writing / book",
            Self::Toeic => "TOEIC",
            Self::Leetcode => "LeetCode",
            Self::Sysdesign => "System design",
            Self::Fitness => "Fitness",
        }
    }

    /// Parses a wire key, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.key() == normalized)
    }
}

/// One unit of work the user can schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub category: Category,
    /// Estimated duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_mins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub done: bool,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Metric this task counts towards.
    #[serde(default)]
    pub metric_key: Option<String>,
}

impl Task {
    /// Creates a task with a freshly generated id.
    pub fn new(title: impl Into<String>, category: Category, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            category,
            est_mins: None,
            notes: None,
            done: false,
            created_at,
            metric_key: None,
        }
    }

    /// Returns whether the title or notes contain `needle`.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self
                .notes
                .as_deref()
                .is_some_and(|notes| notes.to_lowercase().contains(needle))
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub category: Category,
    pub est_mins: Option<u32>,
    pub notes: Option<String>,
    pub metric_key: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            category,
            est_mins: None,
            notes: None,
            metric_key: None,
        }
    }
}

/// Full replacement of the user-editable task fields.
///
/// `id`, `done` and `createdAt` are not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub category: Category,
    pub est_mins: Option<u32>,
    pub notes: Option<String>,
    pub metric_key: Option<String>,
}

impl TaskEdit {
    /// Edit pre-filled with the current values of `task`.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            category: task.category,
            est_mins: task.est_mins,
            notes: task.notes.clone(),
            metric_key: task.metric_key.clone(),
        }
    }
}

/// Trims text and maps blank input to `None`.
pub(crate) fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{Category, Task, TaskEdit};

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse(" TOEIC "), Some(Category::Toeic));
        assert_eq!(Category::parse("cooking"), None);
    }

    #[test]
    fn missing_metric_key_decodes_as_none() {
        let value = serde_json::json!({
            "id": "t1",
            "title": "Read",
            "category": "agent",
            "done": false,
            "createdAt": 1
        });
        let task: Task = serde_json::from_value(value).unwrap();
        assert_eq!(task.metric_key, None);
        assert_eq!(task.est_mins, None);
    }

    #[test]
    fn text_match_covers_notes() {
        let mut task = Task::new("Chapter outline", Category::Writing, 0);
        task.notes = Some("Draft the INTRO".to_string());
        assert!(task.matches_text("intro"));
        assert!(task.matches_text("outline"));
        assert!(!task.matches_text("leetcode"));
    }

    #[test]
    fn edit_from_task_copies_editable_fields() {
        let mut task = Task::new("LeetCode (easy)", Category::Leetcode, 0);
        task.est_mins = Some(45);
        task.metric_key = Some("leetcode".to_string());

        let edit = TaskEdit::from_task(&task);
        assert_eq!(edit.title, "LeetCode (easy)");
        assert_eq!(edit.category, Category::Leetcode);
        assert_eq!(edit.est_mins, Some(45));
        assert_eq!(edit.notes, None);
        assert_eq!(edit.metric_key.as_deref(), Some("leetcode"));
    }
}
