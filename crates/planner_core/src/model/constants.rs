//! Static reference data for the weekly planner.
//!
//! # Responsibility
//! - Describe the fixed week layout (days and time zones).
//! - Describe trackable metrics and their default targets.
//! - Provide the canonical seed task set.
//!
//! # Invariants
//! - Metric keys are unique.
//! - Every metric belongs to exactly one `Category`.

use crate::model::task::{Category, Task};

/// Storage key of the persisted document.
pub const STORAGE_KEY: &str = "weekly_planner_v2";

/// Storage key of the persisted undo snapshot.
pub const UNDO_STORAGE_KEY: &str = "weekly_planner_v2_undo";

/// Weekdays in display order. The first five carry the weekday zones.
pub const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Weeks per month used to derive a monthly target from a weekly one.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Time-of-day bucket a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub id: &'static str,
    pub label: &'static str,
    /// Sort position inside a day column.
    pub order: u8,
}

pub const ZONES: [Zone; 5] = [
    Zone {
        id: "morning",
        label: "Morning 08:00-09:00",
        order: 0,
    },
    Zone {
        id: "noon",
        label: "Noon 11:40-13:00",
        order: 1,
    },
    Zone {
        id: "evening",
        label: "Evening 21:00-22:30",
        order: 2,
    },
    Zone {
        id: "sat",
        label: "Saturday 20:00-00:00",
        order: 3,
    },
    Zone {
        id: "sun",
        label: "Sunday 20:00-23:00",
        order: 4,
    },
];

/// Zones scheduled on each weekday.
pub const WEEKDAY_ZONES: [&str; 3] = ["morning", "noon", "evening"];

/// Trackable countable activity with default targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub week_target: u32,
    pub year_target: u32,
    pub category: Category,
}

pub const METRICS: [Metric; 9] = [
    Metric {
        key: "agent_read",
        label: "Agent reading",
        unit: "sessions",
        week_target: 5,
        year_target: 240,
        category: Category::Agent,
    },
    Metric {
        key: "writing",
        label: "Chapter editing",
        unit: "sessions",
        week_target: 3,
        year_target: 144,
        category: Category::Writing,
    },
    Metric {
        key: "toeic_word",
        label: "TOEIC vocabulary",
        unit: "days",
        week_target: 5,
        year_target: 240,
        category: Category::Toeic,
    },
    Metric {
        key: "toeic_listen",
        label: "TOEIC listening",
        unit: "sessions",
        week_target: 2,
        year_target: 96,
        category: Category::Toeic,
    },
    Metric {
        key: "toeic_read",
        label: "TOEIC reading",
        unit: "sets",
        week_target: 2,
        year_target: 96,
        category: Category::Toeic,
    },
    Metric {
        key: "leetcode",
        label: "LeetCode",
        unit: "problems",
        week_target: 3,
        year_target: 150,
        category: Category::Leetcode,
    },
    Metric {
        key: "sysdesign",
        label: "System design",
        unit: "videos",
        week_target: 3,
        year_target: 144,
        category: Category::Sysdesign,
    },
    Metric {
        key: "fitness",
        label: "Workout",
        unit: "sessions",
        week_target: 4,
        year_target: 192,
        category: Category::Fitness,
    },
    Metric {
        key: "diet_log",
        label: "Diet log",
        unit: "days",
        week_target: 7,
        year_target: 365,
        category: Category::Fitness,
    },
];

struct SeedTask {
    title: &'static str,
    category: Category,
    est_mins: u32,
    metric_key: &'static str,
}

const SEED_TASKS: [SeedTask; 10] = [
    SeedTask {
        title: "Agent reading (30-60 pages)",
        category: Category::Agent,
        est_mins: 60,
        metric_key: "agent_read",
    },
    SeedTask {
        title: "Chapter notes cleanup (1 page)",
        category: Category::Writing,
        est_mins: 60,
        metric_key: "writing",
    },
    SeedTask {
        title: "Chapter structure pass",
        category: Category::Writing,
        est_mins: 60,
        metric_key: "writing",
    },
    SeedTask {
        title: "TOEIC vocabulary (30-50 words)",
        category: Category::Toeic,
        est_mins: 30,
        metric_key: "toeic_word",
    },
    SeedTask {
        title: "TOEIC listening",
        category: Category::Toeic,
        est_mins: 30,
        metric_key: "toeic_listen",
    },
    SeedTask {
        title: "TOEIC reading drills",
        category: Category::Toeic,
        est_mins: 40,
        metric_key: "toeic_read",
    },
    SeedTask {
        title: "LeetCode (easy)",
        category: Category::Leetcode,
        est_mins: 45,
        metric_key: "leetcode",
    },
    SeedTask {
        title: "LeetCode (medium)",
        category: Category::Leetcode,
        est_mins: 60,
        metric_key: "leetcode",
    },
    SeedTask {
        title: "System design video + 1 page notes",
        category: Category::Sysdesign,
        est_mins: 45,
        metric_key: "sysdesign",
    },
    SeedTask {
        title: "Workout (strength/cardio)",
        category: Category::Fitness,
        est_mins: 45,
        metric_key: "fitness",
    },
];

/// Looks up a metric definition by key.
pub fn metric(key: &str) -> Option<&'static Metric> {
    METRICS.iter().find(|metric| metric.key == key)
}

/// Looks up a zone definition by id.
pub fn zone(id: &str) -> Option<&'static Zone> {
    ZONES.iter().find(|zone| zone.id == id)
}

/// Builds the canonical seed task set with fresh ids.
pub fn seed_tasks(created_at: i64) -> Vec<Task> {
    SEED_TASKS
        .iter()
        .map(|seed| {
            let mut task = Task::new(seed.title, seed.category, created_at);
            task.est_mins = Some(seed.est_mins);
            task.metric_key = Some(seed.metric_key.to_string());
            task
        })
        .collect()
}
