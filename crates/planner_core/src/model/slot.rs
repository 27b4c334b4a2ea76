//! Weekly slot model.
//!
//! # Invariants
//! - `id` is `"<day>|<zone_id>"` and stable across resets.
//! - `task_id` is a weak reference; the owning task list may not contain it
//!   after a raw import, and readers must tolerate that.

use crate::model::constants::{DAYS, WEEKDAY_ZONES};
use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};

/// One fixed weekly time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub done: bool,
}

impl Slot {
    /// Creates an empty slot for `day` and `zone_id`.
    pub fn new(day: &str, zone_id: &str) -> Self {
        Self {
            id: slot_id(day, zone_id),
            day: day.to_string(),
            zone_id: zone_id.to_string(),
            task_id: None,
            done: false,
        }
    }

    /// Returns whether this slot references `task_id`.
    pub fn references(&self, task_id: &str) -> bool {
        self.task_id.as_deref() == Some(task_id)
    }

    /// Drops the task reference and completion flag.
    pub fn clear(&mut self) {
        self.task_id = None;
        self.done = false;
    }
}

/// Derives the stable slot id.
pub fn slot_id(day: &str, zone_id: &str) -> String {
    format!("{day}|{zone_id}")
}

/// Canonical layout: three zones on each weekday, one zone per weekend day.
pub fn default_slots() -> Vec<Slot> {
    let mut slots = Vec::with_capacity(17);
    for day in &DAYS[..5] {
        for zone_id in WEEKDAY_ZONES {
            slots.push(Slot::new(day, zone_id));
        }
    }
    slots.push(Slot::new(DAYS[5], "sat"));
    slots.push(Slot::new(DAYS[6], "sun"));
    slots
}
