//! Serialized planner document.
//!
//! # Responsibility
//! - Define the single JSON-compatible structure used for local persistence.
//! - Define the export/sync payload, which omits sync credentials.
//!
//! # Invariants
//! - `monthly` values are non-negative by construction (`u32`).
//! - The export payload never carries `gist` credentials.

use crate::model::constants::seed_tasks;
use crate::model::settings::Settings;
use crate::model::slot::{default_slots, Slot};
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `"YYYY-MM" -> metric key -> count`.
pub type MonthlyMetrics = BTreeMap<String, BTreeMap<String, u32>>;

/// Credentials for the remote Gist store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GistCredentials {
    pub token: String,
    pub gist_id: String,
}

impl GistCredentials {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn has_gist_id(&self) -> bool {
        !self.gist_id.is_empty()
    }
}

/// Full planner state as persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDocument {
    pub tasks: Vec<Task>,
    pub slots: Vec<Slot>,
    pub settings: Settings,
    pub monthly: MonthlyMetrics,
    pub gist: GistCredentials,
}

impl PlannerDocument {
    /// Fresh document: default settings and slots, seeded tasks.
    pub fn new(created_at: i64) -> Self {
        Self {
            tasks: seed_tasks(created_at),
            slots: default_slots(),
            settings: Settings::default(),
            monthly: MonthlyMetrics::new(),
            gist: GistCredentials::default(),
        }
    }

    /// Payload shared by export and sync.
    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload {
            tasks: self.tasks.clone(),
            slots: self.slots.clone(),
            settings: self.settings.clone(),
            monthly: self.monthly.clone(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    pub fn slot(&self, slot_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }

    pub fn slot_mut(&mut self, slot_id: &str) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.id == slot_id)
    }
}

/// Export and sync payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub tasks: Vec<Task>,
    pub slots: Vec<Slot>,
    pub settings: Settings,
    pub monthly: MonthlyMetrics,
}
