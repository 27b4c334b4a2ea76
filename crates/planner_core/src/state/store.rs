//! Owned planner state container.
//!
//! # Responsibility
//! - Hold the live document for the lifetime of its owner.
//! - Load from and save to the serialized document form.
//! - Provide a depth-1 undo snapshot.
//!
//! # Invariants
//! - At most one undo snapshot exists; taking a new one overwrites the old.
//! - `restore()` consumes the snapshot; a second call is a no-op.
//! - Snapshots are taken by mutation operations, never implicitly here.

use crate::model::constants::seed_tasks;
use crate::model::document::{GistCredentials, MonthlyMetrics, PlannerDocument};
use crate::model::settings::Settings;
use crate::model::slot::default_slots;
use crate::state::import::decode_fields;
use log::warn;

/// How `StateStore::load_with_outcome` obtained its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Every field came from the persisted form.
    Restored,
    /// Nothing usable was persisted; a seeded document was created.
    Fresh,
    /// Some fields were malformed and replaced by defaults.
    Repaired,
}

impl LoadOutcome {
    /// Whether the loaded document must be written back to stay stable.
    pub fn needs_save(self) -> bool {
        !matches!(self, Self::Restored)
    }
}

/// Planner state plus its single undo slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    document: PlannerDocument,
    undo: Option<PlannerDocument>,
}

impl StateStore {
    /// Wraps an existing document with an empty undo buffer.
    pub fn new(document: PlannerDocument) -> Self {
        Self {
            document,
            undo: None,
        }
    }

    /// Restores state from its persisted form.
    ///
    /// Absent or unparsable input yields a fresh document. A parsable
    /// document with some malformed fields keeps the valid ones and
    /// substitutes defaults for the rest.
    pub fn load(raw: Option<&str>, created_at: i64) -> Self {
        Self::load_with_outcome(raw, created_at).0
    }

    /// Like `load`, also reporting whether the result differs from `raw`.
    pub fn load_with_outcome(raw: Option<&str>, created_at: i64) -> (Self, LoadOutcome) {
        let Some(raw) = raw else {
            return (
                Self::new(PlannerDocument::new(created_at)),
                LoadOutcome::Fresh,
            );
        };

        let decoded = match decode_fields(raw) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!("event=state_load module=state status=fallback reason=unparsable error={err}");
                return (
                    Self::new(PlannerDocument::new(created_at)),
                    LoadOutcome::Fresh,
                );
            }
        };

        let repaired = decoded.tasks.is_err()
            || decoded.slots.is_err()
            || decoded.settings.is_err()
            || decoded.monthly.is_err()
            || decoded.gist.is_err();
        if repaired {
            warn!("event=state_load module=state status=fallback reason=malformed_fields");
        }

        let document = PlannerDocument {
            tasks: decoded.tasks.unwrap_or_else(|_| seed_tasks(created_at)),
            slots: decoded.slots.unwrap_or_else(|_| default_slots()),
            settings: decoded.settings.unwrap_or_else(|_| Settings::default()),
            monthly: decoded.monthly.unwrap_or_else(|_| MonthlyMetrics::new()),
            gist: decoded.gist.unwrap_or_else(|_| GistCredentials::default()),
        };
        let outcome = if repaired {
            LoadOutcome::Repaired
        } else {
            LoadOutcome::Restored
        };
        (Self::new(document), outcome)
    }

    /// Replaces the undo buffer, e.g. with a snapshot restored from storage.
    pub fn with_undo(mut self, undo: Option<PlannerDocument>) -> Self {
        self.undo = undo;
        self
    }

    /// Current undo snapshot, if any.
    pub fn undo_snapshot(&self) -> Option<&PlannerDocument> {
        self.undo.as_ref()
    }

    /// Serializes the full document, credentials included.
    pub fn save(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.document)
    }

    /// Serializes the export payload (no credentials), pretty-printed.
    pub fn export(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.document.export_payload())
    }

    pub fn document(&self) -> &PlannerDocument {
        &self.document
    }

    pub(crate) fn document_mut(&mut self) -> &mut PlannerDocument {
        &mut self.document
    }

    /// Deep-copies the document into the undo buffer.
    pub fn snapshot(&mut self) {
        self.undo = Some(self.document.clone());
    }

    /// Replaces the live document with the snapshot and clears the buffer.
    ///
    /// Returns `false` when there is nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.undo.take() {
            Some(snapshot) => {
                self.document = snapshot;
                true
            }
            None => false,
        }
    }

    pub fn has_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Replaces all slots with the canonical layout; tasks are kept.
    pub fn reset_slots(&mut self) {
        self.document.slots = default_slots();
    }

    /// Removes every task and resets the slot layout.
    pub fn clear_all(&mut self) {
        self.document.tasks.clear();
        self.reset_slots();
    }
}
