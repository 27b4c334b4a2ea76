//! Mutation operations over the planner state.
//!
//! # Responsibility
//! - Translate user intents into atomic document changes.
//! - Maintain slot/task reference and completion invariants.
//!
//! # Invariants
//! - Every operation returns `true` when it changed state and `false` when
//!   its preconditions were unmet; unmet preconditions leave state unchanged.
//! - `clear_slot`, `delete_task` and `do_reset` snapshot before mutating;
//!   `do_clear_all` does not.
//! - With `mirror_done` on, marking a slot done completes its task only when
//!   every referencing slot is done, while unmarking reopens it immediately.
//! - Metric counters never go below zero.

use crate::model::constants::seed_tasks;
use crate::model::month::MonthKey;
use crate::model::settings::TargetOverride;
use crate::model::task::{normalize_optional_text, NewTask, Task, TaskEdit, TaskId};
use crate::state::import::{apply_field, decode_fields, FieldOutcome, ImportError, ImportReport};
use crate::state::store::StateStore;
use std::collections::HashSet;

/// Metric counter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUpdate {
    /// Adds to the current value.
    Delta(i64),
    /// Overwrites the current value.
    Set(i64),
}

impl StateStore {
    /// Points a slot at a task and resets its completion flag.
    pub fn assign_task_to_slot(&mut self, slot_id: &str, task_id: &str) -> bool {
        if slot_id.is_empty() || task_id.is_empty() {
            return false;
        }
        if self.document().task(task_id).is_none() {
            return false;
        }
        let Some(slot) = self.document_mut().slot_mut(slot_id) else {
            return false;
        };
        slot.task_id = Some(task_id.to_string());
        slot.done = false;
        true
    }

    /// Flips a slot's completion flag.
    ///
    /// When the slot references a task with a metric, the task's counter for
    /// `month` moves by +1 (now done) or -1 (now not done).
    pub fn toggle_slot_done(&mut self, slot_id: &str, month: MonthKey) -> bool {
        let document = self.document_mut();
        let Some(slot) = document.slot_mut(slot_id) else {
            return false;
        };
        slot.done = !slot.done;
        let now_done = slot.done;
        let task_id = slot.task_id.clone();

        let Some(task_id) = task_id else {
            return true;
        };

        if document.settings.mirror_done {
            let all_referencing_done = document
                .slots
                .iter()
                .filter(|slot| slot.references(&task_id))
                .all(|slot| slot.done);
            if let Some(task) = document.task_mut(&task_id) {
                task.done = now_done && all_referencing_done;
            }
        }

        let delta = if now_done { 1 } else { -1 };
        self.apply_metric_delta(&task_id, delta, month);
        true
    }

    /// Empties a slot. Snapshots first.
    pub fn clear_slot(&mut self, slot_id: &str) -> bool {
        if self.document().slot(slot_id).is_none() {
            return false;
        }
        self.snapshot();
        if let Some(slot) = self.document_mut().slot_mut(slot_id) {
            slot.clear();
        }
        true
    }

    /// Flips a task's completion flag, mirroring it onto its slots.
    pub fn toggle_task_done(&mut self, task_id: &str) -> bool {
        let document = self.document_mut();
        let Some(task) = document.task_mut(task_id) else {
            return false;
        };
        task.done = !task.done;
        let now_done = task.done;

        if document.settings.mirror_done {
            for slot in document
                .slots
                .iter_mut()
                .filter(|slot| slot.references(task_id))
            {
                slot.done = now_done;
            }
        }
        true
    }

    /// Removes a task and clears every slot that referenced it. Snapshots first.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        if task_id.is_empty() || self.document().task(task_id).is_none() {
            return false;
        }
        self.snapshot();
        let document = self.document_mut();
        document.tasks.retain(|task| task.id != task_id);
        for slot in document
            .slots
            .iter_mut()
            .filter(|slot| slot.references(task_id))
        {
            slot.clear();
        }
        true
    }

    /// Prepends a new task. Returns its id, or `None` for a blank title.
    pub fn add_task(&mut self, input: NewTask, created_at: i64) -> Option<TaskId> {
        let title = input.title.trim();
        if title.is_empty() {
            return None;
        }
        let mut task = Task::new(title, input.category, created_at);
        task.est_mins = input.est_mins.filter(|mins| *mins > 0);
        task.notes = normalize_optional_text(input.notes);
        task.metric_key = normalize_optional_text(input.metric_key);
        let id = task.id.clone();
        self.document_mut().tasks.insert(0, task);
        Some(id)
    }

    /// Prepends the seed tasks whose titles are not already present.
    ///
    /// Returns how many tasks were added.
    pub fn add_seed_tasks_deduped(&mut self, created_at: i64) -> usize {
        let document = self.document_mut();
        let existing: HashSet<&str> = document
            .tasks
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        let mut fresh: Vec<Task> = seed_tasks(created_at)
            .into_iter()
            .filter(|task| !existing.contains(task.title.as_str()))
            .collect();
        let added = fresh.len();
        fresh.append(&mut document.tasks);
        document.tasks = fresh;
        added
    }

    /// Replaces the editable fields of a task. Rejects blank titles.
    pub fn edit_task(&mut self, task_id: &str, edit: TaskEdit) -> bool {
        let title = edit.title.trim();
        if title.is_empty() {
            return false;
        }
        let Some(task) = self.document_mut().task_mut(task_id) else {
            return false;
        };
        task.title = title.to_string();
        task.category = edit.category;
        task.est_mins = edit.est_mins.filter(|mins| *mins > 0);
        task.notes = normalize_optional_text(edit.notes);
        task.metric_key = normalize_optional_text(edit.metric_key);
        true
    }

    /// Moves the counter of a task's metric for `month` by `delta`.
    pub fn apply_metric_delta(&mut self, task_id: &str, delta: i64, month: MonthKey) -> bool {
        if task_id.is_empty() {
            return false;
        }
        let Some(metric_key) = self
            .document()
            .task(task_id)
            .and_then(|task| task.metric_key.clone())
        else {
            return false;
        };
        self.update_metric(month, &metric_key, MetricUpdate::Delta(delta))
    }

    /// Writes a metric counter, creating the month entry on demand.
    pub fn update_metric(&mut self, month: MonthKey, metric_key: &str, update: MetricUpdate) -> bool {
        if metric_key.is_empty() {
            return false;
        }
        let values = self
            .document_mut()
            .monthly
            .entry(month.to_string())
            .or_default();
        let current = values.get(metric_key).copied().unwrap_or(0);
        let next = match update {
            MetricUpdate::Set(value) => value,
            MetricUpdate::Delta(delta) => i64::from(current).saturating_add(delta),
        };
        values.insert(metric_key.to_string(), clamp_count(next));
        true
    }

    /// Resets the week. Snapshots first; re-seeds when `auto_seed` is on.
    pub fn do_reset(&mut self, created_at: i64) {
        self.snapshot();
        self.reset_slots();
        if self.document().settings.auto_seed {
            self.add_seed_tasks_deduped(created_at);
        }
    }

    /// Drops all tasks and resets slots. Not undoable.
    pub fn do_clear_all(&mut self) {
        self.clear_all();
    }

    /// Replaces each valid top-level field of a serialized document.
    ///
    /// A well-formed `gist` object restores sync credentials. Unparsable
    /// input leaves state untouched.
    pub fn import_state(&mut self, raw: &str) -> Result<ImportReport, ImportError> {
        self.import_fields(raw, true)
    }

    /// Like `import_state`, but always keeps the local sync credentials.
    ///
    /// Used for payloads pulled from the remote store.
    pub fn import_remote_state(&mut self, raw: &str) -> Result<ImportReport, ImportError> {
        self.import_fields(raw, false)
    }

    fn import_fields(
        &mut self,
        raw: &str,
        with_credentials: bool,
    ) -> Result<ImportReport, ImportError> {
        let decoded = decode_fields(raw)?;
        let document = self.document_mut();
        let gist = if with_credentials {
            apply_field(&mut document.gist, decoded.gist)
        } else {
            FieldOutcome::Retained {
                reason: "local credentials are kept".to_string(),
            }
        };
        Ok(ImportReport {
            tasks: apply_field(&mut document.tasks, decoded.tasks),
            slots: apply_field(&mut document.slots, decoded.slots),
            settings: apply_field(&mut document.settings, decoded.settings),
            monthly: apply_field(&mut document.monthly, decoded.monthly),
            gist,
        })
    }

    pub fn set_mirror_done(&mut self, enabled: bool) {
        self.document_mut().settings.mirror_done = enabled;
    }

    pub fn set_auto_seed(&mut self, enabled: bool) {
        self.document_mut().settings.auto_seed = enabled;
    }

    /// Overrides a zone label. A blank label removes the override.
    pub fn set_zone_label(&mut self, zone_id: &str, label: &str) -> bool {
        if zone_id.is_empty() {
            return false;
        }
        let labels = &mut self.document_mut().settings.zone_labels;
        let label = label.trim();
        if label.is_empty() {
            labels.remove(zone_id);
        } else {
            labels.insert(zone_id.to_string(), label.to_string());
        }
        true
    }

    /// Stores a target override. An override with no fields removes it.
    pub fn set_metric_targets(&mut self, metric_key: &str, targets: TargetOverride) -> bool {
        if metric_key.is_empty() {
            return false;
        }
        let overrides = &mut self.document_mut().settings.metric_targets;
        if targets == TargetOverride::default() {
            overrides.remove(metric_key);
        } else {
            overrides.insert(metric_key.to_string(), targets);
        }
        true
    }

    /// Stores trimmed sync credentials.
    pub fn set_gist_credentials(&mut self, token: &str, gist_id: &str) {
        let gist = &mut self.document_mut().gist;
        gist.token = token.trim().to_string();
        gist.gist_id = gist_id.trim().to_string();
    }
}

fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
