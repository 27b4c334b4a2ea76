//! Planner use-case service.
//!
//! # Responsibility
//! - Own the state store and persist it after every applied mutation.
//! - Supply wall-clock inputs (timestamps, current month) to mutations.
//! - Run sync push/pull and turn their results into status messages.
//!
//! # Invariants
//! - A no-op mutation never writes to storage.
//! - A fresh or repaired document is written back on open, so task ids stay
//!   stable across processes.
//! - The undo snapshot is stored next to the document and removed once
//!   consumed.
//! - A failed sync or import leaves local state untouched.
//! - Credentials are persisted locally but never exported or logged.

use crate::model::constants::{STORAGE_KEY, UNDO_STORAGE_KEY};
use crate::model::document::PlannerDocument;
use crate::model::month::MonthKey;
use crate::model::settings::TargetOverride;
use crate::model::task::{NewTask, TaskEdit, TaskId};
use crate::repo::state_repo::{RepoError, StateRepository};
use crate::state::import::{ImportError, ImportReport};
use crate::state::ops::MetricUpdate;
use crate::state::store::StateStore;
use crate::sync::provider::{PullRequest, PushRequest, SyncError, SyncProvider};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level failure.
#[derive(Debug)]
pub enum ServiceError {
    /// Persisted state could not be read or written.
    Repo(RepoError),
    /// Document could not be serialized.
    Serialize(serde_json::Error),
    /// Imported document was rejected as a whole.
    Import(ImportError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize planner state: {err}"),
            Self::Import(err) => write!(f, "import failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Import(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// User-facing result of a sync action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub ok: bool,
    pub message: String,
}

impl SyncOutcome {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(err: &SyncError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn load_undo_snapshot<R: StateRepository>(repo: &R) -> ServiceResult<Option<PlannerDocument>> {
    let Some(raw) = repo.load_state(UNDO_STORAGE_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(err) => {
            warn!("event=undo_load module=service status=fallback error={err}");
            Ok(None)
        }
    }
}

/// Planner facade over a state repository.
pub struct PlannerService<R: StateRepository> {
    repo: R,
    store: StateStore,
}

impl<R: StateRepository> PlannerService<R> {
    /// Loads persisted state, falling back to a fresh document.
    ///
    /// A fresh or repaired document is saved immediately.
    pub fn open(repo: R) -> ServiceResult<Self> {
        let raw = repo.load_state(STORAGE_KEY)?;
        let (store, outcome) = StateStore::load_with_outcome(raw.as_deref(), now_epoch_ms());
        let undo = load_undo_snapshot(&repo)?;
        let service = Self {
            repo,
            store: store.with_undo(undo),
        };
        if outcome.needs_save() {
            service.save()?;
        }
        info!(
            "event=state_load module=service status=ok outcome={outcome:?} tasks={} has_undo={}",
            service.store.document().tasks.len(),
            service.store.has_undo()
        );
        Ok(service)
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn document(&self) -> &PlannerDocument {
        self.store.document()
    }

    /// Writes the full document and the undo snapshot to storage.
    pub fn save(&self) -> ServiceResult<()> {
        let updated_at = now_epoch_ms();
        let payload = self.store.save()?;
        self.repo
            .save_state(STORAGE_KEY, payload.as_str(), updated_at)?;
        match self.store.undo_snapshot() {
            Some(snapshot) => {
                let snapshot = serde_json::to_string(snapshot)?;
                self.repo
                    .save_state(UNDO_STORAGE_KEY, snapshot.as_str(), updated_at)?;
            }
            None => self.repo.delete_state(UNDO_STORAGE_KEY)?,
        }
        Ok(())
    }

    fn commit(&self, event: &str, applied: bool) -> ServiceResult<bool> {
        if applied {
            self.save()?;
            info!("event={event} module=service status=ok");
        } else {
            debug!("event={event} module=service status=noop");
        }
        Ok(applied)
    }

    pub fn assign_task_to_slot(&mut self, slot_id: &str, task_id: &str) -> ServiceResult<bool> {
        let applied = self.store.assign_task_to_slot(slot_id, task_id);
        self.commit("slot_assign", applied)
    }

    /// Toggles a slot, counting metric deltas against the current month.
    pub fn toggle_slot_done(&mut self, slot_id: &str) -> ServiceResult<bool> {
        let applied = self.store.toggle_slot_done(slot_id, MonthKey::current());
        self.commit("slot_toggle", applied)
    }

    pub fn clear_slot(&mut self, slot_id: &str) -> ServiceResult<bool> {
        let applied = self.store.clear_slot(slot_id);
        self.commit("slot_clear", applied)
    }

    pub fn toggle_task_done(&mut self, task_id: &str) -> ServiceResult<bool> {
        let applied = self.store.toggle_task_done(task_id);
        self.commit("task_toggle", applied)
    }

    pub fn delete_task(&mut self, task_id: &str) -> ServiceResult<bool> {
        let applied = self.store.delete_task(task_id);
        self.commit("task_delete", applied)
    }

    pub fn add_task(&mut self, input: NewTask) -> ServiceResult<Option<TaskId>> {
        let created = self.store.add_task(input, now_epoch_ms());
        self.commit("task_add", created.is_some())?;
        Ok(created)
    }

    /// Adds missing seed tasks; returns how many were added.
    pub fn add_seed_tasks(&mut self) -> ServiceResult<usize> {
        let added = self.store.add_seed_tasks_deduped(now_epoch_ms());
        self.commit("task_seed", added > 0)?;
        Ok(added)
    }

    pub fn edit_task(&mut self, task_id: &str, edit: TaskEdit) -> ServiceResult<bool> {
        let applied = self.store.edit_task(task_id, edit);
        self.commit("task_edit", applied)
    }

    /// Moves a task's metric counter for the current month.
    pub fn apply_metric_delta(&mut self, task_id: &str, delta: i64) -> ServiceResult<bool> {
        let applied = self
            .store
            .apply_metric_delta(task_id, delta, MonthKey::current());
        self.commit("metric_update", applied)
    }

    pub fn update_metric(
        &mut self,
        month: MonthKey,
        metric_key: &str,
        update: MetricUpdate,
    ) -> ServiceResult<bool> {
        let applied = self.store.update_metric(month, metric_key, update);
        self.commit("metric_update", applied)
    }

    /// Resets the week; undoable.
    pub fn reset_week(&mut self) -> ServiceResult<()> {
        self.store.do_reset(now_epoch_ms());
        self.commit("week_reset", true)?;
        Ok(())
    }

    /// Removes every task; not undoable.
    pub fn clear_all(&mut self) -> ServiceResult<()> {
        self.store.do_clear_all();
        self.commit("clear_all", true)?;
        Ok(())
    }

    /// Restores the last snapshot. Returns `false` when none exists.
    pub fn undo(&mut self) -> ServiceResult<bool> {
        let applied = self.store.restore();
        self.commit("undo", applied)
    }

    pub fn set_mirror_done(&mut self, enabled: bool) -> ServiceResult<()> {
        self.store.set_mirror_done(enabled);
        self.commit("settings_update", true)?;
        Ok(())
    }

    pub fn set_auto_seed(&mut self, enabled: bool) -> ServiceResult<()> {
        self.store.set_auto_seed(enabled);
        self.commit("settings_update", true)?;
        Ok(())
    }

    pub fn set_zone_label(&mut self, zone_id: &str, label: &str) -> ServiceResult<bool> {
        let applied = self.store.set_zone_label(zone_id, label);
        self.commit("settings_update", applied)
    }

    pub fn set_metric_targets(
        &mut self,
        metric_key: &str,
        targets: TargetOverride,
    ) -> ServiceResult<bool> {
        let applied = self.store.set_metric_targets(metric_key, targets);
        self.commit("settings_update", applied)
    }

    pub fn save_gist_config(&mut self, token: &str, gist_id: &str) -> ServiceResult<()> {
        self.store.set_gist_credentials(token, gist_id);
        self.commit("gist_config", true)?;
        Ok(())
    }

    /// Pretty-printed export payload (credentials excluded).
    pub fn export_json(&self) -> ServiceResult<String> {
        Ok(self.store.export()?)
    }

    /// Imports a serialized document field by field and persists the result.
    ///
    /// # Errors
    /// - `ServiceError::Import` when the input is not a JSON object; state
    ///   is unchanged.
    pub fn import_json(&mut self, raw: &str) -> ServiceResult<ImportReport> {
        let report = match self.store.import_state(raw) {
            Ok(report) => report,
            Err(err) => {
                warn!("event=state_import module=service status=error error={err}");
                return Err(err.into());
            }
        };
        self.save()?;
        info!(
            "event=state_import module=service status=ok replaced_fields={}",
            report.replaced_count()
        );
        Ok(report)
    }

    /// Pushes the export payload, remembering a newly created remote id.
    pub fn push(&mut self, provider: &dyn SyncProvider) -> ServiceResult<SyncOutcome> {
        let gist = self.store.document().gist.clone();
        if !gist.has_token() {
            return Ok(SyncOutcome::failure(&SyncError::MissingToken));
        }
        let payload = self.store.export()?;
        let request = PushRequest {
            token: gist.token.as_str(),
            remote_id: gist.has_gist_id().then_some(gist.gist_id.as_str()),
            payload: payload.as_str(),
        };

        match provider.push(request) {
            Ok(receipt) => {
                if !gist.has_gist_id() {
                    self.store
                        .set_gist_credentials(&gist.token, &receipt.remote_id);
                    self.save()?;
                }
                info!(
                    "event=sync_push module=service status=ok provider={}",
                    provider.provider_id()
                );
                Ok(SyncOutcome::success("Synced to gist."))
            }
            Err(err) => {
                warn!(
                    "event=sync_push module=service status=error provider={} error={err}",
                    provider.provider_id()
                );
                Ok(SyncOutcome::failure(&err))
            }
        }
    }

    /// Pulls the remote payload and imports it field by field.
    pub fn pull(&mut self, provider: &dyn SyncProvider) -> ServiceResult<SyncOutcome> {
        let gist = self.store.document().gist.clone();
        if !gist.has_token() || !gist.has_gist_id() {
            return Ok(SyncOutcome::failure(&SyncError::MissingRemoteId));
        }

        let fetched = provider
            .pull(PullRequest {
                token: gist.token.as_str(),
                remote_id: gist.gist_id.as_str(),
            })
            .and_then(|payload| {
                self.store
                    .import_remote_state(payload.as_str())
                    .map_err(|err| SyncError::InvalidPayload(err.to_string()))
            });

        match fetched {
            Ok(report) => {
                self.save()?;
                info!(
                    "event=sync_pull module=service status=ok provider={} replaced_fields={}",
                    provider.provider_id(),
                    report.replaced_count()
                );
                Ok(SyncOutcome::success("Pulled from gist."))
            }
            Err(err) => {
                warn!(
                    "event=sync_pull module=service status=error provider={} error={err}",
                    provider.provider_id()
                );
                Ok(SyncOutcome::failure(&err))
            }
        }
    }
}
