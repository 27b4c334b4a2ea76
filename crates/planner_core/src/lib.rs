//! Core logic for the weekly planner.
//! This crate is the single source of truth for planner invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;
pub mod sync;
pub mod views;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::constants::{
    Metric, Zone, DAYS, METRICS, STORAGE_KEY, UNDO_STORAGE_KEY, ZONES,
};
pub use model::document::{ExportPayload, GistCredentials, MonthlyMetrics, PlannerDocument};
pub use model::month::{shift_month, MonthKey, MonthKeyError};
pub use model::settings::{Settings, TargetOverride, Targets};
pub use model::slot::Slot;
pub use model::task::{Category, NewTask, Task, TaskEdit, TaskId};
pub use repo::state_repo::{RepoError, RepoResult, SqliteStateRepository, StateRepository};
pub use service::planner_service::{PlannerService, ServiceError, ServiceResult, SyncOutcome};
pub use state::import::{FieldOutcome, ImportError, ImportReport};
pub use state::ops::MetricUpdate;
pub use state::store::{LoadOutcome, StateStore};
pub use sync::gist::GistProvider;
pub use sync::provider::{
    PullRequest, PushReceipt, PushRequest, SyncError, SyncProvider, SyncResult,
};
pub use views::board::{CategoryStat, Progress};
pub use views::tasks::CategoryFilter;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
