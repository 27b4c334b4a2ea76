//! Planner domain model and static reference data.
//!
//! # Responsibility
//! - Define the serialized document shape shared by persistence, export and sync.
//! - Hold the fixed weekly layout, categories and trackable metrics.
//!
//! # Invariants
//! - Slot ids are derived from `day` and `zone_id`, never generated.
//! - Task ids are generated once and never reused.
//! - Slots reference tasks by id only; tasks are owned by the document.

pub mod constants;
pub mod document;
pub mod month;
pub mod settings;
pub mod slot;
pub mod task;
