//! Repository layer for persisted planner state.
//!
//! # Responsibility
//! - Define the storage contract the service persists through.
//! - Isolate SQLite query details from mutation and view logic.
//!
//! # Invariants
//! - The repository stores opaque serialized documents; it never inspects
//!   or validates their content.

pub mod state_repo;
