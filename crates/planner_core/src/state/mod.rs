//! In-memory planner state and its mutation rules.
//!
//! # Responsibility
//! - Own the live document and the depth-1 undo buffer.
//! - Apply user intents as atomic mutations.
//! - Validate untrusted documents field by field on load and import.
//!
//! # Invariants
//! - Mutations either fully apply or leave state untouched.
//! - Mutations never panic and never return errors; they report whether
//!   they applied.
//! - Deleting a task clears every slot that referenced it.

pub mod import;
pub mod ops;
pub mod store;
