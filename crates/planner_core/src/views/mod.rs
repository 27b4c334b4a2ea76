//! Read-only projections over the planner document.
//!
//! # Invariants
//! - Every function here is pure: it takes `&PlannerDocument` and never
//!   mutates it.
//! - Dangling slot references are tolerated, never repaired.

pub mod board;
pub mod metrics;
pub mod tasks;
