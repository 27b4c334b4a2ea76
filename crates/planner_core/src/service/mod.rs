//! Core use-case services.
//!
//! # Responsibility
//! - Combine the state store with persistence and sync into caller-facing APIs.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod planner_service;
