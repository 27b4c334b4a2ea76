//! Remote snapshot sync.
//!
//! # Responsibility
//! - Define the provider contract used to push/pull serialized documents.
//! - Provide the GitHub Gist provider.
//!
//! # Invariants
//! - Providers never touch local state; callers apply pulled payloads.
//! - Remote writes are whole-document overwrites (last writer wins).

pub mod gist;
pub mod provider;
