//! Sync provider contract and error envelope.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SyncResult<T> = Result<T, SyncError>;

/// Sync failure surfaced to the user as a status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No token configured.
    MissingToken,
    /// Pull requested without a remote id.
    MissingRemoteId,
    /// Network or TLS failure before a response arrived.
    Transport(String),
    /// Remote answered with a non-success status.
    Status(u16),
    /// Remote response could not be decoded.
    InvalidResponse(String),
    /// Remote snapshot does not contain the planner file.
    MissingRemoteFile(String),
    /// Remote planner file is not a valid document.
    InvalidPayload(String),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(f, "sync token is not configured"),
            Self::MissingRemoteId => write!(f, "sync token or gist id is not configured"),
            Self::Transport(details) => write!(f, "sync transport failed: {details}"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::InvalidResponse(details) => write!(f, "unexpected sync response: {details}"),
            Self::MissingRemoteFile(name) => write!(f, "remote gist has no {name}"),
            Self::InvalidPayload(details) => write!(f, "remote planner data is invalid: {details}"),
        }
    }
}

impl Error for SyncError {}

/// Push input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushRequest<'a> {
    pub token: &'a str,
    /// Existing remote id; `None` creates a new remote snapshot.
    pub remote_id: Option<&'a str>,
    /// Serialized export payload.
    pub payload: &'a str,
}

/// Push result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReceipt {
    /// Id of the created or updated remote snapshot.
    pub remote_id: String,
}

/// Pull input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequest<'a> {
    pub token: &'a str,
    pub remote_id: &'a str,
}

/// Remote store for serialized planner snapshots.
pub trait SyncProvider {
    /// Stable provider identifier used in logs.
    fn provider_id(&self) -> &str;
    /// Creates or overwrites the remote snapshot.
    fn push(&self, request: PushRequest<'_>) -> SyncResult<PushReceipt>;
    /// Fetches the remote serialized payload.
    fn pull(&self, request: PullRequest<'_>) -> SyncResult<String>;
}
