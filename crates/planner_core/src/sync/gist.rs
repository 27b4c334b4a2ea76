//! GitHub Gist sync provider.
//!
//! # Responsibility
//! - Store the export payload as one file inside a private gist.
//! - Create the gist on first push, update it afterwards.
//!
//! # Invariants
//! - Every request is bounded by `DEFAULT_TIMEOUT`.
//! - The token is sent only as a bearer header and never logged.

use crate::sync::provider::{
    PullRequest, PushReceipt, PushRequest, SyncError, SyncProvider, SyncResult,
};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;

/// Public GitHub REST endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";
/// File name holding the planner payload inside the gist.
pub const GIST_FILE_NAME: &str = "planner.json";
const GIST_DESCRIPTION: &str = "Weekly Planner Data";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("weekly-planner/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GistResponse {
    id: String,
    #[serde(default)]
    files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

/// Gist-backed `SyncProvider`.
pub struct GistProvider {
    agent: ureq::Agent,
    base_url: String,
}

impl GistProvider {
    /// Provider talking to the public GitHub API.
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_URL)
    }

    /// Provider talking to a GitHub-compatible API at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(DEFAULT_TIMEOUT).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: &str, url: &str, token: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
    }
}

impl Default for GistProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncProvider for GistProvider {
    fn provider_id(&self) -> &str {
        "github_gist"
    }

    fn push(&self, request: PushRequest<'_>) -> SyncResult<PushReceipt> {
        if request.token.is_empty() {
            return Err(SyncError::MissingToken);
        }
        let body = json!({
            "description": GIST_DESCRIPTION,
            "files": { GIST_FILE_NAME: { "content": request.payload } },
        });
        let (method, url) = match request.remote_id.filter(|id| !id.is_empty()) {
            Some(id) => ("PATCH", format!("{}/gists/{id}", self.base_url)),
            None => ("POST", format!("{}/gists", self.base_url)),
        };

        let response = self
            .request(method, &url, request.token)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(map_ureq_error)?;
        let gist: GistResponse = response
            .into_json()
            .map_err(|err| SyncError::InvalidResponse(err.to_string()))?;

        info!(
            "event=sync_push module=sync status=ok provider=github_gist method={method} bytes={}",
            request.payload.len()
        );
        Ok(PushReceipt { remote_id: gist.id })
    }

    fn pull(&self, request: PullRequest<'_>) -> SyncResult<String> {
        if request.token.is_empty() || request.remote_id.is_empty() {
            return Err(SyncError::MissingRemoteId);
        }
        let url = format!("{}/gists/{}", self.base_url, request.remote_id);
        let response = self
            .request("GET", &url, request.token)
            .call()
            .map_err(map_ureq_error)?;
        let mut gist: GistResponse = response
            .into_json()
            .map_err(|err| SyncError::InvalidResponse(err.to_string()))?;

        let content = gist
            .files
            .remove(GIST_FILE_NAME)
            .and_then(|file| file.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| SyncError::MissingRemoteFile(GIST_FILE_NAME.to_string()))?;

        info!(
            "event=sync_pull module=sync status=ok provider=github_gist bytes={}",
            content.len()
        );
        Ok(content)
    }
}

fn map_ureq_error(err: ureq::Error) -> SyncError {
    match err {
        ureq::Error::Status(code, _) => {
            warn!("event=sync_request module=sync status=error http_status={code}");
            SyncError::Status(code)
        }
        ureq::Error::Transport(transport) => {
            warn!("event=sync_request module=sync status=error error_code=transport");
            SyncError::Transport(transport.to_string())
        }
    }
}
