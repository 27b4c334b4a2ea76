use planner_core::db::open_db_in_memory;
use planner_core::{
    PlannerService, PullRequest, PushReceipt, PushRequest, SqliteStateRepository, SyncError,
    SyncProvider, SyncResult,
};
use std::cell::RefCell;

/// In-memory provider recording the last pushed payload.
#[derive(Default)]
struct MemoryProvider {
    stored: RefCell<Option<(String, String)>>,
    fail_with: Option<SyncError>,
}

impl MemoryProvider {
    fn failing(err: SyncError) -> Self {
        Self {
            stored: RefCell::new(None),
            fail_with: Some(err),
        }
    }

    fn seeded(remote_id: &str, payload: &str) -> Self {
        Self {
            stored: RefCell::new(Some((remote_id.to_string(), payload.to_string()))),
            fail_with: None,
        }
    }
}

impl SyncProvider for MemoryProvider {
    fn provider_id(&self) -> &str {
        "memory"
    }

    fn push(&self, request: PushRequest<'_>) -> SyncResult<PushReceipt> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let remote_id = request.remote_id.unwrap_or("created-1").to_string();
        *self.stored.borrow_mut() = Some((remote_id.clone(), request.payload.to_string()));
        Ok(PushReceipt { remote_id })
    }

    fn pull(&self, request: PullRequest<'_>) -> SyncResult<String> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        match self.stored.borrow().as_ref() {
            Some((id, payload)) if id == request.remote_id => Ok(payload.clone()),
            _ => Err(SyncError::Status(404)),
        }
    }
}

#[test]
fn push_without_token_reports_failure() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn)).unwrap();
    let provider = MemoryProvider::default();

    let outcome = service.push(&provider).unwrap();
    assert!(!outcome.ok);
    assert!(provider.stored.borrow().is_none());
}

#[test]
fn first_push_remembers_created_remote_id() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn)).unwrap();
    service.save_gist_config("token", "").unwrap();
    let provider = MemoryProvider::default();

    let outcome = service.push(&provider).unwrap();
    assert!(outcome.ok, "{}", outcome.message);
    assert_eq!(service.document().gist.gist_id, "created-1");

    let stored = provider.stored.borrow();
    let (_, payload) = stored.as_ref().unwrap();
    assert!(!payload.contains("token"));
    assert!(payload.contains("\"tasks\""));
}

#[test]
fn push_to_existing_remote_keeps_its_id() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn)).unwrap();
    service.save_gist_config("token", "g-42").unwrap();
    let provider = MemoryProvider::default();

    assert!(service.push(&provider).unwrap().ok);
    assert_eq!(provider.stored.borrow().as_ref().unwrap().0, "g-42");
    assert_eq!(service.document().gist.gist_id, "g-42");
}

#[test]
fn push_failure_surfaces_http_status() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn)).unwrap();
    service.save_gist_config("token", "").unwrap();

    let outcome = service
        .push(&MemoryProvider::failing(SyncError::Status(401)))
        .unwrap();
    assert!(!outcome.ok);
    assert!(outcome.message.contains("401"));
    assert_eq!(service.document().gist.gist_id, "");
}

#[test]
fn pull_requires_token_and_remote_id() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn)).unwrap();
    service.save_gist_config("token", "").unwrap();

    let outcome = service.pull(&MemoryProvider::default()).unwrap();
    assert!(!outcome.ok);
}

#[test]
fn pull_replaces_state_but_keeps_local_credentials() {
    let remote = r#"{
        "tasks": [{"id": "r1", "title": "Remote task", "category": "toeic", "createdAt": 1}],
        "slots": [{"id": "Mon|morning", "day": "Mon", "zoneId": "morning", "taskId": "r1"}],
        "settings": {"autoSeed": false},
        "monthly": {},
        "gist": {"token": "remote-token", "gistId": "other"}
    }"#;
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn)).unwrap();
    service.save_gist_config("local-token", "g-1").unwrap();

    let outcome = service
        .pull(&MemoryProvider::seeded("g-1", remote))
        .unwrap();
    assert!(outcome.ok, "{}", outcome.message);

    let document = service.document();
    assert_eq!(document.tasks.len(), 1);
    assert_eq!(document.tasks[0].title, "Remote task");
    assert_eq!(document.slots.len(), 1);
    assert!(!document.settings.auto_seed);
    assert_eq!(document.gist.token, "local-token");
    assert_eq!(document.gist.gist_id, "g-1");
}

#[test]
fn failed_pull_leaves_state_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::open(SqliteStateRepository::new(&conn)).unwrap();
    service.save_gist_config("token", "g-1").unwrap();
    let before = service.document().clone();

    let outcome = service
        .pull(&MemoryProvider::failing(SyncError::Transport(
            "connection refused".to_string(),
        )))
        .unwrap();
    assert!(!outcome.ok);
    assert_eq!(service.document(), &before);

    let outcome = service
        .pull(&MemoryProvider::seeded("g-1", "not json"))
        .unwrap();
    assert!(!outcome.ok);
    assert_eq!(service.document(), &before);
}
