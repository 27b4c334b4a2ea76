//! Keyed document storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and write one serialized document per storage key.
//!
//! # Invariants
//! - A write replaces the whole payload for its key (last writer wins).
//! - Reading an unknown key yields `None`, not an error.

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for planner state.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "planner state storage failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for serialized planner documents.
pub trait StateRepository {
    /// Returns the stored payload for `key`, if any.
    fn load_state(&self, key: &str) -> RepoResult<Option<String>>;
    /// Stores `payload` under `key`, replacing any previous value.
    fn save_state(&self, key: &str, payload: &str, updated_at: i64) -> RepoResult<()>;
    /// Removes the payload stored under `key`. Missing keys are fine.
    fn delete_state(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed state repository.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load_state(&self, key: &str) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM planner_state WHERE storage_key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        debug!(
            "event=state_read module=repo status=ok found={}",
            payload.is_some()
        );
        Ok(payload)
    }

    fn save_state(&self, key: &str, payload: &str, updated_at: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO planner_state (storage_key, payload, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload, updated_at],
        )?;
        debug!(
            "event=state_write module=repo status=ok bytes={}",
            payload.len()
        );
        Ok(())
    }

    fn delete_state(&self, key: &str) -> RepoResult<()> {
        let removed = self.conn.execute(
            "DELETE FROM planner_state WHERE storage_key = ?1;",
            params![key],
        )?;
        debug!("event=state_delete module=repo status=ok removed={removed}");
        Ok(())
    }
}
