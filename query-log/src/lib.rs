//! Append-only SQLite log of answered search interactions.
//!
//! One row per successfully answered query. This crate exposes a single
//! write operation, [`SearchLog::append`]; nothing here ever reads, updates
//! or deletes rows.

mod schema;

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use schema::INITIAL_SCHEMA;

/// Errors produced by the query log store.
#[derive(Debug, Error)]
pub enum QueryLogError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The internal connection lock was poisoned by a panicked writer.
    #[error("log store lock poisoned")]
    Poisoned,
}

/// One logged interaction: who asked what, and what the model answered.
///
/// `timestamp` is the time of logging (UTC), not of query submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub user_id: String,
    pub query: String,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

/// SQLite-backed store for [`LogEntry`] rows.
///
/// Writes serialize on an internal mutex, so a shared instance tolerates
/// concurrent appends from multiple request handlers.
pub struct SearchLog {
    conn: Mutex<Connection>,
}

impl SearchLog {
    /// Opens an in-memory log. Used by tests.
    ///
    /// Automatically initializes the schema on connection open.
    pub fn in_memory() -> Result<Self, QueryLogError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Opens a file-based log at the given path.
    ///
    /// Creates the database file if it does not exist.
    /// Automatically initializes the schema on connection open.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, QueryLogError> {
        Self::from_connection(Connection::open(path)?)
    }

    fn from_connection(conn: Connection) -> Result<Self, QueryLogError> {
        conn.execute_batch(INITIAL_SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Appends one interaction record.
    ///
    /// # Errors
    /// Returns [`QueryLogError::Sqlite`] if the insert fails.
    pub fn append(&self, entry: &LogEntry) -> Result<(), QueryLogError> {
        let conn = self.conn.lock().map_err(|_| QueryLogError::Poisoned)?;
        conn.execute(
            "INSERT INTO search_log (user_id, query, output, timestamp) VALUES (?1, ?2, ?3, ?4)",
            (
                &entry.user_id,
                &entry.query,
                &entry.output,
                entry.timestamp.to_rfc3339(),
            ),
        )?;
        debug!(
            target: "query_log::append",
            user_id = %entry.user_id,
            "interaction logged"
        );
        Ok(())
    }
}
