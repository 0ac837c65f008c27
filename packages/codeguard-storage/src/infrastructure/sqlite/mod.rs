//! SQLite adapter for HistoryStore
//!
//! One row per record. Appends are single-row inserts inside a transaction,
//! so concurrent writers never clobber each other's records. Append order is
//! the rowid order.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, warn};

use crate::domain::{format_timestamp, parse_timestamp, HistoryRecord, HistoryStore};
use crate::{Result, StorageError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS history (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    file_id   TEXT    NOT NULL,
    timestamp TEXT    NOT NULL,
    issues    INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_history_file ON history (file_id, id);
";

pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Self::init(conn)
    }

    pub fn new_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn append(&self, file_id: &str, issue_count: u64, timestamp: DateTime<Utc>) -> Result<()> {
        let issues = i64::try_from(issue_count)
            .map_err(|_| StorageError::database(format!("issue count {} out of range", issue_count)))?;

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO history (file_id, timestamp, issues) VALUES (?1, ?2, ?3)",
            params![file_id, format_timestamp(&timestamp), issues],
        )?;
        tx.commit()?;

        debug!(file_id, issue_count, "history row inserted");
        Ok(())
    }

    fn query(&self, file_id: &str) -> Result<Vec<HistoryRecord>> {
        let conn = self.conn.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, timestamp, issues FROM history WHERE file_id = ?1 ORDER BY id")?;

        let rows = stmt.query_map(params![file_id], |row| {
            let id: i64 = row.get(0)?;
            let timestamp = row.get_ref(1)?.as_str().ok().and_then(parse_timestamp);
            let issues = row
                .get_ref(2)?
                .as_i64()
                .ok()
                .and_then(|n| u64::try_from(n).ok());
            Ok((id, timestamp.zip(issues)))
        })?;

        let mut records = Vec::new();
        for row in rows {
            match row? {
                (_, Some((timestamp, issues))) => records.push(HistoryRecord::new(timestamp, issues)),
                (id, None) => warn!(file_id, row_id = id, "skipping malformed history row"),
            }
        }
        Ok(records)
    }

    fn files(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock()?;
        let mut stmt =
            conn.prepare("SELECT file_id FROM history GROUP BY file_id ORDER BY MIN(id)")?;
        let files = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(files)
    }
}
