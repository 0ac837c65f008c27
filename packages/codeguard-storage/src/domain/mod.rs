//! Domain layer for the issue history
//!
//! # Domain Models
//!
//! - `HistoryRecord`: one `(timestamp, issue count)` observation for a file
//!
//! # Port Trait
//!
//! - `HistoryStore`: append-only per-file time series
//!
//! # Examples
//!
//! ```rust
//! use chrono::Utc;
//! use codeguard_storage::{HistoryStore, InMemoryHistoryStore};
//!
//! let store = InMemoryHistoryStore::new();
//! store.append("app/main.py", 3, Utc::now()).unwrap();
//! store.append("app/main.py", 5, Utc::now()).unwrap();
//!
//! let trend = store.query("app/main.py").unwrap();
//! assert_eq!(trend.len(), 2);
//! assert_eq!(trend[1].issue_count, 5);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// One observation of a file's issue count
///
/// Serialized as `{"timestamp": "<ISO-8601>", "issues": <count>}`, the record
/// shape of the persisted history document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "issues")]
    pub issue_count: u64,
}

impl HistoryRecord {
    pub fn new(timestamp: DateTime<Utc>, issue_count: u64) -> Self {
        Self {
            timestamp,
            issue_count,
        }
    }

    /// Decode one persisted record, `None` when it cannot be interpreted
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Render a timestamp the way the history document stores it
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a stored timestamp
///
/// Accepts RFC 3339 timestamps with an offset, and naive ISO-8601 timestamps
/// (`2025-01-01T12:00:00.123456`), which are read as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let naive: NaiveDateTime = raw.parse().ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
}

mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait: HistoryStore
// ═══════════════════════════════════════════════════════════════════════════

/// Append-only history of issue counts, keyed by file identifier
///
/// File identifiers are opaque: a bare filename or a full path, whatever the
/// caller chose when recording.
///
/// # Implementations
///
/// - `JsonFileHistoryStore`: single JSON document, rewritten on every append
/// - `SqliteHistoryStore`: one row per record (feature `sqlite`)
/// - `InMemoryHistoryStore`: tests and dry runs
pub trait HistoryStore: Send + Sync {
    /// Append a record to the end of `file_id`'s sequence
    ///
    /// The sequence is created if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing storage cannot be written.
    fn append(&self, file_id: &str, issue_count: u64, timestamp: DateTime<Utc>) -> Result<()>;

    /// All records for `file_id`, in append order
    ///
    /// Returns an empty vector when nothing was recorded for the file.
    /// Records that cannot be interpreted are skipped.
    fn query(&self, file_id: &str) -> Result<Vec<HistoryRecord>>;

    /// File identifiers with at least one record slot, in first-recorded order
    fn files(&self) -> Result<Vec<String>>;

    /// Append a record stamped with the current time
    fn record_now(&self, file_id: &str, issue_count: u64) -> Result<HistoryRecord> {
        let record = HistoryRecord::new(Utc::now(), issue_count);
        self.append(file_id, record.issue_count, record.timestamp)?;
        Ok(record)
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for Box<S> {
    fn append(&self, file_id: &str, issue_count: u64, timestamp: DateTime<Utc>) -> Result<()> {
        (**self).append(file_id, issue_count, timestamp)
    }

    fn query(&self, file_id: &str) -> Result<Vec<HistoryRecord>> {
        (**self).query(file_id)
    }

    fn files(&self) -> Result<Vec<String>> {
        (**self).files()
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for Arc<S> {
    fn append(&self, file_id: &str, issue_count: u64, timestamp: DateTime<Utc>) -> Result<()> {
        (**self).append(file_id, issue_count, timestamp)
    }

    fn query(&self, file_id: &str) -> Result<Vec<HistoryRecord>> {
        (**self).query(file_id)
    }

    fn files(&self) -> Result<Vec<String>> {
        (**self).files()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
