//! Common test utilities for codeguard-storage

use chrono::{DateTime, TimeZone, Utc};
use codeguard_storage::{HistoryRecord, HistoryStore};

/// Fixed instant `minutes` after 2025-06-01T10:00:00Z
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

/// Issue counts recorded for a file, in order
pub fn counts(store: &dyn HistoryStore, file_id: &str) -> Vec<u64> {
    store
        .query(file_id)
        .unwrap()
        .iter()
        .map(|r: &HistoryRecord| r.issue_count)
        .collect()
}
