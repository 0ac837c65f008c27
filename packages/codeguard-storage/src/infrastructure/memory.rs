//! In-memory history store (for testing and dry runs)
//!
//! Nothing survives the process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::domain::{HistoryRecord, HistoryStore};
use crate::Result;

#[derive(Debug, Default)]
struct Series {
    order: Vec<String>,
    records: HashMap<String, Vec<HistoryRecord>>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    series: Arc<RwLock<Series>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, file_id: &str, issue_count: u64, timestamp: DateTime<Utc>) -> Result<()> {
        let mut series = self.series.write()?;
        if !series.records.contains_key(file_id) {
            series.order.push(file_id.to_string());
        }
        series
            .records
            .entry(file_id.to_string())
            .or_default()
            .push(HistoryRecord::new(timestamp, issue_count));
        Ok(())
    }

    fn query(&self, file_id: &str) -> Result<Vec<HistoryRecord>> {
        Ok(self
            .series
            .read()?
            .records
            .get(file_id)
            .cloned()
            .unwrap_or_default())
    }

    fn files(&self) -> Result<Vec<String>> {
        Ok(self.series.read()?.order.clone())
    }
}
