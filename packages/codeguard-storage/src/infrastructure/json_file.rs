//! JSON document backend
//!
//! The whole history lives in one JSON object:
//!
//! ```json
//! {
//!   "app/main.py": [
//!     { "timestamp": "2025-01-01T12:00:00.000000+00:00", "issues": 3 }
//!   ]
//! }
//! ```
//!
//! Every append reads the document, adds the record and rewrites the
//! document through a temp file that is renamed over the original, so a
//! reader never sees a half-written file. Appends from one store instance
//! are serialized; appends from independent processes sharing the same
//! path are not coordinated and can lose updates.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::{HistoryRecord, HistoryStore};
use crate::Result;

/// History store backed by a single JSON document
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    /// The document is created on first append; nothing is touched here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, treating a missing or unreadable one as empty
    fn load_document(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                warn!(
                    path = %self.path.display(),
                    "history document is not an object ({}), starting empty",
                    json_type_name(&other)
                );
                Ok(Map::new())
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "history document is corrupt, starting empty"
                );
                Ok(Map::new())
            }
        }
    }

    fn write_document(&self, document: Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, &Value::Object(document))?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn append(&self, file_id: &str, issue_count: u64, timestamp: DateTime<Utc>) -> Result<()> {
        let _guard = self.write_lock.lock()?;

        let mut document = self.load_document()?;
        let record = serde_json::to_value(HistoryRecord::new(timestamp, issue_count))?;

        let slot = document
            .entry(file_id)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            warn!(file_id, "history entry is not a list, replacing it");
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(records) = slot {
            records.push(record);
        }

        self.write_document(document)?;
        debug!(file_id, issue_count, "history record appended");
        Ok(())
    }

    fn query(&self, file_id: &str) -> Result<Vec<HistoryRecord>> {
        let document = self.load_document()?;

        let entries = match document.get(file_id) {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                warn!(
                    file_id,
                    "history entry is {} instead of a list, ignoring it",
                    json_type_name(other)
                );
                return Ok(Vec::new());
            }
            None => return Ok(Vec::new()),
        };

        let records = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let record = HistoryRecord::from_value(entry);
                if record.is_none() {
                    warn!(file_id, index, "skipping malformed history record");
                }
                record
            })
            .collect();
        Ok(records)
    }

    fn files(&self) -> Result<Vec<String>> {
        Ok(self.load_document()?.keys().cloned().collect())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileHistoryStore {
        JsonFileHistoryStore::new(dir.path().join("analysis_history.json"))
    }

    #[test]
    fn test_missing_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.query("f.py").unwrap().is_empty());
        assert!(store.files().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_document_layout() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        store.append("שלום.py", 2, ts).unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        let expected = "{\n  \"שלום.py\": [\n    {\n      \"timestamp\": \"2025-01-02T03:04:05.000000+00:00\",\n      \"issues\": 2\n    }\n  ]\n}";
        assert_eq!(written, expected);
    }

    #[test]
    fn test_files_keep_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record_now("z.py", 1).unwrap();
        store.record_now("a.py", 1).unwrap();
        store.record_now("z.py", 2).unwrap();

        assert_eq!(store.files().unwrap(), vec!["z.py", "a.py"]);
    }

    #[test]
    fn test_non_object_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert!(store.query("f.py").unwrap().is_empty());
    }

    #[test]
    fn test_non_list_entry_is_replaced_on_append() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"f.py": "oops", "g.py": []}"#).unwrap();

        assert!(store.query("f.py").unwrap().is_empty());
        store.record_now("f.py", 7).unwrap();

        let records = store.query("f.py").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].issue_count, 7);
        assert_eq!(store.files().unwrap(), vec!["f.py", "g.py"]);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("nested/deeper/history.json"));

        store.record_now("f.py", 1).unwrap();
        assert!(store.path().exists());
    }
}
