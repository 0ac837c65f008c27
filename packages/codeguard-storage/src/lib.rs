//! Issue history storage for CodeGuard
//!
//! > "Every analysis leaves one data point; the trend is the product."
//!
//! ## Core Principles
//!
//! 1. **Append-only**: a file's sequence only grows, records never change
//! 2. **Opaque identity**: file identifiers are caller-chosen strings
//! 3. **Forgiving reads**: a corrupt document reads as empty, a malformed
//!    record is skipped, neither is an error
//!
//! ## Backends
//!
//! - `JsonFileHistoryStore`: single JSON document (the on-disk format shared
//!   with existing `analysis_history.json` files)
//! - `SqliteHistoryStore`: transactional, one row per record (feature `sqlite`)
//! - `InMemoryHistoryStore`: tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codeguard_storage::{HistoryStore, JsonFileHistoryStore};
//!
//! let store = JsonFileHistoryStore::new("analysis_history.json");
//! store.record_now("app/main.py", 3)?;
//!
//! for record in store.query("app/main.py")? {
//!     println!("{} {}", record.timestamp, record.issue_count);
//! }
//! # Ok::<(), codeguard_storage::StorageError>(())
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{format_timestamp, parse_timestamp, HistoryRecord, HistoryStore};
pub use infrastructure::{InMemoryHistoryStore, JsonFileHistoryStore};

#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteHistoryStore;
