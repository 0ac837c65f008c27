//! Infrastructure layer - HistoryStore adapters

mod json_file;
mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use json_file::JsonFileHistoryStore;
pub use memory::InMemoryHistoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteHistoryStore;
