//! History Store construction from configuration

use tracing::info;

use codeguard_storage::{HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};

use crate::config::{HistoryBackend, HistoryConfig};
use crate::shared::models::Result;

/// Open the configured backend
///
/// Selecting `sqlite` in a build without the `sqlite` feature is a
/// configuration error.
pub fn open_history_store(config: &HistoryConfig) -> Result<Box<dyn HistoryStore>> {
    info!(backend = %config.backend, path = %config.path.display(), "opening history store");

    let store: Box<dyn HistoryStore> = match config.backend {
        HistoryBackend::Json => Box::new(JsonFileHistoryStore::new(config.path.clone())),
        HistoryBackend::Memory => Box::new(InMemoryHistoryStore::new()),
        HistoryBackend::Sqlite => open_sqlite(config)?,
    };
    Ok(store)
}

#[cfg(feature = "sqlite")]
fn open_sqlite(config: &HistoryConfig) -> Result<Box<dyn HistoryStore>> {
    let store = codeguard_storage::SqliteHistoryStore::open(&config.path)?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_config: &HistoryConfig) -> Result<Box<dyn HistoryStore>> {
    Err(crate::shared::models::CodeguardError::config(
        "history backend 'sqlite' requires the `sqlite` feature",
    ))
}
