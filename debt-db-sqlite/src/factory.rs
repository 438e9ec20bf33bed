use async_trait::async_trait;
use debt_core::db::{StoreConfig, StoreFactory};
use debt_core::{KeyValueStore, StoreError};
use tracing::debug;

use crate::store::SqliteStore;

/// Maps a settings-file connection string to a sqlx URL.
///
/// * `:memory:` (or empty) becomes `sqlite::memory:`.
/// * Anything already starting with `sqlite:` is passed through.
/// * Otherwise it is a file path, created if missing.
pub fn connection_url(connection_string: &str) -> String {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() || trimmed == ":memory:" {
        "sqlite::memory:".to_string()
    } else if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else {
        format!("sqlite://{}?mode=rwc", trimmed)
    }
}

/// [`StoreFactory`] for SQLite.
///
/// ```rust,no_run
/// use debt_core::StoreRegistry;
/// use debt_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let url = connection_url(&config.connection_string);
        let store = SqliteStore::new(&url)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Backend(format!("{e:#}")))?;
        debug!(url = %url, "opened sqlite store");
        Ok(Box::new(store))
    }
}
