use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Backend(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// String key/value persistence used to keep the debt list between runs.
///
/// Values are opaque to the store; callers serialize them (JSON for the
/// debt list). A missing key is `Ok(None)`, never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Inserts or replaces the value under `key`.
    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removes `key`. Returns whether a value was present.
    async fn remove(
        &self,
        key: &str,
    ) -> Result<bool, StoreError>;

    /// Every stored key, sorted.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}
