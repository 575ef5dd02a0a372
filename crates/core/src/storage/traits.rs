use std::sync::Arc;

use async_trait::async_trait;

use super::Result;

/// Session storage abstraction.
///
/// Keys and values are plain strings; values are opaque to every backend.
/// Implementations perform at most one store round trip per call and never
/// retry on their own.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` when no record exists. A missing record is not an
    /// error.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any existing record.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the record stored under `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: SessionRepository + ?Sized> SessionRepository for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}

#[async_trait]
impl<T: SessionRepository + ?Sized> SessionRepository for Box<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}
