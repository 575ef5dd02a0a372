//! In-memory session storage for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use authsession_core::storage::{Result, SessionKey, SessionRepository};

/// In-memory session store.
///
/// Stores records in a HashMap wrapped in `Arc<RwLock<_>>`. Clones share the
/// same map. Data is not persisted and will be lost when the last clone is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<RwLock<HashMap<SessionKey, String>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = SessionKey::parse(key)?;
        let records = self.records.read().await;
        Ok(records.get(&key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = SessionKey::parse(key)?;
        let mut records = self.records.write().await;
        records.insert(key, value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let key = SessionKey::parse(key)?;
        let mut records = self.records.write().await;
        records.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authsession_core::storage::RepositoryError;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryRepository::new();

        store.set("tok-123", r#"{"sub":"u1"}"#).await.unwrap();

        let value = store.get("tok-123").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"sub":"u1"}"#));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = InMemoryRepository::new();

        let result = store.get("nonexistent").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let store = InMemoryRepository::new();

        store.set("same-key", "v1").await.unwrap();
        store.set("same-key", "v2").await.unwrap();

        assert_eq!(store.get("same-key").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryRepository::new();
        store.set("tok-1", "v").await.unwrap();

        store.delete("tok-1").await.unwrap();
        store.delete("tok-1").await.unwrap();

        assert!(store.get("tok-1").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_never_set() {
        let store = InMemoryRepository::new();
        store.set("other", "v").await.unwrap();

        // Should not error when deleting a key that was never stored
        let result = store.delete("never-set").await;
        assert!(result.is_ok());
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let store = InMemoryRepository::new();

        assert!(matches!(
            store.get("").await,
            Err(RepositoryError::InvalidInput(_))
        ));
        assert!(matches!(
            store.set("", "v").await,
            Err(RepositoryError::InvalidInput(_))
        ));
        assert!(matches!(
            store.delete("").await,
            Err(RepositoryError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_value_is_stored() {
        let store = InMemoryRepository::new();

        store.set("revoked", "").await.unwrap();
        assert_eq!(store.get("revoked").await.unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = InMemoryRepository::new();
        let clone = store.clone();

        store.set("tok-1", "v").await.unwrap();

        // Clone should see the same record
        assert_eq!(clone.get("tok-1").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_concurrent_writers_on_distinct_keys() {
        let store = Arc::new(InMemoryRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .set(&format!("tok-{}", i), &i.to_string())
                        .await
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 16);
        assert_eq!(store.get("tok-7").await.unwrap().as_deref(), Some("7"));
    }
}
