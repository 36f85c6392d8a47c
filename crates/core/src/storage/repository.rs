use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::storage_traits::DocumentStore;
use crate::errors::StorageError;

/// Typed, best-effort access to a [`DocumentStore`].
///
/// Reads never fail: an absent store, an absent key, a transport error or a
/// document that no longer parses all come back as `None`, which callers
/// treat as a cold start. Writes report failures but callers are expected to
/// log and carry on. Every outcome is logged here.
#[derive(Clone)]
pub struct DocumentRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let document = match self.store.load(key).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                warn!(
                    "{} not found in {} store, using empty default",
                    key,
                    self.store.backend()
                );
                return None;
            }
            Err(e) => {
                error!("Failed to read {} from {} store: {}", key, self.store.backend(), e);
                return None;
            }
        };

        match serde_json::from_value::<T>(document) {
            Ok(value) => {
                debug!("Read {} from {} store", key, self.store.backend());
                Some(value)
            }
            Err(e) => {
                error!(
                    "{} in {} store is not valid: {}",
                    key,
                    self.store.backend(),
                    StorageError::serialization(key, e)
                );
                None
            }
        }
    }

    pub async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.read(key).await.unwrap_or_default()
    }

    pub async fn write<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let document =
            serde_json::to_value(value).map_err(|e| StorageError::serialization(key, e))?;

        match self.store.save(key, &document).await {
            Ok(()) => {
                info!("Successfully updated {} in {} store", key, self.store.backend());
                Ok(())
            }
            Err(e) => {
                error!("Failed to write {} to {} store: {}", key, self.store.backend(), e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDocumentStore;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_default() {
        let repo = DocumentRepository::new(Arc::new(InMemoryDocumentStore::new()));
        let counter: Counter = repo.read_or_default("missing.json").await;
        assert_eq!(counter, Counter::default());
        let list: Vec<u32> = repo.read_or_default("missing.json").await;
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repo = DocumentRepository::new(store.clone());
        repo.write("counter.json", &Counter { count: 3 }).await.unwrap();
        assert_eq!(store.get("counter.json"), Some(json!({"count": 3})));
        assert_eq!(
            repo.read::<Counter>("counter.json").await,
            Some(Counter { count: 3 })
        );
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_none() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.insert("counter.json", json!({"count": 1}));
        store.fail_reads(true);
        let repo = DocumentRepository::new(store);
        assert_eq!(repo.read::<Counter>("counter.json").await, None);
    }

    #[tokio::test]
    async fn test_corrupt_document_degrades_to_none() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.insert("counter.json", json!(["not", "a", "counter"]));
        let repo = DocumentRepository::new(store);
        assert_eq!(repo.read::<Counter>("counter.json").await, None);
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.fail_writes(true);
        let repo = DocumentRepository::new(store.clone());
        let err = repo.write("counter.json", &Counter { count: 1 }).await.unwrap_err();
        assert!(matches!(err, StorageError::WriteFailed { .. }));
        assert_eq!(store.get("counter.json"), None);
    }
}
