use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::storage_traits::DocumentStore;
use crate::errors::StorageError;

/// Process-local store. Used for dry runs and tests; can be told to fail.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    data: Arc<Mutex<HashMap<String, Value>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, document: Value) {
        if let Ok(mut data) = self.data.lock() {
            data.insert(key.to_string(), document);
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.lock().ok()?.get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::read(key, "simulated read failure"));
        }
        let data = self
            .data
            .lock()
            .map_err(|_| StorageError::read(key, "failed to acquire lock"))?;
        Ok(data.get(key).cloned())
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::write(key, "simulated write failure"));
        }
        let mut data = self
            .data
            .lock()
            .map_err(|_| StorageError::write(key, "failed to acquire lock"))?;
        data.insert(key.to_string(), document.clone());
        Ok(())
    }
}
