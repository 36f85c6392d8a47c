//! Backend trait for named JSON documents.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StorageError;

/// A durable home for a handful of named JSON documents.
///
/// Backends create whatever container they need on first access. A missing
/// container or a missing key is not an error: `load` returns `Ok(None)`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for log lines ("gist", "file", "memory").
    fn backend(&self) -> &'static str;

    /// Load the document stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Create or replace the document stored under `key`.
    async fn save(&self, key: &str, document: &Value) -> Result<(), StorageError>;
}
