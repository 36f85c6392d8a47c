use std::collections::HashMap;

use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;
use stepin_core::constants::SNAPSHOT_KEY;
use stepin_core::errors::StorageError;
use stepin_core::storage::DocumentStore;
use tokio::sync::OnceCell;

use crate::client::GistClient;

/// Description given to gists created by the store.
pub const GIST_DESCRIPTION: &str = "StepInNotifier Data Storage";

/// Keeps each document as one file of a private gist.
///
/// When no gist id is configured, the first access creates the gist (seeded
/// with an empty snapshot) and the new id is reused for the rest of the
/// process.
pub struct GistDocumentStore {
    client: GistClient,
    gist_id: OnceCell<String>,
}

impl GistDocumentStore {
    pub fn new(client: GistClient, gist_id: Option<String>) -> Self {
        let gist_id = match gist_id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => OnceCell::new_with(Some(id)),
            _ => OnceCell::new(),
        };
        Self { client, gist_id }
    }

    /// The gist in use, if one has been configured or created.
    pub fn gist_id(&self) -> Option<&str> {
        self.gist_id.get().map(String::as_str)
    }

    async fn create_gist(&self) -> Result<String, StorageError> {
        info!("Creating new Gist for data storage...");
        let placeholder = HashMap::from([(SNAPSHOT_KEY.to_string(), "[]".to_string())]);
        let gist = self
            .client
            .create_gist(GIST_DESCRIPTION, placeholder)
            .await
            .map_err(|e| StorageError::Unavailable(format!("failed to create gist: {}", e)))?;
        warn!("No GIST_ID configured. Created new Gist: {}", gist.id);
        warn!("Set GIST_ID={} so later runs reuse it", gist.id);
        Ok(gist.id)
    }

    async fn ensure_gist(&self) -> Result<&str, StorageError> {
        self.gist_id
            .get_or_try_init(|| self.create_gist())
            .await
            .map(String::as_str)
    }
}

#[async_trait]
impl DocumentStore for GistDocumentStore {
    fn backend(&self) -> &'static str {
        "gist"
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let gist_id = self.ensure_gist().await?;

        let gist = match self.client.get_gist(gist_id).await {
            Ok(gist) => gist,
            Err(e) if e.is_not_found() => {
                warn!("Gist {} not found", gist_id);
                return Ok(None);
            }
            Err(e) => return Err(StorageError::read(key, e)),
        };

        let Some(file) = gist.files.get(key) else {
            return Ok(None);
        };
        let content = self
            .client
            .file_content(file)
            .await
            .map_err(|e| StorageError::read(key, e))?;

        match content {
            Some(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| StorageError::serialization(key, e)),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StorageError> {
        let gist_id = self.ensure_gist().await?;
        let content = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::serialization(key, e))?;

        self.client
            .update_file(gist_id, key, content)
            .await
            .map_err(|e| StorageError::write(key, e))
    }
}
