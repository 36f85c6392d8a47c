use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;

use super::storage_traits::DocumentStore;
use crate::errors::StorageError;

/// Stores each document as a pretty-printed JSON file under one directory.
///
/// The directory is created on demand. Writes go to a sibling temp file that
/// is renamed over the target, so a document is either old or new on disk.
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let name = Path::new(key);
        let is_plain_name = name.components().count() == 1
            && name.file_name().map(|f| f == name.as_os_str()).unwrap_or(false);
        if !is_plain_name {
            return Err(StorageError::Unavailable(format!(
                "'{}' is not a plain file name",
                key
            )));
        }
        Ok(self.root.join(name))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{}.tmp", key))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::read(key, e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| StorageError::serialization(key, e))
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let contents = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::serialization(key, e))?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::write(key, e))?;

        let temp_path = self.temp_path_for(key);
        let written = match tokio::fs::write(&temp_path, contents).await {
            Ok(()) => tokio::fs::rename(&temp_path, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove {}: {}", temp_path.display(), cleanup);
                }
            }
            return Err(StorageError::write(key, e));
        }
        debug!("Wrote {}", path.display());
        Ok(())
    }
}
