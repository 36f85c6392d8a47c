//! Step In Gist Storage - keeps the watcher's JSON documents in a private GitHub Gist.
//!
//! Lets scheduled runs on ephemeral machines (CI runners, cron containers)
//! share state without a database.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stepin_core::storage::DocumentRepository;
//! use stepin_gist_storage::{GistClient, GistDocumentStore, DEFAULT_GITHUB_API_URL};
//!
//! let client = GistClient::new(DEFAULT_GITHUB_API_URL, &token)?;
//! let store = GistDocumentStore::new(client, std::env::var("GIST_ID").ok());
//! let repository = DocumentRepository::new(Arc::new(store));
//! ```

mod client;
mod error;
mod store;
mod types;

pub use client::{GistClient, DEFAULT_GITHUB_API_URL};
pub use error::{GistError, Result};
pub use store::{GistDocumentStore, GIST_DESCRIPTION};
pub use types::*;
