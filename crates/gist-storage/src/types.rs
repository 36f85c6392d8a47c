//! Request and response types for the GitHub Gist API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A gist as returned by `GET /gists/{id}` and `POST /gists`.
#[derive(Debug, Clone, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub files: HashMap<String, GistFile>,
}

/// One file inside a gist.
#[derive(Debug, Clone, Deserialize)]
pub struct GistFile {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// GitHub truncates inline content above ~1 MB; the full text is then
    /// only available at `raw_url`.
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub raw_url: Option<String>,
}

/// File contents for create/update requests.
#[derive(Debug, Clone, Serialize)]
pub struct GistFileContent {
    pub content: String,
}

/// Body of `POST /gists`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGistRequest {
    pub description: String,
    pub public: bool,
    pub files: HashMap<String, GistFileContent>,
}

/// Body of `PATCH /gists/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateGistRequest {
    pub files: HashMap<String, GistFileContent>,
}

/// Error payload GitHub sends alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
