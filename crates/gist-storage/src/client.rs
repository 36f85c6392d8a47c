//! GitHub Gist API client.
//!
//! Only the three calls the document store needs: read a gist, create a
//! private gist, and replace one file of a gist.

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::error::{GistError, Result};
use crate::types::*;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("stepin-notifier/", env!("CARGO_PKG_VERSION"));

/// Client for the GitHub Gist API.
#[derive(Debug, Clone)]
pub struct GistClient {
    client: reqwest::Client,
    base_url: String,
}

impl GistClient {
    /// Create a new gist client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the GitHub API (e.g., "https://api.github.com")
    /// * `token` - A personal access token with the `gist` scope
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Self::with_timeout(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(GistError::auth("GitHub token is empty"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        let mut auth_value = HeaderValue::from_str(&format!("token {}", token.trim()))
            .map_err(|_| GistError::auth("Invalid GitHub token format"))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Turn a non-success response into a [`GistError::Api`], preferring
    /// GitHub's own error message.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        let message = serde_json::from_str::<ApiErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(GistError::api(status.as_u16(), message))
    }

    async fn parse_gist(response: reqwest::Response) -> Result<Gist> {
        let response = Self::check_response(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Get a gist by ID.
    ///
    /// GET /gists/{gistId}
    pub async fn get_gist(&self, gist_id: &str) -> Result<Gist> {
        let url = format!("{}/gists/{}", self.base_url, gist_id);
        debug!("Fetching gist {}", gist_id);

        let response = self.client.get(&url).send().await?;
        Self::parse_gist(response).await
    }

    /// Full content of a gist file, following `raw_url` when the inline
    /// content was truncated.
    pub async fn file_content(&self, file: &GistFile) -> Result<Option<String>> {
        if !file.truncated {
            return Ok(file.content.clone());
        }
        let Some(raw_url) = file.raw_url.as_deref() else {
            return Ok(file.content.clone());
        };
        debug!("Gist file is truncated, fetching {}", raw_url);
        let response = self.client.get(raw_url).send().await?;
        let response = Self::check_response(response).await?;
        Ok(Some(response.text().await?))
    }

    /// Create a private gist with the given files.
    ///
    /// POST /gists
    pub async fn create_gist(
        &self,
        description: &str,
        files: HashMap<String, String>,
    ) -> Result<Gist> {
        let url = format!("{}/gists", self.base_url);
        let request = CreateGistRequest {
            description: description.to_string(),
            public: false,
            files: files
                .into_iter()
                .map(|(name, content)| (name, GistFileContent { content }))
                .collect(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        Self::parse_gist(response).await
    }

    /// Create or replace one file of a gist.
    ///
    /// PATCH /gists/{gistId}
    pub async fn update_file(&self, gist_id: &str, filename: &str, content: String) -> Result<()> {
        let url = format!("{}/gists/{}", self.base_url, gist_id);
        let request = UpdateGistRequest {
            files: HashMap::from([(filename.to_string(), GistFileContent { content })]),
        };

        let response = self.client.patch(&url).json(&request).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }
}
