//! Brevo transactional e-mail client.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use stepin_core::errors::SendError;
use stepin_core::notifications::{Mailer, OutgoingEmail};

use crate::error::{MailerError, Result};
use crate::types::*;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the Brevo v3 API.
pub const DEFAULT_BREVO_API_URL: &str = "https://api.brevo.com/v3";

/// Sends rendered reports through Brevo's transactional e-mail endpoint.
#[derive(Debug, Clone)]
pub struct BrevoMailer {
    client: reqwest::Client,
    base_url: String,
}

impl BrevoMailer {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(MailerError::InvalidConfig("relay URL is empty".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(MailerError::InvalidConfig("API key is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key.trim())
            .map_err(|_| MailerError::InvalidConfig("invalid API key format".to_string()))?;
        key.set_sensitive(true);
        headers.insert("api-key", key);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn build_request(email: &OutgoingEmail) -> Result<TransactionalEmailRequest> {
        if email.to.is_empty() {
            return Err(MailerError::InvalidMessage("no recipients".to_string()));
        }
        if email.from.trim().is_empty() {
            return Err(MailerError::InvalidMessage("no sender".to_string()));
        }
        Ok(TransactionalEmailRequest {
            sender: Contact {
                email: email.from.clone(),
            },
            to: email
                .to
                .iter()
                .map(|address| Contact {
                    email: address.clone(),
                })
                .collect(),
            subject: email.subject.clone(),
            html_content: email.html_body.clone(),
        })
    }

    /// Send one message.
    ///
    /// POST /smtp/email
    pub async fn send_email(&self, email: &OutgoingEmail) -> Result<Option<String>> {
        let request = Self::build_request(email)?;
        let url = format!("{}/smtp/email", self.base_url);
        debug!("Sending '{}' to {} recipient(s)", email.subject, email.to.len());

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<RelayErrorResponse>(&body)
                .map(|e| match e.code {
                    Some(code) => format!("{}: {}", code, e.message),
                    None => e.message,
                })
                .unwrap_or(body);
            return Err(MailerError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        let message_id = serde_json::from_str::<TransactionalEmailResponse>(&body)
            .ok()
            .and_then(|r| r.message_id);
        Ok(message_id)
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, email: &OutgoingEmail) -> std::result::Result<(), SendError> {
        let message_id = self.send_email(email).await?;
        info!(
            "Email sent: {}",
            message_id.as_deref().unwrap_or("(no message id)")
        );
        Ok(())
    }
}
