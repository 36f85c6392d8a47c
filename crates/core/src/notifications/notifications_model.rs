//! Notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::FetchError;

/// A fully rendered e-mail, ready for the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// An operational failure to report to the administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub occurred_at: DateTime<Utc>,
    /// HTTP status of the failed request, if the API answered at all.
    pub status: Option<u16>,
    /// Response body of the failed request.
    pub detail: Option<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            occurred_at,
            status: None,
            detail: None,
        }
    }

    pub fn from_fetch_error(error: &FetchError, occurred_at: DateTime<Utc>) -> Self {
        Self {
            message: error.to_string(),
            occurred_at,
            status: error.status(),
            detail: error.body().map(str::to_string),
        }
    }
}

/// Who receives what.
#[derive(Debug, Clone)]
pub struct NotificationSettings {
    /// Master switch for change reports. Error reports ignore it.
    pub enabled: bool,
    pub from: String,
    /// Change-report recipients.
    pub recipients: Vec<String>,
    /// Error-report recipient.
    pub admin: String,
    /// Zone used for timestamps in report bodies.
    pub timezone: chrono_tz::Tz,
}

/// What happened to a change report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyOutcome {
    Sent { recipients: usize },
    SkippedQuota,
    Disabled,
}

impl NotifyOutcome {
    pub fn was_sent(&self) -> bool {
        matches!(self, NotifyOutcome::Sent { .. })
    }
}
