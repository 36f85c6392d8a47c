//! Outbound mail trait.

use async_trait::async_trait;

use super::notifications_model::OutgoingEmail;
use crate::errors::SendError;

/// Delivers a rendered e-mail. One attempt, no retries.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), SendError>;
}
