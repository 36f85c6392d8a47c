//! Source trait for the subscription listing.

use async_trait::async_trait;

use super::subscriptions_model::SubscriptionRecord;
use crate::errors::FetchError;

/// Anything that can produce the current, unfiltered subscription listing.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    /// Fetch every subscription the listing currently returns.
    async fn fetch_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, FetchError>;
}
