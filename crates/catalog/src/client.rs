//! HTTP client for the subscription listing endpoint.
//!
//! `GET <endpoint>?businessUnit=<id>&webCategory=<id>` returns a JSON array of
//! subscription products. The body is validated into typed records before it
//! leaves this crate.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use stepin_core::errors::FetchError;
use stepin_core::subscriptions::{
    parse_subscription_listing, SubscriptionRecord, SubscriptionSource,
};

use crate::error::{CatalogError, Result};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default listing endpoint.
pub const DEFAULT_SUBSCRIPTIONS_URL: &str =
    "https://stepin.brpsystems.com/brponline/api/ver3/products/subscriptions";

/// Query parameters sent with every listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub business_unit: i64,
    pub web_category: i64,
}

/// Client for the subscription listing API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: String,
    query: ListingQuery,
}

impl CatalogClient {
    /// Create a new client with the default request timeout.
    pub fn new(endpoint: &str, query: ListingQuery) -> Result<Self> {
        Self::with_timeout(endpoint, query, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: &str, query: ListingQuery, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.trim().to_string();
        if endpoint.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "listing endpoint is empty".to_string(),
            ));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            query,
        })
    }

    /// Fetch the raw listing body.
    pub async fn fetch_listing(&self) -> Result<String> {
        debug!(
            "Fetching subscriptions from {} (businessUnit={}, webCategory={})",
            self.endpoint, self.query.business_unit, self.query.web_category
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("businessUnit", self.query.business_unit.to_string()),
                ("webCategory", self.query.web_category.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Listing response ({}): {} bytes", status, body.len());

        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl SubscriptionSource for CatalogClient {
    async fn fetch_subscriptions(
        &self,
    ) -> std::result::Result<Vec<SubscriptionRecord>, FetchError> {
        let body = self.fetch_listing().await?;
        let records = parse_subscription_listing(&body)?;
        info!("Fetched {} subscriptions from API", records.len());
        Ok(records)
    }
}
