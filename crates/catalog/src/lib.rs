//! Step In Catalog - client for the subscription listing API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stepin_catalog::{CatalogClient, ListingQuery, DEFAULT_SUBSCRIPTIONS_URL};
//! use stepin_core::subscriptions::SubscriptionSource;
//!
//! let client = CatalogClient::new(
//!     DEFAULT_SUBSCRIPTIONS_URL,
//!     ListingQuery { business_unit: 2612, web_category: 2 },
//! )?;
//! let subscriptions = client.fetch_subscriptions().await?;
//! ```

mod client;
mod error;

pub use client::{CatalogClient, ListingQuery, DEFAULT_SUBSCRIPTIONS_URL};
pub use error::{CatalogError, Result};
