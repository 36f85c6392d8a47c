//! Change set produced by comparing two subscription listings.

use serde::{Deserialize, Serialize};

use crate::subscriptions::SubscriptionRecord;

/// A subscription whose price moved between two runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub id: i64,
    /// Name as listed in the current run.
    pub name: String,
    pub old_price: i64,
    pub new_price: i64,
    /// Currency of the current listing, used when rendering.
    pub currency: String,
}

/// Differences between the previous snapshot and the current listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub added: Vec<SubscriptionRecord>,
    pub removed: Vec<SubscriptionRecord>,
    pub price_changes: Vec<PriceChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.price_changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.price_changes.len()
    }

    pub fn added_ids(&self) -> Vec<i64> {
        self.added.iter().map(|r| r.id).collect()
    }

    pub fn removed_ids(&self) -> Vec<i64> {
        self.removed.iter().map(|r| r.id).collect()
    }
}
