//! Subscription domain models and their wire representation.

use std::collections::BTreeSet;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::constants::MINOR_UNITS_PER_MAJOR;
use crate::errors::FetchError;

/// A subscription product as listed by the API, reduced to the fields the
/// watcher compares. Identity is `id`.
///
/// Serializes in the API's own shape so persisted snapshots stay readable by
/// anything that understands the listing format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubscriptionPayload", into = "SubscriptionPayload")]
pub struct SubscriptionRecord {
    pub id: i64,
    pub name: String,
    pub business_unit_ids: BTreeSet<i64>,
    /// Price in minor currency units (öre, cents).
    pub price_amount: i64,
    pub currency: String,
}

impl SubscriptionRecord {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price_amount: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            business_unit_ids: BTreeSet::new(),
            price_amount,
            currency: currency.into(),
        }
    }

    pub fn with_business_units(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.business_unit_ids.extend(ids);
        self
    }

    pub fn belongs_to(&self, business_unit_id: i64) -> bool {
        self.business_unit_ids.contains(&business_unit_id)
    }

    /// Price with two decimals, e.g. `599.00`.
    pub fn formatted_price(&self) -> String {
        format_minor_units(self.price_amount)
    }
}

/// Renders a minor-unit amount with two decimals.
pub fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let per_major = MINOR_UNITS_PER_MAJOR as u64;
    format!("{}{}.{:02}", sign, abs / per_major, abs % per_major)
}

/// Keeps only the subscriptions sold by one business unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessUnitFilter {
    business_unit_id: i64,
}

impl BusinessUnitFilter {
    pub fn new(business_unit_id: i64) -> Self {
        Self { business_unit_id }
    }

    pub fn business_unit_id(&self) -> i64 {
        self.business_unit_id
    }

    pub fn matches(&self, record: &SubscriptionRecord) -> bool {
        record.belongs_to(self.business_unit_id)
    }

    pub fn apply(&self, records: Vec<SubscriptionRecord>) -> Vec<SubscriptionRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

/// One element of the listing response. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPayload {
    pub id: i64,
    pub name: String,
    pub business_units: Vec<BusinessUnitRef>,
    pub price_with_interval: PriceWithInterval,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessUnitRef {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceWithInterval {
    pub price: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub amount: i64,
    pub currency: String,
}

impl From<SubscriptionPayload> for SubscriptionRecord {
    fn from(payload: SubscriptionPayload) -> Self {
        let price = payload.price_with_interval.price;
        Self {
            id: payload.id,
            name: payload.name,
            business_unit_ids: payload.business_units.iter().map(|u| u.id).collect(),
            price_amount: price.amount,
            currency: price.currency.trim().to_string(),
        }
    }
}

impl From<SubscriptionRecord> for SubscriptionPayload {
    fn from(record: SubscriptionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            business_units: record
                .business_unit_ids
                .into_iter()
                .map(|id| BusinessUnitRef { id })
                .collect(),
            price_with_interval: PriceWithInterval {
                price: Money {
                    amount: record.price_amount,
                    currency: record.currency,
                },
            },
        }
    }
}

/// Accepts integral JSON numbers, including floats such as `59900.0`.
fn deserialize_minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Ok(value as i64),
        _ => Err(de::Error::custom(format!(
            "price amount {} is not a whole number of minor units",
            number
        ))),
    }
}

/// Parses a listing response body into typed records.
///
/// Fails on the first element that does not match the expected shape, naming
/// its position and id so the error report points at the offending entry.
pub fn parse_subscription_listing(body: &str) -> Result<Vec<SubscriptionRecord>, FetchError> {
    let elements: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| {
        FetchError::invalid_payload(format!("expected a JSON array of subscriptions: {}", e))
    })?;

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let id = element.get("id").cloned();
            serde_json::from_value::<SubscriptionRecord>(element).map_err(|e| {
                let id = id
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "<missing>".to_string());
                FetchError::invalid_payload(format!(
                    "element {} (id {}): {}",
                    index, id, e
                ))
            })
        })
        .collect()
}
