use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted daily notification counter.
///
/// Stored as `{"lastReset": "YYYY-MM-DD", "sentCount": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaState {
    #[serde(rename = "lastReset")]
    pub reset_date: NaiveDate,
    pub sent_count: u32,
}

impl QuotaState {
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            reset_date: today,
            sent_count: 0,
        }
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.reset_date == today
    }

    pub fn is_open(&self, daily_limit: u32) -> bool {
        self.sent_count < daily_limit
    }
}

/// Settings for the quota tracker.
#[derive(Debug, Clone, Copy)]
pub struct QuotaSettings {
    pub daily_limit: u32,
    /// Zone whose calendar days delimit the counter.
    pub timezone: chrono_tz::Tz,
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            daily_limit: crate::constants::DEFAULT_DAILY_LIMIT,
            timezone: crate::utils::DEFAULT_QUOTA_TZ,
        }
    }
}
