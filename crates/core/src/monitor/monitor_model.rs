use serde::Serialize;

use crate::notifications::NotifyOutcome;

/// Settings for one monitoring run.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    /// Only subscriptions sold by this business unit are compared and persisted.
    pub business_unit_id: i64,
}

/// What a completed run saw and did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub fetched: usize,
    pub matched: usize,
    pub previous: usize,
    pub added: usize,
    pub removed: usize,
    pub price_changes: usize,
    /// `None` when there was nothing to report.
    pub notification: Option<NotifyOutcome>,
    pub snapshot_saved: bool,
}

impl RunSummary {
    pub fn has_changes(&self) -> bool {
        self.added + self.removed + self.price_changes > 0
    }
}
