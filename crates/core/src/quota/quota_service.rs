use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};

use super::quota_model::{QuotaSettings, QuotaState};
use crate::constants::QUOTA_STATS_KEY;
use crate::storage::DocumentRepository;
use crate::utils::{calendar_date_from_utc, Clock};

/// Daily send budget for change reports.
#[async_trait]
pub trait QuotaServiceTrait: Send + Sync {
    /// Whether another change report may go out today. Rolls the counter
    /// over (and persists the reset) when the stored day is not today.
    async fn can_send(&self) -> bool;

    /// Count one delivered change report against today's budget.
    async fn record_sent(&self);

    fn daily_limit(&self) -> u32;
}

pub struct QuotaService {
    repository: DocumentRepository,
    settings: QuotaSettings,
    clock: Arc<dyn Clock>,
}

impl QuotaService {
    pub fn new(
        repository: DocumentRepository,
        settings: QuotaSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            settings,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        calendar_date_from_utc(self.clock.now(), self.settings.timezone)
    }

    /// Current persisted state, or a fresh one for today when nothing
    /// readable is stored.
    pub async fn load_state(&self) -> QuotaState {
        match self.repository.read::<QuotaState>(QUOTA_STATS_KEY).await {
            Some(state) => state,
            None => QuotaState::fresh(self.today()),
        }
    }

    async fn save_state(&self, state: &QuotaState) {
        if let Err(e) = self.repository.write(QUOTA_STATS_KEY, state).await {
            warn!("Failed to save email stats: {}", e);
        }
    }
}

#[async_trait]
impl QuotaServiceTrait for QuotaService {
    async fn can_send(&self) -> bool {
        let mut state = self.load_state().await;
        let today = self.today();

        if !state.is_current(today) {
            debug!(
                "Resetting email counter: stored day {} is not {}",
                state.reset_date, today
            );
            state = QuotaState::fresh(today);
            self.save_state(&state).await;
        }

        if !state.is_open(self.settings.daily_limit) {
            warn!("Daily email limit ({}) reached", self.settings.daily_limit);
            return false;
        }
        true
    }

    async fn record_sent(&self) {
        let mut state = self.load_state().await;
        state.sent_count = state.sent_count.saturating_add(1);
        self.save_state(&state).await;
        info!(
            "Email count updated: {}/{} for today",
            state.sent_count, self.settings.daily_limit
        );
    }

    fn daily_limit(&self) -> u32 {
        self.settings.daily_limit
    }
}
