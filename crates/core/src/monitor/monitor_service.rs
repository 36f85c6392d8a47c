use std::sync::Arc;

use log::{error, info, warn};

use super::monitor_model::{MonitorSettings, RunSummary};
use crate::changes::{detect_changes, duplicate_ids, ChangeSet};
use crate::constants::SNAPSHOT_KEY;
use crate::errors::Result;
use crate::notifications::{ErrorReport, NotificationServiceTrait};
use crate::storage::DocumentRepository;
use crate::subscriptions::{BusinessUnitFilter, SubscriptionRecord, SubscriptionSource};
use crate::utils::Clock;

/// Runs one fetch → filter → diff → notify → persist cycle.
pub struct MonitorService {
    source: Arc<dyn SubscriptionSource>,
    repository: DocumentRepository,
    notifier: Arc<dyn NotificationServiceTrait>,
    filter: BusinessUnitFilter,
    clock: Arc<dyn Clock>,
}

impl MonitorService {
    pub fn new(
        source: Arc<dyn SubscriptionSource>,
        repository: DocumentRepository,
        notifier: Arc<dyn NotificationServiceTrait>,
        settings: MonitorSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            repository,
            notifier,
            filter: BusinessUnitFilter::new(settings.business_unit_id),
            clock,
        }
    }

    /// Fetches the listing. On failure the administrator is alerted and the
    /// fetch error is returned; nothing is diffed or persisted.
    async fn fetch(&self) -> Result<Vec<SubscriptionRecord>> {
        match self.source.fetch_subscriptions().await {
            Ok(records) => Ok(records),
            Err(e) => {
                error!("Failed to fetch subscription data: {}", e);
                let report = ErrorReport::from_fetch_error(&e, self.clock.now());
                if let Err(notify_error) = self.notifier.notify_error(&report).await {
                    error!(
                        "Failed to send error notification email: {}",
                        notify_error
                    );
                }
                Err(e.into())
            }
        }
    }

    /// Last persisted snapshot, re-filtered. Empty on cold start.
    async fn load_previous(&self) -> Vec<SubscriptionRecord> {
        let stored: Vec<SubscriptionRecord> = self.repository.read_or_default(SNAPSHOT_KEY).await;
        let stored_len = stored.len();
        let previous = self.filter.apply(stored);
        if previous.len() != stored_len {
            warn!(
                "Dropped {} stored subscriptions outside business unit {}",
                stored_len - previous.len(),
                self.filter.business_unit_id()
            );
        }
        previous
    }

    fn log_changes(changes: &ChangeSet) {
        info!("New subscriptions: {}", changes.added.len());
        info!("Removed subscriptions: {}", changes.removed.len());
        info!("Price changes: {}", changes.price_changes.len());
        if !changes.added.is_empty() {
            info!("New subscription IDs: {:?}", changes.added_ids());
        }
        if !changes.removed.is_empty() {
            info!("Removed subscription IDs: {:?}", changes.removed_ids());
        }
        for change in &changes.price_changes {
            info!(
                "Price change for {} (ID: {}): {} -> {} {}",
                change.name, change.id, change.old_price, change.new_price, change.currency
            );
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        info!("Starting subscription check...");

        let fetched = self.fetch().await?;
        let fetched_len = fetched.len();
        let current = self.filter.apply(fetched);
        info!(
            "Fetched {} subscriptions, {} for business unit {}",
            fetched_len,
            current.len(),
            self.filter.business_unit_id()
        );
        let duplicates = duplicate_ids(&current);
        if !duplicates.is_empty() {
            warn!("Listing contains duplicate subscription ids: {:?}", duplicates);
        }

        let previous = self.load_previous().await;
        info!("Current data count: {}", current.len());
        info!("Previous data count: {}", previous.len());

        let changes = detect_changes(&current, &previous);
        Self::log_changes(&changes);

        let notification = if changes.is_empty() {
            info!("No changes detected");
            None
        } else {
            info!("Changes detected - sending email notification");
            Some(self.notifier.notify_changes(&changes).await?)
        };

        let snapshot_saved = match self.repository.write(SNAPSHOT_KEY, &current).await {
            Ok(()) => {
                info!("Saved {} subscriptions to snapshot", current.len());
                true
            }
            Err(e) => {
                warn!("Snapshot not saved, next run will diff against the old one: {}", e);
                false
            }
        };

        info!("Subscription check completed");
        Ok(RunSummary {
            fetched: fetched_len,
            matched: current.len(),
            previous: previous.len(),
            added: changes.added.len(),
            removed: changes.removed.len(),
            price_changes: changes.price_changes.len(),
            notification,
            snapshot_saved,
        })
    }
}
