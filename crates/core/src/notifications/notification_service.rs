use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn};

use super::notifications_model::{ErrorReport, NotificationSettings, NotifyOutcome, OutgoingEmail};
use super::notifications_traits::Mailer;
use super::report::{render_change_report, render_error_report};
use crate::changes::ChangeSet;
use crate::constants::{CHANGE_REPORT_SUBJECT, ERROR_REPORT_SUBJECT};
use crate::errors::{Result, SendError};
use crate::quota::QuotaServiceTrait;
use crate::utils::Clock;

#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Send a change report to the configured recipients, if today's quota
    /// allows. Delivery failures propagate.
    async fn notify_changes(&self, changes: &ChangeSet) -> Result<NotifyOutcome>;

    /// Send an error report to the administrator. Never quota-gated.
    async fn notify_error(&self, report: &ErrorReport) -> Result<()>;
}

pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    quota: Arc<dyn QuotaServiceTrait>,
    settings: NotificationSettings,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        quota: Arc<dyn QuotaServiceTrait>,
        settings: NotificationSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            mailer,
            quota,
            settings,
            clock,
        }
    }

    fn log_entries(changes: &ChangeSet) {
        info!(
            "Email data received - newSubscriptions: {}, removedSubscriptions: {}, priceChanges: {}",
            changes.added.len(),
            changes.removed.len(),
            changes.price_changes.len()
        );
        for sub in &changes.added {
            info!("Adding new subscription to email: {} (ID: {})", sub.name, sub.id);
        }
        for sub in &changes.removed {
            info!("Adding removed subscription to email: {} (ID: {})", sub.name, sub.id);
        }
        for change in &changes.price_changes {
            info!("Adding price change to email: {} (ID: {})", change.name, change.id);
        }
    }

    async fn deliver(&self, email: &OutgoingEmail) -> std::result::Result<(), SendError> {
        match self.mailer.send(email).await {
            Ok(()) => {
                info!(
                    "Email notification sent successfully to {}",
                    email.to.join(", ")
                );
                Ok(())
            }
            Err(e) => {
                error!("Failed to send email: {}", e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify_changes(&self, changes: &ChangeSet) -> Result<NotifyOutcome> {
        if !self.settings.enabled {
            info!("Email notifications are disabled, skipping change report");
            return Ok(NotifyOutcome::Disabled);
        }

        if !self.quota.can_send().await {
            warn!(
                "Skipping change report: daily limit of {} emails reached",
                self.quota.daily_limit()
            );
            return Ok(NotifyOutcome::SkippedQuota);
        }

        if self.settings.recipients.is_empty() {
            return Err(SendError::InvalidMessage(
                "no change-report recipients configured".to_string(),
            )
            .into());
        }

        Self::log_entries(changes);
        let email = OutgoingEmail {
            from: self.settings.from.clone(),
            to: self.settings.recipients.clone(),
            subject: CHANGE_REPORT_SUBJECT.to_string(),
            html_body: render_change_report(changes, self.clock.now(), self.settings.timezone),
        };

        self.deliver(&email).await?;
        self.quota.record_sent().await;

        Ok(NotifyOutcome::Sent {
            recipients: email.to.len(),
        })
    }

    async fn notify_error(&self, report: &ErrorReport) -> Result<()> {
        let email = OutgoingEmail {
            from: self.settings.from.clone(),
            to: vec![self.settings.admin.clone()],
            subject: ERROR_REPORT_SUBJECT.to_string(),
            html_body: render_error_report(report, self.settings.timezone),
        };

        self.deliver(&email).await?;
        info!("Error notification email sent successfully");
        Ok(())
    }
}
