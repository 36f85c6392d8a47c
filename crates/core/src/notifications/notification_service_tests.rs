#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::changes::ChangeSet;
    use crate::constants::{CHANGE_REPORT_SUBJECT, ERROR_REPORT_SUBJECT, QUOTA_STATS_KEY};
    use crate::errors::{Error, SendError};
    use crate::notifications::{
        ErrorReport, Mailer, NotificationService, NotificationServiceTrait, NotificationSettings,
        NotifyOutcome, OutgoingEmail,
    };
    use crate::quota::{QuotaService, QuotaSettings, QuotaState};
    use crate::storage::{DocumentRepository, InMemoryDocumentStore};
    use crate::subscriptions::SubscriptionRecord;
    use crate::utils::FixedClock;

    // --- Mock Mailer ---
    #[derive(Default)]
    struct MockMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail_with: Mutex<Option<SendError>>,
    }

    impl MockMailer {
        fn failing(error: SendError) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_with: Mutex::new(Some(error)),
            }
        }

        fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), SendError> {
            if let Some(error) = self.fail_with.lock().unwrap().clone() {
                return Err(error);
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    struct Harness {
        mailer: Arc<MockMailer>,
        store: Arc<InMemoryDocumentStore>,
        service: NotificationService,
    }

    fn settings() -> NotificationSettings {
        NotificationSettings {
            enabled: true,
            from: "watcher@example.com".to_string(),
            recipients: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            admin: "admin@example.com".to_string(),
            timezone: chrono_tz::UTC,
        }
    }

    fn harness_with(mailer: MockMailer, settings: NotificationSettings, limit: u32) -> Harness {
        let mailer = Arc::new(mailer);
        let store = Arc::new(InMemoryDocumentStore::new());
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap(),
        ));
        let quota = Arc::new(QuotaService::new(
            DocumentRepository::new(store.clone()),
            QuotaSettings {
                daily_limit: limit,
                timezone: chrono_tz::UTC,
            },
            clock.clone(),
        ));
        let service = NotificationService::new(mailer.clone(), quota, settings, clock);
        Harness {
            mailer,
            store,
            service,
        }
    }

    fn harness() -> Harness {
        harness_with(MockMailer::default(), settings(), 50)
    }

    fn sent_count(store: &InMemoryDocumentStore) -> Option<u32> {
        store
            .get(QUOTA_STATS_KEY)
            .map(|v| serde_json::from_value::<QuotaState>(v).unwrap().sent_count)
    }

    fn some_changes() -> ChangeSet {
        ChangeSet {
            added: vec![SubscriptionRecord::new(2, "B", 500, "SEK")],
            ..ChangeSet::default()
        }
    }

    #[tokio::test]
    async fn test_change_report_goes_to_recipients_and_counts() {
        let h = harness();
        let outcome = h.service.notify_changes(&some_changes()).await.unwrap();

        assert_eq!(outcome, NotifyOutcome::Sent { recipients: 2 });
        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "watcher@example.com");
        assert_eq!(sent[0].to, vec!["a@example.com", "b@example.com"]);
        assert_eq!(sent[0].subject, CHANGE_REPORT_SUBJECT);
        assert!(sent[0].html_body.contains("B (ID: 2) - 5.00 SEK"));
        assert_eq!(sent_count(&h.store), Some(1));
    }

    #[tokio::test]
    async fn test_empty_change_set_renders_no_changes_body() {
        let h = harness();
        h.service.notify_changes(&ChangeSet::default()).await.unwrap();
        assert!(h.mailer.sent()[0].html_body.contains("No changes detected."));
    }

    #[tokio::test]
    async fn test_closed_quota_skips_without_sending_or_counting() {
        let h = harness();
        h.store.insert(
            QUOTA_STATS_KEY,
            json!({"lastReset": "2024-05-20", "sentCount": 50}),
        );

        let outcome = h.service.notify_changes(&some_changes()).await.unwrap();

        assert_eq!(outcome, NotifyOutcome::SkippedQuota);
        assert!(h.mailer.sent().is_empty());
        assert_eq!(sent_count(&h.store), Some(50));
    }

    #[tokio::test]
    async fn test_last_slot_of_the_day() {
        let h = harness();
        h.store.insert(
            QUOTA_STATS_KEY,
            json!({"lastReset": "2024-05-20", "sentCount": 49}),
        );

        let first = h.service.notify_changes(&some_changes()).await.unwrap();
        let second = h.service.notify_changes(&some_changes()).await.unwrap();

        assert!(first.was_sent());
        assert_eq!(second, NotifyOutcome::SkippedQuota);
        assert_eq!(sent_count(&h.store), Some(50));
        assert_eq!(h.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_send_failure_propagates_and_is_not_counted() {
        let h = harness_with(
            MockMailer::failing(SendError::rejected(401, "bad key")),
            settings(),
            50,
        );

        let err = h.service.notify_changes(&some_changes()).await.unwrap_err();

        assert!(matches!(err, Error::Send(SendError::Rejected { status: 401, .. })));
        assert_eq!(sent_count(&h.store), None);
    }

    #[tokio::test]
    async fn test_error_report_bypasses_exhausted_quota() {
        let h = harness();
        h.store.insert(
            QUOTA_STATS_KEY,
            json!({"lastReset": "2024-05-20", "sentCount": 50}),
        );
        let report = ErrorReport::new(
            "Request failed: timeout",
            Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap(),
        );

        h.service.notify_error(&report).await.unwrap();

        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["admin@example.com"]);
        assert_eq!(sent[0].subject, ERROR_REPORT_SUBJECT);
        assert!(sent[0].html_body.contains("Request failed: timeout"));
        assert_eq!(sent_count(&h.store), Some(50));
    }

    #[tokio::test]
    async fn test_error_report_send_failure_propagates() {
        let h = harness_with(
            MockMailer::failing(SendError::Transport("dns".to_string())),
            settings(),
            50,
        );
        let report = ErrorReport::new("boom", Utc::now());
        assert!(h.service.notify_error(&report).await.is_err());
    }

    #[tokio::test]
    async fn test_disabled_notifications_skip_change_reports_only() {
        let mut disabled = settings();
        disabled.enabled = false;
        let h = harness_with(MockMailer::default(), disabled, 50);

        let outcome = h.service.notify_changes(&some_changes()).await.unwrap();
        assert_eq!(outcome, NotifyOutcome::Disabled);
        assert!(h.mailer.sent().is_empty());
        assert_eq!(sent_count(&h.store), None);

        h.service
            .notify_error(&ErrorReport::new("boom", Utc::now()))
            .await
            .unwrap();
        assert_eq!(h.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_recipients_is_an_error() {
        let mut no_recipients = settings();
        no_recipients.recipients.clear();
        let h = harness_with(MockMailer::default(), no_recipients, 50);
        let err = h.service.notify_changes(&some_changes()).await.unwrap_err();
        assert!(matches!(err, Error::Send(SendError::InvalidMessage(_))));
    }
}
