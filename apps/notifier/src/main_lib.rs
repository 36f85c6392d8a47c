use std::sync::Arc;

use anyhow::Context;
use stepin_catalog::{CatalogClient, ListingQuery};
use stepin_core::monitor::{MonitorService, MonitorSettings, RunSummary};
use stepin_core::notifications::{NotificationService, NotificationSettings};
use stepin_core::quota::{QuotaService, QuotaSettings};
use stepin_core::storage::{DocumentRepository, DocumentStore, LocalDocumentStore};
use stepin_core::utils::{Clock, SystemClock};
use stepin_gist_storage::{GistClient, GistDocumentStore};
use stepin_mailer::BrevoMailer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageConfig};

pub fn init_tracing() {
    let log_format = std::env::var("STEPIN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match &config.storage {
        StorageConfig::Gist {
            api_url,
            token,
            gist_id,
        } => {
            let client = GistClient::with_timeout(api_url, token.expose(), config.request_timeout)
                .context("Failed to build gist client")?;
            Arc::new(GistDocumentStore::new(client, gist_id.clone()))
        }
        StorageConfig::File { data_dir } => Arc::new(LocalDocumentStore::new(data_dir.clone())),
    };
    Ok(store)
}

/// Wires the production adapters into a [`MonitorService`].
pub fn build_monitor(config: &Config) -> anyhow::Result<MonitorService> {
    build_monitor_with_clock(config, Arc::new(SystemClock))
}

pub fn build_monitor_with_clock(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<MonitorService> {
    let source = CatalogClient::with_timeout(
        &config.api_url,
        ListingQuery {
            business_unit: config.business_unit,
            web_category: config.web_category,
        },
        config.request_timeout,
    )
    .context("Failed to build listing client")?;

    let store = build_store(config)?;
    tracing::info!("Document storage backend: {}", store.backend());
    let repository = DocumentRepository::new(store);

    let quota = Arc::new(QuotaService::new(
        repository.clone(),
        QuotaSettings {
            daily_limit: config.email.daily_limit,
            timezone: config.timezone,
        },
        clock.clone(),
    ));
    let mailer = BrevoMailer::with_timeout(
        &config.email.api_url,
        config.email.api_key.expose(),
        config.request_timeout,
    )
    .context("Failed to build mail relay client")?;
    let notifier = Arc::new(NotificationService::new(
        Arc::new(mailer),
        quota,
        NotificationSettings {
            enabled: config.email.enabled,
            from: config.email.from.clone(),
            recipients: config.email.to.clone(),
            admin: config.email.admin.clone(),
            timezone: config.timezone,
        },
        clock.clone(),
    ));

    Ok(MonitorService::new(
        Arc::new(source),
        repository,
        notifier,
        MonitorSettings {
            business_unit_id: config.business_unit,
        },
        clock,
    ))
}

/// One complete check: build, run, log the summary.
pub async fn run_once(config: &Config) -> anyhow::Result<RunSummary> {
    let monitor = build_monitor(config)?;
    let summary = monitor.run().await.context("Subscription check failed")?;
    log_summary(&summary);
    Ok(summary)
}

pub fn log_summary(summary: &RunSummary) {
    tracing::info!(
        fetched = summary.fetched,
        matched = summary.matched,
        previous = summary.previous,
        added = summary.added,
        removed = summary.removed,
        price_changes = summary.price_changes,
        notification = ?summary.notification,
        snapshot_saved = summary.snapshot_saved,
        "Subscription check completed"
    );
    if !summary.snapshot_saved {
        tracing::warn!("Snapshot was not persisted; the next run will diff against stale data");
    }
}
