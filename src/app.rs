use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use futures::future::BoxFuture;
use reqwest::Client;
use tokio::time::timeout;

use crate::{
    alerts::{AlertView, FetchOutcome, StatusAlertService},
    config::AppConfig,
    github::GitHubIssueSource,
    infrastructure::{directories::ResolvedPaths, shutdown::shutdown_signal},
    status::resolve_timezone,
    storage::{DismissalStore, FileStore, IssueCache, KeyValueStore, MemoryStore},
    tasks::scheduler::{configure_refresh_jobs, RefreshCallback},
};

type Service = StatusAlertService<GitHubIssueSource>;

pub struct StatusAlertApp {
    service: Arc<Service>,
    config: Arc<AppConfig>,
    timezone: Tz,
}

impl StatusAlertApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("status-alert-rust/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.github.request_timeout)
            .build()?;
        let source = GitHubIssueSource::new(http_client, &config.github);

        let file_store = FileStore::new(&paths.cache_dir)
            .with_context(|| format!("failed to open cache at {}", paths.cache_dir.display()))?;
        tracing::debug!(target: "cache", root = %file_store.root().display(), "status cache opened");
        let cache_store: Arc<dyn KeyValueStore> = Arc::new(file_store);
        // Dismissals last as long as this process, which is our session.
        let session_store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let service = Arc::new(StatusAlertService::new(
            source,
            IssueCache::new(cache_store, config.cache.ttl),
            DismissalStore::new(session_store),
        ));

        Ok(Self {
            service,
            timezone: resolve_timezone(&config.timezone),
            config: Arc::new(config),
        })
    }

    pub async fn run(self) -> Result<()> {
        let StatusAlertApp {
            service,
            config,
            timezone,
        } = self;

        tracing::info!(
            repo = %format!("{}/{}", config.github.username, config.github.repo),
            "status alert watcher started"
        );

        let outcome = service.fetch(false).await;
        report(&service, outcome, timezone);

        let callback = build_refresh_callback(service.clone(), timezone);
        let mut scheduler = configure_refresh_jobs(&config.scheduler.cron_specs, callback).await?;

        shutdown_signal().await;

        let shutdown_timeout = Duration::from_secs(5);
        match timeout(shutdown_timeout, scheduler.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::error!(target: "scheduler", ?err, "failed to stop scheduler");
            }
            Err(_) => {
                tracing::warn!(
                    target: "scheduler",
                    "scheduler did not stop within {:?}",
                    shutdown_timeout
                );
            }
        }

        tracing::info!("status alert watcher stopped");
        Ok(())
    }
}

fn build_refresh_callback(service: Arc<Service>, timezone: Tz) -> RefreshCallback {
    Arc::new(move || -> BoxFuture<'static, ()> {
        let service = service.clone();
        Box::pin(async move {
            let outcome = service.refresh().await;
            report(&service, outcome, timezone);
        })
    })
}

fn report(service: &Service, outcome: FetchOutcome, timezone: Tz) {
    if outcome == FetchOutcome::Skipped {
        return;
    }
    if let Some(error) = service.last_error() {
        tracing::warn!(target: "alerts", %error, "showing last known status");
    }

    let now = Utc::now();
    let views: Vec<AlertView> = service
        .all_active_issues()
        .iter()
        .map(|issue| AlertView::present(issue, now, timezone))
        .filter(|view| view.is_active)
        .collect();

    if views.is_empty() {
        tracing::info!(target: "alerts", ?outcome, "no active status alerts");
        return;
    }

    for view in views {
        tracing::info!(
            target: "alerts",
            id = view.id,
            kind = %view.kind,
            upcoming = view.is_upcoming,
            starts = ?view.starts,
            ends = ?view.ends,
            services = ?view.affected_services,
            expected_down = ?view.info.expected_down,
            expected_degraded = ?view.info.expected_degraded,
            url = %view.url,
            "{}",
            view.title
        );
    }
}
