use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Produces one forced refresh. The job awaits it, so a slow refresh holds
/// its own tick instead of piling up detached tasks.
pub type RefreshCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Validates every cron spec, then registers the refresh jobs and starts the
/// scheduler. A bad spec fails startup before anything is scheduled.
pub async fn configure_refresh_jobs(
    cron_specs: &[String],
    callback: RefreshCallback,
) -> Result<JobScheduler> {
    let jobs = cron_specs
        .iter()
        .map(|spec| build_refresh_job(spec, callback.clone()))
        .collect::<Result<Vec<_>>>()?;

    if jobs.is_empty() {
        tracing::warn!(target: "scheduler", "no refresh crons configured; alerts refresh only at startup");
    }

    let scheduler = JobScheduler::new().await?;
    for (job, spec) in jobs.into_iter().zip(cron_specs) {
        scheduler.add(job).await?;
        tracing::info!(target: "scheduler", cron = %spec, "refresh job registered");
    }
    scheduler.start().await?;
    Ok(scheduler)
}

fn build_refresh_job(spec: &str, callback: RefreshCallback) -> Result<Job> {
    let cron = spec.to_string();
    Job::new_async(spec, move |_id, _scheduler| {
        let refresh = callback();
        let cron = cron.clone();
        Box::pin(async move {
            tracing::debug!(target: "scheduler", %cron, "refresh job triggered");
            refresh.await;
        })
    })
    .with_context(|| format!("invalid refresh cron spec: {spec}"))
}
