use crate::cms::ContentSource;
use crate::server::AppState;
use anyhow::Result;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info};

/// Initialize and start the background jobs:
/// - expired rate-limit windows are swept once per window
/// - content is reloaded every `CONTENT_REFRESH_SECS` (when a source is configured)
pub async fn start_scheduler(state: AppState) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let window = state.limiter.config().window.max(Duration::from_secs(1));
    info!("Scheduling rate-limit sweep every {:?}", window);
    let limiter = state.limiter.clone();
    let sweep = Job::new_repeated_async(window, move |_uuid, _l| {
        let limiter = limiter.clone();
        Box::pin(async move {
            let removed = limiter.sweep();
            if removed > 0 {
                debug!("Swept {} expired rate-limit entries", removed);
            }
        })
    })?;
    scheduler.add(sweep).await?;

    if let Some(interval) = refresh_interval(&state) {
        info!("Scheduling content refresh every {:?}", interval);
        let job_state = state.clone();
        let refresh = Job::new_repeated_async(interval, move |_uuid, _l| {
            let state = job_state.clone();
            Box::pin(async move {
                info!("⏰ Scheduled content refresh triggered");
                // Failures are logged and counted by reload_content
                let _ = state.reload_content().await;
            })
        })?;
        scheduler.add(refresh).await?;
    }

    scheduler.start().await?;
    info!("✓ Scheduler started");

    Ok(scheduler)
}

/// No refresh job without a source or with a zero interval.
fn refresh_interval(state: &AppState) -> Option<Duration> {
    let interval = state.config.content_refresh_interval();
    if matches!(*state.source, ContentSource::Empty) || interval.is_zero() {
        None
    } else {
        Some(interval)
    }
}
