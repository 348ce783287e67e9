//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The crawl runs on a fixed cron schedule (default: midnight and noon).
//! A failed run is logged and the next firing proceeds normally; the
//! scheduler never takes the server down.

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::Config;
use crate::crawl::run_crawl;
use crate::store::ProductStore;

/// Start the crawl schedule.
pub async fn start_scheduler(config: Config, store: ProductStore) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let schedule = config.crawl_schedule.clone();
    let crawl_job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let config = config.clone();
        let store = store.clone();
        Box::pin(async move {
            tracing::info!("scheduled crawl starting");
            match run_crawl(&config, &store).await {
                Ok(inserted) => tracing::info!(inserted, "scheduled crawl finished"),
                Err(e) => tracing::error!("Scheduled crawl failed: {e:#}"),
            }
        })
    })?;

    scheduler.add(crawl_job).await?;
    scheduler.start().await?;

    tracing::info!(schedule = %schedule, "crawl scheduler started");
    Ok(scheduler)
}
