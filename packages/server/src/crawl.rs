//! One full crawl run: fetch, classify, persist.

use anyhow::{Context, Result};
use chrono::Utc;
use classifier::{Classifier, ClassifierConfig, Pipeline};
use naver_client::NaverShopClient;

use crate::config::Config;
use crate::naver_source::NaverListingSource;
use crate::store::ProductStore;

/// Crawl the configured keyword and insert the resulting batch as one
/// snapshot. Returns the number of rows written.
pub async fn run_crawl(config: &Config, store: &ProductStore) -> Result<u64> {
    let (client_id, client_secret) = config.naver_credentials()?;
    let keyword = config.search_keyword.clone();

    tracing::info!(keyword = %keyword, "starting crawl run");

    let client = NaverShopClient::new(client_id, client_secret);
    let classifier =
        Classifier::new(ClassifierConfig::default()).context("Failed to build classifier")?;

    let mut source = NaverListingSource::new(client.search(keyword.as_str()));
    let records = Pipeline::new(&classifier).run(&mut source, &keyword).await;

    if records.is_empty() {
        tracing::warn!(keyword = %keyword, "crawl produced no records, nothing to insert");
        return Ok(0);
    }

    let run_at = Utc::now();
    let inserted = store
        .insert_batch(&records, run_at)
        .await
        .context("Failed to persist crawl batch")?;

    tracing::info!(inserted, run_at = %run_at, "crawl run complete");
    Ok(inserted)
}
