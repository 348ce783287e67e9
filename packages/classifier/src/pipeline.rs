//! Page-by-page retrieval/aggregation loop feeding the classifier.

use async_trait::async_trait;

use crate::engine::{ClassificationOutcome, Classifier};
use crate::types::{ClassifiedRecord, RawListing};

/// A paginated supply of raw listings.
///
/// `next_page` returns `Ok(None)` once exhausted. Implementations own their
/// pacing and offset bookkeeping; the pipeline only drains.
#[async_trait]
pub trait ListingSource: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn next_page(&mut self) -> std::result::Result<Option<Vec<RawListing>>, Self::Error>;
}

/// Drains a listing source, classifying each page as it arrives, and
/// aggregates one batch per run.
pub struct Pipeline<'a> {
    classifier: &'a Classifier,
}

impl<'a> Pipeline<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        Self { classifier }
    }

    /// Run to exhaustion and return the batch for persistence.
    ///
    /// A source error ends the run early with whatever was already
    /// collected: for a periodic snapshot job, a partial batch beats
    /// retrying to completeness.
    pub async fn run<S: ListingSource>(
        &self,
        source: &mut S,
        keyword: &str,
    ) -> Vec<ClassifiedRecord> {
        let mut records = Vec::new();
        let mut page_index = 0usize;

        loop {
            let page = match source.next_page().await {
                Ok(Some(items)) => items,
                Ok(None) => break,
                Err(error) => {
                    tracing::warn!(
                        %error,
                        page_index,
                        kept = records.len(),
                        "listing source failed, keeping partial batch"
                    );
                    break;
                }
            };

            page_index += 1;
            let fetched = page.len();
            let kept_before = records.len();

            for listing in &page {
                if let ClassificationOutcome::Accepted(record) =
                    self.classifier.classify(listing, keyword)
                {
                    records.push(record);
                }
            }

            tracing::info!(
                page_index,
                fetched,
                kept = records.len() - kept_before,
                kept_total = records.len(),
                "page classified"
            );
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;
    use std::collections::VecDeque;

    #[derive(Debug, thiserror::Error)]
    #[error("source failed")]
    struct SourceFailure;

    /// In-memory source: a scripted sequence of page results.
    struct ScriptedSource {
        pages: VecDeque<Result<Option<Vec<RawListing>>, SourceFailure>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<Option<Vec<RawListing>>, SourceFailure>>) -> Self {
            Self {
                pages: pages.into(),
            }
        }
    }

    #[async_trait]
    impl ListingSource for ScriptedSource {
        type Error = SourceFailure;

        async fn next_page(&mut self) -> Result<Option<Vec<RawListing>>, SourceFailure> {
            self.pages.pop_front().unwrap_or(Ok(None))
        }
    }

    fn classifier() -> Classifier {
        Classifier::new(ClassifierConfig::default()).unwrap()
    }

    fn sensor_listing(title: &str, total_price: u64) -> RawListing {
        RawListing {
            title: title.to_string(),
            total_price,
            mall_name: String::new(),
            link: String::new(),
            image_url: String::new(),
            category_path: vec!["혈당계".to_string()],
        }
    }

    #[tokio::test]
    async fn collects_accepted_records_across_pages() {
        let c = classifier();
        let mut source = ScriptedSource::new(vec![
            Ok(Some(vec![
                sensor_listing("센서 2개", 180_000),
                sensor_listing("센서 커버 25팩", 30_000), // excluded
            ])),
            Ok(Some(vec![sensor_listing("혈당 센서 본품", 450_000)])),
        ]);

        let records = Pipeline::new(&c).run(&mut source, "리브레2").await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.keyword == "리브레2"));
        assert_eq!(records[0].quantity, 2);
        assert_eq!(records[1].quantity, 5);
    }

    #[tokio::test]
    async fn source_error_keeps_partial_batch() {
        let c = classifier();
        let mut source = ScriptedSource::new(vec![
            Ok(Some(vec![sensor_listing("센서 2개", 180_000)])),
            Err(SourceFailure),
            // Never reached: the run stops at the first error.
            Ok(Some(vec![sensor_listing("센서 3개", 270_000)])),
        ]);

        let records = Pipeline::new(&c).run(&mut source, "리브레2").await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, 2);
    }

    #[tokio::test]
    async fn floor_and_filter_drops_produce_an_empty_batch() {
        let c = classifier();
        let mut source = ScriptedSource::new(vec![Ok(Some(vec![
            sensor_listing("센서 세트", 10_000),      // below floor
            sensor_listing("센서 보호 케이스", 90_000), // accessory
        ]))]);

        let records = Pipeline::new(&c).run(&mut source, "리브레2").await;
        assert!(records.is_empty());
    }
}
