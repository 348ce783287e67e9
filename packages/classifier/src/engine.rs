//! Single-listing classification: clean, filter, infer, floor, tag.

use crate::analyzer::QuantityAnalyzer;
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::filter::{ExclusionFilter, ExclusionReason};
use crate::text::clean_title;
use crate::types::{ClassifiedRecord, RawListing};

/// What became of one raw listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    Accepted(ClassifiedRecord),
    Excluded(ExclusionReason),
    /// Survived filtering, but the inferred unit price sits below the
    /// absolute noise floor.
    BelowPriceFloor { unit_price: u64 },
}

/// Compiled classification engine for one configuration.
pub struct Classifier {
    config: ClassifierConfig,
    filter: ExclusionFilter,
    analyzer: QuantityAnalyzer,
}

impl Classifier {
    /// Compile all configured patterns. Fails fast on an invalid pattern so
    /// a bad config never reaches a crawl run.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let filter = ExclusionFilter::new(&config)?;
        let analyzer = QuantityAnalyzer::new(&config)?;
        Ok(Self {
            config,
            filter,
            analyzer,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn filter(&self) -> &ExclusionFilter {
        &self.filter
    }

    /// Classify one listing. Pure per item: the same listing and config
    /// always produce the same outcome, independent of ordering.
    pub fn classify(&self, listing: &RawListing, keyword: &str) -> ClassificationOutcome {
        let title = clean_title(&listing.title);

        if let Some(reason) = self.filter.evaluate(&title, &listing.category_path) {
            tracing::debug!(title = %title, ?reason, "listing excluded");
            return ClassificationOutcome::Excluded(reason);
        }

        let analysis = self.analyzer.analyze(&title, listing.total_price);
        if analysis.unit_price < self.config.min_unit_price {
            tracing::debug!(
                title = %title,
                unit_price = analysis.unit_price,
                "listing below price floor"
            );
            return ClassificationOutcome::BelowPriceFloor {
                unit_price: analysis.unit_price,
            };
        }

        ClassificationOutcome::Accepted(ClassifiedRecord {
            keyword: keyword.to_string(),
            product_name: title,
            quantity: analysis.quantity,
            unit_price: analysis.unit_price,
            total_price: listing.total_price,
            calc_method: analysis.method,
            mall_name: listing.mall_name.clone(),
            link: listing.link.clone(),
            image_url: listing.image_url.clone(),
            channel: self.config.channel.clone(),
            market: self.config.market.clone(),
        })
    }
}
