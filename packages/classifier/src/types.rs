//! Core data model for the classification pipeline.

use serde::{Deserialize, Serialize};

/// One raw marketplace search result, as fetched.
///
/// Lives only within a single fetch-and-classify pass. `title` may still
/// carry upstream emphasis markup; stripping happens during classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    pub title: String,
    /// Listed price for the whole bundle. Unparseable upstream prices are 0.
    pub total_price: u64,
    pub mall_name: String,
    pub link: String,
    pub image_url: String,
    /// Ordered category labels, outermost first. May be empty or partial.
    pub category_path: Vec<String>,
}

/// How a record's quantity and unit price were derived.
///
/// A confidence/provenance label, never an error: `NeedsReview` rows are
/// emitted like any other so a human can audit them downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcMethod {
    /// Quantity extracted from the title, unit price inside the band.
    #[serde(rename = "text-analysis")]
    TextAnalysis,
    /// Title-derived price was implausible; quantity re-estimated from the
    /// reference unit price and the result re-validated.
    #[serde(rename = "price-inverted(adjusted)")]
    PriceInvertedAdjusted,
    /// Neither method produced a plausible unit price.
    #[serde(rename = "needs-review")]
    NeedsReview,
}

impl CalcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalcMethod::TextAnalysis => "text-analysis",
            CalcMethod::PriceInvertedAdjusted => "price-inverted(adjusted)",
            CalcMethod::NeedsReview => "needs-review",
        }
    }
}

impl std::fmt::Display for CalcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, per-unit-priced listing ready for persistence.
///
/// Invariant: `unit_price == total_price / quantity` (integer division) for
/// whichever quantity was ultimately accepted, and `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// Search term that produced the batch this record belongs to.
    pub keyword: String,
    /// Cleaned title, markup stripped.
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
    pub calc_method: CalcMethod,
    pub mall_name: String,
    pub link: String,
    pub image_url: String,
    /// Static source tags identifying the marketplace and storefront type.
    pub channel: String,
    pub market: String,
}
