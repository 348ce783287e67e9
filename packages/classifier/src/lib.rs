//! Listing classification and unit-price inference.
//!
//! Marketplace keyword search returns raw, inconsistently formatted listings:
//! free-text titles, accessory listings riding on product keywords, bundle
//! sizes buried in promotional noise. This crate turns one raw listing into a
//! validated `(quantity, unit_price, calc_method)` record, or drops it with a
//! reason:
//!
//! 1. an ordered exclusion filter decides whether the listing is the tracked
//!    product at all ([`filter`]);
//! 2. quantity extraction and a plausibility band infer the per-unit price,
//!    falling back to price-based re-inference ([`analyzer`]);
//! 3. the page-by-page pipeline drains a [`ListingSource`] and aggregates one
//!    batch per run ([`pipeline`]).
//!
//! All keyword lists and patterns are configuration data ([`config`]), not
//! code: the transform is pure per listing given a fixed [`ClassifierConfig`].

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod text;
pub mod types;

pub use analyzer::{PriceAnalysis, QuantityAnalyzer};
pub use config::{ClassifierConfig, PatternRule, PriceBand};
pub use engine::{ClassificationOutcome, Classifier};
pub use error::ClassifierError;
pub use filter::{ExclusionFilter, ExclusionReason};
pub use pipeline::{ListingSource, Pipeline};
pub use types::{CalcMethod, ClassifiedRecord, RawListing};
