//! Classifier configuration: policy as data.
//!
//! Every keyword list and pattern list is an ordered configuration value, not
//! code, so new marketplace phrasing can be added without touching control
//! flow. Lists are evaluated in order with first-match-wins semantics; the
//! position of a rule in its list is its precedence.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// A regex pattern paired with a semantic label.
///
/// The label names what the pattern means; it shows up in debug logs and in
/// exclusion reasons so a dropped listing can be traced back to the rule that
/// dropped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub pattern: String,
    pub label: String,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            label: label.into(),
        }
    }
}

/// Compile an ordered rule list, preserving order and labels.
pub(crate) fn compile_rules(rules: &[PatternRule]) -> Result<Vec<(Regex, String)>> {
    rules
        .iter()
        .map(|rule| {
            Regex::new(&rule.pattern)
                .map(|re| (re, rule.label.clone()))
                .map_err(|source| ClassifierError::InvalidPattern {
                    label: rule.label.clone(),
                    source,
                })
        })
        .collect()
}

/// Inclusive unit-price range considered plausible for a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: u64,
    pub max: u64,
}

impl PriceBand {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, unit_price: u64) -> bool {
        (self.min..=self.max).contains(&unit_price)
    }
}

/// Full configuration for the classification pipeline.
///
/// `Default` carries the production values for the tracked CGM sensor;
/// `with_*` builders override individual knobs for tests and tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Plausible retail unit-price range (KRW).
    pub price_band: PriceBand,
    /// Assumed single-unit price used for price-based quantity re-inference.
    pub reference_unit_price: u64,
    /// Absolute floor: rows below this unit price are discarded as noise,
    /// whatever their calc method.
    pub min_unit_price: u64,
    /// Category labels, at least one of which must appear in a listing's
    /// category path.
    pub category_keywords: Vec<String>,
    /// Device-name synonyms; a title mentioning none of these is not the
    /// tracked product.
    pub core_product_keywords: Vec<String>,
    /// Accessory brands and nouns that disqualify a listing outright.
    pub accessory_keywords: Vec<String>,
    /// "count + accessory noun" shapes flagging accessory multi-packs that
    /// mention sensor-adjacent nouns.
    pub accessory_quantity_patterns: Vec<PatternRule>,
    /// Gift/promotional phrases stripped before quantity extraction so their
    /// numerals are never mistaken for bundle quantities.
    pub gift_patterns: Vec<PatternRule>,
    /// Quantity mentions scoped to the product noun, tried first.
    pub product_quantity_patterns: Vec<PatternRule>,
    /// Generic quantity mentions, used only when no product-scoped match
    /// exists.
    pub generic_quantity_patterns: Vec<PatternRule>,
    /// Static source tags attached to every record.
    pub channel: String,
    pub market: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            price_band: PriceBand::new(65_000, 160_000),
            reference_unit_price: 90_000,
            min_unit_price: 65_000,
            category_keywords: strings(&["혈당계", "혈당측정기", "당뇨관리용품", "당뇨"]),
            core_product_keywords: strings(&["센서", "측정기", "sensor"]),
            accessory_keywords: strings(&[
                // cases and covers
                "홀스터", "holster", "케이스", "case", "파우치", "pouch", "커버", "cover",
                "클립", "clip",
                // protective film and patches
                "보호기", "protector", "필름", "film", "스크린", "screen", "패치", "patch",
                "스티커", "sticker", "테이프", "tape",
                // everything else that rides on sensor keywords
                "랜야드", "lanyard", "스트랩", "strap", "밴드", "band", "케이블", "cable",
                "충전", "charger", "charging", "거치대", "holder", "stand",
            ]),
            accessory_quantity_patterns: vec![
                PatternRule::new(r"\d+\s*팩\s*(?:커버|패치|필름)", "pack-then-accessory"),
                PatternRule::new(r"\d+\s*매\s*(?:커버|패치|필름)", "sheet-then-accessory"),
                PatternRule::new(r"(?:커버|패치|필름)\s*\d+\s*(?:팩|매|장|개)", "accessory-then-count"),
                PatternRule::new(r"(?i)\d+\s*pack", "english-pack"),
                PatternRule::new(r"(?i)\d+\s*pcs", "english-pcs"),
            ],
            gift_patterns: vec![
                PatternRule::new(r"\+\s*패치\s*\d+\s*(?:개|매|장)?", "bonus-patch"),
                PatternRule::new(
                    r"패치\s*\d+\s*(?:개|매|장)?\s*(?:증정|사은품|포함)?",
                    "patch-count",
                ),
                PatternRule::new(
                    r"\+\s*알콜\s*(?:솜|스왑|스웹)?\s*\d+\s*(?:개|매|장)?",
                    "bonus-alcohol-swab",
                ),
                PatternRule::new(
                    r"알콜\s*(?:솜|스왑|스웹)?\s*\d+\s*(?:개|매|장)?\s*(?:증정|사은품|포함)?",
                    "alcohol-swab-count",
                ),
                PatternRule::new(
                    r"\+\s*방수\s*(?:필름|패치)?\s*\d+\s*(?:개|매|장)?",
                    "bonus-waterproof-film",
                ),
                PatternRule::new(
                    r"방수\s*(?:필름|패치)?\s*\d+\s*(?:개|매|장)?\s*(?:증정|사은품|포함)?",
                    "waterproof-film-count",
                ),
                PatternRule::new(r"아메리카노\s*\d+\s*(?:개|잔)?", "coffee-voucher"),
                PatternRule::new(r"커피\s*\d+\s*(?:개|잔)?", "coffee-voucher"),
                PatternRule::new(r"멤버십\s*\d+\s*일", "membership-days"),
                PatternRule::new(r"\d+\s*일\s*(?:체험|멤버십)", "trial-days"),
                PatternRule::new(r"유효기간\s*\d+\s*일", "expiry-days"),
                PatternRule::new(r"사은품[^+]*", "gift-tail"),
                PatternRule::new(r"증정[^+]*", "giveaway-tail"),
            ],
            product_quantity_patterns: vec![
                PatternRule::new(
                    r"(?:측정기|센서|리브레\s*2?)\s*(\d+)\s*(?:개|개입|세트|팩|박스)",
                    "product-then-count",
                ),
                PatternRule::new(
                    r"(\d+)\s*(?:개|개입|세트|팩|박스)\s*(?:측정기|센서)",
                    "count-then-product",
                ),
                PatternRule::new(r"(?:측정기|센서|리브레)\s*[xX*]\s*(\d+)", "product-multiplier"),
            ],
            generic_quantity_patterns: vec![
                PatternRule::new(
                    r"(?i)(?:^|\s)(\d+)\s*(?:개|개입|세트|팩|박스|ea|set)",
                    "count-with-unit",
                ),
                PatternRule::new(r"[xX*]\s*(\d+)", "multiplier"),
            ],
            channel: "naver".to_string(),
            market: "스마트스토어".to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plausibility band.
    pub fn with_price_band(mut self, min: u64, max: u64) -> Self {
        self.price_band = PriceBand::new(min, max);
        self
    }

    /// Set the reference single-unit price used by re-inference.
    pub fn with_reference_unit_price(mut self, price: u64) -> Self {
        self.reference_unit_price = price;
        self
    }

    /// Set the absolute minimum-price floor.
    pub fn with_min_unit_price(mut self, price: u64) -> Self {
        self.min_unit_price = price;
        self
    }

    /// Set the static source tags.
    pub fn with_source_tags(
        mut self,
        channel: impl Into<String>,
        market: impl Into<String>,
    ) -> Self {
        self.channel = channel.into();
        self.market = market.into();
        self
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern_lists_compile() {
        let config = ClassifierConfig::default();
        for rules in [
            &config.accessory_quantity_patterns,
            &config.gift_patterns,
            &config.product_quantity_patterns,
            &config.generic_quantity_patterns,
        ] {
            compile_rules(rules).unwrap();
        }
    }

    #[test]
    fn invalid_pattern_reports_its_label() {
        let rules = vec![PatternRule::new(r"([unclosed", "broken-rule")];
        let err = compile_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("broken-rule"));
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = ClassifierConfig::default().with_price_band(50_000, 120_000);
        let json = serde_json::to_string(&config).unwrap();
        let back: ClassifierConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price_band, PriceBand::new(50_000, 120_000));
        assert_eq!(back.gift_patterns, config.gift_patterns);
    }

    #[test]
    fn price_band_is_inclusive() {
        let band = PriceBand::new(65_000, 160_000);
        assert!(band.contains(65_000));
        assert!(band.contains(160_000));
        assert!(!band.contains(64_999));
        assert!(!band.contains(160_001));
    }
}
