//! Quantity and unit-price inference from listing titles.
//!
//! Titles mix the bundle size of the product itself with numerals that mean
//! something else entirely: gift patch counts, membership days, coffee
//! vouchers. Inference therefore runs in stages: strip promotional noise,
//! look for a quantity tied to the product noun, fall back to generic count
//! shapes, then validate the implied unit price against a plausibility band,
//! re-estimating the quantity from a reference price when the text-derived
//! one is implausible.

use regex::Regex;

use crate::config::{compile_rules, ClassifierConfig, PriceBand};
use crate::error::Result;
use crate::types::CalcMethod;

/// Best-effort inference result. Always produced, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceAnalysis {
    pub quantity: u32,
    pub unit_price: u64,
    pub method: CalcMethod,
}

/// Compiled quantity-extraction and validation rules.
pub struct QuantityAnalyzer {
    gift: Vec<(Regex, String)>,
    product_quantity: Vec<(Regex, String)>,
    generic_quantity: Vec<(Regex, String)>,
    band: PriceBand,
    reference_unit_price: u64,
}

impl QuantityAnalyzer {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self {
            gift: compile_rules(&config.gift_patterns)?,
            product_quantity: compile_rules(&config.product_quantity_patterns)?,
            generic_quantity: compile_rules(&config.generic_quantity_patterns)?,
            band: config.price_band,
            reference_unit_price: config.reference_unit_price,
        })
    }

    /// Infer `(quantity, unit_price, method)` for a cleaned title and its
    /// listed bundle price.
    pub fn analyze(&self, title: &str, total_price: u64) -> PriceAnalysis {
        let cleaned = self.strip_gift_phrases(title);

        let quantity = self
            .product_scoped_quantity(&cleaned)
            .or_else(|| self.generic_quantity(&cleaned))
            .unwrap_or(1);

        let unit_price = total_price / u64::from(quantity);
        if self.band.contains(unit_price) {
            return PriceAnalysis {
                quantity,
                unit_price,
                method: CalcMethod::TextAnalysis,
            };
        }

        // The text-derived quantity is probably wrong. Estimate the bundle
        // size from the reference single-unit price and re-validate.
        let estimated = estimate_quantity(total_price, self.reference_unit_price);
        let recalculated = total_price / u64::from(estimated);
        if self.band.contains(recalculated) {
            tracing::debug!(
                quantity,
                estimated,
                unit_price,
                recalculated,
                "quantity adjusted by price inversion"
            );
            return PriceAnalysis {
                quantity: estimated,
                unit_price: recalculated,
                method: CalcMethod::PriceInvertedAdjusted,
            };
        }

        PriceAnalysis {
            quantity,
            unit_price,
            method: CalcMethod::NeedsReview,
        }
    }

    fn strip_gift_phrases(&self, title: &str) -> String {
        let mut cleaned = title.to_string();
        for (re, label) in &self.gift {
            if re.is_match(&cleaned) {
                tracing::trace!(%label, "stripping gift phrase");
                cleaned = re.replace_all(&cleaned, " ").into_owned();
            }
        }
        cleaned
    }

    /// First matching pattern wins; within a match, the first capture group
    /// that parses as a positive integer wins.
    fn product_scoped_quantity(&self, title: &str) -> Option<u32> {
        for (re, _label) in &self.product_quantity {
            if let Some(caps) = re.captures(title) {
                for group in caps.iter().skip(1).flatten() {
                    if let Ok(qty) = group.as_str().parse::<u32>() {
                        if qty > 0 {
                            return Some(qty);
                        }
                    }
                }
            }
        }
        None
    }

    /// Earliest mention in the title wins: the main product is usually named
    /// before any accessory. A tunable heuristic, not a guarantee.
    fn generic_quantity(&self, title: &str) -> Option<u32> {
        let mut best: Option<(usize, u32)> = None;
        for (re, _label) in &self.generic_quantity {
            for caps in re.captures_iter(title) {
                let Some(group) = caps.iter().skip(1).flatten().next() else {
                    continue;
                };
                let Ok(qty) = group.as_str().parse::<u32>() else {
                    continue;
                };
                if qty == 0 {
                    continue;
                }
                let start = group.start();
                if best.map_or(true, |(s, _)| start < s) {
                    best = Some((start, qty));
                }
            }
        }
        best.map(|(_, qty)| qty)
    }
}

/// Bundle size implied by the total price at the reference unit price,
/// floored at one unit.
fn estimate_quantity(total_price: u64, reference_unit_price: u64) -> u32 {
    let estimated = (total_price as f64 / reference_unit_price as f64).round() as u32;
    estimated.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> QuantityAnalyzer {
        QuantityAnalyzer::new(&ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn sensor_bundle_with_gift_patches_counts_sensors_only() {
        let r = analyzer().analyze("센서 2개 + 패치 2매 증정", 180_000);
        assert_eq!(r.quantity, 2);
        assert_eq!(r.unit_price, 90_000);
        assert_eq!(r.method, CalcMethod::TextAnalysis);
    }

    #[test]
    fn missing_quantity_is_reinferred_from_reference_price() {
        let r = analyzer().analyze("혈당 센서 본품", 450_000);
        assert_eq!(r.quantity, 5);
        assert_eq!(r.unit_price, 90_000);
        assert_eq!(r.method, CalcMethod::PriceInvertedAdjusted);
    }

    #[test]
    fn nothing_validates_surfaces_as_needs_review() {
        let r = analyzer().analyze("센서 세트", 10_000);
        assert_eq!(r.quantity, 1);
        assert_eq!(r.unit_price, 10_000);
        assert_eq!(r.method, CalcMethod::NeedsReview);
    }

    #[test]
    fn quantity_defaults_to_one_unit() {
        let r = analyzer().analyze("프리스타일 리브레2 센서", 90_000);
        assert_eq!(r.quantity, 1);
        assert_eq!(r.unit_price, 90_000);
        assert_eq!(r.method, CalcMethod::TextAnalysis);
    }

    #[test]
    fn zero_price_flows_through_without_panicking() {
        let r = analyzer().analyze("센서 본품", 0);
        assert_eq!(r.quantity, 1);
        assert_eq!(r.unit_price, 0);
        assert_eq!(r.method, CalcMethod::NeedsReview);
    }

    #[test]
    fn product_scoped_quantity_beats_earlier_generic_mentions() {
        // "10개" comes first in the title but is not tied to the product
        // noun; "센서 3개" is.
        let r = analyzer().analyze("밴드 10개 구성 센서 3개", 270_000);
        assert_eq!(r.quantity, 3);
        assert_eq!(r.unit_price, 90_000);
    }

    #[test]
    fn product_multiplier_shape_is_recognized() {
        let r = analyzer().analyze("센서 x3", 270_000);
        assert_eq!(r.quantity, 3);
        assert_eq!(r.method, CalcMethod::TextAnalysis);
    }

    #[test]
    fn count_then_product_shape_is_recognized() {
        let r = analyzer().analyze("2개 측정기 구성품", 190_000);
        assert_eq!(r.quantity, 2);
        assert_eq!(r.unit_price, 95_000);
    }

    // Tunable assumption: among generic mentions, the one earliest in the
    // title describes the main product. If marketplace phrasing shifts, this
    // is the tie-break to revisit.
    #[test]
    fn generic_fallback_prefers_earliest_mention() {
        let r = analyzer().analyze("본품 2세트 리필 5개", 190_000);
        assert_eq!(r.quantity, 2);
        assert_eq!(r.unit_price, 95_000);
    }

    #[test]
    fn generic_fallback_earliest_wins_across_pattern_kinds() {
        // The multiplier shape appears before the counted-unit shape; with
        // position-based tie-breaking it wins even though it is listed
        // second in the pattern table.
        let r = analyzer().analyze("본품 x5 구성 2개", 450_000);
        assert_eq!(r.quantity, 5);
        assert_eq!(r.unit_price, 90_000);
    }

    #[test]
    fn gift_phrase_numerals_are_never_quantity_signals() {
        // Without stripping, "100매" would be read as a 100-unit bundle.
        let r = analyzer().analyze("혈당측정기용 알콜솜 100매 증정 센서", 90_000);
        assert_eq!(r.quantity, 1);
        assert_eq!(r.method, CalcMethod::TextAnalysis);

        let r = analyzer().analyze("센서 2개 멤버십 14일", 180_000);
        assert_eq!(r.quantity, 2);
    }

    #[test]
    fn integer_division_invariant_holds() {
        let a = analyzer();
        let cases = [
            ("센서 2개 + 패치 2매 증정", 180_001),
            ("혈당 센서 본품", 450_000),
            ("센서 세트", 10_000),
            ("센서 3개입", 275_000),
            ("측정기", 0),
        ];
        for (title, total) in cases {
            let r = a.analyze(title, total);
            assert!(r.quantity >= 1, "{title}: quantity {}", r.quantity);
            let qty = u64::from(r.quantity);
            assert!(
                r.unit_price * qty <= total && total < r.unit_price * qty + qty,
                "{title}: {} * {} vs {}",
                r.unit_price,
                qty,
                total
            );
        }
    }

    #[test]
    fn estimate_quantity_floors_at_one() {
        assert_eq!(estimate_quantity(10_000, 90_000), 1);
        assert_eq!(estimate_quantity(0, 90_000), 1);
        assert_eq!(estimate_quantity(450_000, 90_000), 5);
        assert_eq!(estimate_quantity(100_000, 90_000), 1);
    }
}
