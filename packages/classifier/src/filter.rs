//! Exclusion filter: is this listing the tracked product at all?
//!
//! Keyword search returns many false positives (accessory multi-packs,
//! bundled gift items, wrong sub-categories) and no single upstream filter
//! parameter achieves acceptable precision, so inclusion is decided by an
//! ordered heuristic chain over the title and category path. First matching
//! rule wins and short-circuits; an excluded listing never reaches price
//! analysis. The cost is silently dropping a small number of true positives
//! with atypical titles.

use regex::Regex;

use crate::config::{compile_rules, ClassifierConfig};
use crate::error::Result;

/// Why a listing was dropped before quantity/price analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Category path carries none of the required category keywords.
    CategoryGate,
    /// "count + accessory noun" shape: an accessory multi-pack.
    AccessoryBundle { label: String },
    /// A denylisted accessory brand/noun appears in the title.
    AccessoryKeyword { keyword: String },
    /// No core product keyword appears in the title.
    MissingCoreKeyword,
}

/// Compiled exclusion rules, evaluated in a fixed order.
pub struct ExclusionFilter {
    category_keywords: Vec<String>,
    core_keywords: Vec<String>,
    accessory_keywords: Vec<String>,
    accessory_quantity: Vec<(Regex, String)>,
}

impl ExclusionFilter {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self {
            category_keywords: lowercase_all(&config.category_keywords),
            core_keywords: lowercase_all(&config.core_product_keywords),
            accessory_keywords: lowercase_all(&config.accessory_keywords),
            accessory_quantity: compile_rules(&config.accessory_quantity_patterns)?,
        })
    }

    /// Rule 1 in isolation, exposed so the pipeline can gate rows cheaply as
    /// pages stream in.
    ///
    /// Missing or empty category metadata fails the gate: a listing the
    /// marketplace did not place in a recognized category is not trusted.
    pub fn passes_category_gate(&self, category_path: &[String]) -> bool {
        if category_path.is_empty() {
            return false;
        }
        let joined = category_path.join(" ").to_lowercase();
        self.category_keywords.iter().any(|kw| joined.contains(kw))
    }

    /// Evaluate the full rule chain. `None` means the listing is the product.
    pub fn evaluate(&self, title: &str, category_path: &[String]) -> Option<ExclusionReason> {
        if !self.passes_category_gate(category_path) {
            return Some(ExclusionReason::CategoryGate);
        }

        let title_lower = title.to_lowercase();

        for (re, label) in &self.accessory_quantity {
            if re.is_match(&title_lower) {
                return Some(ExclusionReason::AccessoryBundle {
                    label: label.clone(),
                });
            }
        }

        if let Some(keyword) = self
            .accessory_keywords
            .iter()
            .find(|kw| title_lower.contains(kw.as_str()))
        {
            return Some(ExclusionReason::AccessoryKeyword {
                keyword: keyword.clone(),
            });
        }

        if !self
            .core_keywords
            .iter()
            .any(|kw| title_lower.contains(kw.as_str()))
        {
            return Some(ExclusionReason::MissingCoreKeyword);
        }

        None
    }
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|kw| kw.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ExclusionFilter {
        ExclusionFilter::new(&ClassifierConfig::default()).unwrap()
    }

    fn categories(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn sensor_category() -> Vec<String> {
        categories(&["생활/건강", "건강관리용품", "혈당계"])
    }

    #[test]
    fn product_listing_passes_all_rules() {
        let f = filter();
        assert_eq!(f.evaluate("프리스타일 리브레2 센서", &sensor_category()), None);
    }

    #[test]
    fn wrong_category_is_gated_out() {
        let f = filter();
        let reason = f.evaluate(
            "리브레2 측정기 1박스",
            &categories(&["패션잡화", "지갑"]),
        );
        assert_eq!(reason, Some(ExclusionReason::CategoryGate));
    }

    #[test]
    fn missing_category_metadata_fails_the_gate() {
        let f = filter();
        assert!(!f.passes_category_gate(&[]));
        assert_eq!(
            f.evaluate("리브레2 측정기 1박스", &[]),
            Some(ExclusionReason::CategoryGate)
        );
    }

    #[test]
    fn accessory_multipack_matches_quantity_pattern() {
        let f = filter();
        let reason = f.evaluate("센서 커버 25팩", &sensor_category());
        assert!(
            matches!(reason, Some(ExclusionReason::AccessoryBundle { .. })),
            "got {reason:?}"
        );
    }

    #[test]
    fn english_multipack_is_excluded_case_insensitively() {
        let f = filter();
        let reason = f.evaluate("Libre Sensor Covers 40 Pack", &sensor_category());
        assert!(matches!(
            reason,
            Some(ExclusionReason::AccessoryBundle { .. })
        ));
    }

    #[test]
    fn accessory_keyword_excludes_despite_core_keyword() {
        let f = filter();
        let reason = f.evaluate("리브레 센서 보호 스티커", &sensor_category());
        assert_eq!(
            reason,
            Some(ExclusionReason::AccessoryKeyword {
                keyword: "스티커".to_string()
            })
        );
    }

    #[test]
    fn title_without_core_keyword_is_excluded() {
        let f = filter();
        let reason = f.evaluate("혈당 시험지 리필", &sensor_category());
        assert_eq!(reason, Some(ExclusionReason::MissingCoreKeyword));
    }

    #[test]
    fn rules_short_circuit_in_order() {
        let f = filter();

        // Both the bundle pattern and the keyword list match; the bundle
        // rule sits earlier in the chain and wins.
        let reason = f.evaluate("센서 커버 25팩 케이스", &sensor_category());
        assert!(matches!(
            reason,
            Some(ExclusionReason::AccessoryBundle { .. })
        ));

        // The category gate beats everything, even obvious accessories.
        let reason = f.evaluate("센서 커버 25팩 케이스", &[]);
        assert_eq!(reason, Some(ExclusionReason::CategoryGate));
    }
}
