//! Exposure map merging and top-N summaries.

use prisma_traits::ExposureMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Weights at or above this are rendered as a bare code.
const FULL_WEIGHT: f64 = 0.99;

/// Configuration for exposure summaries shown next to each instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExposureSummaryConfig {
    /// Number of categories to display (default: 3).
    pub display_count: usize,

    /// Minimum weight for a category to be displayed (default: 0.05).
    pub min_weight: f64,
}

impl Default for ExposureSummaryConfig {
    fn default() -> Self {
        Self {
            display_count: 3,
            min_weight: 0.05,
        }
    }
}

/// Merges user overrides into scraped exposure and renders short summaries.
#[derive(Debug, Clone, Default)]
pub struct ExposureSummarizer {
    config: ExposureSummaryConfig,
}

impl ExposureSummarizer {
    /// Create a summarizer with the given configuration.
    #[must_use]
    pub const fn new(config: ExposureSummaryConfig) -> Self {
        Self { config }
    }

    /// The summary configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ExposureSummaryConfig {
        &self.config
    }

    /// Merge `overrides` into `existing`, keeping the larger weight per key.
    ///
    /// An override states "at least this much", so weights are never summed.
    pub fn merge(existing: &mut ExposureMap, overrides: &ExposureMap) {
        for (code, weight) in overrides.iter() {
            existing
                .entry(code)
                .and_modify(|w| *w = w.max(weight))
                .or_insert(weight);
        }
    }

    /// Summary of `exposure` using the configured count and minimum weight.
    #[must_use]
    pub fn summarize(&self, exposure: &ExposureMap) -> String {
        top_n(exposure, self.config.display_count, self.config.min_weight)
    }
}

/// Render the `n` largest categories with weight ≥ `min_weight`.
///
/// Each category renders as its code followed by its weight to one decimal
/// without the leading zero (`"US.5"`). The weight is left out when it is at
/// least 0.99 or when only one category qualifies. Ties are broken by code.
///
/// ```
/// use prisma_assets::exposure::top_n;
/// use prisma_traits::ExposureMap;
///
/// let exposure: ExposureMap = [("US", 0.5), ("CN", 0.3), ("JP", 0.05)].into_iter().collect();
/// assert_eq!(top_n(&exposure, 3, 0.1), "US.5 CN.3");
/// ```
#[must_use]
pub fn top_n(exposure: &ExposureMap, n: usize, min_weight: f64) -> String {
    let mut selected: Vec<(&str, f64)> = exposure
        .iter()
        .filter(|(_, w)| w.is_finite() && *w >= min_weight)
        .collect();
    selected.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    selected.truncate(n);

    let single = selected.len() == 1;
    selected
        .into_iter()
        .map(|(code, weight)| {
            if single || weight >= FULL_WEIGHT {
                code.to_string()
            } else {
                format!("{code}{}", format_weight(weight))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One decimal, no leading or trailing zeros: 0.3 → ".3", 0.96 → "1".
///
/// A weight that rounds to zero renders as "0" so it never reads as a bare
/// code.
fn format_weight(weight: f64) -> String {
    let rendered = format!("{weight:.1}");
    let trimmed = rendered.trim_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
