//! P/E and P/S valuation rule.

use prisma_traits::{PortfolioView, PrismaError, Result, Rule, columns};
use serde::{Deserialize, Serialize};

/// Configuration for the valuation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValuationConfig {
    /// Multiplier applied to the raw score (default: 1.0).
    pub weight: f64,

    /// P/E at which the P/E component reaches zero (default: 20).
    pub pe_threshold: f64,

    /// P/S at which the P/S component reaches zero (default: 2).
    pub ps_threshold: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            weight: 1.0,
            pe_threshold: 20.0,
            ps_threshold: 2.0,
        }
    }
}

/// Rewards cheap holdings.
///
/// Each ratio is mapped to `1 − ratio / threshold`, so a ratio at the
/// threshold scores 0 and a cheaper one scores up to 1. The raw score is the
/// mean of both components. When one ratio is missing the other stands in
/// for it; when both are missing the score is undefined.
#[derive(Debug, Clone)]
pub struct ValuationRule {
    config: ValuationConfig,
}

impl ValuationRule {
    /// Score column name.
    pub const COLUMN: &'static str = "PePsScore";

    /// Create the rule.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] if a threshold is not a
    /// positive number.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        let thresholds = [
            ("pe_threshold", config.pe_threshold),
            ("ps_threshold", config.ps_threshold),
        ];
        for (label, threshold) in thresholds {
            if !(threshold.is_finite() && threshold > 0.0) {
                return Err(PrismaError::Configuration(format!(
                    "{label} must be positive, got {threshold}"
                )));
            }
        }
        Ok(Self { config })
    }

    /// Raw score from one instrument's ratios.
    #[must_use]
    pub fn score_ratios(&self, pe: Option<f64>, ps: Option<f64>) -> Option<f64> {
        let pe_score = pe.map(|pe| 1.0 - pe / self.config.pe_threshold);
        let ps_score = ps.map(|ps| 1.0 - ps / self.config.ps_threshold);
        match (pe_score, ps_score) {
            (Some(a), Some(b)) => Some((a + b) / 2.0),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }
}

impl Default for ValuationRule {
    fn default() -> Self {
        Self {
            config: ValuationConfig::default(),
        }
    }
}

impl Rule for ValuationRule {
    fn name(&self) -> &str {
        Self::COLUMN
    }

    fn weight(&self) -> f64 {
        self.config.weight
    }

    fn evaluate(&self, view: &PortfolioView) -> Result<Vec<Option<f64>>> {
        let pe = view.values(columns::PE)?;
        let ps = view.values(columns::PS)?;
        Ok(pe
            .into_iter()
            .zip(ps)
            .map(|(pe, ps)| self.score_ratios(pe, ps))
            .collect())
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::PE, columns::PS]
    }
}
