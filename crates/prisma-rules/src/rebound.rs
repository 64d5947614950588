//! Rebound rule: temporary dips in long-term growers.

use prisma_traits::{Horizon, PortfolioView, Result, Rule};
use serde::{Deserialize, Serialize};

/// Configuration for the rebound rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReboundConfig {
    /// Multiplier applied to the raw score (default: 1.0).
    pub weight: f64,

    /// Annualized 5Y change an instrument must exceed to qualify (default: 0.15).
    pub min_growth: f64,

    /// Combined 1M + 3M change below which a recovery is still early
    /// (default: 0.05).
    pub rebound_threshold: f64,
}

impl Default for ReboundConfig {
    fn default() -> Self {
        Self {
            weight: 1.0,
            min_growth: 0.15,
            rebound_threshold: 0.05,
        }
    }
}

/// Rewards a recent decline in an instrument with strong long-term growth.
///
/// An instrument qualifies when its annualized 5Y change exceeds
/// `min_growth`, its recent monthly pace is below the long-term monthly pace
/// (`5Y/12 > 3M/3` or `5Y/12 > 1M`), and its 3M change is negative. A
/// qualifying instrument scores:
///
/// | 1M | 1M + 3M | score |
/// |---|---|---|
/// | < 0 | any | 0.5 |
/// | > 0 | < `rebound_threshold` | 1.0 |
/// | > 0 | ≥ `rebound_threshold` | 0.5 |
///
/// Everything else scores 0. Any undefined input leaves the score undefined.
#[derive(Debug, Clone)]
pub struct ReboundRule {
    config: ReboundConfig,
}

impl ReboundRule {
    /// Score column name.
    pub const COLUMN: &'static str = "DeclineScore";

    /// Create the rule.
    #[must_use]
    pub const fn new(config: ReboundConfig) -> Self {
        Self { config }
    }

    /// Raw score from one instrument's 1M, 3M and 5Y changes.
    #[must_use]
    pub fn score_changes(&self, m1: f64, m3: f64, y5: f64) -> f64 {
        let long_term_growth = y5 > self.config.min_growth;
        let y5_monthly = y5 / 12.0;
        let slower_than_trend = y5_monthly > m3 / 3.0 || y5_monthly > m1;
        if !(long_term_growth && slower_than_trend && m3 < 0.0) {
            return 0.0;
        }

        if m1 < 0.0 {
            0.5
        } else if m1 > 0.0 && m1 + m3 < self.config.rebound_threshold {
            1.0
        } else if m1 > 0.0 {
            0.5
        } else {
            0.0
        }
    }
}

impl Default for ReboundRule {
    fn default() -> Self {
        Self::new(ReboundConfig::default())
    }
}

impl Rule for ReboundRule {
    fn name(&self) -> &str {
        Self::COLUMN
    }

    fn weight(&self) -> f64 {
        self.config.weight
    }

    fn evaluate(&self, view: &PortfolioView) -> Result<Vec<Option<f64>>> {
        let m1 = view.values(Horizon::OneMonth.label())?;
        let m3 = view.values(Horizon::ThreeMonths.label())?;
        let y5 = view.values(Horizon::FiveYears.label())?;

        Ok(m1
            .into_iter()
            .zip(m3)
            .zip(y5)
            .map(|((m1, m3), y5)| Some(self.score_changes(m1?, m3?, y5?)))
            .collect())
    }

    fn required_columns(&self) -> &[&str] {
        &["1M", "3M", "5Y"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::view_with_columns;

    #[test]
    fn test_default_config() {
        let config = ReboundConfig::default();
        assert_eq!(config.min_growth, 0.15);
        assert_eq!(config.rebound_threshold, 0.05);
    }

    #[test]
    fn test_non_qualifying() {
        let rule = ReboundRule::default();
        // weak long-term growth
        assert_eq!(rule.score_changes(-0.02, -0.05, 0.10), 0.0);
        // 3M not negative
        assert_eq!(rule.score_changes(-0.02, 0.01, 0.30), 0.0);
        // growth must exceed the minimum strictly
        assert_eq!(rule.score_changes(-0.02, -0.05, 0.15), 0.0);
    }

    #[test]
    fn test_reward_bands() {
        let rule = ReboundRule::default();
        // both negative
        assert_eq!(rule.score_changes(-0.02, -0.06, 0.25), 0.5);
        // early recovery
        assert_eq!(rule.score_changes(0.01, -0.06, 0.25), 1.0);
        // strong recovery
        assert_eq!(rule.score_changes(0.12, -0.02, 0.25), 0.5);
        // flat month
        assert_eq!(rule.score_changes(0.0, -0.06, 0.25), 0.0);
    }

    #[test]
    fn test_undefined_input() {
        let view = view_with_columns(&[
            ("1M", vec![Some(0.01), None]),
            ("3M", vec![Some(-0.06), Some(-0.06)]),
            ("5Y", vec![Some(0.25), Some(0.25)]),
        ]);
        let scores = ReboundRule::default().evaluate(&view).unwrap();
        assert_eq!(scores, vec![Some(1.0), None]);
    }
}
