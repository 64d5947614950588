//! Short-term growth rule based on the 1-year change.

use prisma_traits::{Horizon, PortfolioView, Result, Rule};

use super::{MomentumConfig, relative_to_max};

/// Short-term growth rule.
///
/// Scores each instrument's 1Y change relative to the largest 1Y change in
/// the portfolio.
#[derive(Debug, Clone)]
pub struct ShortTermGrowth {
    config: MomentumConfig,
}

impl ShortTermGrowth {
    /// Score column name.
    pub const COLUMN: &'static str = "StgScore";

    /// Horizon this rule reads.
    pub const HORIZON: Horizon = Horizon::OneYear;

    /// Create a new short-term growth rule with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }
}

impl Default for ShortTermGrowth {
    fn default() -> Self {
        Self::new(MomentumConfig::default())
    }
}

impl Rule for ShortTermGrowth {
    fn name(&self) -> &str {
        Self::COLUMN
    }

    fn weight(&self) -> f64 {
        self.config.weight
    }

    fn evaluate(&self, view: &PortfolioView) -> Result<Vec<Option<f64>>> {
        let changes = view.values(Self::HORIZON.label())?;
        Ok(relative_to_max(&changes))
    }

    fn required_columns(&self) -> &[&str] {
        &["1Y"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::view_with_columns;

    #[test]
    fn test_reads_one_year() {
        let view = view_with_columns(&[
            ("5Y", vec![Some(0.08), Some(0.2)]),
            ("1Y", vec![Some(0.5), Some(0.25)]),
        ]);
        let scores = ShortTermGrowth::default().evaluate(&view).unwrap();
        assert_eq!(scores, vec![Some(1.0), Some(0.5)]);
    }

    #[test]
    fn test_all_declining_scores_zero() {
        let view = view_with_columns(&[("1Y", vec![Some(-0.1), Some(-0.3)])]);
        let scores = ShortTermGrowth::default().evaluate(&view).unwrap();
        assert_eq!(scores, vec![Some(0.0), Some(0.0)]);
    }
}
