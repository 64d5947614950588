//! Long-term growth rule based on the annualized 5-year change.

use prisma_traits::{Horizon, PortfolioView, Result, Rule};

use super::{MomentumConfig, relative_to_max};

/// Long-term growth rule.
///
/// Scores each instrument's annualized 5Y change relative to the largest 5Y
/// change in the portfolio.
///
/// # Example
///
/// ```ignore
/// use prisma_rules::momentum::LongTermGrowth;
///
/// let rule = LongTermGrowth::default();
/// let column = rule.score(&view)?;
/// ```
#[derive(Debug, Clone)]
pub struct LongTermGrowth {
    config: MomentumConfig,
}

impl LongTermGrowth {
    /// Score column name.
    pub const COLUMN: &'static str = "LtgScore";

    /// Horizon this rule reads.
    pub const HORIZON: Horizon = Horizon::FiveYears;

    /// Create a new long-term growth rule with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }
}

impl Default for LongTermGrowth {
    fn default() -> Self {
        Self::new(MomentumConfig::default())
    }
}

impl Rule for LongTermGrowth {
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
        &["5Y"]
    }
}
