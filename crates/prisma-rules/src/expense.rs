//! Expense ratio rule.

use prisma_traits::{PortfolioView, PrismaError, Result, Rule, columns};
use serde::{Deserialize, Serialize};

/// Configuration for the expense ratio rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpenseRatioConfig {
    /// Multiplier applied to the raw score (default: 1.0).
    pub weight: f64,

    /// Expense ratio, as a fraction, at and above which the score is 0
    /// (default: 0.01, i.e. 1%).
    pub cap: f64,
}

impl Default for ExpenseRatioConfig {
    fn default() -> Self {
        Self {
            weight: 1.0,
            cap: 0.01,
        }
    }
}

/// Rewards cheap funds: `max(0, cap − TER) × 100`.
///
/// With the default cap a fund charging 0.03% scores 0.97 and one charging
/// 1% or more scores 0. An undefined TER leaves the score undefined.
#[derive(Debug, Clone)]
pub struct ExpenseRatioRule {
    config: ExpenseRatioConfig,
}

impl ExpenseRatioRule {
    /// Score column name.
    pub const COLUMN: &'static str = "TerScore";

    /// Create the rule.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] if the cap is negative or not finite.
    pub fn new(config: ExpenseRatioConfig) -> Result<Self> {
        if !(config.cap.is_finite() && config.cap >= 0.0) {
            return Err(PrismaError::Configuration(format!(
                "cap must be a non-negative fraction, got {}",
                config.cap
            )));
        }
        Ok(Self { config })
    }

    /// The configured cap.
    #[must_use]
    pub const fn cap(&self) -> f64 {
        self.config.cap
    }
}

impl Default for ExpenseRatioRule {
    fn default() -> Self {
        Self {
            config: ExpenseRatioConfig::default(),
        }
    }
}

impl Rule for ExpenseRatioRule {
    fn name(&self) -> &str {
        Self::COLUMN
    }

    fn weight(&self) -> f64 {
        self.config.weight
    }

    fn evaluate(&self, view: &PortfolioView) -> Result<Vec<Option<f64>>> {
        let cap = self.config.cap;
        Ok(view
            .values(columns::TER)?
            .into_iter()
            .map(|ter| ter.map(|t| (cap - t).max(0.0) * 100.0))
            .collect())
    }

    fn required_columns(&self) -> &[&str] {
        &[columns::TER]
    }
}
