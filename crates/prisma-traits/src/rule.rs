//! Rule trait for scoring instruments.
//!
//! A rule is a pure function from a [`PortfolioView`] to one named score
//! column. Rules never depend on each other's output, so each one can be
//! tested against a hand-built statistics table.

use crate::{PortfolioView, Result};

/// Score output from a single rule.
///
/// `scores[i]` belongs to the instrument in row `i` of the view the rule was
/// evaluated on. `None` marks an instrument whose inputs were undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreColumn {
    /// Column name, e.g. "PePsScore".
    pub name: String,

    /// Weighted score per instrument.
    pub scores: Vec<Option<f64>>,
}

impl ScoreColumn {
    /// Number of instruments covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// A screening rule that scores instruments.
///
/// Implementations must be thread-safe (`Send + Sync`) so a built rule set
/// can be shared read-only.
///
/// # Example
///
/// ```no_run
/// use prisma_traits::{PortfolioView, Result, Rule};
///
/// struct Constant;
///
/// impl Rule for Constant {
///     fn name(&self) -> &str {
///         "ConstantScore"
///     }
///
///     fn weight(&self) -> f64 {
///         1.0
///     }
///
///     fn evaluate(&self, view: &PortfolioView) -> Result<Vec<Option<f64>>> {
///         Ok(vec![Some(1.0); view.len()])
///     }
///
///     fn required_columns(&self) -> &[&str] {
///         &[]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Name of the score column this rule produces.
    fn name(&self) -> &str;

    /// Multiplier applied to every raw score.
    fn weight(&self) -> f64;

    /// Raw, unweighted score per instrument in view row order.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing. Undefined inputs
    /// are not errors; they produce `None` or a documented fallback.
    fn evaluate(&self, view: &PortfolioView) -> Result<Vec<Option<f64>>>;

    /// Statistics table columns this rule reads.
    fn required_columns(&self) -> &[&str];

    /// Weighted score column.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Rule::evaluate`].
    fn score(&self, view: &PortfolioView) -> Result<ScoreColumn> {
        let weight = self.weight();
        let scores = self
            .evaluate(view)?
            .into_iter()
            .map(|s| s.map(|v| v * weight))
            .collect();
        Ok(ScoreColumn {
            name: self.name().to_string(),
            scores,
        })
    }
}
