//! Momentum rules based on estimated growth.
//!
//! This module provides momentum rules at two horizons:
//! - Long-term: annualized 5-year change
//! - Short-term: 1-year change
//!
//! Both divide each instrument's change by the largest change in the
//! portfolio, so the strongest grower scores 1.

mod long_term;
mod short_term;

pub use long_term::LongTermGrowth;
pub use short_term::ShortTermGrowth;

use serde::{Deserialize, Serialize};

/// Configuration shared by the momentum rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MomentumConfig {
    /// Multiplier applied to the raw score (default: 1.0).
    pub weight: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

/// Scale defined values by the largest defined value.
///
/// Undefined values stay undefined. When the maximum is not positive every
/// defined value scores 0.
pub(crate) fn relative_to_max(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let max = values.iter().flatten().copied().reduce(f64::max);
    match max {
        None => vec![None; values.len()],
        Some(max) if max <= 0.0 => values.iter().map(|v| v.map(|_| 0.0)).collect(),
        Some(max) => values.iter().map(|v| v.map(|x| x / max)).collect(),
    }
}
