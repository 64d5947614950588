//! Screening rules for the prisma ETF screener.
//!
//! This crate provides the rule family and the registry that builds it:
//! - Exposure: sector and country outlook tiers
//! - Valuation: P/E and P/S against fixed thresholds
//! - Expense ratio: cheaper funds score higher
//! - Rebound: recent dips in long-term growers
//! - Momentum: 5Y and 1Y growth relative to the best instrument
//!
//! Every rule reads a [`PortfolioView`](prisma_traits::PortfolioView) and
//! produces one named score column, scaled by its configured weight.
//!
//! # Example
//!
//! ```ignore
//! use prisma_rules::registry::{RuleContext, create_rule};
//!
//! let rule = create_rule("TerRule", serde_json::Value::Null, &RuleContext::default())?;
//! let column = rule.score(&view)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod expense;
pub mod exposure;
pub mod momentum;
pub mod rebound;
pub mod registry;
pub mod valuation;

// Re-export key types
pub use registry::{RuleCategory, RuleContext, RuleInfo, RuleKind};

#[cfg(test)]
pub(crate) mod testing {
    use polars::prelude::*;
    use prisma_traits::{ExposureMap, PortfolioView};

    /// View over numeric columns, one row per value, symbols `S0`, `S1`, ...
    pub(crate) fn view_with_columns(columns: &[(&str, Vec<Option<f64>>)]) -> PortfolioView {
        let rows = columns.first().map_or(0, |(_, values)| values.len());
        let symbols: Vec<String> = (0..rows).map(|i| format!("S{i}")).collect();

        let mut table = vec![Column::new("symbol".into(), symbols)];
        for (name, values) in columns {
            table.push(Column::new((*name).into(), values.clone()));
        }
        let stats = DataFrame::new(table).unwrap();
        PortfolioView::new(
            stats,
            vec![ExposureMap::new(); rows],
            vec![ExposureMap::new(); rows],
        )
        .unwrap()
    }

    /// View with only a symbol column and the given exposures.
    pub(crate) fn view_with_exposure(
        sectors: Vec<ExposureMap>,
        countries: Vec<ExposureMap>,
    ) -> PortfolioView {
        let symbols: Vec<String> = (0..sectors.len()).map(|i| format!("S{i}")).collect();
        let stats = DataFrame::new(vec![Column::new("symbol".into(), symbols)]).unwrap();
        PortfolioView::new(stats, sectors, countries).unwrap()
    }
}
