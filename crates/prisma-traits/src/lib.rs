#![doc(issue_tracker_base_url = "https://github.com/prisma-screener/prisma/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the prisma ETF screener.
//!
//! This crate provides the shared data model (price series, exposure maps,
//! performance records, instrument statistics), the read-only
//! [`PortfolioView`] that rules score against, and the [`Rule`] trait itself.

/// The version of the prisma-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod rule;
pub mod types;
pub mod view;

// Re-exports
pub use error::{PrismaError, Result};
pub use rule::{Rule, ScoreColumn};
pub use types::{
    Date, ExposureMap, Horizon, InstrumentStats, PerformanceRecord, PriceSeries, Symbol, columns,
};
pub use view::{ExposureKind, PortfolioView};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
