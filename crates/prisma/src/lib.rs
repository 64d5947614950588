#![doc(issue_tracker_base_url = "https://github.com/prisma-screener/prisma/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # prisma
//!
//! Rule-based ETF screener.
//!
//! prisma is an umbrella crate that re-exports all prisma sub-crates for
//! convenience. It scores a portfolio of ETFs with a configurable list of
//! rules and produces a table with one score column per rule and a total.
//!
//! ## Quick Start
//!
//! ```ignore
//! use prisma::prelude::*;
//!
//! # fn main() -> prisma::Result<()> {
//! let factory = InstrumentFactory::with_defaults(today);
//! let portfolio = Portfolio::new(vec![
//!     factory.build(lit_source, &ExposureOverrides::default()),
//!     factory.build(vwo_source, &ExposureOverrides::default()),
//! ])?;
//!
//! let rules = vec![RuleConfig::named("PePsRule"), RuleConfig::named("TerRule")];
//! let screener = Screener::build(&rules, &RuleContext::default())?;
//! let table = screener.run(&portfolio)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Data model, the [`Rule`] trait and [`PortfolioView`]
//! - [`assets`] - Smoothing, performance, exposure, instruments, portfolios
//! - [`rules`] - Rule implementations and the rule registry
//! - [`screen`] - The [`Screener`] and its [`ScoreTable`]
//! - [`fmp`] - Financial Modeling Prep data client
//!
//! ## Architecture
//!
//! 1. **Instruments** are built from provider data plus user overrides
//! 2. **Portfolios** combine instruments into one read-only view
//! 3. **Rules** score every instrument in the view
//! 4. **The screener** runs the rules in order and sums the scores

/// Version information for the prisma crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and the rule trait.
pub mod traits {
    pub use prisma_traits::*;
}

pub use prisma_traits::{PortfolioView, PrismaError, Result, Rule};
pub use prisma_traits::{Date, ExposureMap, Horizon, InstrumentStats, PriceSeries, Symbol};

// ============================================================================
// Instruments
// ============================================================================

/// Price smoothing, performance estimation, exposure and portfolios.
///
/// # Example
///
/// ```ignore
/// use prisma::assets::{PerformanceEstimator, SmoothingConfig};
///
/// let estimator = PerformanceEstimator::new(SmoothingConfig::default())?;
/// let performance = estimator.estimate(&prices, today);
/// println!("1Y: {:?}", performance.get(Horizon::OneYear));
/// ```
pub mod assets {
    pub use prisma_assets::*;
}

// ============================================================================
// Rules
// ============================================================================

/// Rule implementations and registry.
///
/// ## Available Rules
///
/// - **SectorRule / CountryRule**: exposure weighted by outlook tier
/// - **PePsRule**: holdings valuation
/// - **TerRule**: expense ratio
/// - **DeclineRule**: temporary dips in long-term growers
/// - **LtgRule / StgRule**: growth relative to the best performer
pub mod rules {
    pub use prisma_rules::*;
}

// ============================================================================
// Screening
// ============================================================================

/// Screener and score table.
pub mod screen {
    pub use prisma_screen::*;
}

pub use prisma_screen::{RuleConfig, ScoreTable, Screener};

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get an API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
pub mod fmp {
    pub use prisma_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use prisma::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assets::{
        CountryLookup, ExposureOverrides, Instrument, InstrumentFactory, InstrumentSource,
        Portfolio, SectorCodes,
    };
    pub use crate::rules::RuleContext;
    pub use crate::traits::*;
    pub use crate::{RuleConfig, ScoreTable, Screener};
}
