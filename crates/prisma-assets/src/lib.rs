//! Instrument construction for the prisma screener.
//!
//! This crate turns raw provider data into scoreable instruments:
//! - Smoothing: Gaussian kernel estimates of a gapped price series
//! - Performance: 1M/3M/1Y/5Y changes, with 5Y annualized
//! - Exposure: override merging and top-N sector/country summaries
//! - Lookups: country name resolution and sector codes
//! - Instruments and portfolios, with the combined statistics table
//!
//! # Example
//!
//! ```ignore
//! use prisma_assets::{ExposureOverrides, InstrumentFactory, Portfolio};
//!
//! let factory = InstrumentFactory::with_defaults(today);
//! let lit = factory.build(source, &ExposureOverrides::default());
//! let portfolio = Portfolio::new(vec![lit])?;
//! let table = portfolio.stats_table()?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod countries;
pub mod exposure;
pub mod instrument;
pub mod performance;
pub mod portfolio;
pub mod sectors;
pub mod smoothing;

// Re-export key types
pub use countries::{Country, CountryLookup};
pub use exposure::{ExposureSummarizer, ExposureSummaryConfig, top_n};
pub use instrument::{ExposureOverrides, Instrument, InstrumentFactory, InstrumentSource};
pub use performance::PerformanceEstimator;
pub use portfolio::Portfolio;
pub use sectors::SectorCodes;
pub use smoothing::{GaussianKernel, SmoothingConfig, TemporalSmoother};
