//! Financial Modeling Prep (FMP) ETF data client for prisma.
//!
//! This crate fetches the raw inputs of an ETF screen from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API and turns
//! them into an [`InstrumentSource`](prisma_assets::InstrumentSource):
//! fund profile, quote, trailing ratios, sector and country weightings, and
//! daily close prices.
//!
//! # Usage
//!
//! ```rust,ignore
//! use prisma_assets::{CountryLookup, SectorCodes};
//! use prisma_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     let data = client.fund_data("LIT", Some(from), Some(today)).await?;
//!     println!("TER: {:?}", data.expense_ratio());
//!
//!     let source = data.source(&SectorCodes::new(), &CountryLookup::new());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod fund;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use fund::FundData;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
