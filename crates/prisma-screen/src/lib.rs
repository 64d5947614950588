//! Rule pipeline for the prisma ETF screener.
//!
//! A screener moves through three stages:
//! - Unconfigured: a list of [`RuleConfig`] entries, usually read from JSON
//! - Built: a [`Screener`] holding validated rules
//! - Executed: a [`ScoreTable`] with one column per rule and `TotalScore`
//!
//! # Example
//!
//! ```ignore
//! use prisma_screen::{RuleConfig, Screener};
//! use prisma_rules::RuleContext;
//!
//! let configs: Vec<RuleConfig> = serde_json::from_str(r#"["PePsRule", "TerRule"]"#)?;
//! let screener = Screener::build(&configs, &RuleContext::default())?;
//! let table = screener.run(&portfolio)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod config;
mod screener;
mod table;

// Re-export main types
pub use config::RuleConfig;
pub use screener::Screener;
pub use table::{ScoreTable, TOTAL_SCORE};
