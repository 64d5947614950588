//! Error types for the prisma screener.
//!
//! Missing data is never an error here: absent provider fields, empty
//! smoothing windows and undefined horizons travel as `Option::None`.
//! The variants below are the failures that abort a computation.

use thiserror::Error;

/// The main error type for prisma operations.
#[derive(Debug, Error)]
pub enum PrismaError {
    /// Invalid screener or rule configuration.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A rule configuration entry names a rule type that is not registered.
    #[error("Unknown rule: '{0}'. Use 'prisma rules' to list available rules.")]
    UnknownRule(String),

    /// A configured country name has no fuzzy match.
    #[error("Unknown country: '{0}'")]
    UnknownCountry(String),

    /// Two instruments share the same symbol.
    #[error("Duplicate symbol in portfolio: {0}")]
    DuplicateSymbol(String),

    /// No instruments could be resolved.
    #[error("Portfolio is empty: no instruments were resolved")]
    EmptyPortfolio,

    /// A required column is missing from the statistics table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Malformed rule parameters or configuration document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl PrismaError {
    /// Whether this error is a configuration failure reported before scoring.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::UnknownRule(_)
                | Self::UnknownCountry(_)
                | Self::DuplicateSymbol(_)
                | Self::Json(_)
        )
    }
}

/// A specialized Result type for prisma operations.
pub type Result<T> = std::result::Result<T, PrismaError>;
