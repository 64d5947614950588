//! Common types used throughout the prisma screener.
//!
//! This module defines the data model shared by the smoothing engine, the
//! instrument/portfolio layer and the rule family: price series, exposure
//! maps, performance horizons and per-instrument statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::error::{PrismaError, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// An instrument symbol identifier, e.g. "IVV" or "LIT".
pub type Symbol = String;

/// Column names of the combined portfolio statistics table.
///
/// Performance columns are named after [`Horizon::label`].
pub mod columns {
    /// Instrument symbol.
    pub const SYMBOL: &str = "symbol";
    /// Display name.
    pub const NAME: &str = "name";
    /// Top-N country summary.
    pub const COUNTRIES: &str = "countries";
    /// Top-N sector summary.
    pub const SECTORS: &str = "sectors";
    /// Total expense ratio (fraction).
    pub const TER: &str = "TER";
    /// Price-to-earnings ratio.
    pub const PE: &str = "P/E";
    /// Price-to-sales ratio.
    pub const PS: &str = "P/S";
    /// Average daily volume.
    pub const VOLUME: &str = "volume";
    /// Dividend yield (fraction).
    pub const YIELD: &str = "yield";
}

/// An ordered, possibly gapped series of daily prices.
///
/// Dates are not contiguous: weekends, holidays and provider gaps are
/// simply absent. Non-finite prices are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries(BTreeMap<Date, f64>);

impl PriceSeries {
    /// Create an empty series.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a price, returning `false` if the value was rejected as non-finite.
    pub fn insert(&mut self, date: Date, price: f64) -> bool {
        if !price.is_finite() {
            return false;
        }
        self.0.insert(date, price);
        true
    }

    /// Price on an exact date.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.0.get(&date).copied()
    }

    /// Number of priced dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Earliest priced date.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.0.keys().next().copied()
    }

    /// Latest priced date.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.0.keys().next_back().copied()
    }

    /// Prices with dates in `[from, to]`, in date order.
    pub fn range(&self, from: Date, to: Date) -> impl Iterator<Item = (Date, f64)> + '_ {
        let upper = if from <= to { to } else { from };
        self.0
            .range(from..=upper)
            .filter(move |(d, _)| **d <= to)
            .map(|(d, p)| (*d, *p))
    }

    /// Iterate over all `(date, price)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.0.iter().map(|(d, p)| (*d, *p))
    }
}

impl FromIterator<(Date, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (Date, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, price) in iter {
            series.insert(date, price);
        }
        series
    }
}

/// Category code to weight mapping, for sectors or countries.
///
/// Keys are sector codes (e.g. "T", "F") or ISO-3166 alpha-2 country codes.
/// Weights lie in `[0, 1]` and need not sum to one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExposureMap(BTreeMap<String, f64>);

impl ExposureMap {
    /// Create an empty exposure map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Whether `weight` is a usable exposure weight: finite and in `[0, 1]`.
    #[must_use]
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    /// Build a map from `(code, weight)` pairs, rejecting invalid weights.
    ///
    /// Later duplicates replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] if a weight is NaN or outside
    /// `[0, 1]`.
    pub fn try_from_weights<I, S>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (code, weight) in weights {
            let code = code.into();
            if !Self::is_valid_weight(weight) {
                return Err(PrismaError::Configuration(format!(
                    "exposure weight for {code} must be between 0 and 1, got {weight}"
                )));
            }
            map.insert(code, weight);
        }
        Ok(map)
    }

    /// An exposure of weight 1.0 to each of the given codes.
    pub fn uniform<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        codes.into_iter().map(|c| (c.into(), 1.0)).collect()
    }

    /// Set the weight of a category, replacing any previous value.
    pub fn insert(&mut self, code: impl Into<String>, weight: f64) {
        self.0.insert(code.into(), weight);
    }

    /// Weight of a category.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    /// Whether the category is present.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(code, weight)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(c, w)| (c.as_str(), *w))
    }

    /// Entry for a category's weight, for in-place updates.
    pub fn entry(&mut self, code: impl Into<String>) -> btree_map::Entry<'_, String, f64> {
        self.0.entry(code.into())
    }
}

impl FromIterator<(String, f64)> for ExposureMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ExposureMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, w)| (c.to_string(), w)).collect())
    }
}

/// A fixed lookback period over which performance is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// One month.
    #[serde(rename = "1M")]
    OneMonth,
    /// Three months.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// One year.
    #[serde(rename = "1Y")]
    OneYear,
    /// Five years, annualized.
    #[serde(rename = "5Y")]
    FiveYears,
}

impl Horizon {
    /// All horizons, shortest first.
    pub const ALL: [Self; 4] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::OneYear,
        Self::FiveYears,
    ];

    /// Label used as the statistics table column name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::OneYear => "1Y",
            Self::FiveYears => "5Y",
        }
    }

    /// Length of the horizon in calendar months.
    #[must_use]
    pub const fn months(&self) -> u32 {
        match self {
            Self::OneMonth => 1,
            Self::ThreeMonths => 3,
            Self::OneYear => 12,
            Self::FiveYears => 60,
        }
    }

    /// Whether changes over this horizon are annualized.
    #[must_use]
    pub const fn is_annualized(&self) -> bool {
        self.months() > 12
    }

    /// Parse a horizon from its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed fractional price change per horizon.
///
/// A horizon maps to `None` when the underlying prices were insufficient or
/// the historical reference price was zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    changes: BTreeMap<Horizon, Option<f64>>,
}

impl PerformanceRecord {
    /// A record where every horizon is undefined.
    #[must_use]
    pub fn undefined() -> Self {
        Horizon::ALL.into_iter().map(|h| (h, None)).collect()
    }

    /// Change over a horizon, if defined.
    #[must_use]
    pub fn get(&self, horizon: Horizon) -> Option<f64> {
        self.changes.get(&horizon).copied().flatten()
    }

    /// Record the change for a horizon.
    pub fn set(&mut self, horizon: Horizon, change: Option<f64>) {
        self.changes.insert(horizon, change);
    }

    /// Iterate over `(horizon, change)` in horizon order.
    pub fn iter(&self) -> impl Iterator<Item = (Horizon, Option<f64>)> + '_ {
        self.changes.iter().map(|(h, c)| (*h, *c))
    }
}

impl FromIterator<(Horizon, Option<f64>)> for PerformanceRecord {
    fn from_iter<I: IntoIterator<Item = (Horizon, Option<f64>)>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}

/// Scalar statistics of one instrument.
///
/// Every field is optional: a field the provider did not report stays `None`
/// and is never replaced by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentStats {
    /// Short display name.
    pub short_name: Option<String>,
    /// Long display name.
    pub long_name: Option<String>,
    /// Price-to-earnings ratio of the holdings.
    pub pe: Option<f64>,
    /// Price-to-sales ratio of the holdings.
    pub ps: Option<f64>,
    /// Dividend yield as a fraction.
    pub dividend_yield: Option<f64>,
    /// Average daily traded volume.
    pub volume: Option<f64>,
    /// Total expense ratio as a fraction (0.0003 for 0.03%).
    pub expense_ratio: Option<f64>,
}

impl InstrumentStats {
    /// The best available display name: short name, then long name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.short_name.as_deref().or(self.long_name.as_deref())
    }
}
