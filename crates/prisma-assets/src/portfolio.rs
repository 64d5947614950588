//! Ordered instrument collection and its combined statistics table.

use std::collections::HashSet;

use polars::prelude::*;
use prisma_traits::{ExposureMap, Horizon, PortfolioView, PrismaError, Result, Symbol, columns};

use crate::instrument::Instrument;

/// A non-empty, ordered set of instruments with unique symbols.
///
/// Row `i` of [`Portfolio::stats_table`] and of [`Portfolio::view`] is the
/// `i`-th instrument passed to [`Portfolio::new`].
#[derive(Debug, Clone)]
pub struct Portfolio {
    instruments: Vec<Instrument>,
}

impl Portfolio {
    /// Create a portfolio.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::EmptyPortfolio`] if `instruments` is empty, or
    /// [`PrismaError::DuplicateSymbol`] if a symbol appears twice.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self> {
        if instruments.is_empty() {
            return Err(PrismaError::EmptyPortfolio);
        }
        let mut seen = HashSet::with_capacity(instruments.len());
        for instrument in &instruments {
            if !seen.insert(instrument.symbol()) {
                return Err(PrismaError::DuplicateSymbol(instrument.symbol().to_string()));
            }
        }
        Ok(Self { instruments })
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the portfolio has no instruments; never true once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Instrument by symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol() == symbol)
    }

    /// Instruments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Symbols in insertion order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.instruments
            .iter()
            .map(|i| i.symbol().to_string())
            .collect()
    }

    /// One row per instrument: identity, summaries, statistics and
    /// performance per horizon. Undefined values are nulls.
    ///
    /// # Errors
    ///
    /// Returns an error if the `DataFrame` cannot be assembled.
    pub fn stats_table(&self) -> Result<DataFrame> {
        let symbols: Vec<&str> = self.iter().map(Instrument::symbol).collect();
        let names: Vec<Option<&str>> = self.iter().map(|i| i.stats().display_name()).collect();
        let countries: Vec<&str> = self.iter().map(Instrument::top_countries).collect();
        let sectors: Vec<&str> = self.iter().map(Instrument::top_sectors).collect();

        let mut table = vec![
            Column::new(columns::SYMBOL.into(), symbols),
            Column::new(columns::NAME.into(), names),
            Column::new(columns::COUNTRIES.into(), countries),
            Column::new(columns::SECTORS.into(), sectors),
            self.numeric(columns::TER, |i| i.stats().expense_ratio),
            self.numeric(columns::PE, |i| i.stats().pe),
            self.numeric(columns::PS, |i| i.stats().ps),
            self.numeric(columns::VOLUME, |i| i.stats().volume),
            self.numeric(columns::YIELD, |i| i.stats().dividend_yield),
        ];
        for horizon in Horizon::ALL {
            table.push(self.numeric(horizon.label(), |i| i.change(horizon)));
        }

        Ok(DataFrame::new(table)?)
    }

    fn numeric(&self, name: &str, value: impl Fn(&Instrument) -> Option<f64>) -> Column {
        let values: Vec<Option<f64>> = self.iter().map(value).collect();
        Column::new(name.into(), values)
    }

    /// Read-only view for rule evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if the statistics table cannot be assembled.
    pub fn view(&self) -> Result<PortfolioView> {
        let sectors: Vec<ExposureMap> = self.iter().map(|i| i.sectors().clone()).collect();
        let countries: Vec<ExposureMap> = self.iter().map(|i| i.countries().clone()).collect();
        PortfolioView::new(self.stats_table()?, sectors, countries)
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Instrument;
    type IntoIter = std::slice::Iter<'a, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.instruments.iter()
    }
}
