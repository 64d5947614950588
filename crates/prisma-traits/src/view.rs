//! Read-only portfolio view consumed by rules.

use crate::{ExposureMap, PrismaError, Result, Symbol};
use polars::prelude::*;

use crate::types::columns;

/// Which exposure map a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExposureKind {
    /// Sector exposure.
    Sector,
    /// Country exposure.
    Country,
}

/// Container for everything a rule may score against.
///
/// `PortfolioView` wraps the combined statistics `DataFrame` (one row per
/// instrument, see [`columns`](crate::types::columns)) together with the
/// per-instrument sector and country exposure maps. All three are aligned by
/// row: `sectors()[i]` belongs to the instrument in row `i`.
///
/// # Example
///
/// ```no_run
/// use prisma_traits::{ExposureMap, PortfolioView};
/// use polars::prelude::*;
///
/// let stats = df! {
///     "symbol" => &["IVV", "VWO"],
///     "P/E" => &[22.0, 12.0],
/// }.unwrap();
///
/// let view = PortfolioView::new(
///     stats,
///     vec![ExposureMap::new(), ExposureMap::new()],
///     vec![ExposureMap::new(), ExposureMap::new()],
/// ).unwrap();
/// assert_eq!(view.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PortfolioView {
    stats: DataFrame,
    sectors: Vec<ExposureMap>,
    countries: Vec<ExposureMap>,
}

impl PortfolioView {
    /// Creates a view, checking that exposures align with the table rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no `symbol` column or if the
    /// exposure vectors do not have one entry per row.
    pub fn new(
        stats: DataFrame,
        sectors: Vec<ExposureMap>,
        countries: Vec<ExposureMap>,
    ) -> Result<Self> {
        if stats.column(columns::SYMBOL).is_err() {
            return Err(PrismaError::MissingColumn(columns::SYMBOL.to_string()));
        }
        let rows = stats.height();
        if sectors.len() != rows || countries.len() != rows {
            return Err(PrismaError::InvalidData(format!(
                "exposure maps ({} sectors, {} countries) do not match {} rows",
                sectors.len(),
                countries.len(),
                rows
            )));
        }
        Ok(Self {
            stats,
            sectors,
            countries,
        })
    }

    /// Returns a reference to the statistics table.
    pub const fn stats(&self) -> &DataFrame {
        &self.stats
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.stats.height()
    }

    /// Whether the view has no instruments.
    pub fn is_empty(&self) -> bool {
        self.stats.height() == 0
    }

    /// Checks if a column exists in the statistics table.
    pub fn has_column(&self, name: &str) -> bool {
        self.stats
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Instrument symbols in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol column is not a string column.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        let symbols = self
            .stats
            .column(columns::SYMBOL)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|s: Option<&str>| s.unwrap_or_default().to_string())
            .collect();
        Ok(symbols)
    }

    /// Values of a numeric column, `None` where the value is undefined.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::MissingColumn`] if the column does not exist,
    /// or a Polars error if it cannot be read as `f64`.
    pub fn values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if !self.has_column(name) {
            return Err(PrismaError::MissingColumn(name.to_string()));
        }
        let column = self.stats.column(name)?.cast(&DataType::Float64)?;
        let values = column
            .as_materialized_series()
            .f64()?
            .into_iter()
            .map(|v: Option<f64>| v.filter(|x| x.is_finite()))
            .collect();
        Ok(values)
    }

    /// Exposure maps of the given kind, in row order.
    pub fn exposures(&self, kind: ExposureKind) -> &[ExposureMap] {
        match kind {
            ExposureKind::Sector => &self.sectors,
            ExposureKind::Country => &self.countries,
        }
    }
}

impl AsRef<DataFrame> for PortfolioView {
    fn as_ref(&self) -> &DataFrame {
        &self.stats
    }
}
