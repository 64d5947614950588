//! A single screenable instrument and its construction.

use prisma_traits::{
    Date, ExposureMap, Horizon, InstrumentStats, PerformanceRecord, PrismaError, PriceSeries,
    Result, Symbol,
};
use serde::Serialize;

use crate::countries::CountryLookup;
use crate::exposure::{ExposureSummarizer, ExposureSummaryConfig};
use crate::performance::PerformanceEstimator;
use crate::smoothing::SmoothingConfig;

/// Raw inputs for one instrument, as extracted from provider responses.
#[derive(Debug, Clone, Default)]
pub struct InstrumentSource {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Fundamental statistics.
    pub stats: InstrumentStats,
    /// Scraped sector exposure, keyed by sector code.
    pub sectors: ExposureMap,
    /// Scraped country exposure, keyed by alpha-2 code.
    pub countries: ExposureMap,
    /// Daily close prices.
    pub prices: PriceSeries,
}

impl InstrumentSource {
    /// Source with only a symbol; everything else empty or undefined.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }
}

/// User-supplied exposure that takes precedence over scraped data.
///
/// Each weight is a lower bound: merging keeps the larger of the scraped and
/// the override weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureOverrides {
    /// Sector overrides, keyed by sector code.
    pub sectors: ExposureMap,
    /// Country overrides, keyed by alpha-2 code.
    pub countries: ExposureMap,
}

impl ExposureOverrides {
    /// Overrides from free-form country names and sector codes.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::UnknownCountry`](prisma_traits::PrismaError::UnknownCountry)
    /// if a country name cannot be resolved, or
    /// [`PrismaError::Configuration`](prisma_traits::PrismaError::Configuration)
    /// if a weight is NaN or outside `[0, 1]`.
    pub fn from_names<C, S>(countries: C, sectors: S, lookup: &CountryLookup) -> Result<Self>
    where
        C: IntoIterator<Item = (String, f64)>,
        S: IntoIterator<Item = (String, f64)>,
    {
        let countries = ExposureMap::try_from_weights(countries)?;
        let mut resolved = ExposureMap::new();
        for (name, weight) in countries.iter() {
            let code = lookup.resolve(name)?;
            resolved
                .entry(code)
                .and_modify(|w| *w = w.max(weight))
                .or_insert(weight);
        }
        Ok(Self {
            sectors: ExposureMap::try_from_weights(sectors)?,
            countries: resolved,
        })
    }

    /// Whether there is nothing to override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty() && self.countries.is_empty()
    }
}

/// A fully constructed instrument: statistics, merged exposure, summaries
/// and performance as of one date.
#[derive(Debug, Clone, Serialize)]
pub struct Instrument {
    symbol: Symbol,
    stats: InstrumentStats,
    sectors: ExposureMap,
    countries: ExposureMap,
    performance: PerformanceRecord,
    top_sectors: String,
    top_countries: String,
}

impl Instrument {
    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fundamental statistics.
    #[must_use]
    pub const fn stats(&self) -> &InstrumentStats {
        &self.stats
    }

    /// Sector exposure after merging overrides.
    #[must_use]
    pub const fn sectors(&self) -> &ExposureMap {
        &self.sectors
    }

    /// Country exposure after merging overrides.
    #[must_use]
    pub const fn countries(&self) -> &ExposureMap {
        &self.countries
    }

    /// Price change per horizon.
    #[must_use]
    pub const fn performance(&self) -> &PerformanceRecord {
        &self.performance
    }

    /// Change over one horizon.
    #[must_use]
    pub fn change(&self, horizon: Horizon) -> Option<f64> {
        self.performance.get(horizon)
    }

    /// Top sectors summary, e.g. `"T.4 F.2"`.
    #[must_use]
    pub fn top_sectors(&self) -> &str {
        &self.top_sectors
    }

    /// Top countries summary, e.g. `"US.5 CN.3"`.
    #[must_use]
    pub fn top_countries(&self) -> &str {
        &self.top_countries
    }
}

/// Builds [`Instrument`]s as of a fixed date.
#[derive(Debug, Clone)]
pub struct InstrumentFactory {
    today: Date,
    estimator: PerformanceEstimator,
    summarizer: ExposureSummarizer,
}

impl InstrumentFactory {
    /// Create a factory evaluating performance as of `today`.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] if the smoothing configuration
    /// is invalid or the summary minimum weight is NaN or outside `[0, 1]`.
    pub fn new(
        today: Date,
        smoothing: SmoothingConfig,
        exposure: ExposureSummaryConfig,
    ) -> Result<Self> {
        if !ExposureMap::is_valid_weight(exposure.min_weight) {
            return Err(PrismaError::Configuration(format!(
                "exposure: min_weight must be between 0 and 1, got {}",
                exposure.min_weight
            )));
        }
        Ok(Self {
            today,
            estimator: PerformanceEstimator::new(smoothing)?,
            summarizer: ExposureSummarizer::new(exposure),
        })
    }

    /// Factory with default smoothing and summary settings.
    #[must_use]
    pub fn with_defaults(today: Date) -> Self {
        Self {
            today,
            estimator: PerformanceEstimator::default(),
            summarizer: ExposureSummarizer::default(),
        }
    }

    /// The evaluation date.
    #[must_use]
    pub const fn today(&self) -> Date {
        self.today
    }

    /// The performance estimator in use.
    #[must_use]
    pub const fn estimator(&self) -> &PerformanceEstimator {
        &self.estimator
    }

    /// Earliest price date needed for every horizon to be defined.
    #[must_use]
    pub fn history_start(&self) -> Option<Date> {
        self.estimator.history_start(self.today)
    }

    /// Merge overrides, render summaries and estimate performance.
    #[must_use]
    pub fn build(&self, source: InstrumentSource, overrides: &ExposureOverrides) -> Instrument {
        let InstrumentSource {
            symbol,
            stats,
            mut sectors,
            mut countries,
            prices,
        } = source;

        ExposureSummarizer::merge(&mut sectors, &overrides.sectors);
        ExposureSummarizer::merge(&mut countries, &overrides.countries);

        let performance = self.estimator.estimate(&prices, self.today);
        if performance.iter().all(|(_, change)| change.is_none()) {
            tracing::warn!(%symbol, points = prices.len(), "no horizon could be estimated");
        }

        Instrument {
            top_sectors: self.summarizer.summarize(&sectors),
            top_countries: self.summarizer.summarize(&countries),
            symbol,
            stats,
            sectors,
            countries,
            performance,
        }
    }
}
