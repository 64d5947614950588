//! Everything FMP knows about one fund, and the extraction of screen inputs.

use prisma_assets::{CountryLookup, InstrumentSource, SectorCodes};
use prisma_traits::{ExposureMap, InstrumentStats, PriceSeries};
use serde::{Deserialize, Serialize};

use crate::types::{CountryWeighting, EtfInfo, HistoricalPrice, Quote, RatiosTtm, SectorWeighting};

/// Raw FMP responses for one symbol.
///
/// A failed or empty endpoint leaves its field `None` or empty; extraction
/// then yields `None` for everything derived from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundData {
    /// Ticker symbol (uppercase).
    pub symbol: String,
    /// Fund profile.
    pub info: Option<EtfInfo>,
    /// Latest quote.
    pub quote: Option<Quote>,
    /// Trailing ratios.
    pub ratios: Option<RatiosTtm>,
    /// Sector weightings.
    pub sectors: Vec<SectorWeighting>,
    /// Country weightings.
    pub countries: Vec<CountryWeighting>,
    /// Daily prices, any order.
    pub prices: Vec<HistoricalPrice>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl FundData {
    /// Whether no endpoint returned anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.info.is_none()
            && self.quote.is_none()
            && self.ratios.is_none()
            && self.sectors.is_empty()
            && self.countries.is_empty()
            && self.prices.is_empty()
    }

    /// Short display name, from the quote.
    #[must_use]
    pub fn short_name(&self) -> Option<String> {
        self.quote.as_ref()?.name.clone().filter(|n| !n.is_empty())
    }

    /// Long display name, from the fund profile.
    #[must_use]
    pub fn long_name(&self) -> Option<String> {
        self.info.as_ref()?.name.clone().filter(|n| !n.is_empty())
    }

    /// P/E of the holdings: the quote's, else the trailing ratio.
    #[must_use]
    pub fn pe(&self) -> Option<f64> {
        finite(self.quote.as_ref().and_then(|q| q.pe))
            .or_else(|| finite(self.ratios.as_ref()?.price_to_earnings))
    }

    /// P/S of the holdings.
    #[must_use]
    pub fn ps(&self) -> Option<f64> {
        finite(self.ratios.as_ref()?.price_to_sales)
    }

    /// Trailing dividend yield as a fraction.
    #[must_use]
    pub fn dividend_yield(&self) -> Option<f64> {
        finite(self.ratios.as_ref()?.dividend_yield)
    }

    /// Average daily volume: the quote's, else the profile's.
    #[must_use]
    pub fn average_volume(&self) -> Option<f64> {
        finite(self.quote.as_ref().and_then(|q| q.avg_volume))
            .or_else(|| finite(self.info.as_ref()?.avg_volume))
    }

    /// Total expense ratio as a fraction (0.0075 for 0.75%).
    #[must_use]
    pub fn expense_ratio(&self) -> Option<f64> {
        finite(self.info.as_ref()?.expense_ratio).map(|p| p / 100.0)
    }

    /// Sector weights as fractions keyed by sector code.
    ///
    /// Rows without a positive weight are dropped; rows mapping to the same
    /// code are summed.
    #[must_use]
    pub fn sector_exposure(&self, codes: &SectorCodes) -> ExposureMap {
        let mut exposure = ExposureMap::new();
        for row in &self.sectors {
            let Some(weight) = finite(row.weight_percentage).filter(|w| *w > 0.0) else {
                continue;
            };
            *exposure.entry(codes.encode(&row.sector)).or_insert(0.0) += weight / 100.0;
        }
        exposure
    }

    /// Country weights as fractions keyed by alpha-2 code.
    ///
    /// Countries the lookup cannot resolve are skipped with a warning.
    #[must_use]
    pub fn country_exposure(&self, lookup: &CountryLookup) -> ExposureMap {
        let mut exposure = ExposureMap::new();
        for row in &self.countries {
            let Some(weight) = finite(row.weight_percentage).filter(|w| *w > 0.0) else {
                continue;
            };
            let Some(code) = lookup.lookup(&row.country) else {
                tracing::warn!(symbol = %self.symbol, country = %row.country, "unknown country skipped");
                continue;
            };
            *exposure.entry(code).or_insert(0.0) += weight / 100.0;
        }
        exposure
    }

    /// Daily closes keyed by date.
    ///
    /// Rows with an unparseable date or a missing or non-finite close are
    /// dropped.
    #[must_use]
    pub fn price_series(&self) -> PriceSeries {
        let mut series = PriceSeries::new();
        let mut dropped = 0usize;
        for row in &self.prices {
            let inserted = match (row.parsed_date(), row.close) {
                (Some(date), Some(close)) => series.insert(date, close),
                _ => false,
            };
            if !inserted {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::warn!(symbol = %self.symbol, dropped, "dropped invalid price rows");
        }
        series
    }

    /// All scalar statistics.
    #[must_use]
    pub fn stats(&self) -> InstrumentStats {
        InstrumentStats {
            short_name: self.short_name(),
            long_name: self.long_name(),
            pe: self.pe(),
            ps: self.ps(),
            dividend_yield: self.dividend_yield(),
            volume: self.average_volume(),
            expense_ratio: self.expense_ratio(),
        }
    }

    /// Assemble the screen inputs for this fund.
    #[must_use]
    pub fn source(&self, codes: &SectorCodes, lookup: &CountryLookup) -> InstrumentSource {
        InstrumentSource {
            symbol: self.symbol.clone(),
            stats: self.stats(),
            sectors: self.sector_exposure(codes),
            countries: self.country_exposure(lookup),
            prices: self.price_series(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use prisma_traits::Date;
    use serde_json::json;

    fn lit() -> FundData {
        FundData {
            symbol: "LIT".to_string(),
            info: Some(
                serde_json::from_value(json!({
                    "symbol": "LIT",
                    "name": "Global X Lithium & Battery Tech ETF",
                    "expenseRatio": 0.75,
                    "avgVolume": 250000
                }))
                .unwrap(),
            ),
            quote: Some(
                serde_json::from_value(json!({
                    "symbol": "LIT",
                    "name": "Global X Lithium",
                    "pe": null,
                    "avgVolume": 300000
                }))
                .unwrap(),
            ),
            ratios: Some(
                serde_json::from_value(json!({
                    "priceToEarningsRatioTTM": 21.5,
                    "priceToSalesRatioTTM": 1.8,
                    "dividendYieldTTM": 0.009
                }))
                .unwrap(),
            ),
            sectors: serde_json::from_value(json!([
                {"sector": "Basic Materials", "weightPercentage": 45.0},
                {"sector": "Industrials", "weightPercentage": "30%"},
                {"sector": "Technology", "weightPercentage": 0.0}
            ]))
            .unwrap(),
            countries: serde_json::from_value(json!([
                {"country": "China", "weightPercentage": "40.5%"},
                {"country": "United States", "weightPercentage": "25%"},
                {"country": "Atlantis", "weightPercentage": "5%"}
            ]))
            .unwrap(),
            prices: serde_json::from_value(json!([
                {"date": "2025-06-13", "close": 40.0},
                {"date": "2025-06-12", "close": 39.5},
                {"date": "bad", "close": 39.0},
                {"date": "2025-06-11", "close": null}
            ]))
            .unwrap(),
        }
    }

    #[test]
    fn test_scalar_extraction() {
        let data = lit();
        assert_eq!(data.short_name().as_deref(), Some("Global X Lithium"));
        assert_eq!(
            data.long_name().as_deref(),
            Some("Global X Lithium & Battery Tech ETF")
        );
        // falls back to the trailing ratio when the quote has no P/E
        assert_eq!(data.pe(), Some(21.5));
        assert_eq!(data.ps(), Some(1.8));
        assert_eq!(data.dividend_yield(), Some(0.009));
        assert_eq!(data.average_volume(), Some(300_000.0));
        assert_relative_eq!(data.expense_ratio().unwrap(), 0.0075);
    }

    #[test]
    fn test_exposure_extraction() {
        let data = lit();

        let sectors = data.sector_exposure(&SectorCodes::new());
        assert_relative_eq!(sectors.get("M").unwrap(), 0.45);
        assert_relative_eq!(sectors.get("I").unwrap(), 0.30);
        assert!(!sectors.contains("T"));

        let countries = data.country_exposure(&CountryLookup::new());
        assert_relative_eq!(countries.get("CN").unwrap(), 0.405);
        assert_relative_eq!(countries.get("US").unwrap(), 0.25);
        assert_eq!(countries.len(), 2);
    }

    #[test]
    fn test_price_series_drops_invalid_rows() {
        let prices = lit().price_series();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.get(Date::from_ymd_opt(2025, 6, 13).unwrap()), Some(40.0));
        assert_eq!(prices.first_date(), Date::from_ymd_opt(2025, 6, 12));
    }

    #[test]
    fn test_empty_fund() {
        let data = FundData {
            symbol: "NONE".to_string(),
            ..FundData::default()
        };
        assert!(data.is_empty());

        let stats = data.stats();
        assert_eq!(stats, InstrumentStats::default());

        let source = data.source(&SectorCodes::new(), &CountryLookup::new());
        assert_eq!(source.symbol, "NONE");
        assert!(source.prices.is_empty());
        assert!(source.countries.is_empty());
    }
}
