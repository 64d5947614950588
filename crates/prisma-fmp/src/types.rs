//! Data types for FMP API responses.
//!
//! Every numeric field is optional: FMP omits fields, returns `null`, or
//! returns an empty string for funds it has no data on.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// ETF profile from `etf/info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtfInfo {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Full fund name.
    #[serde(default)]
    pub name: Option<String>,
    /// Total expense ratio in percent (0.75 for 0.75%).
    #[serde(default, deserialize_with = "percent")]
    pub expense_ratio: Option<f64>,
    /// Average daily volume.
    #[serde(default, deserialize_with = "number")]
    pub avg_volume: Option<f64>,
    /// Assets under management.
    #[serde(default, deserialize_with = "number")]
    pub assets_under_management: Option<f64>,
    /// Number of holdings.
    #[serde(default, deserialize_with = "number")]
    pub holdings_count: Option<f64>,
}

/// Quote snapshot from `quote`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Short display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current price.
    #[serde(default, deserialize_with = "number")]
    pub price: Option<f64>,
    /// Average volume.
    #[serde(default, deserialize_with = "number")]
    pub avg_volume: Option<f64>,
    /// P/E ratio.
    #[serde(default, deserialize_with = "number")]
    pub pe: Option<f64>,
}

/// Trailing twelve-month ratios from `ratios-ttm`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatiosTtm {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Price-to-earnings ratio.
    #[serde(
        rename = "priceToEarningsRatioTTM",
        default,
        deserialize_with = "number"
    )]
    pub price_to_earnings: Option<f64>,
    /// Price-to-sales ratio.
    #[serde(rename = "priceToSalesRatioTTM", default, deserialize_with = "number")]
    pub price_to_sales: Option<f64>,
    /// Dividend yield as a fraction.
    #[serde(rename = "dividendYieldTTM", default, deserialize_with = "number")]
    pub dividend_yield: Option<f64>,
}

/// One row of `etf/sector-weightings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorWeighting {
    /// Sector name as FMP spells it ("Financial Services").
    pub sector: String,
    /// Weight in percent.
    #[serde(default, deserialize_with = "percent")]
    pub weight_percentage: Option<f64>,
}

/// One row of `etf/country-weightings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryWeighting {
    /// Country name ("United States").
    pub country: String,
    /// Weight in percent; FMP sends `"62.5%"` strings here.
    #[serde(default, deserialize_with = "percent")]
    pub weight_percentage: Option<f64>,
}

/// One day from `historical-price-eod/full`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date, `YYYY-MM-DD`.
    pub date: String,
    /// Close price.
    #[serde(default, deserialize_with = "number")]
    pub close: Option<f64>,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(f64),
    Text(String),
}

/// A number that may arrive as a JSON number, a numeric string, `null` or `""`.
fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Like [`number`], also accepting a trailing `%`. The value stays in percent.
fn percent<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().trim_end_matches('%').trim().parse().ok(),
        None => None,
    })
}
