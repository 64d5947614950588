//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    fund::FundData,
    types::{CountryWeighting, EtfInfo, HistoricalPrice, Quote, RatiosTtm, SectorWeighting},
};
use prisma_traits::Date;
use reqwest::Client;
use std::env;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        if text.contains("\"Error Message\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// First element of a list endpoint.
    async fn first<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        symbol: &str,
    ) -> Result<T> {
        let rows: Vec<T> = self.get(endpoint).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get the fund profile for an ETF.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the symbol is unknown.
    pub async fn etf_info(&self, symbol: &str) -> Result<EtfInfo> {
        let endpoint = format!("etf/info?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get a real-time quote.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the symbol is unknown.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get trailing twelve-month ratios.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the symbol is unknown.
    pub async fn ratios_ttm(&self, symbol: &str) -> Result<RatiosTtm> {
        let endpoint = format!("ratios-ttm?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get an ETF's sector weightings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sector_weightings(&self, symbol: &str) -> Result<Vec<SectorWeighting>> {
        let endpoint = format!("etf/sector-weightings?symbol={}", symbol.to_uppercase());
        self.get(&endpoint).await
    }

    /// Get an ETF's country weightings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn country_weightings(&self, symbol: &str) -> Result<Vec<CountryWeighting>> {
        let endpoint = format!("etf/country-weightings?symbol={}", symbol.to_uppercase());
        self.get(&endpoint).await
    }

    /// Get historical daily prices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut params = String::new();
        if let Some(f) = from {
            params.push_str(&format!("&from={}", f.format("%Y-%m-%d")));
        }
        if let Some(t) = to {
            params.push_str(&format!("&to={}", t.format("%Y-%m-%d")));
        }

        let endpoint = format!(
            "historical-price-eod/full?symbol={}{}",
            symbol.to_uppercase(),
            params
        );
        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Get everything the screener needs for one ETF.
    ///
    /// The six endpoints are fetched concurrently. A failing endpoint is
    /// logged and leaves its part of [`FundData`] empty.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::RateLimitExceeded`] if any endpoint hit the rate
    /// limit, or [`FmpError::NoData`] if every endpoint failed or was empty.
    pub async fn fund_data(
        &self,
        symbol: &str,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<FundData> {
        let (info, quote, ratios, sectors, countries, prices) = tokio::join!(
            self.etf_info(symbol),
            self.quote(symbol),
            self.ratios_ttm(symbol),
            self.sector_weightings(symbol),
            self.country_weightings(symbol),
            self.historical_prices(symbol, from, to),
        );

        let data = FundData {
            symbol: symbol.to_uppercase(),
            info: settle(symbol, "etf/info", info)?,
            quote: settle(symbol, "quote", quote)?,
            ratios: settle(symbol, "ratios-ttm", ratios)?,
            sectors: settle(symbol, "etf/sector-weightings", sectors)?.unwrap_or_default(),
            countries: settle(symbol, "etf/country-weightings", countries)?.unwrap_or_default(),
            prices: settle(symbol, "historical-price-eod", prices)?.unwrap_or_default(),
        };

        if data.is_empty() {
            return Err(FmpError::NoData(symbol.to_string()));
        }
        tracing::debug!(
            symbol = %data.symbol,
            prices = data.prices.len(),
            sectors = data.sectors.len(),
            countries = data.countries.len(),
            "fetched fund data"
        );
        Ok(data)
    }
}

/// Keep a successful response, log and drop a failed one. Rate limiting is
/// never swallowed.
fn settle<T>(symbol: &str, endpoint: &str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(FmpError::RateLimitExceeded) => Err(FmpError::RateLimitExceeded),
        Err(e) => {
            tracing::warn!(%symbol, endpoint, error = %e, "endpoint failed");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url("etf/info?symbol=LIT"),
            "https://financialmodelingprep.com/stable/etf/info?symbol=LIT&apikey=test_key"
        );
        assert_eq!(
            client.url("search"),
            "https://financialmodelingprep.com/stable/search?apikey=test_key"
        );
    }

    #[test]
    fn test_settle() {
        let ok: Result<u32> = Ok(3);
        assert_eq!(settle("LIT", "quote", ok).unwrap(), Some(3));

        let failed: Result<u32> = Err(FmpError::SymbolNotFound("LIT".to_string()));
        assert_eq!(settle("LIT", "quote", failed).unwrap(), None);

        let limited: Result<u32> = Err(FmpError::RateLimitExceeded);
        assert!(matches!(
            settle("LIT", "quote", limited),
            Err(FmpError::RateLimitExceeded)
        ));
    }
}
