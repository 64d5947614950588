//! Data loading utilities for the prisma CLI.

use std::future::Future;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use prisma_assets::{
    CountryLookup, ExposureOverrides, Instrument, InstrumentFactory, Portfolio, SectorCodes,
};
use prisma_fmp::FmpClient;

use crate::config::ScreenConfig;

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {date_str}"))
}

/// The evaluation date: the given one, or today.
pub(crate) fn evaluation_date(date: Option<&str>) -> Result<NaiveDate> {
    date.map_or_else(|| Ok(Utc::now().date_naive()), parse_date)
}

/// Fetch one ETF and build it as of the factory's date.
pub(crate) async fn load_instrument(
    client: &FmpClient,
    factory: &InstrumentFactory,
    symbol: &str,
    overrides: &ExposureOverrides,
) -> Result<Instrument> {
    let data = client
        .fund_data(symbol, factory.history_start(), Some(factory.today()))
        .await
        .with_context(|| format!("failed to fetch {symbol}"))?;

    let source = data.source(&SectorCodes::new(), &CountryLookup::new());
    tracing::info!(%symbol, prices = source.prices.len(), "loaded");
    Ok(factory.build(source, overrides))
}

/// Load each symbol in order and build a portfolio from those that loaded.
///
/// A symbol that fails is logged and skipped. Fails with
/// [`PrismaError::EmptyPortfolio`](prisma_traits::PrismaError::EmptyPortfolio)
/// when none loaded.
pub(crate) async fn collect_portfolio<'a, S, F, Fut>(symbols: S, mut load: F) -> Result<Portfolio>
where
    S: IntoIterator<Item = &'a str>,
    F: FnMut(usize, &'a str) -> Fut,
    Fut: Future<Output = Result<Instrument>>,
{
    let mut instruments = Vec::new();
    let mut skipped = 0usize;
    for (index, symbol) in symbols.into_iter().enumerate() {
        match load(index, symbol).await {
            Ok(instrument) => instruments.push(instrument),
            Err(e) => {
                skipped += 1;
                tracing::warn!(%symbol, error = %format!("{e:#}"), "skipping instrument");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(loaded = instruments.len(), skipped, "some instruments were skipped");
    }
    Ok(Portfolio::new(instruments)?)
}

/// Resolve every override, then fetch every instrument in order.
///
/// Overrides and settings are validated before the first request.
pub(crate) async fn load_portfolio(config: &ScreenConfig, today: NaiveDate) -> Result<Portfolio> {
    let lookup = CountryLookup::new();
    let overrides = config
        .instruments
        .iter()
        .map(|i| i.overrides(&lookup))
        .collect::<Result<Vec<_>>>()?;
    let factory = InstrumentFactory::new(today, config.smoothing.clone(), config.exposure.clone())?;
    let client = FmpClient::from_env()?;

    let (client, factory, overrides) = (&client, &factory, &overrides);
    collect_portfolio(
        config.instruments.iter().map(|i| i.symbol.as_str()),
        move |index, symbol| load_instrument(client, factory, symbol, &overrides[index]),
    )
    .await
}
