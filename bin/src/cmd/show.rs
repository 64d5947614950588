//! Show command implementation.

use std::fmt::Write as _;

use anyhow::Result;
use prisma_assets::{CountryLookup, ExposureOverrides, Instrument, InstrumentFactory};
use prisma_fmp::FmpClient;
use prisma_traits::Horizon;

use crate::cmd::{banner, fmt_opt};
use crate::data;

/// Fetch one ETF and print its statistics, exposure and performance.
pub(crate) async fn show_instrument(
    symbol: &str,
    date: Option<&str>,
    countries: &[String],
    sectors: &[String],
) -> Result<()> {
    let today = data::evaluation_date(date)?;
    let overrides = ExposureOverrides::from_names(
        countries.iter().map(|c| (c.clone(), 1.0)),
        sectors.iter().map(|s| (s.clone(), 1.0)),
        &CountryLookup::new(),
    )?;

    let client = FmpClient::from_env()?;
    let factory = InstrumentFactory::with_defaults(today);
    let instrument = data::load_instrument(&client, &factory, symbol, &overrides).await?;

    banner(symbol);
    print!("{}", describe(&instrument)?);
    Ok(())
}

fn describe(instrument: &Instrument) -> Result<String> {
    let stats = instrument.stats();
    let mut out = String::new();

    writeln!(out, "Name:       {}", stats.display_name().unwrap_or("-"))?;
    writeln!(out, "Countries:  {}", instrument.top_countries())?;
    writeln!(out, "Sectors:    {}", instrument.top_sectors())?;
    writeln!(out, "TER:        {}", fmt_opt(stats.expense_ratio.map(|t| t * 100.0), 2))?;
    writeln!(out, "P/E:        {}", fmt_opt(stats.pe, 1))?;
    writeln!(out, "P/S:        {}", fmt_opt(stats.ps, 2))?;
    writeln!(out, "Yield:      {}", fmt_opt(stats.dividend_yield, 4))?;
    writeln!(out, "Volume:     {}", fmt_opt(stats.volume, 0))?;
    writeln!(out)?;

    writeln!(out, "Performance")?;
    writeln!(out, "{}", "-".repeat(24))?;
    for horizon in Horizon::ALL {
        let suffix = if horizon.is_annualized() { " (annualized)" } else { "" };
        writeln!(
            out,
            "  {:<4} {:>10}{suffix}",
            horizon.label(),
            fmt_opt(instrument.change(horizon), 4)
        )?;
    }
    Ok(out)
}
