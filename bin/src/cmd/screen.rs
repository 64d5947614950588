//! Screen command implementation.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use prisma_assets::Portfolio;
use prisma_rules::RuleContext;
use prisma_screen::{ScoreTable, Screener};
use serde_json::{Map, Value, json};

use crate::cmd::{banner, fmt_opt};
use crate::config::ScreenConfig;
use crate::data;

/// Load a screen configuration, fetch its instruments and print the scores.
pub(crate) async fn run_screen(path: &Path, date: Option<&str>, format: &str) -> Result<()> {
    if !matches!(format, "text" | "json") {
        bail!("unknown output format: {format} (expected text or json)");
    }

    let config = ScreenConfig::load(path)?;
    let today = data::evaluation_date(date)?;

    // Rules are validated before any data is fetched.
    let screener = Screener::build(&config.rules, &RuleContext::default())?;
    tracing::info!(
        instruments = config.instruments.len(),
        rules = ?screener.rule_names(),
        %today,
        "screening"
    );

    let portfolio = data::load_portfolio(&config, today).await?;
    let table = screener.run(&portfolio)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&render_json(&portfolio, &table)?)?);
    } else {
        banner("ETF Screen");
        print!("{}", render_text(&portfolio, &table, today)?);
    }
    Ok(())
}

/// Ranked rows: symbol, row index in the table, total.
fn ranked_rows(table: &ScoreTable) -> Result<Vec<(String, usize, Option<f64>)>> {
    let index: HashMap<String, usize> = table
        .symbols()?
        .into_iter()
        .enumerate()
        .map(|(i, s)| (s, i))
        .collect();

    Ok(table
        .ranked()?
        .into_iter()
        .map(|(symbol, total)| {
            let row = index.get(&symbol).copied().unwrap_or_default();
            (symbol, row, total)
        })
        .collect())
}

/// Ranked score table as aligned text.
pub(crate) fn render_text(
    portfolio: &Portfolio,
    table: &ScoreTable,
    today: NaiveDate,
) -> Result<String> {
    let rules = table.rule_columns();
    let columns = rules
        .iter()
        .map(|name| table.column(name))
        .collect::<prisma_traits::Result<Vec<_>>>()?;

    let mut out = String::new();
    writeln!(out, "Scores as of {today}\n")?;

    write!(out, "{:<8} {:<16} {:<16}", "Symbol", "Countries", "Sectors")?;
    for name in rules {
        write!(out, " {name:>12}")?;
    }
    writeln!(out, " {:>12}", prisma_screen::TOTAL_SCORE)?;
    writeln!(out, "{}", "─".repeat(42 + 13 * (rules.len() + 1)))?;

    for (symbol, row, total) in ranked_rows(table)? {
        let (countries, sectors) = portfolio
            .get(&symbol)
            .map_or(("", ""), |i| (i.top_countries(), i.top_sectors()));
        write!(out, "{symbol:<8} {countries:<16} {sectors:<16}")?;
        for column in &columns {
            write!(out, " {:>12}", fmt_opt(column[row], 3))?;
        }
        writeln!(out, " {:>12}", fmt_opt(total, 3))?;
    }
    Ok(out)
}

/// Ranked score table as a JSON array.
pub(crate) fn render_json(portfolio: &Portfolio, table: &ScoreTable) -> Result<Value> {
    let rules = table.rule_columns();
    let columns = rules
        .iter()
        .map(|name| table.column(name))
        .collect::<prisma_traits::Result<Vec<_>>>()?;

    let rows = ranked_rows(table)?
        .into_iter()
        .map(|(symbol, row, total)| {
            let scores: Map<String, Value> = rules
                .iter()
                .zip(&columns)
                .map(|(name, column)| (name.clone(), json!(column[row])))
                .collect();
            let instrument = portfolio.get(&symbol);
            json!({
                "symbol": symbol,
                "name": instrument.and_then(|i| i.stats().display_name()),
                "countries": instrument.map(|i| i.top_countries()),
                "sectors": instrument.map(|i| i.top_sectors()),
                "scores": scores,
                "total": total,
            })
        })
        .collect();
    Ok(Value::Array(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use prisma_assets::{ExposureOverrides, InstrumentFactory, InstrumentSource};
    use prisma_screen::RuleConfig;
    use prisma_traits::{ExposureMap, InstrumentStats};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 13).unwrap()
    }

    fn fixture() -> (Portfolio, ScoreTable) {
        let factory = InstrumentFactory::with_defaults(today());
        let build = |symbol: &str, pe: f64, country: &str| {
            let mut source = InstrumentSource::new(symbol);
            source.stats = InstrumentStats {
                short_name: Some(format!("{symbol} ETF")),
                pe: Some(pe),
                ps: Some(1.0),
                ..InstrumentStats::default()
            };
            source.countries = ExposureMap::uniform([country]);
            factory.build(source, &ExposureOverrides::default())
        };
        let portfolio =
            Portfolio::new(vec![build("FAIR", 20.0, "US"), build("CHEAP", 10.0, "CN")]).unwrap();
        let screener =
            Screener::build(&[RuleConfig::named("PePsRule")], &RuleContext::default()).unwrap();
        let table = screener.run(&portfolio).unwrap();
        (portfolio, table)
    }

    #[test]
    fn test_render_text_is_ranked() {
        let (portfolio, table) = fixture();
        let text = render_text(&portfolio, &table, today()).unwrap();

        assert!(text.starts_with("Scores as of 2025-06-13"));
        assert!(text.contains("PePsScore"));
        assert!(text.contains("TotalScore"));
        let cheap = text.find("CHEAP").unwrap();
        let fair = text.find("FAIR").unwrap();
        assert!(cheap < fair);
        assert!(text.contains("0.500"));
    }

    #[test]
    fn test_render_json() {
        let (portfolio, table) = fixture();
        let value = render_json(&portfolio, &table).unwrap();
        let rows = value.as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["symbol"], "CHEAP");
        assert_eq!(rows[0]["name"], "CHEAP ETF");
        assert_eq!(rows[0]["countries"], "CN");
        assert_relative_eq!(rows[0]["scores"]["PePsScore"].as_f64().unwrap(), 0.5);
        assert_relative_eq!(rows[1]["total"].as_f64().unwrap(), 0.25, epsilon = 1e-12);
    }
}
