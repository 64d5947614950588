//! The screener: a built rule pipeline.

use std::fmt;

use prisma_assets::Portfolio;
use prisma_rules::{RuleContext, RuleKind};
use prisma_traits::{PortfolioView, PrismaError, Result, Rule};

use crate::config::RuleConfig;
use crate::table::{ScoreTable, TOTAL_SCORE};

/// An ordered, validated set of rules.
///
/// Building resolves every configuration entry against the rule registry, so
/// a `Screener` that exists can only fail at run time on missing data
/// columns, never on configuration.
///
/// # Example
///
/// ```ignore
/// use prisma_screen::{RuleConfig, Screener};
/// use prisma_rules::RuleContext;
///
/// let configs = vec![RuleConfig::named("PePsRule"), RuleConfig::named("TerRule")];
/// let screener = Screener::build(&configs, &RuleContext::default())?;
/// let table = screener.run(&portfolio)?;
/// for (symbol, total) in table.ranked()? {
///     println!("{symbol}: {total:?}");
/// }
/// ```
pub struct Screener {
    rules: Vec<Box<dyn Rule>>,
}

impl Screener {
    /// Build a screener from configuration entries.
    ///
    /// # Errors
    ///
    /// Fails before any rule runs if the list is empty, an entry names an
    /// unregistered rule ([`PrismaError::UnknownRule`]), an entry is
    /// malformed, or two entries would produce the same score column.
    pub fn build(configs: &[RuleConfig], context: &RuleContext) -> Result<Self> {
        if configs.is_empty() {
            return Err(PrismaError::Configuration("no rules configured".to_string()));
        }

        let mut rules: Vec<Box<dyn Rule>> = Vec::with_capacity(configs.len());
        for config in configs {
            let (name, params) = config.entry()?;
            let kind = RuleKind::from_name(name)
                .ok_or_else(|| PrismaError::UnknownRule(name.to_string()))?;
            let rule = kind.build(params, context)?;

            if rule.name() == TOTAL_SCORE || rules.iter().any(|r| r.name() == rule.name()) {
                return Err(PrismaError::Configuration(format!(
                    "{} is configured more than once",
                    kind.info().name
                )));
            }
            rules.push(rule);
        }

        tracing::info!(rules = rules.len(), "screener built");
        Ok(Self { rules })
    }

    /// Screener from already constructed rules.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] if `rules` is empty or two
    /// rules share a column name.
    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Result<Self> {
        if rules.is_empty() {
            return Err(PrismaError::Configuration("no rules configured".to_string()));
        }
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.name() == rule.name()) {
                return Err(PrismaError::Configuration(format!(
                    "duplicate score column: {}",
                    rule.name()
                )));
            }
        }
        Ok(Self { rules })
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the screener has no rules; never true once built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Score column names in execution order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Score every instrument of `portfolio`.
    ///
    /// # Errors
    ///
    /// Returns an error if the portfolio view cannot be built or a rule's
    /// input column is missing.
    pub fn run(&self, portfolio: &Portfolio) -> Result<ScoreTable> {
        self.score(&portfolio.view()?)
    }

    /// Score every row of a prepared view.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::MissingColumn`] if a rule's input column is
    /// absent from the view.
    pub fn score(&self, view: &PortfolioView) -> Result<ScoreTable> {
        let mut columns = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if let Some(missing) = rule
                .required_columns()
                .iter()
                .find(|c| !view.has_column(c))
            {
                return Err(PrismaError::MissingColumn((*missing).to_string()));
            }

            let column = rule.score(view)?;
            let undefined = column.scores.iter().filter(|s| s.is_none()).count();
            tracing::debug!(rule = rule.name(), undefined, "rule evaluated");
            columns.push(column);
        }

        ScoreTable::new(view.symbols()?, columns)
    }
}

impl fmt::Debug for Screener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screener")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;
    use prisma_assets::{
        ExposureOverrides, ExposureSummaryConfig, Instrument, InstrumentFactory, InstrumentSource,
        SmoothingConfig,
    };
    use prisma_traits::{Date, ExposureMap, Horizon, InstrumentStats, PriceSeries};
    use serde_json::json;

    fn instrument(symbol: &str, pe: f64, ps: f64, country: &str) -> Instrument {
        let factory = InstrumentFactory::with_defaults(Date::from_ymd_opt(2025, 6, 13).unwrap());
        let mut source = InstrumentSource::new(symbol);
        source.stats = InstrumentStats {
            pe: Some(pe),
            ps: Some(ps),
            expense_ratio: Some(0.005),
            ..InstrumentStats::default()
        };
        source.countries = ExposureMap::uniform([country]);
        factory.build(source, &ExposureOverrides::default())
    }

    fn portfolio() -> Portfolio {
        Portfolio::new(vec![
            instrument("CHEAP", 10.0, 1.0, "RU"),
            instrument("FAIR", 20.0, 1.6, "US"),
        ])
        .unwrap()
    }

    fn totals(table: &ScoreTable) -> Vec<f64> {
        table
            .total_scores()
            .unwrap()
            .into_iter()
            .map(|t| t.unwrap())
            .collect()
    }

    #[test]
    fn test_valuation_only_ranking() {
        let screener =
            Screener::build(&[RuleConfig::named("PePsRule")], &RuleContext::default()).unwrap();
        let table = screener.run(&portfolio()).unwrap();

        let totals = totals(&table);
        assert_relative_eq!(totals[0], 0.5);
        assert_relative_eq!(totals[1], 0.1, epsilon = 1e-12);
        assert_eq!(table.ranked().unwrap()[0].0, "CHEAP");
    }

    #[test]
    fn test_country_rule_flips_ranking() {
        let configs = vec![
            RuleConfig::named("PePsRule"),
            RuleConfig::with_params(
                "CountryRule",
                json!({"strong_growing": ["united states"], "strong_decline": ["russia"]}),
            ),
        ];
        let screener = Screener::build(&configs, &RuleContext::default()).unwrap();
        let table = screener.run(&portfolio()).unwrap();

        assert_eq!(table.rule_columns(), ["PePsScore", "CountryScore"]);
        let totals = totals(&table);
        assert_relative_eq!(totals[0], -0.5);
        assert_relative_eq!(totals[1], 1.1, epsilon = 1e-12);

        let ranked = table.ranked().unwrap();
        assert_eq!(ranked[0].0, "FAIR");
        assert_eq!(ranked[1].0, "CHEAP");
    }

    #[test]
    fn test_weights_scale_columns() {
        let configs = vec![
            RuleConfig::with_params("TerRule", json!({"weight": 2.0})),
            RuleConfig::named("pe_ps"),
        ];
        let screener = Screener::build(&configs, &RuleContext::default()).unwrap();
        let table = screener.run(&portfolio()).unwrap();

        let ter = table.column("TerScore").unwrap();
        assert_relative_eq!(ter[0].unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(totals(&table)[0], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_rule_rejected_at_build() {
        let configs = vec![RuleConfig::named("PePsRule"), RuleConfig::named("MagicRule")];
        let result = Screener::build(&configs, &RuleContext::default());
        assert!(matches!(result, Err(PrismaError::UnknownRule(name)) if name == "MagicRule"));
    }

    #[test]
    fn test_build_errors() {
        let context = RuleContext::default();
        assert!(Screener::build(&[], &context).is_err());

        let duplicate = vec![RuleConfig::named("TerRule"), RuleConfig::named("ter")];
        assert!(matches!(
            Screener::build(&duplicate, &context),
            Err(PrismaError::Configuration(_))
        ));

        let bad_country = vec![RuleConfig::with_params(
            "CountryRule",
            json!({"strong_growing": ["atlantis"]}),
        )];
        assert!(matches!(
            Screener::build(&bad_country, &context),
            Err(PrismaError::UnknownCountry(_))
        ));
    }

    #[test]
    fn test_momentum_and_rebound_over_view() {
        let stats = df! {
            "symbol" => &["GROW", "DIP"],
            "1M" => &[Some(0.02), Some(0.01)],
            "3M" => &[Some(0.06), Some(-0.06)],
            "1Y" => &[Some(0.30), Some(0.15)],
            "5Y" => &[Some(0.20), Some(0.25)],
        }
        .unwrap();
        let view = PortfolioView::new(
            stats,
            vec![ExposureMap::new(); 2],
            vec![ExposureMap::new(); 2],
        )
        .unwrap();

        let configs: Vec<RuleConfig> =
            serde_json::from_value(json!(["LtgRule", "StgRule", "DeclineRule"])).unwrap();
        let screener = Screener::build(&configs, &RuleContext::default()).unwrap();
        let table = screener.score(&view).unwrap();

        // GROW: 0.2/0.25 + 1 + 0; DIP: 1 + 0.5 + 1
        let totals = totals(&table);
        assert_relative_eq!(totals[0], 1.8, epsilon = 1e-12);
        assert_relative_eq!(totals[1], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_column_at_run() {
        let stats = df! { "symbol" => &["A"] }.unwrap();
        let view =
            PortfolioView::new(stats, vec![ExposureMap::new()], vec![ExposureMap::new()]).unwrap();
        let screener =
            Screener::build(&[RuleConfig::named("TerRule")], &RuleContext::default()).unwrap();
        assert!(matches!(
            screener.score(&view),
            Err(PrismaError::MissingColumn(c)) if c == "TER"
        ));
    }

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    /// Daily closes holding one level around each horizon's reference date:
    /// `levels` is `[5Y ago, 1Y ago, 3M ago, 1M ago, now]`.
    fn stepped_prices(start: Date, today: Date, levels: [f64; 5]) -> PriceSeries {
        let breaks = [d(2022, 1, 1), d(2024, 12, 1), d(2025, 4, 15), d(2025, 6, 1)];
        start
            .iter_days()
            .take_while(|day| *day <= today)
            .map(|day| {
                let level = breaks.iter().take_while(|b| day >= **b).count();
                (day, levels[level])
            })
            .collect()
    }

    fn fund(
        factory: &InstrumentFactory,
        symbol: &str,
        (pe, ps, ter): (f64, f64, f64),
        levels: [f64; 5],
        sectors: &[(&str, f64)],
        countries: &[(&str, f64)],
    ) -> Instrument {
        let mut source = InstrumentSource::new(symbol);
        source.stats = InstrumentStats {
            pe: Some(pe),
            ps: Some(ps),
            expense_ratio: Some(ter),
            ..InstrumentStats::default()
        };
        source.sectors = sectors.iter().copied().collect();
        source.countries = countries.iter().copied().collect();
        source.prices = stepped_prices(factory.history_start().unwrap(), factory.today(), levels);
        factory.build(source, &ExposureOverrides::default())
    }

    #[test]
    fn test_full_screen_over_price_history() {
        let today = d(2025, 6, 13);
        // Narrow kernels keep every endpoint inside one price level.
        let smoothing = SmoothingConfig {
            std_1m: 1.0,
            std_3m: 1.0,
            std_1y: 1.0,
            std_5y: 1.0,
            ..SmoothingConfig::default()
        };
        let factory =
            InstrumentFactory::new(today, smoothing, ExposureSummaryConfig::default()).unwrap();

        let grow = fund(
            &factory,
            "GROW",
            (30.0, 3.0, 0.002),
            [50.0, 80.0, 90.0, 96.0, 100.0],
            &[("T", 0.6), ("F", 0.4)],
            &[("US", 0.7), ("CN", 0.3)],
        );
        let dip = fund(
            &factory,
            "DIP",
            (12.0, 1.2, 0.0075),
            [40.0, 100.0, 100.0, 88.0, 90.0],
            &[("E", 0.5), ("M", 0.5)],
            &[("CN", 1.0)],
        );
        let flat = fund(
            &factory,
            "FLAT",
            (20.0, 2.0, 0.01),
            [100.0; 5],
            &[("F", 1.0)],
            &[("DE", 1.0)],
        );

        assert_relative_eq!(grow.change(Horizon::FiveYears).unwrap(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(grow.change(Horizon::OneYear).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(dip.change(Horizon::ThreeMonths).unwrap(), -0.1, epsilon = 1e-12);
        assert_relative_eq!(
            dip.change(Horizon::OneMonth).unwrap(),
            90.0 / 88.0 - 1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(flat.change(Horizon::FiveYears).unwrap(), 0.0, epsilon = 1e-12);

        let portfolio = Portfolio::new(vec![flat, dip, grow]).unwrap();
        let configs: Vec<RuleConfig> = serde_json::from_value(json!([
            "PePsRule",
            "TerRule",
            {"SectorRule": {"strong_growing": ["T"], "strong_decline": ["E"]}},
            {"CountryRule": {"strong_growing": ["united states"], "fair_decline": ["china"]}},
            "LtgRule",
            "StgRule",
            "DeclineRule"
        ]))
        .unwrap();
        let screener = Screener::build(&configs, &RuleContext::default()).unwrap();
        let table = screener.run(&portfolio).unwrap();

        assert_eq!(
            table.rule_columns(),
            [
                "PePsScore",
                "TerScore",
                "SectorScore",
                "CountryScore",
                "LtgScore",
                "StgScore",
                "DeclineScore"
            ]
        );
        assert_eq!(table.symbols().unwrap(), ["FLAT", "DIP", "GROW"]);

        // rows: FLAT, DIP, GROW
        let expected: [(&str, [f64; 3]); 8] = [
            ("PePsScore", [0.0, 0.4, -0.5]),
            ("TerScore", [0.0, 0.25, 0.8]),
            ("SectorScore", [0.0, -0.5, 0.6]),
            ("CountryScore", [0.0, -0.5, 0.55]),
            ("LtgScore", [0.0, 1.0, 0.8]),
            ("StgScore", [0.0, -0.4, 1.0]),
            ("DeclineScore", [0.0, 1.0, 0.0]),
            (TOTAL_SCORE, [0.0, 1.25, 3.25]),
        ];
        for (name, values) in expected {
            let column = table.column(name).unwrap();
            for (row, value) in values.into_iter().enumerate() {
                assert_relative_eq!(column[row].unwrap(), value, epsilon = 1e-9);
            }
        }

        let ranked: Vec<_> = table.ranked().unwrap().into_iter().map(|(s, _)| s).collect();
        assert_eq!(ranked, ["GROW", "DIP", "FLAT"]);
    }
}
