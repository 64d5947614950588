//! Screen configuration file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use prisma_assets::{CountryLookup, ExposureOverrides, ExposureSummaryConfig, SmoothingConfig};
use prisma_screen::RuleConfig;
use prisma_traits::ExposureMap;
use serde::Deserialize;

/// A whole screen: which ETFs, which rules, and how to build instruments.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScreenConfig {
    pub(crate) instruments: Vec<InstrumentConfig>,
    pub(crate) rules: Vec<RuleConfig>,
    #[serde(default)]
    pub(crate) smoothing: SmoothingConfig,
    #[serde(default)]
    pub(crate) exposure: ExposureSummaryConfig,
}

/// One ETF and its exposure overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InstrumentConfig {
    pub(crate) symbol: String,
    #[serde(default)]
    pub(crate) countries: Weights,
    #[serde(default)]
    pub(crate) sectors: Weights,
}

/// Override weights: a plain list means 1.0 per entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Weights {
    List(Vec<String>),
    Map(BTreeMap<String, f64>),
}

impl Default for Weights {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Weights {
    pub(crate) fn pairs(&self) -> Vec<(String, f64)> {
        match self {
            Self::List(names) => names.iter().map(|n| (n.clone(), 1.0)).collect(),
            Self::Map(weights) => weights.iter().map(|(n, w)| (n.clone(), *w)).collect(),
        }
    }
}

impl InstrumentConfig {
    /// Resolve the configured overrides; an unknown country is fatal.
    pub(crate) fn overrides(&self, lookup: &CountryLookup) -> Result<ExposureOverrides> {
        ExposureOverrides::from_names(self.countries.pairs(), self.sectors.pairs(), lookup)
            .with_context(|| format!("invalid overrides for {}", self.symbol))
    }
}

impl ScreenConfig {
    /// Parse a configuration from JSON text.
    ///
    /// Smoothing settings and override weights are checked here, so a bad
    /// value fails before any data is fetched.
    pub(crate) fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid screen configuration")?;
        if config.instruments.is_empty() {
            bail!("screen configuration lists no instruments");
        }
        config
            .smoothing
            .validate()
            .context("invalid screen configuration")?;
        for instrument in &config.instruments {
            ExposureMap::try_from_weights(instrument.countries.pairs())
                .and_then(|_| ExposureMap::try_from_weights(instrument.sectors.pairs()))
                .with_context(|| format!("invalid overrides for {}", instrument.symbol))?;
        }
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "instruments": [
            {"symbol": "LIT", "countries": ["china", "us", "kr"], "sectors": {"EV": 1.0}},
            {"symbol": "VWO"}
        ],
        "rules": ["TerRule", {"CountryRule": {"strong_growing": ["china"], "weight": 2.0}}],
        "smoothing": {"window_multiplier": 3.0},
        "exposure": {"display_count": 2, "min_weight": 0.05}
    }"#;

    #[test]
    fn test_parse_example() {
        let config = ScreenConfig::from_json(EXAMPLE).unwrap();
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.exposure.display_count, 2);
        assert_eq!(config.smoothing, SmoothingConfig::default());

        let lit = &config.instruments[0];
        assert_eq!(
            lit.countries.pairs(),
            vec![
                ("china".to_string(), 1.0),
                ("us".to_string(), 1.0),
                ("kr".to_string(), 1.0)
            ]
        );
        assert_eq!(lit.sectors.pairs(), vec![("EV".to_string(), 1.0)]);
        assert!(config.instruments[1].countries.pairs().is_empty());
    }

    #[test]
    fn test_overrides_resolve_countries() {
        let config = ScreenConfig::from_json(EXAMPLE).unwrap();
        let overrides = config.instruments[0]
            .overrides(&CountryLookup::new())
            .unwrap();
        assert_eq!(overrides.countries.get("CN"), Some(1.0));
        assert_eq!(overrides.countries.get("US"), Some(1.0));
        assert_eq!(overrides.countries.get("KR"), Some(1.0));
    }

    #[test]
    fn test_unknown_country_is_fatal() {
        let config = ScreenConfig::from_json(
            r#"{"instruments": [{"symbol": "X", "countries": ["narnia"]}], "rules": ["TerRule"]}"#,
        )
        .unwrap();
        assert!(config.instruments[0].overrides(&CountryLookup::new()).is_err());
    }

    #[test]
    fn test_rejects_bad_configs() {
        assert!(ScreenConfig::from_json(r#"{"instruments": [], "rules": ["TerRule"]}"#).is_err());
        assert!(
            ScreenConfig::from_json(r#"{"instruments": [{"symbol": "X"}], "rulez": []}"#).is_err()
        );
    }

    #[test]
    fn test_rejects_unusable_smoothing() {
        let config = ScreenConfig::from_json(
            r#"{"instruments": [{"symbol": "X"}], "rules": ["TerRule"],
                "smoothing": {"std_5y": 1e15}}"#,
        );
        assert!(config.is_err());

        let config = ScreenConfig::from_json(
            r#"{"instruments": [{"symbol": "X"}], "rules": ["TerRule"],
                "smoothing": {"std_1m": 0.0}}"#,
        );
        assert!(config.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_override_weights() {
        for weights in [r#"{"EV": 1.5}"#, r#"{"EV": -0.2}"#] {
            let text = format!(
                r#"{{"instruments": [{{"symbol": "X", "sectors": {weights}}}], "rules": ["TerRule"]}}"#
            );
            assert!(ScreenConfig::from_json(&text).is_err(), "{weights} accepted");
        }
        let text = r#"{"instruments": [{"symbol": "X", "countries": {"china": 2.0}}], "rules": ["TerRule"]}"#;
        assert!(ScreenConfig::from_json(text).is_err());
    }
}
