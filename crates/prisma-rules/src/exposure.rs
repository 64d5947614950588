//! Sector and country exposure rules.

use std::collections::BTreeMap;

use prisma_assets::CountryLookup;
use prisma_traits::{ExposureKind, PortfolioView, PrismaError, Result, Rule};
use serde::{Deserialize, Serialize};

/// Outlook tier of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Strongly growing (+1).
    StrongGrowing,
    /// Fairly growing (+0.5).
    FairGrowing,
    /// Fairly declining (−0.5).
    FairDecline,
    /// Strongly declining (−1).
    StrongDecline,
}

impl Tier {
    /// Multiplier applied to the exposure weight.
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::StrongGrowing => 1.0,
            Self::FairGrowing => 0.5,
            Self::FairDecline => -0.5,
            Self::StrongDecline => -1.0,
        }
    }
}

/// Configuration shared by the sector and country rules.
///
/// Tier lists hold sector codes for the sector rule and free-form country
/// names for the country rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryExposureConfig {
    /// Multiplier applied to the raw score (default: 1.0).
    pub weight: f64,

    /// Categories expected to grow strongly.
    pub strong_growing: Vec<String>,

    /// Categories expected to grow moderately.
    pub fair_growing: Vec<String>,

    /// Categories expected to decline moderately.
    pub fair_decline: Vec<String>,

    /// Categories expected to decline strongly.
    pub strong_decline: Vec<String>,
}

impl Default for CategoryExposureConfig {
    fn default() -> Self {
        Self {
            weight: 1.0,
            strong_growing: Vec::new(),
            fair_growing: Vec::new(),
            fair_decline: Vec::new(),
            strong_decline: Vec::new(),
        }
    }
}

impl CategoryExposureConfig {
    fn tiers(&self) -> [(Tier, &[String]); 4] {
        [
            (Tier::StrongGrowing, self.strong_growing.as_slice()),
            (Tier::FairGrowing, self.fair_growing.as_slice()),
            (Tier::FairDecline, self.fair_decline.as_slice()),
            (Tier::StrongDecline, self.strong_decline.as_slice()),
        ]
    }
}

/// Scores instruments by how much of their exposure falls into each tier.
///
/// The raw score is `Σ exposure_weight × tier_multiplier` over the
/// instrument's categories that appear in a tier. Categories in no tier add
/// nothing, and an instrument without exposure scores 0.
///
/// # Example
///
/// ```ignore
/// use prisma_rules::exposure::{CategoryExposureConfig, CategoryExposureRule};
///
/// let config = CategoryExposureConfig {
///     strong_growing: vec!["T".into()],
///     ..Default::default()
/// };
/// let rule = CategoryExposureRule::sector(config)?;
/// let column = rule.score(&view)?;
/// ```
#[derive(Debug, Clone)]
pub struct CategoryExposureRule {
    name: &'static str,
    kind: ExposureKind,
    weight: f64,
    tiers: BTreeMap<String, Tier>,
}

impl CategoryExposureRule {
    /// Score column of the sector rule.
    pub const SECTOR_COLUMN: &'static str = "SectorScore";

    /// Score column of the country rule.
    pub const COUNTRY_COLUMN: &'static str = "CountryScore";

    /// Sector rule; tier entries are sector codes used as given.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] if a code is listed in more
    /// than one tier.
    pub fn sector(config: CategoryExposureConfig) -> Result<Self> {
        let tiers = assign_tiers(&config, |code| Ok(code.trim().to_string()))?;
        Ok(Self {
            name: Self::SECTOR_COLUMN,
            kind: ExposureKind::Sector,
            weight: config.weight,
            tiers,
        })
    }

    /// Country rule; tier entries are resolved to alpha-2 codes.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::UnknownCountry`] if a name cannot be resolved,
    /// or [`PrismaError::Configuration`] if two entries resolve to the same
    /// code in different tiers.
    pub fn country(config: CategoryExposureConfig, lookup: &CountryLookup) -> Result<Self> {
        let tiers = assign_tiers(&config, |name| lookup.resolve(name).map(str::to_string))?;
        Ok(Self {
            name: Self::COUNTRY_COLUMN,
            kind: ExposureKind::Country,
            weight: config.weight,
            tiers,
        })
    }

    /// Which exposure this rule reads.
    #[must_use]
    pub const fn kind(&self) -> ExposureKind {
        self.kind
    }

    /// Tier of a category code, if it was configured.
    #[must_use]
    pub fn tier(&self, code: &str) -> Option<Tier> {
        self.tiers.get(code).copied()
    }
}

fn assign_tiers(
    config: &CategoryExposureConfig,
    resolve: impl Fn(&str) -> Result<String>,
) -> Result<BTreeMap<String, Tier>> {
    let mut tiers = BTreeMap::new();
    for (tier, entries) in config.tiers() {
        for entry in entries {
            let code = resolve(entry)?;
            match tiers.insert(code.clone(), tier) {
                Some(previous) if previous != tier => {
                    return Err(PrismaError::Configuration(format!(
                        "category '{entry}' ({code}) is listed as both {previous:?} and {tier:?}"
                    )));
                }
                _ => {}
            }
        }
    }
    Ok(tiers)
}

impl Rule for CategoryExposureRule {
    fn name(&self) -> &str {
        self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn evaluate(&self, view: &PortfolioView) -> Result<Vec<Option<f64>>> {
        let scores = view
            .exposures(self.kind)
            .iter()
            .map(|exposure| {
                let score = exposure
                    .iter()
                    .filter_map(|(code, w)| self.tier(code).map(|t| w * t.multiplier()))
                    .sum::<f64>();
                Some(score)
            })
            .collect();
        Ok(scores)
    }

    fn required_columns(&self) -> &[&str] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::view_with_exposure;
    use approx::assert_relative_eq;
    use prisma_traits::ExposureMap;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_single_strong_sector() {
        let config = CategoryExposureConfig {
            strong_growing: strings(&["T"]),
            ..Default::default()
        };
        let rule = CategoryExposureRule::sector(config).unwrap();
        let sectors: ExposureMap = [("T", 0.6)].into_iter().collect();
        let view = view_with_exposure(vec![sectors], vec![ExposureMap::new()]);

        let scores = rule.evaluate(&view).unwrap();
        assert_relative_eq!(scores[0].unwrap(), 0.6);
        assert_eq!(rule.name(), "SectorScore");
    }

    #[test]
    fn test_tiers_combine() {
        let config = CategoryExposureConfig {
            weight: 2.0,
            strong_growing: strings(&["T"]),
            fair_growing: strings(&["H"]),
            fair_decline: strings(&["F"]),
            strong_decline: strings(&["E"]),
        };
        let rule = CategoryExposureRule::sector(config).unwrap();
        let sectors: ExposureMap = [("T", 0.4), ("H", 0.2), ("F", 0.2), ("E", 0.1), ("U", 0.1)]
            .into_iter()
            .collect();
        let view = view_with_exposure(vec![sectors], vec![ExposureMap::new()]);

        // 0.4 + 0.1 - 0.1 - 0.1
        let raw = rule.evaluate(&view).unwrap()[0].unwrap();
        assert_relative_eq!(raw, 0.3, epsilon = 1e-12);
        let weighted = rule.score(&view).unwrap().scores[0].unwrap();
        assert_relative_eq!(weighted, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_exposure_scores_zero() {
        let config = CategoryExposureConfig {
            strong_growing: strings(&["china"]),
            ..Default::default()
        };
        let rule = CategoryExposureRule::country(config, &CountryLookup::new()).unwrap();
        let view = view_with_exposure(vec![ExposureMap::new()], vec![ExposureMap::new()]);
        assert_eq!(rule.evaluate(&view).unwrap(), vec![Some(0.0)]);
    }

    #[test]
    fn test_country_names_resolved() {
        let config = CategoryExposureConfig {
            strong_growing: strings(&["china", "usa"]),
            strong_decline: strings(&["Russia"]),
            ..Default::default()
        };
        let rule = CategoryExposureRule::country(config, &CountryLookup::new()).unwrap();
        assert_eq!(rule.tier("CN"), Some(Tier::StrongGrowing));
        assert_eq!(rule.tier("US"), Some(Tier::StrongGrowing));
        assert_eq!(rule.tier("RU"), Some(Tier::StrongDecline));
        assert_eq!(rule.name(), "CountryScore");
        assert_eq!(rule.kind(), ExposureKind::Country);

        let countries: ExposureMap = [("CN", 0.5), ("RU", 0.2)].into_iter().collect();
        let view = view_with_exposure(vec![ExposureMap::new()], vec![countries]);
        assert_relative_eq!(rule.evaluate(&view).unwrap()[0].unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_country_is_fatal() {
        let config = CategoryExposureConfig {
            fair_growing: strings(&["atlantis"]),
            ..Default::default()
        };
        let result = CategoryExposureRule::country(config, &CountryLookup::new());
        assert!(matches!(result, Err(PrismaError::UnknownCountry(_))));
    }

    #[test]
    fn test_overlapping_tiers_rejected() {
        let config = CategoryExposureConfig {
            strong_growing: strings(&["china"]),
            fair_decline: strings(&["CN"]),
            ..Default::default()
        };
        let result = CategoryExposureRule::country(config, &CountryLookup::new());
        assert!(matches!(result, Err(PrismaError::Configuration(_))));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let parsed: std::result::Result<CategoryExposureConfig, _> =
            serde_json::from_str(r#"{"strong_growin": ["T"]}"#);
        assert!(parsed.is_err());
    }
}
