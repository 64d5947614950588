//! Rule registry for discovering and constructing the available rules.
//!
//! The set of rules is closed: every rule type is a [`RuleKind`] variant, and
//! configuration names are resolved against the table below. Each rule has a
//! PascalCase name and a few snake_case aliases.

use prisma_assets::CountryLookup;
use prisma_traits::{PrismaError, Result, Rule};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::expense::{ExpenseRatioConfig, ExpenseRatioRule};
use crate::exposure::{CategoryExposureConfig, CategoryExposureRule};
use crate::momentum::{LongTermGrowth, MomentumConfig, ShortTermGrowth};
use crate::rebound::{ReboundConfig, ReboundRule};
use crate::valuation::{ValuationConfig, ValuationRule};

/// Rule category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCategory {
    /// Sector and country exposure rules
    Exposure,
    /// Valuation ratio rules
    Valuation,
    /// Fund cost rules
    Cost,
    /// Mean reversion rules
    Reversion,
    /// Growth momentum rules
    Momentum,
}

impl RuleCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Exposure => "Outlook tiers over sector and country exposure",
            Self::Valuation => "Holdings valuation relative to fixed thresholds",
            Self::Cost => "Fund expense ratio",
            Self::Reversion => "Temporary declines in long-term growers",
            Self::Momentum => "Growth relative to the best performer",
        }
    }
}

const TIER_PARAMETERS: &[&str] = &[
    "weight",
    "strong_growing",
    "fair_growing",
    "fair_decline",
    "strong_decline",
];

/// Every rule type the screener can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Sector exposure tiers.
    Sector,
    /// Country exposure tiers.
    Country,
    /// P/E and P/S valuation.
    Valuation,
    /// Total expense ratio.
    ExpenseRatio,
    /// Rebound after a temporary decline.
    Rebound,
    /// 5-year growth relative to the best.
    LongTermGrowth,
    /// 1-year growth relative to the best.
    ShortTermGrowth,
}

impl RuleKind {
    /// All rule kinds in registry order.
    pub const ALL: [Self; 7] = [
        Self::Sector,
        Self::Country,
        Self::Valuation,
        Self::ExpenseRatio,
        Self::Rebound,
        Self::LongTermGrowth,
        Self::ShortTermGrowth,
    ];

    /// Resolve a configuration name or alias, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| {
            let info = kind.info();
            info.name.eq_ignore_ascii_case(name)
                || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    /// Registry metadata for this kind.
    #[must_use]
    pub const fn info(&self) -> RuleInfo {
        match self {
            Self::Sector => RuleInfo {
                name: "SectorRule",
                aliases: &["sector", "sector_exposure"],
                column: CategoryExposureRule::SECTOR_COLUMN,
                category: RuleCategory::Exposure,
                description: "Sector exposure weighted by outlook tier",
                parameters: TIER_PARAMETERS,
            },
            Self::Country => RuleInfo {
                name: "CountryRule",
                aliases: &["country", "country_exposure"],
                column: CategoryExposureRule::COUNTRY_COLUMN,
                category: RuleCategory::Exposure,
                description: "Country exposure weighted by outlook tier",
                parameters: TIER_PARAMETERS,
            },
            Self::Valuation => RuleInfo {
                name: "PePsRule",
                aliases: &["valuation", "pe_ps"],
                column: ValuationRule::COLUMN,
                category: RuleCategory::Valuation,
                description: "Mean of 1 - P/E / 20 and 1 - P/S / 2",
                parameters: &["weight", "pe_threshold", "ps_threshold"],
            },
            Self::ExpenseRatio => RuleInfo {
                name: "TerRule",
                aliases: &["ter", "expense_ratio"],
                column: ExpenseRatioRule::COLUMN,
                category: RuleCategory::Cost,
                description: "Expense ratio below a 1% cap, scaled by 100",
                parameters: &["weight", "cap"],
            },
            Self::Rebound => RuleInfo {
                name: "DeclineRule",
                aliases: &["decline", "rebound"],
                column: ReboundRule::COLUMN,
                category: RuleCategory::Reversion,
                description: "Recent 1M/3M dip in an instrument with strong 5Y growth",
                parameters: &["weight", "min_growth", "rebound_threshold"],
            },
            Self::LongTermGrowth => RuleInfo {
                name: "LtgRule",
                aliases: &["ltg", "long_term_growth"],
                column: LongTermGrowth::COLUMN,
                category: RuleCategory::Momentum,
                description: "Annualized 5Y change relative to the best",
                parameters: &["weight"],
            },
            Self::ShortTermGrowth => RuleInfo {
                name: "StgRule",
                aliases: &["stg", "short_term_growth"],
                column: ShortTermGrowth::COLUMN,
                category: RuleCategory::Momentum,
                description: "1Y change relative to the best",
                parameters: &["weight"],
            },
        }
    }

    /// Build a rule of this kind from a JSON parameter object.
    ///
    /// `Value::Null` means "all defaults".
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] for malformed or unknown
    /// parameters, or the rule's own validation error.
    pub fn build(self, params: Value, context: &RuleContext) -> Result<Box<dyn Rule>> {
        let rule: Box<dyn Rule> = match self {
            Self::Sector => Box::new(CategoryExposureRule::sector(self.parse(params)?)?),
            Self::Country => Box::new(CategoryExposureRule::country(
                self.parse::<CategoryExposureConfig>(params)?,
                &context.countries,
            )?),
            Self::Valuation => {
                Box::new(ValuationRule::new(self.parse::<ValuationConfig>(params)?)?)
            }
            Self::ExpenseRatio => {
                Box::new(ExpenseRatioRule::new(self.parse::<ExpenseRatioConfig>(params)?)?)
            }
            Self::Rebound => Box::new(ReboundRule::new(self.parse::<ReboundConfig>(params)?)),
            Self::LongTermGrowth => {
                Box::new(LongTermGrowth::new(self.parse::<MomentumConfig>(params)?))
            }
            Self::ShortTermGrowth => {
                Box::new(ShortTermGrowth::new(self.parse::<MomentumConfig>(params)?))
            }
        };

        if !rule.weight().is_finite() {
            return Err(PrismaError::Configuration(format!(
                "{}: weight must be a finite number",
                self.info().name
            )));
        }
        tracing::debug!(rule = self.info().name, weight = rule.weight(), "built rule");
        Ok(rule)
    }

    fn parse<T: DeserializeOwned>(self, params: Value) -> Result<T> {
        let params = match params {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };
        serde_json::from_value(params).map_err(|e| {
            PrismaError::Configuration(format!("{}: invalid parameters: {e}", self.info().name))
        })
    }
}

/// Metadata about a rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    /// Configuration name
    pub name: &'static str,

    /// Accepted alternative names
    pub aliases: &'static [&'static str],

    /// Score column the rule produces
    pub column: &'static str,

    /// Category classification
    pub category: RuleCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Accepted parameter names
    pub parameters: &'static [&'static str],
}

/// Shared lookups available while building rules.
#[derive(Debug, Clone, Default)]
pub struct RuleContext {
    /// Country name resolution for country tiers.
    pub countries: CountryLookup,
}

/// Get information about all available rules.
#[must_use]
pub fn available_rules() -> Vec<RuleInfo> {
    RuleKind::ALL.iter().map(RuleKind::info).collect()
}

/// Get all rules in a specific category.
#[must_use]
pub fn rules_by_category(category: &RuleCategory) -> Vec<RuleInfo> {
    available_rules()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific rule by name or alias.
#[must_use]
pub fn get_rule_info(name: &str) -> Option<RuleInfo> {
    RuleKind::from_name(name).map(|kind| kind.info())
}

/// Create a rule by name or alias.
///
/// # Errors
///
/// Returns [`PrismaError::UnknownRule`] if the name is not registered, or a
/// configuration error from [`RuleKind::build`].
pub fn create_rule(name: &str, params: Value, context: &RuleContext) -> Result<Box<dyn Rule>> {
    RuleKind::from_name(name)
        .ok_or_else(|| PrismaError::UnknownRule(name.to_string()))?
        .build(params, context)
}
