//! Declarative rule configuration entries.

use std::collections::BTreeMap;

use prisma_traits::{PrismaError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a screener's rule list.
///
/// Either a bare rule name (`"TerRule"`) or a single-key object mapping the
/// rule name to its parameters (`{"CountryRule": {"strong_growing": ["china"]}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    /// Rule with default parameters.
    Name(String),
    /// Rule name mapped to a parameter object.
    Keyed(BTreeMap<String, Value>),
}

impl RuleConfig {
    /// Entry for a rule with default parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Entry for a rule with explicit parameters.
    pub fn with_params(name: impl Into<String>, params: Value) -> Self {
        Self::Keyed(BTreeMap::from([(name.into(), params)]))
    }

    /// The rule name and its parameters (`Value::Null` for defaults).
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] if a keyed entry does not have
    /// exactly one key.
    pub fn entry(&self) -> Result<(&str, Value)> {
        match self {
            Self::Name(name) => Ok((name.as_str(), Value::Null)),
            Self::Keyed(map) => {
                let mut entries = map.iter();
                match (entries.next(), entries.next()) {
                    (Some((name, params)), None) => Ok((name.as_str(), params.clone())),
                    (None, _) => Err(PrismaError::Configuration(
                        "rule entry has no rule name".to_string(),
                    )),
                    (Some(_), Some(_)) => Err(PrismaError::Configuration(format!(
                        "rule entry must name exactly one rule, found: {}",
                        map.keys().cloned().collect::<Vec<_>>().join(", ")
                    ))),
                }
            }
        }
    }
}

impl From<&str> for RuleConfig {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mixed_list() {
        let configs: Vec<RuleConfig> = serde_json::from_value(json!([
            "TerRule",
            {"CountryRule": {"strong_growing": ["china"], "weight": 2.0}}
        ]))
        .unwrap();

        assert_eq!(configs[0], RuleConfig::named("TerRule"));
        let (name, params) = configs[1].entry().unwrap();
        assert_eq!(name, "CountryRule");
        assert_eq!(params["weight"], json!(2.0));
    }

    #[test]
    fn test_bare_name_has_null_params() {
        let config = RuleConfig::from("LtgRule");
        let (name, params) = config.entry().unwrap();
        assert_eq!(name, "LtgRule");
        assert!(params.is_null());
    }

    #[test]
    fn test_multi_key_entry_rejected() {
        let config: RuleConfig =
            serde_json::from_value(json!({"TerRule": {}, "LtgRule": {}})).unwrap();
        assert!(matches!(config.entry(), Err(PrismaError::Configuration(_))));

        let empty: RuleConfig = serde_json::from_value(json!({})).unwrap();
        assert!(empty.entry().is_err());
    }
}
