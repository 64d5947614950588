//! Provider sector names to short sector codes.

use std::collections::HashMap;

/// Maps provider sector names ("Consumer Cyclical", "realestate") to short
/// codes ("CD", "R").
///
/// Names are compared after lowercasing and dropping every non-alphanumeric
/// character, so "Real Estate", "real_estate" and "realestate" are the same
/// key. Names without a mapping pass through unchanged, which lets user
/// supplied themes such as "EV" sit next to provider sectors.
#[derive(Debug, Clone)]
pub struct SectorCodes {
    codes: HashMap<String, String>,
}

const DEFAULT_CODES: [(&str, &str); 11] = [
    ("realestate", "R"),
    ("consumer_cyclical", "CD"),
    ("basic_materials", "M"),
    ("consumer_defensive", "CS"),
    ("technology", "T"),
    ("communication_services", "C"),
    ("financial_services", "F"),
    ("utilities", "U"),
    ("industrials", "I"),
    ("energy", "E"),
    ("healthcare", "H"),
];

impl Default for SectorCodes {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_CODES)
    }
}

impl SectorCodes {
    /// The standard eleven-sector table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(provider name, code)` pairs.
    pub fn from_pairs<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: Into<String>,
    {
        let codes = pairs
            .into_iter()
            .map(|(name, code)| (normalize(name.as_ref()), code.into()))
            .collect();
        Self { codes }
    }

    /// Code for a provider sector name, `None` if unmapped.
    #[must_use]
    pub fn code(&self, name: &str) -> Option<&str> {
        self.codes.get(&normalize(name)).map(String::as_str)
    }

    /// Code for a provider sector name, or the name itself if unmapped.
    #[must_use]
    pub fn encode(&self, name: &str) -> String {
        self.code(name).unwrap_or(name).to_string()
    }

    /// Number of mapped sectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_spellings() {
        let codes = SectorCodes::new();
        assert_eq!(codes.code("Real Estate"), Some("R"));
        assert_eq!(codes.code("realestate"), Some("R"));
        assert_eq!(codes.code("Consumer Cyclical"), Some("CD"));
        assert_eq!(codes.code("consumer_defensive"), Some("CS"));
        assert_eq!(codes.code("Communication Services"), Some("C"));
        assert_eq!(codes.len(), 11);
    }

    #[test]
    fn test_unknown_passes_through() {
        let codes = SectorCodes::new();
        assert_eq!(codes.code("EV"), None);
        assert_eq!(codes.encode("EV"), "EV");
        assert_eq!(codes.encode("Technology"), "T");
    }

    #[test]
    fn test_custom_table() {
        let codes = SectorCodes::from_pairs([("Semiconductors", "SEMI")]);
        assert_eq!(codes.code("semiconductors"), Some("SEMI"));
        assert_eq!(codes.code("Technology"), None);
    }
}
