//! Rule listing command implementation.

use prisma_rules::RuleCategory;
use prisma_rules::registry::rules_by_category;

const CATEGORIES: [(RuleCategory, &str); 5] = [
    (RuleCategory::Exposure, "Exposure"),
    (RuleCategory::Valuation, "Valuation"),
    (RuleCategory::Cost, "Cost"),
    (RuleCategory::Reversion, "Reversion"),
    (RuleCategory::Momentum, "Momentum"),
];

/// List available rules, optionally filtered by category.
pub(crate) fn list_rules(category: Option<&str>, verbose: bool) {
    super::banner("Available Rules");
    print!("{}", render(category, verbose));
}

fn render(category: Option<&str>, verbose: bool) -> String {
    let mut out = String::new();

    for (cat, cat_name) in CATEGORIES {
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        out.push_str(&format!("{cat_name}: {}\n", cat.description()));
        out.push_str(&format!("{}\n", "-".repeat(60)));

        for info in rules_by_category(&cat) {
            if verbose {
                out.push_str(&format!(
                    "  {:12} -> {:13} {}\n",
                    info.name, info.column, info.description
                ));
                out.push_str(&format!("  {:12}    aliases: {}\n", "", info.aliases.join(", ")));
                out.push_str(&format!(
                    "  {:12}    parameters: {}\n",
                    "",
                    info.parameters.join(", ")
                ));
            } else {
                out.push_str(&format!("  {:12} -> {}\n", info.name, info.column));
            }
        }
        out.push('\n');
    }

    if !verbose {
        out.push_str("Use --verbose for descriptions, aliases and parameters.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_all() {
        let text = render(None, false);
        let names = ["SectorRule", "CountryRule", "PePsRule", "TerRule", "DeclineRule", "LtgRule"];
        for name in names {
            assert!(text.contains(name), "{name} missing");
        }
    }

    #[test]
    fn test_render_filtered_verbose() {
        let text = render(Some("momentum"), true);
        assert!(text.contains("StgRule"));
        assert!(text.contains("long_term_growth"));
        assert!(!text.contains("TerRule"));
    }
}
