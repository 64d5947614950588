//! CLI subcommand modules.
//!
//! This module contains the implementations for all prisma CLI subcommands.

pub(crate) mod rules;
pub(crate) mod screen;
pub(crate) mod show;

/// Print a boxed section title.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Render an optional number, `-` when undefined.
pub(crate) fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(0.12345), 3), "0.123");
        assert_eq!(fmt_opt(None, 3), "-");
    }
}
