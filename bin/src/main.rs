//! Prisma CLI binary.
//!
//! Provides a command-line interface for the prisma ETF screener.

mod cmd;
mod config;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prisma")]
#[command(about = "Rule-based ETF screener", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a portfolio described by a screen configuration file
    Screen {
        /// Path to the JSON screen configuration
        config: PathBuf,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List available rules
    Rules {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show statistics and performance of one ETF
    Show {
        /// Ticker symbol
        symbol: String,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Country overrides, weight 1.0 each
        #[arg(long, value_delimiter = ',')]
        countries: Vec<String>,

        /// Sector overrides, weight 1.0 each
        #[arg(long, value_delimiter = ',')]
        sectors: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            config,
            date,
            format,
        } => {
            cmd::screen::run_screen(&config, date.as_deref(), &format).await?;
        }
        Commands::Rules { category, verbose } => {
            cmd::rules::list_rules(category.as_deref(), verbose);
        }
        Commands::Show {
            symbol,
            date,
            countries,
            sectors,
        } => {
            cmd::show::show_instrument(&symbol, date.as_deref(), &countries, &sectors).await?;
        }
    }

    Ok(())
}
