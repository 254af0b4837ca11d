//! bscompare - Black-Scholes vs market prices for NSE index options
//!
//! Operational entry point of the workspace.
//!
//! # Commands
//!
//! - `bscompare compare` - Fetch the chain, price one expiry, report MAE/RMSE, write the CSV
//! - `bscompare plot` - Render the comparison charts from a saved CSV
//! - `bscompare check` - Show the effective configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-I-P-S architecture, this crate
//! wires the feed and loader adapters to the pricer crates.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod charts;
mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::compare::CompareArgs;
use config::BsCompareConfig;

/// Black-Scholes vs market comparison for NSE index options
#[derive(Parser)]
#[command(name = "bscompare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "bscompare.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one expiry with Black-Scholes and compare to market prices
    Compare(CompareArgs),

    /// Render charts from a comparison CSV
    Plot {
        /// Comparison CSV (defaults to the configured output)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for the PNG files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = BsCompareConfig::load_or_default(Path::new(&cli.config))?.with_env_override();

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Compare(args) => {
            config.validate()?;
            let summary = commands::compare::run(&config, args).await?;
            info!(
                expiry = %summary.expiry,
                spot = summary.spot,
                rows = summary.rows,
                mae = summary.report.map(|r| r.overall.mae),
                rmse = summary.report.map(|r| r.overall.rmse),
                output = %summary.output.display(),
                "Comparison complete"
            );
            Ok(())
        }
        Commands::Plot { input, output_dir } => {
            config.validate()?;
            let input = input.unwrap_or_else(|| config.output_csv.clone());
            let output_dir = output_dir.unwrap_or_else(|| config.plot_dir.clone());
            commands::plot::run(&input, &output_dir).map(|_| ())
        }
        Commands::Check => commands::check::run(&config, &cli.config),
    }
}
