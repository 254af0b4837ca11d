//! Compare command implementation
//!
//! Fetches the option chain and spot, prices every contract of one expiry
//! with Black-Scholes at its quoted IV, reports MAE/RMSE and writes the
//! per-contract comparison CSV.

use std::path::PathBuf;

use adapter_feeds::{
    ChainSnapshot, FileChainSource, NseClient, NseUnderlying, OptionChainSource, SpotSource,
    YahooClient,
};
use adapter_loader::{write_rows, ComparisonRow};
use chrono::{Local, NaiveDateTime};
use pricer_core::types::Date;
use pricer_models::analytical::ImpliedVolConfig;
use pricer_risk::comparison::{
    liquid_only, price_chain, ErrorMetrics, MetricsReport, PricingInputs,
};
use tracing::{info, warn};

use crate::config::{BsCompareConfig, SpotSourceKind};
use crate::{CliError, Result};

/// Arguments of `bscompare compare`; unset values fall back to the config.
#[derive(Debug, Default, clap::Args)]
pub struct CompareArgs {
    /// Index symbol (e.g. NIFTY)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Expiry in exchange format, e.g. 28-Aug-2025
    #[arg(short, long)]
    pub expiry: Option<String>,

    /// Risk-free rate as a decimal
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Spot price; skips the spot fetch when given
    #[arg(long)]
    pub spot: Option<f64>,

    /// Spot provider
    #[arg(long, value_enum)]
    pub spot_source: Option<SpotSourceKind>,

    /// Saved option-chain JSON to use instead of the live API
    #[arg(long)]
    pub chain_file: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also solve each contract's implied volatility from its last price
    #[arg(long)]
    pub solve_iv: bool,

    /// Compute metrics over contracts with iv > 0 only
    #[arg(long)]
    pub liquid_only: bool,
}

/// Outcome of a comparison run
#[derive(Debug)]
pub struct ComparisonSummary {
    /// Spot used for pricing
    pub spot: f64,
    /// Expiry compared
    pub expiry: Date,
    /// Metrics over the selected rows; `None` when `--liquid-only` left none
    pub report: Option<MetricsReport>,
    /// Rows written
    pub rows: usize,
    /// CSV path
    pub output: PathBuf,
}

/// Run the compare command valued at the current local time
pub async fn run(config: &BsCompareConfig, args: CompareArgs) -> Result<ComparisonSummary> {
    run_at(config, args, Local::now().naive_local()).await
}

/// Run the compare command with the valuation instant `now`
pub async fn run_at(
    config: &BsCompareConfig,
    args: CompareArgs,
    now: NaiveDateTime,
) -> Result<ComparisonSummary> {
    let symbol = args.symbol.clone().unwrap_or_else(|| config.symbol.clone());
    let rate = args.rate.unwrap_or(config.risk_free_rate);
    if !rate.is_finite() {
        return Err(CliError::invalid_argument(format!(
            "risk-free rate must be finite, got {}",
            rate
        )));
    }

    info!("Starting comparison...");
    info!("  Symbol: {}", symbol);
    info!("  Risk-free rate: {}", rate);
    info!("  Day count: {}", config.day_count);

    // Step 1: option chain
    let chain_source: Box<dyn OptionChainSource> = match &args.chain_file {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            Box::new(FileChainSource::new(path.clone()))
        }
        None => Box::new(NseClient::new(
            config.nse_base_url.clone(),
            config.request_timeout(),
        )?),
    };
    let snapshot = chain_source.fetch_chain(&symbol).await?;

    let expiry = resolve_expiry(config, &args, &snapshot)?;
    info!("  Expiry: {}", expiry.to_exchange_string());

    let quotes = snapshot.quotes_for_expiry(expiry);
    if quotes.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "No contracts listed for expiry {}",
            expiry.to_exchange_string()
        )));
    }
    info!(contracts = quotes.len(), "Selected contracts");

    // Step 2: spot
    let spot = match args.spot {
        Some(spot) => spot,
        None => {
            let kind = args.spot_source.unwrap_or(config.spot_source);
            let source: Box<dyn SpotSource> = match kind {
                SpotSourceKind::Yahoo => Box::new(YahooClient::new(
                    config.yahoo_base_url.clone(),
                    config.request_timeout(),
                )?),
                SpotSourceKind::Nse => Box::new(NseUnderlying::from_snapshot(&snapshot)),
            };
            source.fetch_spot(&config.spot_ticker).await?
        }
    };

    // Steps 3-4: time to expiry and model prices
    let mut inputs = PricingInputs::new(spot, rate, now)?.with_day_count(config.day_count);
    if args.solve_iv {
        inputs = inputs.with_implied_vol(ImpliedVolConfig::default());
    }
    let priced = price_chain(&quotes, &inputs)?;

    // Step 5: save
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_csv.clone());
    let rows: Vec<ComparisonRow> = priced.iter().map(ComparisonRow::from).collect();
    let written = write_rows(&output, &rows)?;

    // Step 6: evaluate
    let selected = if args.liquid_only {
        liquid_only(&priced)
    } else {
        priced.clone()
    };

    println!("Spot Price: {:.2}", spot);
    let report = if selected.is_empty() {
        warn!("No contracts with iv > 0; metrics skipped");
        println!("No liquid contracts (iv > 0); metrics skipped");
        None
    } else {
        let report = MetricsReport::compute(&selected)?;
        println!(
            "MAE: {:.4}, RMSE: {:.4}",
            report.overall.mae, report.overall.rmse
        );
        for (side, metrics) in [("calls", report.calls), ("puts", report.puts)] {
            if let Some(m) = metrics {
                println!("{}", side_line(side, &m));
            }
        }
        Some(report)
    };

    if args.solve_iv {
        let solved = priced.iter().filter(|p| p.solved_iv.is_some()).count();
        if solved < priced.len() {
            warn!(
                solved,
                total = priced.len(),
                "Implied volatility not recoverable for some contracts"
            );
        }
    }

    println!("Saved results to {}", output.display());

    Ok(ComparisonSummary {
        spot,
        expiry,
        report,
        rows: written,
        output,
    })
}

/// Expiry from the command line, then config, then the nearest listed one.
fn resolve_expiry(
    config: &BsCompareConfig,
    args: &CompareArgs,
    snapshot: &ChainSnapshot,
) -> Result<Date> {
    if let Some(expiry) = &args.expiry {
        return Date::parse_exchange(expiry).map_err(|e| {
            CliError::invalid_argument(format!("expiry '{}': {}", expiry, e))
        });
    }
    if let Some(expiry) = config.expiry_date()? {
        return Ok(expiry);
    }
    snapshot
        .nearest_expiry(Date::today())
        .ok_or_else(|| CliError::invalid_argument("option chain lists no upcoming expiry"))
}

fn side_line(side: &str, m: &ErrorMetrics) -> String {
    format!(
        "  {:<5} n={:<4} MAE: {:.4}, RMSE: {:.4}, bias: {:+.4}",
        side, m.count, m.mae, m.rmse, m.bias
    )
}
