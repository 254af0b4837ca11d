//! Check command implementation
//!
//! Validates the resolved configuration and prints the effective settings.

use tracing::info;

use crate::config::BsCompareConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &BsCompareConfig, config_path: &str) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    println!("Configuration OK ({})", config_path);
    for (key, value) in settings(config) {
        println!("  {:<22} {}", key, value);
    }

    info!("Check complete");
    Ok(())
}

/// Effective settings as display pairs
pub fn settings(config: &BsCompareConfig) -> Vec<(&'static str, String)> {
    vec![
        ("symbol", config.symbol.clone()),
        ("spot_ticker", config.spot_ticker.clone()),
        ("spot_source", config.spot_source.as_str().to_string()),
        ("risk_free_rate", format!("{}", config.risk_free_rate)),
        ("day_count", config.day_count.to_string()),
        (
            "expiry",
            config
                .expiry
                .clone()
                .unwrap_or_else(|| "nearest listed".to_string()),
        ),
        ("output_csv", config.output_csv.display().to_string()),
        ("plot_dir", config.plot_dir.display().to_string()),
        ("nse_base_url", config.nse_base_url.clone()),
        ("yahoo_base_url", config.yahoo_base_url.clone()),
        (
            "request_timeout_secs",
            config.request_timeout_secs.to_string(),
        ),
        ("log_level", config.log_level.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_cover_every_field() {
        let pairs = settings(&BsCompareConfig::default());
        assert_eq!(pairs.len(), 12);
        assert!(pairs.contains(&("day_count", "TRADING/252".to_string())));
        assert!(pairs.contains(&("expiry", "nearest listed".to_string())));
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = BsCompareConfig {
            request_timeout_secs: 0,
            ..BsCompareConfig::default()
        };
        assert!(run(&config, "bscompare.toml").is_err());
    }
}
