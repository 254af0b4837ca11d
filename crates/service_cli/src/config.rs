//! bscompare configuration management.
//!
//! Handles loading of `bscompare.toml` with environment variable override
//! support (`BSCOMPARE_*`). Every field has a default, so a missing file is
//! not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use adapter_feeds::{DEFAULT_NSE_BASE_URL, DEFAULT_YAHOO_BASE_URL};
use pricer_core::types::{Date, DayCountConvention};
use serde::Deserialize;

/// Where the underlying spot comes from.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpotSourceKind {
    /// Last daily close from Yahoo Finance
    #[default]
    Yahoo,
    /// `underlyingValue` of the fetched option chain
    Nse,
}

impl SpotSourceKind {
    /// Lowercase name, as accepted in config and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Nse => "nse",
        }
    }
}

/// Comparison configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BsCompareConfig {
    /// Index symbol on the exchange
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Yahoo Finance ticker for the spot level
    #[serde(default = "default_spot_ticker")]
    pub spot_ticker: String,

    /// Spot provider
    #[serde(default)]
    pub spot_source: SpotSourceKind,

    /// Continuously compounded risk-free rate
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Day count used for time to expiry
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Expiry in exchange format (DD-Mon-YYYY); nearest listed when unset
    pub expiry: Option<String>,

    /// Comparison CSV path
    #[serde(default = "default_output_csv")]
    pub output_csv: PathBuf,

    /// Chart output directory
    #[serde(default = "default_plot_dir")]
    pub plot_dir: PathBuf,

    /// NSE site base URL
    #[serde(default = "default_nse_base_url")]
    pub nse_base_url: String,

    /// Yahoo Finance API base URL
    #[serde(default = "default_yahoo_base_url")]
    pub yahoo_base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_symbol() -> String {
    "NIFTY".to_string()
}

fn default_spot_ticker() -> String {
    "^NSEI".to_string()
}

fn default_risk_free_rate() -> f64 {
    0.055
}

fn default_output_csv() -> PathBuf {
    PathBuf::from("data/nifty50_bs_comparison.csv")
}

fn default_plot_dir() -> PathBuf {
    PathBuf::from("data/plots")
}

fn default_nse_base_url() -> String {
    DEFAULT_NSE_BASE_URL.to_string()
}

fn default_yahoo_base_url() -> String {
    DEFAULT_YAHOO_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BsCompareConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            spot_ticker: default_spot_ticker(),
            spot_source: SpotSourceKind::default(),
            risk_free_rate: default_risk_free_rate(),
            day_count: DayCountConvention::default(),
            expiry: None,
            output_csv: default_output_csv(),
            plot_dir: default_plot_dir(),
            nse_base_url: default_nse_base_url(),
            yahoo_base_url: default_yahoo_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl BsCompareConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary `BSCOMPARE_*` lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("BSCOMPARE_SYMBOL") {
            self.symbol = symbol;
        }

        if let Some(ticker) = lookup("BSCOMPARE_SPOT_TICKER") {
            self.spot_ticker = ticker;
        }

        if let Some(source) = lookup("BSCOMPARE_SPOT_SOURCE") {
            self.spot_source = match source.to_lowercase().as_str() {
                "yahoo" => SpotSourceKind::Yahoo,
                "nse" => SpotSourceKind::Nse,
                _ => self.spot_source,
            };
        }

        if let Some(rate) = lookup("BSCOMPARE_RISK_FREE_RATE") {
            self.risk_free_rate = rate.parse().unwrap_or(f64::NAN);
        }

        if let Some(day_count) = lookup("BSCOMPARE_DAY_COUNT") {
            if let Ok(dcc) = day_count.parse() {
                self.day_count = dcc;
            }
        }

        if let Some(expiry) = lookup("BSCOMPARE_EXPIRY") {
            self.expiry = Some(expiry).filter(|e| !e.trim().is_empty());
        }

        if let Some(output_csv) = lookup("BSCOMPARE_OUTPUT_CSV") {
            self.output_csv = PathBuf::from(output_csv);
        }

        if let Some(plot_dir) = lookup("BSCOMPARE_PLOT_DIR") {
            self.plot_dir = PathBuf::from(plot_dir);
        }

        if let Some(url) = lookup("BSCOMPARE_NSE_BASE_URL") {
            self.nse_base_url = url;
        }

        if let Some(url) = lookup("BSCOMPARE_YAHOO_BASE_URL") {
            self.yahoo_base_url = url;
        }

        if let Some(timeout) = lookup("BSCOMPARE_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = timeout.parse().unwrap_or(0);
        }

        if let Some(log_level) = lookup("BSCOMPARE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.symbol.trim().is_empty() {
            errors.push("symbol cannot be empty".to_string());
        }

        if self.spot_ticker.trim().is_empty() {
            errors.push("spot_ticker cannot be empty".to_string());
        }

        if !self.risk_free_rate.is_finite() {
            errors.push(format!(
                "risk_free_rate must be a finite number, got {}",
                self.risk_free_rate
            ));
        } else if self.risk_free_rate.abs() > 1.0 {
            errors.push(format!(
                "risk_free_rate {} looks like a percentage; use a decimal (0.055 = 5.5%)",
                self.risk_free_rate
            ));
        }

        if let Some(expiry) = &self.expiry {
            if let Err(e) = Date::parse_exchange(expiry) {
                errors.push(format!(
                    "Invalid expiry '{}' (expected DD-Mon-YYYY): {}",
                    expiry, e
                ));
            }
        }

        for (name, url) in [
            ("nse_base_url", &self.nse_base_url),
            ("yahoo_base_url", &self.yahoo_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!(
                    "Invalid {} '{}'. Must start with http:// or https://",
                    name, url
                ));
            }
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            errors.push(format!(
                "request_timeout_secs must be between 1 and 300, got {}",
                self.request_timeout_secs
            ));
        }

        if self.output_csv.as_os_str().is_empty() {
            errors.push("output_csv cannot be empty".to_string());
        }

        if self.plot_dir.as_os_str().is_empty() {
            errors.push("plot_dir cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Configured expiry, parsed
    pub fn expiry_date(&self) -> Result<Option<Date>, ConfigError> {
        self.expiry
            .as_deref()
            .map(Date::parse_exchange)
            .transpose()
            .map_err(|e| ConfigError::Validation(vec![e.to_string()]))
    }

    /// HTTP timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BsCompareConfig::default();
        assert_eq!(config.symbol, "NIFTY");
        assert_eq!(config.spot_ticker, "^NSEI");
        assert_eq!(config.risk_free_rate, 0.055);
        assert_eq!(config.day_count, DayCountConvention::Trading252);
        assert_eq!(
            config.output_csv,
            PathBuf::from("data/nifty50_bs_comparison.csv")
        );
        assert!(config.expiry.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "expiry = \"28-Aug-2025\"\nrisk_free_rate = 0.0525\nday_count = \"ACT/365F\"\nspot_source = \"nse\""
        )
        .unwrap();

        let config = BsCompareConfig::load(file.path()).unwrap();
        assert_eq!(config.expiry.as_deref(), Some("28-Aug-2025"));
        assert_eq!(config.risk_free_rate, 0.0525);
        assert_eq!(config.day_count, DayCountConvention::Actual365Fixed);
        assert_eq!(config.spot_source, SpotSourceKind::Nse);
        assert_eq!(config.symbol, "NIFTY");
        assert_eq!(
            config.expiry_date().unwrap(),
            Some(Date::from_ymd(2025, 8, 28).unwrap())
        );
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "risk_free_rate = \"high\"").unwrap();
        assert!(matches!(
            BsCompareConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            BsCompareConfig::load_or_default(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.symbol, "NIFTY");
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("BSCOMPARE_SPOT_TICKER", "^NSEBANK");
        let config = BsCompareConfig::default().with_env_override();
        assert_eq!(config.spot_ticker, "^NSEBANK");
        std::env::remove_var("BSCOMPARE_SPOT_TICKER");
    }

    #[test]
    fn test_overrides() {
        let config = BsCompareConfig::default().with_overrides(overrides(&[
            ("BSCOMPARE_SYMBOL", "BANKNIFTY"),
            ("BSCOMPARE_RISK_FREE_RATE", "0.06"),
            ("BSCOMPARE_DAY_COUNT", "act/360"),
            ("BSCOMPARE_EXPIRY", "25-Sep-2025"),
            ("BSCOMPARE_SPOT_SOURCE", "NSE"),
            ("BSCOMPARE_REQUEST_TIMEOUT_SECS", "30"),
        ]));
        assert_eq!(config.symbol, "BANKNIFTY");
        assert_eq!(config.risk_free_rate, 0.06);
        assert_eq!(config.day_count, DayCountConvention::Actual360);
        assert_eq!(config.expiry.as_deref(), Some("25-Sep-2025"));
        assert_eq!(config.spot_source, SpotSourceKind::Nse);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_overrides_fail_validation() {
        let config = BsCompareConfig::default().with_overrides(overrides(&[
            ("BSCOMPARE_RISK_FREE_RATE", "five percent"),
            ("BSCOMPARE_REQUEST_TIMEOUT_SECS", "soon"),
        ]));
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("risk_free_rate")));
                assert!(errors.iter().any(|e| e.contains("request_timeout_secs")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = BsCompareConfig {
            log_level: "loud".to_string(),
            risk_free_rate: 5.5,
            expiry: Some("2025-08-28".to_string()),
            nse_base_url: "www.nseindia.com".to_string(),
            ..BsCompareConfig::default()
        };

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("percentage")));
                assert!(errors.iter().any(|e| e.contains("DD-Mon-YYYY")));
                assert!(errors.iter().any(|e| e.contains("nse_base_url")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_valid_log_levels() {
        for level in &["trace", "debug", "info", "warn", "error", "INFO", "DEBUG"] {
            let config = BsCompareConfig {
                log_level: level.to_string(),
                ..BsCompareConfig::default()
            };
            assert!(config.validate().is_ok(), "{} should be valid", level);
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Validation errors: a; b");
    }
}
