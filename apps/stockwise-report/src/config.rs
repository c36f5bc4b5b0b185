//! # Report Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKWISE_AS_OF=2026-10-17                                         │
//! │     STOCKWISE_MAX_GROUP_WEIGHT_KG=25                                   │
//! │                                                                         │
//! │  2. TOML Config File (path in STOCKWISE_CONFIG)                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! warehouse_name = "North"
//! as_of = "2026-10-17"
//! max_group_weight_kg = "25"
//! expiring_within_days = 5
//! price_range_min = 500       # cents
//! price_range_max = 20000     # cents
//! search_term = "milk"
//!
//! [analyzer]
//! high_value_threshold = 50000
//! high_value_warning_percentage = 60.0
//! minimum_category_diversity = 3
//! outlier_threshold = 1.5
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockwise_core::validation::{validate_max_weight, validate_price_range};
use stockwise_core::{AnalyzerConfig, Money, ValidationError, DEFAULT_EXPIRING_WITHIN_DAYS};
use tracing::{debug, info};

/// Environment variable naming the TOML file.
pub const CONFIG_PATH_VAR: &str = "STOCKWISE_CONFIG";

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Warehouse the demo inventory is loaded into.
    pub warehouse_name: String,

    /// Reference date for expiration queries. `None` means today (UTC).
    pub as_of: Option<NaiveDate>,

    /// Capacity of one shipping group, in kilograms.
    pub max_group_weight_kg: Decimal,

    /// Look-ahead window for the "expiring soon" section.
    pub expiring_within_days: u32,

    /// Inclusive price band for the price range section.
    pub price_range_min: Money,
    pub price_range_max: Money,

    /// Name filter; empty lists everything.
    pub search_term: String,

    pub analyzer: AnalyzerConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            warehouse_name: "Main".to_string(),
            as_of: None,
            max_group_weight_kg: Decimal::from(10),
            expiring_within_days: DEFAULT_EXPIRING_WITHIN_DAYS,
            price_range_min: Money::from_cents(1_000),
            price_range_max: Money::from_cents(10_000),
            search_term: String::new(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Loads defaults, then the file named by `STOCKWISE_CONFIG`, then
    /// `STOCKWISE_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                debug!("No config file set, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading report config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `STOCKWISE_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOCKWISE_WAREHOUSE") {
            self.warehouse_name = name;
        }
        if let Some(date) = parse_var(&lookup, "STOCKWISE_AS_OF")? {
            self.as_of = Some(date);
        }
        if let Some(kg) = parse_var(&lookup, "STOCKWISE_MAX_GROUP_WEIGHT_KG")? {
            self.max_group_weight_kg = kg;
        }
        if let Some(days) = parse_var(&lookup, "STOCKWISE_EXPIRING_WITHIN_DAYS")? {
            self.expiring_within_days = days;
        }
        if let Some(cents) = parse_var(&lookup, "STOCKWISE_PRICE_MIN_CENTS")? {
            self.price_range_min = Money::from_cents(cents);
        }
        if let Some(cents) = parse_var(&lookup, "STOCKWISE_PRICE_MAX_CENTS")? {
            self.price_range_max = Money::from_cents(cents);
        }
        if let Some(term) = lookup("STOCKWISE_SEARCH_TERM") {
            self.search_term = term;
        }
        if let Some(cents) = parse_var(&lookup, "STOCKWISE_HIGH_VALUE_THRESHOLD_CENTS")? {
            self.analyzer.high_value_threshold = Money::from_cents(cents);
        }
        if let Some(pct) = parse_var(&lookup, "STOCKWISE_HIGH_VALUE_WARNING_PERCENTAGE")? {
            self.analyzer.high_value_warning_percentage = pct;
        }
        if let Some(count) = parse_var(&lookup, "STOCKWISE_MIN_CATEGORY_DIVERSITY")? {
            self.analyzer.minimum_category_diversity = count;
        }
        if let Some(threshold) = parse_var(&lookup, "STOCKWISE_OUTLIER_THRESHOLD")? {
            self.analyzer.outlier_threshold = threshold;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analyzer.validate()?;
        validate_price_range(self.price_range_min, self.price_range_max)?;
        validate_max_weight(self.max_group_weight_kg)?;
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))?;
            debug!(key, "Overriding config from environment");
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.max_group_weight_kg, dec!(10));
        assert_eq!(config.expiring_within_days, 3);
        assert!(config.as_of.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ReportConfig = toml::from_str(
            r#"
            warehouse_name = "North"
            as_of = "2026-10-17"
            max_group_weight_kg = "12.5"

            [analyzer]
            outlier_threshold = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.warehouse_name, "North");
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2026, 10, 17));
        assert_eq!(config.max_group_weight_kg, dec!(12.5));
        assert_eq!(config.analyzer.outlier_threshold, 3.0);
        assert_eq!(config.analyzer.minimum_category_diversity, 2);
        assert_eq!(config.price_range_max, Money::from_cents(10_000));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ReportConfig::default();
        config
            .apply_overrides(lookup(&[
                ("STOCKWISE_WAREHOUSE", "South"),
                ("STOCKWISE_AS_OF", "2026-01-31"),
                ("STOCKWISE_MAX_GROUP_WEIGHT_KG", " 25 "),
                ("STOCKWISE_PRICE_MIN_CENTS", "0"),
                ("STOCKWISE_HIGH_VALUE_THRESHOLD_CENTS", "50000"),
                ("STOCKWISE_OUTLIER_THRESHOLD", "2.5"),
            ]))
            .unwrap();

        assert_eq!(config.warehouse_name, "South");
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(config.max_group_weight_kg, dec!(25));
        assert_eq!(config.price_range_min, Money::zero());
        assert_eq!(config.analyzer.high_value_threshold, Money::from_cents(50_000));
        assert_eq!(config.analyzer.outlier_threshold, 2.5);
    }

    #[test]
    fn test_bad_env_value_names_the_variable() {
        let mut config = ReportConfig::default();
        let err = config
            .apply_overrides(lookup(&[("STOCKWISE_EXPIRING_WITHIN_DAYS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "STOCKWISE_EXPIRING_WITHIN_DAYS"));
    }

    #[test]
    fn test_validation_rejects_inverted_range_and_zero_capacity() {
        let mut config = ReportConfig {
            price_range_min: Money::from_cents(500),
            price_range_max: Money::from_cents(100),
            ..ReportConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.price_range_max = Money::from_cents(1_000);
        config.max_group_weight_kg = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ReportConfig::from_file(Path::new("/nonexistent/stockwise.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
