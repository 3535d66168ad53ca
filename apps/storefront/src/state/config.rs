//! # Storefront Configuration
//!
//! Read-only configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPIT_*`)
//! 2. Config file (`storefront.toml` in the platform config dir)
//! 3. Defaults (this file)
//!
//! ## Example `storefront.toml`
//! ```toml
//! [store]
//! name = "Shop It"
//! currency_code = "INR"
//! currency_symbol = "₹"
//! delivery_charge = 49
//!
//! [api]
//! base_url = "http://localhost:3003"
//! timeout_secs = 30
//!
//! [payment]
//! key_id = "rzp_test_xxxxxxxx"
//! theme_color = "#0f9d58"
//!
//! [storage]
//! database_path = "/var/lib/shopit/shopit.db"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopit_core::Money;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{AppError, ErrorCode};

/// Config file name inside the platform config dir.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Database file name inside the platform data dir.
pub const DATABASE_FILE_NAME: &str = "shopit.db";

/// Largest `currency_decimals` the formatter accepts.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the platform {0} directory")]
    NoPlatformDir(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::Internal, err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Store identity and pricing shown in the price details box and the
/// payment widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub name: String,
    pub description: String,

    /// ISO 4217, handed to the payment widget.
    pub currency_code: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,

    /// Flat delivery charge added to every order, in major units.
    pub delivery_charge: Money,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Shop It".to_string(),
            description: "Thank you for shopping with us.".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            delivery_charge: Money::from_major(49),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: shopit_remote::DEFAULT_BASE_URL.to_string(),
            timeout_secs: shopit_remote::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    /// Public key id passed to the widget. Empty in development.
    pub key_id: String,
    pub script_url: String,
    pub theme_color: String,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            key_id: String::new(),
            script_url: "https://checkout.razorpay.com/v1/checkout.js".to_string(),
            theme_color: "#0f9d58".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data dir location.
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// StorefrontConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`storefront.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.currency_code.trim().is_empty() {
            return Err(ConfigError::Invalid("currency_code must not be empty".into()));
        }

        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "API base URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.store.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most {}",
                MAX_CURRENCY_DECIMALS
            )));
        }

        if self.store.delivery_charge.is_negative() {
            return Err(ConfigError::Invalid(
                "delivery_charge must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies `SHOPIT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("SHOPIT_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(code) = lookup("SHOPIT_CURRENCY") {
            debug!(currency = %code, "Overriding currency from environment");
            self.store.currency_code = code;
        }

        if let Some(charge) = lookup("SHOPIT_DELIVERY_CHARGE") {
            match charge.parse::<i64>() {
                Ok(major) => self.store.delivery_charge = Money::from_major(major),
                Err(_) => warn!(value = %charge, "Ignoring non-numeric SHOPIT_DELIVERY_CHARGE"),
            }
        }

        if let Some(url) = lookup("SHOPIT_API_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("SHOPIT_API_TIMEOUT") {
            if let Ok(secs) = secs.parse::<u64>() {
                self.api.timeout_secs = secs;
            }
        }

        if let Some(key) = lookup("SHOPIT_PAYMENT_KEY_ID") {
            self.payment.key_id = key;
        }

        if let Some(path) = lookup("SHOPIT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopit", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Resolves the database file location.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.shopit.storefront/shopit.db`
    /// - **Windows**: `%APPDATA%\shopit\storefront\data\shopit.db`
    /// - **Linux**: `~/.local/share/storefront/shopit.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = directories::ProjectDirs::from("com", "shopit", "storefront")
            .ok_or(ConfigError::NoPlatformDir("data"))?;
        Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_minor(123_450)), "₹1234.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let minor = amount.minor();
        let decimals = u32::from(self.store.currency_decimals.min(MAX_CURRENCY_DECIMALS));
        let divisor = 10_i64.pow(decimals);
        // Money always carries two minor digits; rescale for other currencies
        let scaled = if decimals >= 2 {
            minor.saturating_mul(10_i64.pow(decimals - 2))
        } else {
            minor / 10_i64.pow(2 - decimals)
        };
        let whole = (scaled / divisor).unsigned_abs();
        let frac = (scaled % divisor).unsigned_abs();

        format!(
            "{}{}{}",
            if scaled < 0 { "-" } else { "" },
            self.store.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.store.name, "Shop It");
        assert_eq!(config.store.currency_code, "INR");
        assert_eq!(config.store.delivery_charge, Money::from_major(49));
        assert_eq!(config.api.base_url, "http://localhost:3003");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_major(1234)), "₹1234.00");
        assert_eq!(config.format_currency(Money::from_minor(5)), "₹0.05");
        assert_eq!(config.format_currency(Money::from_minor(-150)), "-₹1.50");
    }

    #[test]
    fn test_format_currency_without_decimals() {
        let mut config = StorefrontConfig::default();
        config.store.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_major(49)), "₹49");
    }

    #[test]
    fn test_currency_decimals_are_bounded() {
        let config: StorefrontConfig = toml::from_str("[store]\ncurrency_decimals = 19").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        // Formatting an unvalidated value still renders instead of overflowing
        assert_eq!(config.format_currency(Money::from_major(49)), "₹49.0000");

        let mut config = StorefrontConfig::default();
        config.store.currency_decimals = MAX_CURRENCY_DECIMALS;
        assert!(config.validate().is_ok());
        assert_eq!(config.format_currency(Money::from_minor(150)), "₹1.5000");
        assert!(config
            .format_currency(Money::from_minor(i64::MIN))
            .starts_with("-₹922337203685477."));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
            [store]
            delivery_charge = 99

            [api]
            base_url = "https://shop.example.com"
            "#,
        )
        .unwrap();

        let config = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(config.store.delivery_charge, Money::from_major(99));
        assert_eq!(config.store.name, "Shop It");
        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[store\nname = ").unwrap();

        assert!(matches!(
            StorefrontConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(overrides(&[
            ("SHOPIT_API_URL", "http://127.0.0.1:9000"),
            ("SHOPIT_DELIVERY_CHARGE", "0"),
            ("SHOPIT_DB_PATH", "/tmp/shopit-test.db"),
        ]));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.store.delivery_charge, Money::from_minor(0));
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/shopit-test.db")
        );
    }

    #[test]
    fn test_bad_numeric_override_is_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(overrides(&[
            ("SHOPIT_DELIVERY_CHARGE", "forty"),
            ("SHOPIT_API_TIMEOUT", "-1"),
        ]));

        assert_eq!(config.store.delivery_charge, Money::from_major(49));
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.api.base_url = "localhost:3003".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StorefrontConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.store.currency_code = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.store.currency_symbol, "₹");
    }
}
