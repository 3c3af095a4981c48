//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `SHOPWAI_DATA_DIR` - Directory holding the key-value files (default: .shopwai)
//! - `SHOPWAI_KEY_PREFIX` - Prefix for every storage key (default: shopwai)
//! - `SHOPWAI_CURRENCY` - Display currency, ISO 4217 (default: BRL)
//! - `SHOPWAI_SEED_SAMPLE_PRODUCTS` - Seed sample products into an empty store (default: true)
//! - `SHOPWAI_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SHOPWAI_PASSWORD_MEMORY_KIB` - Argon2 memory cost (default: 19456)
//! - `SHOPWAI_PASSWORD_ITERATIONS` - Argon2 time cost (default: 2)
//! - `RUST_LOG` - Log filter, read by the tracing subscriber

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use shopwai_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the key-value files
    pub data_dir: PathBuf,
    /// Prefix joined to every storage key with `_`
    pub key_prefix: String,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Write the sample products the first time the store is opened
    pub seed_sample_products: bool,
    /// Logging configuration
    pub log: LogConfig,
    /// Argon2 cost parameters
    pub password_hashing: PasswordHashing,
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected pretty or json, got {other}")),
        }
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashing {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl PasswordHashing {
    /// The cheapest parameters Argon2 accepts. For tests and throwaway demos only.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".shopwai"),
            key_prefix: "shopwai".to_string(),
            currency: CurrencyCode::default(),
            seed_sample_products: true,
            log: LogConfig::default(),
            password_hashing: PasswordHashing::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = env("SHOPWAI_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let key_prefix = get_env_or_default(&env, "SHOPWAI_KEY_PREFIX", &defaults.key_prefix);
        validate_key_prefix(&key_prefix, "SHOPWAI_KEY_PREFIX")?;
        let currency = parse_env_or(&env, "SHOPWAI_CURRENCY", defaults.currency)?;
        let seed_sample_products = match env("SHOPWAI_SEED_SAMPLE_PRODUCTS") {
            Some(value) => parse_bool(&value, "SHOPWAI_SEED_SAMPLE_PRODUCTS")?,
            None => defaults.seed_sample_products,
        };
        let log = LogConfig {
            format: parse_env_or(&env, "SHOPWAI_LOG_FORMAT", LogFormat::default())?,
        };
        let password_hashing = PasswordHashing {
            memory_kib: parse_env_or(
                &env,
                "SHOPWAI_PASSWORD_MEMORY_KIB",
                defaults.password_hashing.memory_kib,
            )?,
            iterations: parse_env_or(
                &env,
                "SHOPWAI_PASSWORD_ITERATIONS",
                defaults.password_hashing.iterations,
            )?,
            parallelism: defaults.password_hashing.parallelism,
        };

        Ok(Self {
            data_dir,
            key_prefix,
            currency,
            seed_sample_products,
            log,
            password_hashing,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(env: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(env: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

fn parse_bool(value: &str, key: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other}"),
        )),
    }
}

/// Storage keys become file names, so the prefix is restricted to a safe charset.
fn validate_key_prefix(prefix: &str, var_name: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if let Some(c) = prefix
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("contains invalid character '{c}'"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".shopwai"));
        assert_eq!(config.key_prefix, "shopwai");
        assert_eq!(config.currency, CurrencyCode::BRL);
        assert!(config.seed_sample_products);
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert_eq!(config.password_hashing, PasswordHashing::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOPWAI_DATA_DIR", "/tmp/store"),
            ("SHOPWAI_KEY_PREFIX", "demo-1"),
            ("SHOPWAI_CURRENCY", "usd"),
            ("SHOPWAI_SEED_SAMPLE_PRODUCTS", "off"),
            ("SHOPWAI_LOG_FORMAT", "JSON"),
            ("SHOPWAI_PASSWORD_MEMORY_KIB", "64"),
            ("SHOPWAI_PASSWORD_ITERATIONS", "1"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/store"));
        assert_eq!(config.key_prefix, "demo-1");
        assert_eq!(config.currency, CurrencyCode::USD);
        assert!(!config.seed_sample_products);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.password_hashing.memory_kib, 64);
        assert_eq!(config.password_hashing.iterations, 1);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        for (key, value) in [
            ("SHOPWAI_KEY_PREFIX", "../etc"),
            ("SHOPWAI_KEY_PREFIX", ""),
            ("SHOPWAI_CURRENCY", "JPY"),
            ("SHOPWAI_SEED_SAMPLE_PRODUCTS", "maybe"),
            ("SHOPWAI_LOG_FORMAT", "xml"),
            ("SHOPWAI_PASSWORD_ITERATIONS", "-1"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            let ConfigError::InvalidEnvVar(name, _) = err;
            assert_eq!(name, key);
        }
    }
}
