//! RideFare configuration
//!
//! Layered with the `config` crate:
//! 1. Built-in defaults
//! 2. Optional `ridefare.toml` (or an explicit path)
//! 3. `RIDEFARE__` environment variables, `__` between sections
//!    (e.g. `RIDEFARE__FEES__STOP_FEE=2.50`)

use config::{Config, Environment, File, FileFormat};
use ridefare_common::{FareError, FareQuote, FeeConfig, Result};
use serde::{Deserialize, Serialize};

/// Default configuration file name (extension resolved by `config`)
pub const DEFAULT_CONFIG_FILE: &str = "ridefare";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RIDEFARE";

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FareSettings {
    /// Fee parameters
    pub fees: FeeConfig,
    /// Quote validity in milliseconds
    pub quote_validity_ms: u64,
}

impl Default for FareSettings {
    fn default() -> Self {
        Self {
            fees: FeeConfig::default(),
            quote_validity_ms: FareQuote::DEFAULT_VALIDITY_MS,
        }
    }
}

impl FareSettings {
    /// Load configuration from `.env`, the default file, and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        Self::from_builder(builder)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings: Self = builder
            .build()
            .map_err(|e| FareError::Config(format!("Failed to read configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| FareError::Config(format!("Failed to parse configuration: {}", e)))?;

        settings.fees.validate()?;
        Ok(settings)
    }
}
