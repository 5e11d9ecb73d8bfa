//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `PREPBILL_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use prepbill::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let policy = config.billing.refund_policy();
//! ```

mod billing;
mod error;

pub use billing::BillingConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment
/// variables. Every section has working defaults, so an empty
/// environment is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing configuration (coupon sessions, refund policy)
    #[serde(default)]
    pub billing: BillingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PREPBILL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PREPBILL__BILLING__SESSION_TTL_MINUTES=15`
    /// - `PREPBILL__BILLING__FEE_PERCENT=10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PREPBILL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.billing.validate()?;
        Ok(())
    }
}
