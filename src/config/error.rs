//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Session TTL must be at least 1 minute")]
    InvalidSessionTtl,

    #[error("Cancellation fee percent must be between 0 and 100")]
    InvalidFeePercent,

    #[error("Cancellation fee cap must not be negative")]
    InvalidFeeCap,

    #[error("Minimum refund must not be negative")]
    InvalidMinimumRefund,
}
