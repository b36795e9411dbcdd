//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid coupon/spread rate, expressed in basis points.
    #[error("Invalid spread: {0} bps. Must be between 0 and 10000.")]
    InvalidSpread(f64),

    /// Invalid recovery rate.
    #[error("Invalid recovery rate: {0}. Must be in [0, 1).")]
    InvalidRecovery(f64),

    /// Invalid price.
    #[error("Invalid price: {0}.")]
    InvalidPrice(f64),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
