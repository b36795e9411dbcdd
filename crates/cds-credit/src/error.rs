//! Error types for credit curve bootstrap and CDS pricing.

use thiserror::Error;

/// A specialized Result type for `cds-credit` operations.
pub type CreditResult<T> = Result<T, CreditError>;

/// The main error type for `cds-credit` operations.
#[derive(Error, Debug, Clone)]
pub enum CreditError {
    /// A date/calendar/day-count error from `cds-core`.
    #[error(transparent)]
    Core(#[from] cds_core::CoreError),

    /// A curve construction or evaluation error from `cds-curves`.
    #[error(transparent)]
    Curve(#[from] cds_curves::CurveError),

    /// A root-finding error from `cds-math`.
    #[error(transparent)]
    Math(#[from] cds_math::MathError),

    /// No par CDS quotes were supplied to the bootstrapper.
    #[error("no CDS quotes supplied for bootstrap")]
    NoQuotes,

    /// Quote tenors are not strictly ascending, or a quote's maturity
    /// precedes the curve's step-in date.
    #[error("invalid quote schedule: {message}")]
    InvalidQuotes {
        /// Description of the problem.
        message: String,
    },

    /// The pillar-by-pillar bootstrap could not find a survival probability
    /// that reprices a quote, even after repeatedly reducing the recovery
    /// rate.
    #[error(
        "bootstrap failed to reprice quote at {tenor} after {attempts} recovery-rate \
         retries (last recovery tried: {last_recovery:.4})"
    )]
    BootstrapFailed {
        /// The pillar date that could not be repriced.
        tenor: cds_core::Date,
        /// Number of recovery-rate retries attempted.
        attempts: u32,
        /// The last recovery rate tried before giving up.
        last_recovery: f64,
    },

    /// The recovery rate is outside the valid `[0, 1)` domain.
    #[error("invalid recovery rate: {recovery} is outside [0, 1)")]
    InvalidRecovery {
        /// The out-of-range recovery rate.
        recovery: f64,
    },

    /// A CDS pricing request referenced a date outside the premium
    /// schedule's coverage (e.g. settle date after maturity).
    #[error("invalid pricing dates: {message}")]
    InvalidPricingDates {
        /// Description of the problem.
        message: String,
    },
}
