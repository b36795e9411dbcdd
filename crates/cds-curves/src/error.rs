//! Error types for curve operations.

use cds_core::Date;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur during curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Curve construction failed.
    #[error("Curve construction failed: {reason}")]
    ConstructionFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Requested date is outside curve range.
    #[error("Date {date} is outside curve range [{min_date}, {max_date}]")]
    DateOutOfRange {
        /// The requested date.
        date: Date,
        /// Minimum date in curve.
        min_date: Date,
        /// Maximum date in curve.
        max_date: Date,
    },

    /// Bootstrap failed to converge.
    #[error("Bootstrap failed at tenor {tenor}: {reason}")]
    BootstrapFailed {
        /// The tenor where bootstrap failed.
        tenor: String,
        /// Description of the failure.
        reason: String,
    },

    /// Invalid curve data.
    #[error("Invalid curve data: {reason}")]
    InvalidData {
        /// Description of what's invalid.
        reason: String,
    },

    /// Interpolation error.
    #[error("Interpolation failed: {reason}")]
    InterpolationFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Missing reference date.
    #[error("Reference date not set")]
    MissingReferenceDate,

    /// No data points in curve.
    #[error("Curve has no data points")]
    EmptyCurve,

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] cds_core::CoreError),

    /// Repricing validation failed.
    #[error("Repricing validation failed: {failed_count} instruments exceeded tolerance (max error: {max_error:.2e})")]
    RepricingFailed {
        /// Number of instruments that failed
        failed_count: usize,
        /// Maximum repricing error
        max_error: f64,
        /// Names of failed instruments
        failed_instruments: Vec<String>,
    },

    /// Requested tenor is outside the curve's valid range.
    #[error("Tenor {tenor} is outside curve range [{min}, {max}]")]
    TenorOutOfRange {
        /// Requested tenor in years.
        tenor: f64,
        /// Minimum supported tenor.
        min: f64,
        /// Maximum supported tenor.
        max: f64,
    },

    /// A value type is incompatible with the requested operation.
    #[error("Expected value type {expected}, found {found}")]
    IncompatibleValueType {
        /// The value type the operation requires.
        expected: String,
        /// The value type actually found.
        found: String,
    },

    /// A value was invalid for the requested operation.
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of what was invalid.
        reason: String,
    },

    /// A numerical error occurred evaluating the curve.
    #[error("Math error: {reason}")]
    MathError {
        /// Description of the failure.
        reason: String,
    },

    /// The underlying curve does not expose an analytic derivative at this tenor.
    #[error("Derivative not available at tenor {tenor}")]
    DerivativeNotAvailable {
        /// The tenor where the derivative was requested.
        tenor: f64,
    },

    /// Curve builder configuration error.
    #[error("Curve builder error: {reason}")]
    BuilderError {
        /// Description of the failure.
        reason: String,
    },

    /// Calibration to market instruments failed.
    #[error("Calibration failed after {iterations} iterations (residual {residual:.2e}): {reason}")]
    CalibrationFailed {
        /// Iterations attempted before giving up.
        iterations: usize,
        /// Final residual.
        residual: f64,
        /// Description of the failure.
        reason: String,
    },

    /// A named curve could not be found in a multi-curve environment.
    #[error("Curve not found: {name}")]
    CurveNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// Too few data points to build a curve of the requested kind.
    #[error("Insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points required.
        required: usize,
        /// Number of points actually supplied.
        actual: usize,
    },

    /// Interpolation/extrapolation evaluation error.
    #[error("Interpolation error: {reason}")]
    InterpolationError {
        /// Description of the failure.
        reason: String,
    },

    /// Curve pillar tenors are not strictly increasing.
    #[error("Tenors not monotonically increasing at index {index}: {prev} >= {next}")]
    NonMonotonicTenors {
        /// Index of the offending pillar.
        index: usize,
        /// The preceding tenor.
        prev: f64,
        /// The offending (non-increasing) tenor.
        next: f64,
    },

    /// Two adjacent curve segments overlap.
    #[error("Curve segments overlap at tenor {tenor}")]
    SegmentOverlap {
        /// The tenor at which the overlap begins.
        tenor: f64,
    },

    /// Two adjacent curve segments leave a gap.
    #[error("Curve segments leave a gap between {from} and {to}")]
    SegmentGap {
        /// End of the preceding segment.
        from: f64,
        /// Start of the following segment.
        to: f64,
    },
}

impl CurveError {
    /// Creates a construction failed error.
    #[must_use]
    pub fn construction_failed(reason: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            reason: reason.into(),
        }
    }

    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }

    /// Creates a bootstrap failed error.
    #[must_use]
    pub fn bootstrap_failed(tenor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BootstrapFailed {
            tenor: tenor.into(),
            reason: reason.into(),
        }
    }

    /// Creates a repricing failed error.
    #[must_use]
    pub fn repricing_failed(
        failed_count: usize,
        max_error: f64,
        failed_instruments: Vec<String>,
    ) -> Self {
        Self::RepricingFailed {
            failed_count,
            max_error,
            failed_instruments,
        }
    }

    /// Creates a tenor-out-of-range error.
    #[must_use]
    pub fn tenor_out_of_range(tenor: f64, min: f64, max: f64) -> Self {
        Self::TenorOutOfRange { tenor, min, max }
    }

    /// Creates an incompatible-value-type error.
    #[must_use]
    pub fn incompatible_value_type(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::IncompatibleValueType {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Creates a builder error.
    #[must_use]
    pub fn builder_error(reason: impl Into<String>) -> Self {
        Self::BuilderError {
            reason: reason.into(),
        }
    }

    /// Creates a calibration-failed error.
    #[must_use]
    pub fn calibration_failed(
        iterations: usize,
        residual: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::CalibrationFailed {
            iterations,
            residual,
            reason: reason.into(),
        }
    }

    /// Creates a curve-not-found error.
    #[must_use]
    pub fn curve_not_found(name: impl Into<String>) -> Self {
        Self::CurveNotFound { name: name.into() }
    }

    /// Creates an insufficient-points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Creates an interpolation error.
    #[must_use]
    pub fn interpolation_error(reason: impl Into<String>) -> Self {
        Self::InterpolationError {
            reason: reason.into(),
        }
    }

    /// Creates a non-monotonic-tenors error.
    #[must_use]
    pub fn non_monotonic_tenors(index: usize, prev: f64, next: f64) -> Self {
        Self::NonMonotonicTenors { index, prev, next }
    }
}
