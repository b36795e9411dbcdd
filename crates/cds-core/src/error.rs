//! Error types for the CDS standard model core.
//!
//! This module defines the error taxonomy shared across the workspace,
//! following the component error kinds described by the model: invalid
//! input, domain violations, file errors, solver errors, and allocation
//! failures.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for `cds-core` operations.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Malformed date, unknown DCC/BDC/stub string, out-of-range year,
    /// non-ascending date list, unknown instrument letter.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid input.
        message: String,
    },

    /// Negative discount factor, log of non-positive discount, zero-length
    /// period where a denominator is required, recovery outside `[0,1)`.
    #[error("domain violation: {message}")]
    DomainViolation {
        /// Description of the violated domain constraint.
        message: String,
    },

    /// Holiday file missing, unreadable, or containing contradictory content.
    #[error("file error: {message}")]
    FileError {
        /// Description of the file error.
        message: String,
    },

    /// Root finder failed to bracket a root or exhausted its iteration budget.
    #[error("solver error: {message}")]
    SolverError {
        /// Description of the solver failure.
        message: String,
    },

    /// Reserved for host/embedding allocation failures; not raised by this
    /// crate directly, kept for parity with the wider error taxonomy.
    #[error("allocation error: {message}")]
    AllocationError {
        /// Description of the allocation failure.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a domain-violation error.
    #[must_use]
    pub fn domain_violation(message: impl Into<String>) -> Self {
        Self::DomainViolation {
            message: message.into(),
        }
    }

    /// Creates a file error.
    #[must_use]
    pub fn file_error(message: impl Into<String>) -> Self {
        Self::FileError {
            message: message.into(),
        }
    }

    /// Creates a solver error.
    #[must_use]
    pub fn solver_error(message: impl Into<String>) -> Self {
        Self::SolverError {
            message: message.into(),
        }
    }

    /// Creates an allocation error.
    #[must_use]
    pub fn allocation_error(message: impl Into<String>) -> Self {
        Self::AllocationError {
            message: message.into(),
        }
    }
}
