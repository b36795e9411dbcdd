//! Curve bootstrap algorithms.
//!
//! This module provides algorithms for constructing yield curves from
//! money-market and swap instruments.

pub mod sequential;
pub mod zero_curve;

pub use sequential::SequentialBootstrapper;
pub use zero_curve::{build_discount_curve, build_zero_curve, ZeroCurveConventions, ZeroCurveInstrument};
