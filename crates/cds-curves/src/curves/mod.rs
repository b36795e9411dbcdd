//! Curve implementations.
//!
//! This module provides concrete curve types:
//!
//! - [`DiscreteCurve`]: Curve from discrete point data with interpolation
//! - [`SegmentedCurve`]: Multiple segments with different sources/interpolation
//! - [`DelegatedCurve`]: Wraps another curve with fallback handling
//! - [`DerivedCurve`]: Transforms a base curve (shift, spread, scale)
//! - [`DiscountCurve`] / [`DiscountCurveBuilder`]: Pillar-based discount curve
//! - [`ZeroCurve`] / [`ZeroCurveBuilder`]: Pillar-based zero-rate curve
//! - [`ForwardCurve`]: Forward rates derived from a [`ZeroCurve`]
//! - [`SpreadCurve`]: Additive/multiplicative spread over a base curve

mod discount;
mod discrete;
mod derived;
mod delegated;
mod forward;
mod segmented;
pub mod shifted;
mod spread;
mod zero;

pub use discount::{DiscountCurve, DiscountCurveBuilder};
pub use discrete::DiscreteCurve;
pub use derived::{CurveTransform, DerivedCurve};
pub use delegated::{DelegatedCurve, DelegationFallback};
pub use forward::ForwardCurve;
pub use segmented::{CurveSegment, SegmentedCurve, SegmentSource};
pub use shifted::{BlendedCurve, ScaledCurve, ShiftedCurve};
pub use spread::{SpreadCurve, SpreadCurveBuilder, SpreadType};
pub use zero::{ZeroCurve, ZeroCurveBuilder};
