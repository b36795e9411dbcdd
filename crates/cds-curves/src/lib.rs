//! # CDS Curves
//!
//! Term structure framework underpinning the ISDA CDS standard model: the
//! risk-free discount curve and the survival/hazard-rate credit curve.
//!
//! This crate provides:
//!
//! - **Curve Trait**: Core [`Curve`] trait for all curve operations
//! - **Term Structure**: Generic [`term_structure::TermStructure`]/[`value_type::ValueType`]
//!   abstraction shared by discount and credit curves
//! - **Curve Types**: Zero curves, discount curves, forward curves, spread curves
//! - **Wrappers**: [`wrappers::RateCurve`] (discount semantics) and
//!   [`wrappers::CreditCurve`] (survival/hazard/spread semantics) over any term structure
//! - **Bootstrap**: Curve construction from money-market and swap instruments
//! - **Interpolation**: Various interpolation methods for curves
//! - **Compounding**: Interest rate compounding conventions
//! - **Instruments**: Curve instruments for bootstrapping (deposits, swaps)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cds_curves::prelude::*;
//!
//! // Build a discount curve from pillar points
//! let curve = DiscountCurveBuilder::new(Date::from_ymd(2025, 1, 1).unwrap())
//!     .add_pillar(0.25, 0.99)   // 3M discount factor
//!     .add_pillar(0.5, 0.98)    // 6M
//!     .add_pillar(1.0, 0.96)    // 1Y
//!     .add_pillar(2.0, 0.92)    // 2Y
//!     .with_interpolation(InterpolationMethod::MonotoneConvex)
//!     .build()
//!     .unwrap();
//!
//! // Get discount factor at 1.5 years
//! let df = curve.discount_factor(1.5).unwrap();
//!
//! // Get continuously compounded zero rate
//! let rate = curve.zero_rate(1.5, Compounding::Continuous).unwrap();
//!
//! // Get forward rate between 1Y and 2Y
//! let fwd = curve.forward_rate(1.0, 2.0).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bootstrap;
pub mod compounding;
pub mod conventions;
pub mod conversion;
pub mod curves;
pub mod error;
pub mod instruments;
pub mod interpolation;
pub mod term_structure;
pub mod traits;
pub mod value_type;
pub mod wrappers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        build_discount_curve, build_zero_curve, SequentialBootstrapper, ZeroCurveConventions,
        ZeroCurveInstrument,
    };
    pub use crate::compounding::Compounding;
    pub use crate::conventions;
    pub use crate::curves::{
        DiscountCurve, DiscountCurveBuilder, ForwardCurve, SpreadCurve, SpreadType, ZeroCurve,
        ZeroCurveBuilder,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{CurveInstrument, Deposit, InstrumentType, RateIndex, Swap};
    pub use crate::interpolation::InterpolationMethod;
    pub use crate::traits::Curve;
    pub use crate::term_structure::TermStructure;
    pub use crate::value_type::{CreditSpreadConvention, ValueType};
    pub use crate::wrappers::{CreditCurve, RateCurve};
}

pub use compounding::Compounding;
pub use curves::{DiscountCurve, DiscountCurveBuilder, ZeroCurve, ZeroCurveBuilder};
pub use error::{CurveError, CurveResult};
pub use term_structure::TermStructure;
pub use traits::Curve;
pub use value_type::{CreditSpreadConvention, ValueType};
pub use wrappers::{CreditCurve, RateCurve};
