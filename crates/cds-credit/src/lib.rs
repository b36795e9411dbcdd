//! Credit curve bootstrap and CDS pricing for the ISDA CDS standard model.
//!
//! This crate sits on top of `cds-core` (dates, calendars, schedules) and
//! `cds-curves` (discount curves, the `CreditCurve` wrapper) to provide:
//!
//! - **Credit curve bootstrap**: pillar-by-pillar survival-probability
//!   calibration from a term structure of par CDS quotes.
//! - **CDS pricing**: protection and premium leg present values, clean and
//!   dirty prices, and par spreads.
//! - **Upfront/spread conversion**: the standard model's running-coupon to
//!   upfront-points translation, and its inverse.

pub mod conversion;
pub mod curve;
pub mod error;
pub mod pricer;

pub use conversion::{
    spread_to_upfront, upfront_to_spread, ConversionConventions, UpfrontConversionResult,
};
pub use curve::{CdsQuote, CreditCurveBuilder};
pub use error::{CreditError, CreditResult};
pub use pricer::{par_spread, premium_leg_annuity, price_cds, protection_leg_pv, CdsPriceResult};

/// Common imports for working with this crate.
pub mod prelude {
    pub use crate::conversion::{
        spread_to_upfront, upfront_to_spread, ConversionConventions, UpfrontConversionResult,
    };
    pub use crate::curve::{CdsQuote, CreditCurveBuilder};
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::pricer::{
        par_spread, premium_leg_annuity, price_cds, protection_leg_pv, CdsPriceResult,
    };
}
