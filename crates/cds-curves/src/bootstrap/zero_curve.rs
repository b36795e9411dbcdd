//! Zero-curve bootstrap from money-market and swap instruments.
//!
//! Builds a [`ZeroCurve`] from an ordered list of money-market (`M`) and par
//! swap (`S`) instruments: a strictly chronological instrument list, advanced
//! to a spot date, with the money-market leg solving `Z = 1 / (1 + r * tau)`
//! and the swap leg solving for the discount factor that equates the fixed
//! (30/360) and floating (ACT/360) leg present values. Internally this
//! reuses [`Deposit`], [`Swap`] and [`SequentialBootstrapper`] to do the
//! actual solving, then re-expresses the solved discount factors as
//! annualized ACT/365F zero rates on a [`ZeroCurve`].

use cds_core::calendars::{BusinessDayConvention, Calendar};
use cds_core::daycounts::DayCountConvention;
use cds_core::types::Frequency;
use cds_core::Date;

use crate::curves::{DiscountCurve, ZeroCurve, ZeroCurveBuilder};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Deposit, Swap};
use crate::interpolation::InterpolationMethod;
use crate::traits::Curve;

use super::SequentialBootstrapper;

/// A single pillar in a zero-curve bootstrap instrument list.
///
/// Corresponds to the `M` (money market) and `S` (par swap) instrument
/// letters: each pillar carries its own maturity date and quoted rate, and
/// the list as a whole must be supplied in strictly ascending date order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZeroCurveInstrument {
    /// Money-market instrument (`M`): simple rate to a maturity date.
    Money {
        /// Maturity date.
        date: Date,
        /// Simple interest rate (decimal, e.g. 0.05 for 5%).
        rate: f64,
    },
    /// Par swap instrument (`S`): fixed-vs-floating par rate to a maturity date.
    Swap {
        /// Maturity date.
        date: Date,
        /// Par swap rate (decimal).
        rate: f64,
    },
}

impl ZeroCurveInstrument {
    /// Returns the instrument's maturity date.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            Self::Money { date, .. } | Self::Swap { date, .. } => *date,
        }
    }

    /// Returns the instrument's quoted rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        match self {
            Self::Money { rate, .. } | Self::Swap { rate, .. } => *rate,
        }
    }
}

/// Day count and frequency conventions for a zero-curve bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct ZeroCurveConventions {
    /// Day count for money-market instruments.
    pub mm_day_count: DayCountConvention,
    /// Fixed leg payment frequency for swap instruments.
    pub fixed_frequency: Frequency,
    /// Fixed leg day count for swap instruments.
    pub fixed_day_count: DayCountConvention,
    /// Float leg payment frequency for swap instruments (metadata only).
    pub float_frequency: Frequency,
    /// Business day convention used to roll the value date to the spot date.
    pub business_day_convention: BusinessDayConvention,
}

impl Default for ZeroCurveConventions {
    fn default() -> Self {
        Self {
            mm_day_count: DayCountConvention::Act360,
            fixed_frequency: Frequency::SemiAnnual,
            fixed_day_count: DayCountConvention::Thirty360US,
            float_frequency: Frequency::Quarterly,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
        }
    }
}

/// Number of business days from value date to spot date.
const SPOT_LAG_DAYS: i32 = 2;

/// Bootstraps a zero curve from an ordered list of money-market and swap
/// instruments.
///
/// The value date is advanced `SPOT_LAG_DAYS` business days (under
/// `conventions.business_day_convention`) to the spot/reference date that
/// anchors the curve. Money-market instruments are priced with `Deposit`
/// (`Z = 1 / (1 + r * tau)` under `conventions.mm_day_count`); swap
/// instruments are priced with `Swap` (fixed leg at `conventions.
/// fixed_day_count`/`fixed_frequency`, float leg priced by single-curve
/// telescoping). Each instrument's solved discount factor is converted to
/// an annualized ACT/365F zero rate and assembled into a [`ZeroCurve`] with
/// linear-in-time interpolation between knots and flat extrapolation
/// outside the instrument range.
///
/// # Errors
///
/// Returns an error if:
/// - `instruments` is empty
/// - instruments are not in strictly ascending date order
/// - any instrument matures on or before the spot date
/// - the bootstrap fails to solve a discount factor for any instrument
/// - a solved discount factor is not strictly positive
pub fn build_zero_curve(
    value_date: Date,
    instruments: &[ZeroCurveInstrument],
    calendar: &dyn Calendar,
    conventions: ZeroCurveConventions,
) -> CurveResult<ZeroCurve> {
    let discount_curve = build_discount_curve(value_date, instruments, calendar, conventions)?;

    let act365 = DayCountConvention::Act365Fixed.to_day_count();
    let mut builder = ZeroCurveBuilder::new()
        .reference_date(value_date)
        .interpolation(InterpolationMethod::Linear);

    for instrument in instruments {
        let tau = act365.year_fraction(value_date, instrument.date());
        let df = discount_curve.discount_factor_at(instrument.date())?;

        if df <= 0.0 {
            return Err(CurveError::bootstrap_failed(
                instrument.date().to_string(),
                format!("Implied discount factor is non-positive: {df}"),
            ));
        }

        let zero_rate = -df.ln() / tau;
        builder = builder.add_rate(instrument.date(), zero_rate);
    }

    builder.build()
}

/// Bootstraps the underlying discount curve from the same money-market and
/// swap instrument list, without the zero-rate re-expression step.
///
/// This is the discount-factor term structure that [`build_zero_curve`]
/// itself solves internally before converting knots to zero rates. Exposed
/// directly for consumers (credit-curve bootstrap, CDS conversion) that need
/// a `DiscountCurve` rather than a `ZeroCurve`.
///
/// # Errors
///
/// See [`build_zero_curve`].
pub fn build_discount_curve(
    value_date: Date,
    instruments: &[ZeroCurveInstrument],
    calendar: &dyn Calendar,
    conventions: ZeroCurveConventions,
) -> CurveResult<DiscountCurve> {
    if instruments.is_empty() {
        return Err(CurveError::invalid_data(
            "No instruments provided for zero-curve bootstrap",
        ));
    }

    for pair in instruments.windows(2) {
        if pair[1].date() <= pair[0].date() {
            return Err(CurveError::invalid_data(format!(
                "Instruments must be strictly ascending by date: {} is not after {}",
                pair[1].date(),
                pair[0].date()
            )));
        }
    }

    let spot_date = calendar
        .adjust(
            calendar.add_business_days(value_date, SPOT_LAG_DAYS),
            conventions.business_day_convention,
        )
        .map_err(|e| CurveError::invalid_data(format!("Failed to roll spot date: {e}")))?;

    let mut bootstrapper = SequentialBootstrapper::new(spot_date)
        .with_interpolation(InterpolationMethod::LogLinear)
        .with_extrapolation(true);

    for instrument in instruments {
        if instrument.date() <= spot_date {
            return Err(CurveError::invalid_data(format!(
                "Instrument maturity {} must be after spot date {}",
                instrument.date(),
                spot_date
            )));
        }

        bootstrapper = match instrument {
            ZeroCurveInstrument::Money { date, rate } => bootstrapper.add_instrument(
                Deposit::new(spot_date, *date, *rate).with_day_count(conventions.mm_day_count),
            ),
            ZeroCurveInstrument::Swap { date, rate } => bootstrapper.add_instrument(
                Swap::new(spot_date, *date, *rate, conventions.fixed_frequency)
                    .with_fixed_day_count(conventions.fixed_day_count)
                    .with_float_frequency(conventions.float_frequency),
            ),
        };
    }

    bootstrapper.bootstrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cds_core::calendars::WeekendCalendar;
    use crate::traits::Curve;

    fn value_date() -> Date {
        // A Monday, so spot = Wednesday two business days later.
        Date::from_ymd(2025, 1, 6).unwrap()
    }

    #[test]
    fn test_build_zero_curve_money_market_only() {
        let instruments = vec![
            ZeroCurveInstrument::Money {
                date: Date::from_ymd(2025, 4, 8).unwrap(),
                rate: 0.05,
            },
            ZeroCurveInstrument::Money {
                date: Date::from_ymd(2025, 7, 8).unwrap(),
                rate: 0.052,
            },
        ];

        let curve = build_zero_curve(
            value_date(),
            &instruments,
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        )
        .unwrap();

        assert_eq!(curve.dates().len(), 2);
        assert_eq!(curve.reference_date(), value_date());

        for &rate in curve.rates() {
            assert!(rate > 0.0 && rate < 0.1);
        }

        // Discount factor at value date is 1.0.
        assert!((curve.discount_factor(0.0).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_build_zero_curve_mixed_mm_and_swap() {
        let instruments = vec![
            ZeroCurveInstrument::Money {
                date: Date::from_ymd(2025, 4, 8).unwrap(),
                rate: 0.05,
            },
            ZeroCurveInstrument::Money {
                date: Date::from_ymd(2025, 7, 8).unwrap(),
                rate: 0.052,
            },
            ZeroCurveInstrument::Swap {
                date: Date::from_ymd(2027, 1, 8).unwrap(),
                rate: 0.045,
            },
            ZeroCurveInstrument::Swap {
                date: Date::from_ymd(2030, 1, 8).unwrap(),
                rate: 0.044,
            },
        ];

        let curve = build_zero_curve(
            value_date(),
            &instruments,
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        )
        .unwrap();

        assert_eq!(curve.dates().len(), 4);

        // Discount factors implied by the rates should decay monotonically.
        let mut prev_df = 1.0;
        for instrument in &instruments {
            let df = curve.discount_factor_at(instrument.date()).unwrap();
            assert!(df < prev_df, "discount factor should decrease along the curve");
            prev_df = df;
        }
    }

    #[test]
    fn test_build_zero_curve_empty_fails() {
        let result = build_zero_curve(
            value_date(),
            &[],
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_zero_curve_out_of_order_fails() {
        let instruments = vec![
            ZeroCurveInstrument::Money {
                date: Date::from_ymd(2025, 7, 8).unwrap(),
                rate: 0.052,
            },
            ZeroCurveInstrument::Money {
                date: Date::from_ymd(2025, 4, 8).unwrap(),
                rate: 0.05,
            },
        ];

        let result = build_zero_curve(
            value_date(),
            &instruments,
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_zero_curve_duplicate_date_fails() {
        let date = Date::from_ymd(2025, 4, 8).unwrap();
        let instruments = vec![
            ZeroCurveInstrument::Money { date, rate: 0.05 },
            ZeroCurveInstrument::Money { date, rate: 0.051 },
        ];

        let result = build_zero_curve(
            value_date(),
            &instruments,
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_discount_curve_matches_zero_curve() {
        let instruments = vec![
            ZeroCurveInstrument::Money {
                date: Date::from_ymd(2025, 4, 8).unwrap(),
                rate: 0.05,
            },
            ZeroCurveInstrument::Swap {
                date: Date::from_ymd(2027, 1, 8).unwrap(),
                rate: 0.045,
            },
        ];

        let discount_curve = build_discount_curve(
            value_date(),
            &instruments,
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        )
        .unwrap();
        let zero_curve = build_zero_curve(
            value_date(),
            &instruments,
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        )
        .unwrap();

        for instrument in &instruments {
            let df_discount = discount_curve.discount_factor_at(instrument.date()).unwrap();
            let df_zero = zero_curve.discount_factor_at(instrument.date()).unwrap();
            assert!(
                (df_discount - df_zero).abs() < 1e-8,
                "discount and zero curve should agree at instrument pillars"
            );
        }
    }

    #[test]
    fn test_build_zero_curve_matures_before_spot_fails() {
        let instruments = vec![ZeroCurveInstrument::Money {
            date: Date::from_ymd(2025, 1, 7).unwrap(),
            rate: 0.05,
        }];

        let result = build_zero_curve(
            value_date(),
            &instruments,
            &WeekendCalendar,
            ZeroCurveConventions::default(),
        );
        assert!(result.is_err());
    }
}
