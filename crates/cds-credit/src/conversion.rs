//! Upfront points / running-coupon spread conversion.
//!
//! The standard model quotes a CDS either as a running spread or as an
//! upfront payment against a fixed contractual coupon. Converting between
//! the two requires calibrating a single flat-hazard-rate credit curve
//! against the quoted par spread, then repricing the deal's actual running
//! coupon against that curve to get the upfront (or vice versa).

use cds_core::calendars::{BusinessDayConvention, Calendar};
use cds_core::daycounts::DayCountConvention;
use cds_core::schedule::generate_schedule;
use cds_core::types::{Date, Frequency, StubMethod};
use cds_curves::curves::{DiscountCurve, DiscreteCurve};
use cds_curves::interpolation::InterpolationMethod;
use cds_curves::traits::Curve;
use cds_curves::value_type::ValueType;
use cds_curves::wrappers::CreditCurve;
use cds_math::solvers::{brent, SolverConfig};

use crate::error::CreditResult;
use crate::pricer::{par_spread, price_cds};

/// Root-finding bracket for the implied flat hazard rate, matching the
/// reference bootstrap driver's bounds: `[0, 100]` per annum, solved to
/// `1e-8` in both the root and the residual.
const BOUND_LO: f64 = 0.0;
const BOUND_HI: f64 = 100.0;
const NUM_ITERATIONS: u32 = 100;
const ROOT_TOLERANCE: f64 = 1e-8;

/// The result of converting between a quoted par spread and an upfront
/// payment for a fixed contractual coupon.
#[derive(Debug, Clone, Copy)]
pub struct UpfrontConversionResult {
    /// Upfront payment, as a fraction of notional (clean price).
    pub upfront: f64,
    /// Par spread implied by the calibrated flat curve, as a decimal.
    pub par_spread: f64,
    /// The single flat hazard rate calibrated to reprice the quote.
    pub flat_hazard_rate: f64,
    /// Clean price at the contractual coupon (identical to `upfront`).
    pub clean_price: f64,
    /// Accrued coupon from the current period start to the step-in date.
    pub accrued: f64,
}

/// Conventions shared by both conversion directions, to keep their
/// signatures from sprawling further.
#[derive(Debug, Clone, Copy)]
pub struct ConversionConventions {
    pub frequency: Frequency,
    pub stub_method: StubMethod,
    pub business_day_convention: BusinessDayConvention,
    pub payment_day_count: DayCountConvention,
    pub pay_accrued_on_default: bool,
}

impl Default for ConversionConventions {
    fn default() -> Self {
        Self {
            frequency: Frequency::Quarterly,
            stub_method: StubMethod::ShortBack,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            payment_day_count: DayCountConvention::Act360,
            pay_accrued_on_default: true,
        }
    }
}

fn flat_credit_curve(
    reference_date: Date,
    maturity_t: f64,
    hazard_rate: f64,
    recovery_rate: f64,
) -> CreditResult<CreditCurve<DiscreteCurve>> {
    let far = (maturity_t + 1.0).max(2.0);
    let inner = DiscreteCurve::new(
        reference_date,
        vec![0.0, maturity_t, far],
        vec![
            1.0,
            (-hazard_rate * maturity_t).exp(),
            (-hazard_rate * far).exp(),
        ],
        ValueType::SurvivalProbability,
        InterpolationMethod::LogLinear,
    )?;
    Ok(CreditCurve::new(inner, recovery_rate))
}

/// Converts a quoted par spread into the upfront payment for a CDS traded
/// at `coupon`.
#[allow(clippy::too_many_arguments)]
pub fn spread_to_upfront(
    coupon: f64,
    quoted_spread: f64,
    reference_date: Date,
    step_in: Date,
    settle: Date,
    maturity: Date,
    discount_curve: &DiscountCurve,
    recovery_rate: f64,
    calendar: &dyn Calendar,
    conventions: ConversionConventions,
) -> CreditResult<UpfrontConversionResult> {
    let dcc = conventions.payment_day_count.to_day_count();
    let schedule = generate_schedule(
        reference_date,
        maturity,
        conventions.frequency,
        conventions.stub_method,
        calendar,
        conventions.business_day_convention,
        dcc.as_ref(),
    )?;
    let t = discount_curve.year_fraction(maturity);

    let objective = |h: f64| -> f64 {
        match flat_credit_curve(reference_date, t, h, recovery_rate) {
            Ok(credit) => match par_spread(
                settle,
                step_in,
                maturity,
                &schedule,
                discount_curve,
                &credit,
                conventions.pay_accrued_on_default,
            ) {
                Ok(spread) => spread - quoted_spread,
                Err(_) => f64::NAN,
            },
            Err(_) => f64::NAN,
        }
    };

    let config = SolverConfig::new(ROOT_TOLERANCE, NUM_ITERATIONS);
    let result = brent(objective, BOUND_LO, BOUND_HI, &config)?;
    let flat_hazard_rate = result.root;

    let credit = flat_credit_curve(reference_date, t, flat_hazard_rate, recovery_rate)?;
    let price = price_cds(
        coupon,
        settle,
        step_in,
        &schedule,
        discount_curve,
        &credit,
        dcc.as_ref(),
        conventions.pay_accrued_on_default,
    )?;

    Ok(UpfrontConversionResult {
        upfront: price.clean_price,
        par_spread: quoted_spread,
        flat_hazard_rate,
        clean_price: price.clean_price,
        accrued: price.accrued,
    })
}

/// Converts an upfront payment (clean price, as a fraction of notional)
/// into the par spread that would produce it at the given coupon.
#[allow(clippy::too_many_arguments)]
pub fn upfront_to_spread(
    coupon: f64,
    target_upfront: f64,
    reference_date: Date,
    step_in: Date,
    settle: Date,
    maturity: Date,
    discount_curve: &DiscountCurve,
    recovery_rate: f64,
    calendar: &dyn Calendar,
    conventions: ConversionConventions,
) -> CreditResult<UpfrontConversionResult> {
    let dcc = conventions.payment_day_count.to_day_count();
    let schedule = generate_schedule(
        reference_date,
        maturity,
        conventions.frequency,
        conventions.stub_method,
        calendar,
        conventions.business_day_convention,
        dcc.as_ref(),
    )?;
    let t = discount_curve.year_fraction(maturity);

    let objective = |h: f64| -> f64 {
        match flat_credit_curve(reference_date, t, h, recovery_rate) {
            Ok(credit) => match price_cds(
                coupon,
                settle,
                step_in,
                &schedule,
                discount_curve,
                &credit,
                dcc.as_ref(),
                conventions.pay_accrued_on_default,
            ) {
                Ok(price) => price.clean_price - target_upfront,
                Err(_) => f64::NAN,
            },
            Err(_) => f64::NAN,
        }
    };

    let config = SolverConfig::new(ROOT_TOLERANCE, NUM_ITERATIONS);
    let result = brent(objective, BOUND_LO, BOUND_HI, &config)?;
    let flat_hazard_rate = result.root;

    let credit = flat_credit_curve(reference_date, t, flat_hazard_rate, recovery_rate)?;
    let price = price_cds(
        coupon,
        settle,
        step_in,
        &schedule,
        discount_curve,
        &credit,
        dcc.as_ref(),
        conventions.pay_accrued_on_default,
    )?;

    Ok(UpfrontConversionResult {
        upfront: price.clean_price,
        par_spread: price.par_spread,
        flat_hazard_rate,
        clean_price: price.clean_price,
        accrued: price.accrued,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cds_core::calendars::WeekendCalendar;
    use cds_curves::curves::DiscountCurveBuilder;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn flat_discount_curve(today: Date, rate: f64) -> DiscountCurve {
        DiscountCurveBuilder::new(today)
            .add_zero_rate(0.25, rate)
            .add_zero_rate(10.0, rate)
            .with_interpolation(InterpolationMethod::LogLinear)
            .with_extrapolation()
            .build()
            .unwrap()
    }

    #[test]
    fn spread_to_upfront_and_back_round_trips() {
        let today = d(2025, 1, 15);
        let discount = flat_discount_curve(today, 0.03);
        let cal = WeekendCalendar;
        let maturity = d(2030, 1, 15);
        let coupon = 0.0100;
        let conventions = ConversionConventions::default();

        let forward = spread_to_upfront(
            coupon, 0.0175, today, today, today, maturity, &discount, 0.40, &cal, conventions,
        )
        .unwrap();

        let back = upfront_to_spread(
            coupon,
            forward.upfront,
            today,
            today,
            today,
            maturity,
            &discount,
            0.40,
            &cal,
            conventions,
        )
        .unwrap();

        assert!((back.par_spread - 0.0175).abs() < 1e-6);
    }

    #[test]
    fn coupon_equal_to_par_spread_gives_zero_upfront() {
        let today = d(2025, 1, 15);
        let discount = flat_discount_curve(today, 0.03);
        let cal = WeekendCalendar;
        let maturity = d(2030, 1, 15);
        let conventions = ConversionConventions::default();

        let result = spread_to_upfront(
            0.0125, 0.0125, today, today, today, maturity, &discount, 0.40, &cal, conventions,
        )
        .unwrap();

        assert!(result.upfront.abs() < 1e-6);
    }
}
