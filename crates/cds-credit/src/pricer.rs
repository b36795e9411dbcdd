//! CDS leg valuation: protection leg, premium leg, and clean/dirty pricing.
//!
//! All present values are computed by integrating the closed-form
//! log-linear protection/accrual integrals over the union of the discount
//! curve's and credit curve's pillar knots, exactly as the piecewise-flat
//! forward-rate / piecewise-flat hazard-rate curve pair implies.

use cds_core::daycounts::DayCount;
use cds_core::schedule::Schedule;
use cds_core::types::Date;
use cds_curves::curves::{DiscountCurve, DiscreteCurve};
use cds_curves::traits::Curve;
use cds_curves::wrappers::CreditCurve;

use crate::error::{CreditError, CreditResult};

/// The result of pricing one side (protection buyer's view) of a CDS.
#[derive(Debug, Clone, Copy)]
pub struct CdsPriceResult {
    /// PV of the protection leg, per unit notional.
    pub protection_pv: f64,
    /// PV of the premium leg (scheduled coupons plus, if enabled, accrued
    /// on default), per unit notional.
    pub premium_pv: f64,
    /// `protection_pv - premium_pv`, undiscounted back to the current
    /// accrual period (i.e. excludes accrued coupon owed at settlement).
    pub dirty_price: f64,
    /// Accrued coupon from the current period's start to the step-in date.
    pub accrued: f64,
    /// `dirty_price + accrued`: the conventionally quoted CDS price.
    pub clean_price: f64,
    /// The break-even (zero-upfront) spread for this maturity and curve
    /// pair, independent of the contractual running coupon.
    pub par_spread: f64,
}

/// Builds the ascending, deduplicated union of both curves' pillar knots
/// that fall strictly inside `(lo, hi)`, plus the `lo`/`hi` boundaries
/// themselves.
fn union_knots(a_times: &[f64], b_times: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let mut knots: Vec<f64> = a_times
        .iter()
        .chain(b_times.iter())
        .copied()
        .filter(|&t| t > lo && t < hi)
        .collect();
    knots.push(lo);
    knots.push(hi);
    knots.sort_by(|x, y| x.partial_cmp(y).expect("knot times are never NaN"));
    knots.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    knots
}

/// PV of the protection leg: `(1-R) * integral of Z(u) dQ(u)` from
/// `max(step_in, today)` to `maturity`, discounted back to `settle`.
pub fn protection_leg_pv(
    settle: Date,
    step_in: Date,
    maturity: Date,
    discount_curve: &DiscountCurve,
    credit_curve: &CreditCurve<DiscreteCurve>,
) -> CreditResult<f64> {
    let recovery = credit_curve.recovery_rate();
    let today = discount_curve.reference_date();
    let start_date = step_in.max(today);
    if start_date >= maturity {
        return Ok(0.0);
    }

    let t_lo = discount_curve.year_fraction(start_date);
    let t_hi = discount_curve.year_fraction(maturity);
    let knots = union_knots(
        discount_curve.pillar_times(),
        credit_curve.inner().tenors(),
        t_lo,
        t_hi,
    );

    let mut pv = 0.0;
    for w in knots.windows(2) {
        let (a, b) = (w[0], w[1]);
        let tau = b - a;
        if tau <= 0.0 {
            continue;
        }

        let z_a = discount_curve.discount_factor(a)?;
        let z_b = discount_curve.discount_factor(b)?;
        let s_a = credit_curve.survival_probability_at_tenor(a)?;
        let s_b = credit_curve.survival_probability_at_tenor(b)?;
        if z_a <= 0.0 || s_a <= 0.0 {
            continue;
        }

        let r = -(z_b / z_a).ln() / tau;
        let h = -(s_b / s_a).ln() / tau;
        let k = r + h;

        let contribution = if k.abs() < 1e-12 {
            (1.0 - recovery) * s_a * z_a * h * tau
        } else {
            (1.0 - recovery) * s_a * z_a * (h / k) * (1.0 - (-k * tau).exp())
        };
        pv += contribution;
    }

    let z_settle = discount_curve.discount_factor_at(settle)?;
    Ok(pv / z_settle)
}

/// PV of the accrued-premium-on-default contribution of a single accrual
/// period, integrated over the part of the period on or after
/// `max(step_in, today)`.
///
/// Grounded on the standard semi-analytic accrual-on-default integral:
/// `coupon * integral[(u - accStart) * Z(u) * h(u) * S(u) du]` over each
/// log-linear sub-interval, evaluated in closed form.
fn accrued_on_default_pv(
    period_start: Date,
    period_end: Date,
    step_in: Date,
    discount_curve: &DiscountCurve,
    credit_curve: &CreditCurve<DiscreteCurve>,
) -> CreditResult<f64> {
    let today = discount_curve.reference_date();
    let domain_start = period_start.max(step_in).max(today);
    if domain_start >= period_end {
        return Ok(0.0);
    }

    let t_period_start = discount_curve.year_fraction(period_start);
    let t_lo = discount_curve.year_fraction(domain_start);
    let t_hi = discount_curve.year_fraction(period_end);
    let knots = union_knots(
        discount_curve.pillar_times(),
        credit_curve.inner().tenors(),
        t_lo,
        t_hi,
    );

    let mut pv = 0.0;
    for w in knots.windows(2) {
        let (a, b) = (w[0], w[1]);
        let tau = b - a;
        if tau <= 0.0 {
            continue;
        }

        let z_a = discount_curve.discount_factor(a)?;
        let z_b = discount_curve.discount_factor(b)?;
        let s_a = credit_curve.survival_probability_at_tenor(a)?;
        let s_b = credit_curve.survival_probability_at_tenor(b)?;
        if z_a <= 0.0 || s_a <= 0.0 {
            continue;
        }

        let r = -(z_b / z_a).ln() / tau;
        let h = -(s_b / s_a).ln() / tau;
        let k = r + h;
        let t0 = a - t_period_start;

        let term = if k.abs() < 1e-12 {
            t0 * tau + tau * tau / 2.0
        } else {
            let one_minus = 1.0 - (-k * tau).exp();
            t0 * one_minus / k + (one_minus / k - tau * (-k * tau).exp()) / k
        };

        pv += h * s_a * z_a * term;
    }

    Ok(pv)
}

/// PV of the premium leg per unit running coupon (i.e. assuming a coupon
/// rate of 1.0), covering scheduled coupon payments after `step_in` and,
/// if `pay_acc_on_default`, the accrued-on-default contribution.
pub fn premium_leg_annuity(
    schedule: &Schedule,
    step_in: Date,
    settle: Date,
    discount_curve: &DiscountCurve,
    credit_curve: &CreditCurve<DiscreteCurve>,
    pay_acc_on_default: bool,
) -> CreditResult<f64> {
    let mut pv = 0.0;

    for period in schedule.periods() {
        if period.pay_date > step_in {
            let z_p = discount_curve.discount_factor_at(period.pay_date)?;
            let s_e = credit_curve.survival_probability(period.accrual_end)?;
            pv += period.year_fraction * s_e * z_p;
        }

        if pay_acc_on_default {
            pv += accrued_on_default_pv(
                period.accrual_start,
                period.accrual_end,
                step_in,
                discount_curve,
                credit_curve,
            )?;
        }
    }

    let z_settle = discount_curve.discount_factor_at(settle)?;
    Ok(pv / z_settle)
}

/// The break-even running coupon: `protection PV / premium annuity`.
pub fn par_spread(
    settle: Date,
    step_in: Date,
    maturity: Date,
    schedule: &Schedule,
    discount_curve: &DiscountCurve,
    credit_curve: &CreditCurve<DiscreteCurve>,
    pay_acc_on_default: bool,
) -> CreditResult<f64> {
    let protection = protection_leg_pv(settle, step_in, maturity, discount_curve, credit_curve)?;
    let annuity =
        premium_leg_annuity(schedule, step_in, settle, discount_curve, credit_curve, pay_acc_on_default)?;

    if annuity.abs() < 1e-14 {
        return Err(CreditError::InvalidPricingDates {
            message: "premium leg annuity is zero; cannot imply a par spread".to_string(),
        });
    }

    Ok(protection / annuity)
}

/// Prices a CDS at a given contractual running coupon, returning both legs
/// and the conventional clean/dirty price split.
pub fn price_cds(
    coupon: f64,
    settle: Date,
    step_in: Date,
    schedule: &Schedule,
    discount_curve: &DiscountCurve,
    credit_curve: &CreditCurve<DiscreteCurve>,
    payment_dcc: &dyn DayCount,
    pay_acc_on_default: bool,
) -> CreditResult<CdsPriceResult> {
    let maturity = schedule.maturity_date();
    let protection_pv =
        protection_leg_pv(settle, step_in, maturity, discount_curve, credit_curve)?;
    let annuity =
        premium_leg_annuity(schedule, step_in, settle, discount_curve, credit_curve, pay_acc_on_default)?;
    let premium_pv = coupon * annuity;
    let dirty_price = protection_pv - premium_pv;

    let current_period = schedule.period_containing(step_in).ok_or_else(|| {
        CreditError::InvalidPricingDates {
            message: format!("step-in date {step_in} falls outside the premium schedule"),
        }
    })?;
    let accrued_fraction =
        payment_dcc.year_fraction(current_period.accrual_start, step_in).max(0.0);
    let accrued = coupon * accrued_fraction;
    let clean_price = dirty_price + accrued;

    let par_spread = if annuity.abs() > 1e-14 {
        protection_pv / annuity
    } else {
        0.0
    };

    Ok(CdsPriceResult {
        protection_pv,
        premium_pv,
        dirty_price,
        accrued,
        clean_price,
        par_spread,
    })
}
