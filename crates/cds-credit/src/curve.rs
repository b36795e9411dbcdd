//! Credit curve bootstrap from a term structure of par CDS quotes.
//!
//! Mirrors the sequential pillar-by-pillar bootstrap used for discount
//! curves: already-solved pillars are frozen, the next pillar's survival
//! probability is solved so the resulting curve reprices its quote's par
//! spread, and the process repeats out to the longest quoted maturity.

use cds_core::calendars::{BusinessDayConvention, Calendar};
use cds_core::daycounts::{DayCount, DayCountConvention};
use cds_core::schedule::generate_schedule;
use cds_core::types::{Date, Frequency, StubMethod};
use cds_curves::curves::{DiscountCurve, DiscreteCurve};
use cds_curves::interpolation::InterpolationMethod;
use cds_curves::traits::Curve;
use cds_curves::value_type::ValueType;
use cds_curves::wrappers::CreditCurve;
use cds_math::solvers::{brent, SolverConfig};

use crate::error::{CreditError, CreditResult};
use crate::pricer::par_spread;

/// A single par CDS quote: the running coupon at which a standard CDS of
/// this maturity trades at zero upfront.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsQuote {
    /// CDS maturity (coupon accrual end) date.
    pub maturity: Date,
    /// Quoted par spread, as a decimal (e.g. `0.0100` for 100bp).
    pub par_spread: f64,
}

impl CdsQuote {
    #[must_use]
    pub fn new(maturity: Date, par_spread: f64) -> Self {
        Self { maturity, par_spread }
    }
}

const MAX_RECOVERY_RETRIES: u32 = 50;
const RECOVERY_STEP: f64 = 0.01;
const MIN_RECOVERY: f64 = 0.0;
const SURVIVAL_FLOOR: f64 = 1e-8;

/// Bootstraps a piecewise-flat-hazard-rate credit curve from a sequence of
/// par CDS quotes.
pub struct CreditCurveBuilder<'a> {
    reference_date: Date,
    step_in: Date,
    settle: Date,
    discount_curve: &'a DiscountCurve,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    payment_dcc: DayCountConvention,
    frequency: Frequency,
    stub_method: StubMethod,
    recovery_rate: f64,
    pay_acc_on_default: bool,
    quotes: Vec<CdsQuote>,
}

impl<'a> CreditCurveBuilder<'a> {
    /// Creates a builder with standard CDS conventions: quarterly coupons,
    /// short-back stub, Modified Following, Actual/360 accrual, and
    /// accrued-on-default paid.
    #[must_use]
    pub fn new(
        reference_date: Date,
        step_in: Date,
        settle: Date,
        discount_curve: &'a DiscountCurve,
        calendar: &'a dyn Calendar,
        recovery_rate: f64,
    ) -> Self {
        Self {
            reference_date,
            step_in,
            settle,
            discount_curve,
            calendar,
            convention: BusinessDayConvention::ModifiedFollowing,
            payment_dcc: DayCountConvention::Act360,
            frequency: Frequency::Quarterly,
            stub_method: StubMethod::ShortBack,
            recovery_rate,
            pay_acc_on_default: true,
            quotes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn with_stub_method(mut self, stub_method: StubMethod) -> Self {
        self.stub_method = stub_method;
        self
    }

    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    #[must_use]
    pub fn with_payment_day_count(mut self, dcc: DayCountConvention) -> Self {
        self.payment_dcc = dcc;
        self
    }

    #[must_use]
    pub fn pay_accrued_on_default(mut self, pay: bool) -> Self {
        self.pay_acc_on_default = pay;
        self
    }

    #[must_use]
    pub fn with_quote(mut self, quote: CdsQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    #[must_use]
    pub fn with_quotes(mut self, quotes: impl IntoIterator<Item = CdsQuote>) -> Self {
        self.quotes.extend(quotes);
        self
    }

    /// Runs the bootstrap.
    ///
    /// If a pillar cannot be repriced at the current recovery assumption
    /// (typically because the assumed recovery is too close to 1 for the
    /// quoted spread to be reachable), the whole curve is rebuilt with the
    /// recovery rate reduced by one percentage point, repeating until a
    /// solution exists or the recovery rate is exhausted.
    pub fn build(self) -> CreditResult<CreditCurve<DiscreteCurve>> {
        if self.quotes.is_empty() {
            return Err(CreditError::NoQuotes);
        }

        let mut quotes = self.quotes.clone();
        quotes.sort_by_key(|q| q.maturity);
        for w in quotes.windows(2) {
            if w[0].maturity >= w[1].maturity {
                return Err(CreditError::InvalidQuotes {
                    message: format!(
                        "duplicate or non-ascending quote maturities: {} then {}",
                        w[0].maturity, w[1].maturity
                    ),
                });
            }
        }
        if quotes[0].maturity <= self.step_in {
            return Err(CreditError::InvalidQuotes {
                message: format!(
                    "first quote maturity {} must fall after the step-in date {}",
                    quotes[0].maturity, self.step_in
                ),
            });
        }

        let dcc = self.payment_dcc.to_day_count();
        let mut recovery = self.recovery_rate;
        let mut last_err = None;

        for attempt in 0..=MAX_RECOVERY_RETRIES {
            match self.try_bootstrap(&quotes, recovery, dcc.as_ref()) {
                Ok(curve) => return Ok(curve),
                Err(e) => {
                    last_err = Some(e);
                    if recovery - RECOVERY_STEP < MIN_RECOVERY {
                        break;
                    }
                    recovery -= RECOVERY_STEP;
                    tracing::warn!(
                        attempt,
                        recovery,
                        "credit curve bootstrap could not reprice a pillar; retrying with reduced recovery"
                    );
                }
            }
        }

        Err(last_err.unwrap_or(CreditError::NoQuotes))
    }

    fn try_bootstrap(
        &self,
        quotes: &[CdsQuote],
        recovery: f64,
        dcc: &dyn DayCount,
    ) -> CreditResult<CreditCurve<DiscreteCurve>> {
        let mut pillars: Vec<(f64, f64)> = vec![(0.0, 1.0)];

        for quote in quotes {
            let t = self.discount_curve.year_fraction(quote.maturity);
            let prev_survival = pillars.last().expect("pillars never empty").1;

            let schedule = generate_schedule(
                self.reference_date,
                quote.maturity,
                self.frequency,
                self.stub_method,
                self.calendar,
                self.convention,
                dcc,
            )?;

            let target = quote.par_spread;
            let base_pillars = pillars.clone();
            let objective = |trial_survival: f64| -> f64 {
                let mut trial_pillars = base_pillars.clone();
                trial_pillars.push((t, trial_survival));
                let model = match build_curve(self.reference_date, &trial_pillars, recovery) {
                    Ok(c) => c,
                    Err(_) => return f64::NAN,
                };
                match par_spread(
                    self.settle,
                    self.step_in,
                    quote.maturity,
                    &schedule,
                    self.discount_curve,
                    &model,
                    self.pay_acc_on_default,
                ) {
                    Ok(spread) => spread - target,
                    Err(_) => f64::NAN,
                }
            };

            let config = SolverConfig::new(1e-10, 100);
            let upper = (prev_survival - 1e-10).max(SURVIVAL_FLOOR * 2.0);
            let result = brent(objective, SURVIVAL_FLOOR, upper, &config).map_err(|_| {
                CreditError::BootstrapFailed {
                    tenor: quote.maturity,
                    attempts: 0,
                    last_recovery: recovery,
                }
            })?;

            pillars.push((t, result.root));
        }

        build_curve(self.reference_date, &pillars, recovery)
    }
}

fn build_curve(
    reference_date: Date,
    pillars: &[(f64, f64)],
    recovery: f64,
) -> CreditResult<CreditCurve<DiscreteCurve>> {
    let tenors = pillars.iter().map(|p| p.0).collect();
    let values = pillars.iter().map(|p| p.1).collect();
    let inner = DiscreteCurve::new(
        reference_date,
        tenors,
        values,
        ValueType::SurvivalProbability,
        InterpolationMethod::LogLinear,
    )?;
    Ok(CreditCurve::new(inner, recovery))
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
    fn bootstraps_monotone_decreasing_survival_curve() {
        let today = d(2025, 1, 15);
        let discount = flat_discount_curve(today, 0.03);
        let cal = WeekendCalendar;

        let curve = CreditCurveBuilder::new(today, today, today, &discount, &cal, 0.40)
            .with_quote(CdsQuote::new(d(2027, 1, 15), 0.0100))
            .with_quote(CdsQuote::new(d(2030, 1, 15), 0.0150))
            .with_quote(CdsQuote::new(d(2035, 1, 15), 0.0200))
            .build()
            .unwrap();

        let tenors = curve.inner().tenors();
        let values = curve.inner().values();
        for w in values.windows(2) {
            assert!(w[1] <= w[0] + 1e-12, "survival probability must not increase");
        }
        assert_eq!(tenors.len(), 4); // seed pillar plus three quotes
    }

    #[test]
    fn rejects_empty_quote_list() {
        let today = d(2025, 1, 15);
        let discount = flat_discount_curve(today, 0.03);
        let cal = WeekendCalendar;

        let result = CreditCurveBuilder::new(today, today, today, &discount, &cal, 0.40).build();
        assert!(matches!(result, Err(CreditError::NoQuotes)));
    }

    #[test]
    fn rejects_non_ascending_quotes() {
        let today = d(2025, 1, 15);
        let discount = flat_discount_curve(today, 0.03);
        let cal = WeekendCalendar;

        let result = CreditCurveBuilder::new(today, today, today, &discount, &cal, 0.40)
            .with_quote(CdsQuote::new(d(2030, 1, 15), 0.0150))
            .with_quote(CdsQuote::new(d(2030, 1, 15), 0.0200))
            .build();

        assert!(matches!(result, Err(CreditError::InvalidQuotes { .. })));
    }
}
