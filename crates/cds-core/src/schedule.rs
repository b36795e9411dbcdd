//! Premium schedule generation.
//!
//! Builds the ordered list of accrual periods a CDS premium leg pays on,
//! rolling dates forward from the effective date or backward from maturity
//! depending on the requested [`StubMethod`], then business-day-adjusting
//! only the payment dates.

use crate::calendars::{BusinessDayConvention, Calendar};
use crate::daycounts::DayCount;
use crate::error::CoreResult;
use crate::types::{Date, Frequency, StubLength, StubMethod, StubPosition};

/// A single accrual period in a generated schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulePeriod {
    /// Start of the accrual period (unadjusted).
    pub accrual_start: Date,
    /// End of the accrual period (unadjusted).
    pub accrual_end: Date,
    /// Payment date, business-day-adjusted.
    pub pay_date: Date,
    /// Year fraction of the period under the payment day count convention.
    pub year_fraction: f64,
}

/// An ordered, gap-free list of premium accrual periods.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    periods: Vec<SchedulePeriod>,
}

impl Schedule {
    /// Returns the accrual periods in chronological order.
    #[must_use]
    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// Returns the effective date (start of the first period).
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.periods[0].accrual_start
    }

    /// Returns the maturity date (end of the last period).
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.periods[self.periods.len() - 1].accrual_end
    }

    /// Returns the period whose accrual interval contains `date`, if any.
    ///
    /// The start of a period is inclusive, the end is exclusive, except for
    /// the final period whose end is inclusive (so maturity date itself
    /// resolves to the last period).
    #[must_use]
    pub fn period_containing(&self, date: Date) -> Option<&SchedulePeriod> {
        let last = self.periods.len().saturating_sub(1);
        self.periods.iter().enumerate().find(|(i, p)| {
            date >= p.accrual_start && (date < p.accrual_end || *i == last)
        }).map(|(_, p)| p)
    }
}

/// Generates a premium accrual schedule between `effective` and `maturity`.
///
/// Accrual dates are rolled by `frequency` and left unadjusted; only the
/// payment date of each period is moved to a business day using
/// `convention`. The stub (if the tenor does not divide evenly into whole
/// periods) is placed and sized according to `stub_method`.
///
/// # Errors
///
/// Returns an error if `effective` is not strictly before `maturity`, or if
/// date arithmetic overflows the valid calendar range.
pub fn generate_schedule(
    effective: Date,
    maturity: Date,
    frequency: Frequency,
    stub_method: StubMethod,
    calendar: &dyn Calendar,
    convention: BusinessDayConvention,
    payment_dcc: &dyn DayCount,
) -> CoreResult<Schedule> {
    if effective >= maturity {
        return Err(crate::error::CoreError::invalid_input(format!(
            "effective date {effective} must precede maturity date {maturity}"
        )));
    }

    let accrual_dates = if frequency.is_zero() {
        vec![effective, maturity]
    } else {
        unadjusted_dates(effective, maturity, frequency, stub_method)?
    };

    let periods = accrual_dates
        .windows(2)
        .map(|w| {
            let (start, end) = (w[0], w[1]);
            let pay_date = calendar.adjust(end, convention)?;
            let year_fraction = payment_dcc.year_fraction(start, end);
            Ok(SchedulePeriod {
                accrual_start: start,
                accrual_end: end,
                pay_date,
                year_fraction,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(Schedule { periods })
}

/// Builds the unadjusted accrual date grid, placing and sizing the stub
/// period according to `stub_method`.
fn unadjusted_dates(
    effective: Date,
    maturity: Date,
    frequency: Frequency,
    stub_method: StubMethod,
) -> CoreResult<Vec<Date>> {
    let months = frequency.months_per_period() as i32;

    match stub_method.position() {
        None => {
            // No stub requested: roll forward from the effective date.
            // Any leftover partial period lands at the back automatically.
            roll(effective, maturity, months, true)
        }
        Some(StubPosition::Front) => {
            let mut dates = roll(maturity, effective, months, false)?;
            if matches!(stub_method, StubMethod::LongFront) && dates.len() >= 3 {
                dates.remove(1);
            }
            Ok(dates)
        }
        Some(StubPosition::Back) => {
            let mut dates = roll(effective, maturity, months, true)?;
            if matches!(stub_method, StubMethod::LongBack) && dates.len() >= 3 {
                let last = dates.len() - 2;
                dates.remove(last);
            }
            Ok(dates)
        }
    }
}

/// Rolls dates in fixed-size steps from `anchor` toward `limit`, appending
/// `limit` as the final boundary. Returns dates in ascending order
/// regardless of roll direction.
fn roll(anchor: Date, limit: Date, months_per_period: i32, forward: bool) -> CoreResult<Vec<Date>> {
    let mut dates = vec![anchor];
    let mut current = anchor;

    loop {
        let step = if forward {
            months_per_period
        } else {
            -months_per_period
        };
        let next = current.add_months(step)?;
        let passed_limit = if forward { next >= limit } else { next <= limit };
        if passed_limit {
            break;
        }
        dates.push(next);
        current = next;
    }

    dates.push(limit);
    if !forward {
        dates.reverse();
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;
    use crate::daycounts::Act360;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn even_division_no_stub() {
        let cal = WeekendCalendar;
        let dcc = Act360;
        let schedule = generate_schedule(
            d(2025, 3, 20),
            d(2026, 3, 20),
            Frequency::Quarterly,
            StubMethod::None,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        )
        .unwrap();

        assert_eq!(schedule.periods().len(), 4);
        assert_eq!(schedule.effective_date(), d(2025, 3, 20));
        assert_eq!(schedule.maturity_date(), d(2026, 3, 20));

        // No gaps: each period's end is the next period's start.
        for w in schedule.periods().windows(2) {
            assert_eq!(w[0].accrual_end, w[1].accrual_start);
        }
    }

    #[test]
    fn short_back_stub() {
        let cal = WeekendCalendar;
        let dcc = Act360;
        // 13 months at quarterly frequency leaves a 1-month short stub at the back.
        let schedule = generate_schedule(
            d(2025, 1, 20),
            d(2026, 2, 20),
            Frequency::Quarterly,
            StubMethod::ShortBack,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        )
        .unwrap();

        let periods = schedule.periods();
        assert_eq!(periods[0].accrual_start, d(2025, 1, 20));
        assert_eq!(periods.last().unwrap().accrual_end, d(2026, 2, 20));

        let last = periods.last().unwrap();
        let regular_len = periods[0].accrual_end.days_between(&periods[0].accrual_start);
        let last_len = last.accrual_end.days_between(&last.accrual_start);
        assert!(last_len < regular_len);
    }

    #[test]
    fn long_back_stub_merges_final_period() {
        let cal = WeekendCalendar;
        let dcc = Act360;
        let short = generate_schedule(
            d(2025, 1, 20),
            d(2026, 2, 20),
            Frequency::Quarterly,
            StubMethod::ShortBack,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        )
        .unwrap();
        let long = generate_schedule(
            d(2025, 1, 20),
            d(2026, 2, 20),
            Frequency::Quarterly,
            StubMethod::LongBack,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        )
        .unwrap();

        assert_eq!(long.periods().len(), short.periods().len() - 1);
        assert_eq!(long.maturity_date(), d(2026, 2, 20));
        assert_eq!(
            long.periods().last().unwrap().accrual_start,
            short.periods()[short.periods().len() - 2].accrual_start
        );
    }

    #[test]
    fn short_front_stub() {
        let cal = WeekendCalendar;
        let dcc = Act360;
        let schedule = generate_schedule(
            d(2025, 1, 20),
            d(2026, 2, 20),
            Frequency::Quarterly,
            StubMethod::ShortFront,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        )
        .unwrap();

        let periods = schedule.periods();
        assert_eq!(periods[0].accrual_start, d(2025, 1, 20));
        assert_eq!(periods.last().unwrap().accrual_end, d(2026, 2, 20));

        let regular_len = periods[1].accrual_end.days_between(&periods[1].accrual_start);
        let first_len = periods[0].accrual_end.days_between(&periods[0].accrual_start);
        assert!(first_len < regular_len);
    }

    #[test]
    fn pay_dates_adjusted_accrual_dates_not() {
        let cal = WeekendCalendar;
        let dcc = Act360;
        // 2025-06-20 is a Friday; push maturity to a Saturday to force adjustment.
        let schedule = generate_schedule(
            d(2025, 3, 21),
            d(2025, 6, 21),
            Frequency::Quarterly,
            StubMethod::None,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        )
        .unwrap();

        let last = schedule.periods().last().unwrap();
        assert_eq!(last.accrual_end, d(2025, 6, 21));
        assert_ne!(last.pay_date, last.accrual_end);
        assert!(cal.is_business_day(last.pay_date));
    }

    #[test]
    fn zero_frequency_single_period() {
        let cal = WeekendCalendar;
        let dcc = Act360;
        let schedule = generate_schedule(
            d(2025, 1, 20),
            d(2026, 1, 20),
            Frequency::Zero,
            StubMethod::None,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        )
        .unwrap();

        assert_eq!(schedule.periods().len(), 1);
    }

    #[test]
    fn rejects_non_ascending_dates() {
        let cal = WeekendCalendar;
        let dcc = Act360;
        let result = generate_schedule(
            d(2026, 1, 20),
            d(2025, 1, 20),
            Frequency::Quarterly,
            StubMethod::None,
            &cal,
            BusinessDayConvention::ModifiedFollowing,
            &dcc,
        );
        assert!(result.is_err());
    }
}
