//! Actual/Actual day count conventions.

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// The year fraction is calculated by splitting the period into portions
/// that fall in leap years vs non-leap years.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap year}}{365} + \frac{\text{Days in leap year}}{366}$$
#[derive(Debug, Clone, Copy, Default)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start >= end {
            return 0.0;
        }

        let mut total = 0.0;
        let mut current = start;

        while current.year() < end.year() {
            let year_end = Date::from_ymd(current.year(), 12, 31).unwrap();
            let days_in_year = current.days_in_year();
            let days = current.days_between(&year_end) + 1;

            total += days as f64 / days_in_year as f64;

            current = Date::from_ymd(current.year() + 1, 1, 1).unwrap();
        }

        if current < end {
            let days = current.days_between(&end);
            let days_in_year = current.days_in_year();
            total += days as f64 / days_in_year as f64;
        }

        total
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual AFB (French) day count convention.
///
/// Whole years are counted back from the end date; the stub period uses
/// a denominator of 366 if it contains February 29th, 365 otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActActAfb;

impl DayCount for ActActAfb {
    fn name(&self) -> &'static str {
        "ACT/ACT AFB"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start >= end {
            return 0.0;
        }

        let mut whole_years = 0;
        let mut boundary = end;
        loop {
            let candidate = boundary.add_years(-1).unwrap_or(start);
            if candidate < start {
                break;
            }
            boundary = candidate;
            whole_years += 1;
        }

        let stub_days = start.days_between(&boundary).unsigned_abs() as i64;
        let denom = if stub_contains_feb29(start, boundary) {
            366.0
        } else {
            365.0
        };

        whole_years as f64 + stub_days as f64 / denom
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

fn stub_contains_feb29(start: Date, end: Date) -> bool {
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    for year in lo.year()..=hi.year() {
        if let Ok(feb29) = Date::from_ymd(year, 2, 29) {
            if feb29 > lo && feb29 <= hi {
                return true;
            }
        }
    }
    false
}

/// Actual/Actual ICMA day count convention.
///
/// The year fraction depends on the coupon frequency and the actual
/// number of days in the coupon period.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days}}{\text{Frequency} \times \text{Days in Period}}$$
#[derive(Debug, Clone, Copy)]
pub struct ActActIcma {
    /// Coupon frequency (periods per year).
    frequency: u32,
}

impl ActActIcma {
    /// Creates a new ACT/ACT ICMA convention with the given frequency.
    #[must_use]
    pub fn new(frequency: u32) -> Self {
        Self { frequency }
    }

    /// Creates with semi-annual frequency (default for bonds).
    #[must_use]
    pub fn semi_annual() -> Self {
        Self { frequency: 2 }
    }

    /// Calculates year fraction given explicit coupon period dates.
    #[must_use]
    pub fn year_fraction_with_period(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
    ) -> f64 {
        let days_in_period = period_start.days_between(&period_end);
        if days_in_period == 0 {
            return 0.0;
        }

        let accrued_days = start.days_between(&end);
        accrued_days as f64 / (self.frequency as f64 * days_in_period as f64)
    }
}

impl Default for ActActIcma {
    fn default() -> Self {
        Self::semi_annual()
    }
}

impl DayCount for ActActIcma {
    fn name(&self) -> &'static str {
        "ACT/ACT ICMA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        // Without explicit period bounds, fall back to a plain ACT/365
        // approximation; callers with period information should use
        // `year_fraction_with_period` instead.
        let days = start.days_between(&end);
        days as f64 / 365.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
