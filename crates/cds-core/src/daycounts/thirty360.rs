//! 30/360 day count conventions.

use super::DayCount;
use crate::types::Date;

/// 30/360 US day count convention ("Bond Basis").
///
/// Assumes 30-day months and 360-day years.
///
/// # Rules
///
/// - D1 is capped at 30: `D1* = min(D1, 30)`.
/// - D2 rolls to 30 only when D1* is 30 and D2 is 31: `D2* = 30 if D1* = 30
///   and D2 = 31 else D2`.
///
/// There is no special case for February end-of-month dates.
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;
        let m1 = start.month() as i64;
        let m2 = end.month() as i64;
        let y1 = start.year() as i64;
        let y2 = end.year() as i64;

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}

/// 30E/360 European day count convention ("Eurobond Basis").
///
/// # Rules
///
/// - If D1 is 31, change to 30.
/// - If D2 is 31, change to 30.
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;
        let m1 = start.month() as i64;
        let m2 = end.month() as i64;
        let y1 = start.year() as i64;
        let y2 = end.year() as i64;

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}

/// 30E/360 ISDA day count convention.
///
/// Close to [`Thirty360E`], but end-of-month dates roll to day 30
/// regardless of whether the day number is 31 (Feb 28/29 included).
///
/// This implementation does not special-case the final maturity period
/// in February, unlike the full ISDA definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360EIsda;

impl DayCount for Thirty360EIsda {
    fn name(&self) -> &'static str {
        "30E/360 ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;
        let m1 = start.month() as i64;
        let m2 = end.month() as i64;
        let y1 = start.year() as i64;
        let y2 = end.year() as i64;

        if start.is_end_of_month() {
            d1 = 30;
        }
        if end.is_end_of_month() {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}

/// 30/360 German day count convention.
///
/// Like [`Thirty360EIsda`], end-of-month dates (including February) roll
/// to day 30 on both legs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360German;

impl DayCount for Thirty360German {
    fn name(&self) -> &'static str {
        "30/360 German"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;
        let m1 = start.month() as i64;
        let m2 = end.month() as i64;
        let y1 = start.year() as i64;
        let y2 = end.year() as i64;

        if d1 == 31 || start.is_end_of_month() {
            d1 = 30;
        }
        if d2 == 31 || end.is_end_of_month() {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty360_us_full_year() {
        let dc = Thirty360US;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 360);
        assert!((dc.year_fraction(start, end) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_thirty360_us_half_year() {
        let dc = Thirty360US;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 180);
        assert!((dc.year_fraction(start, end) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_thirty360_us_day_31_adjustment() {
        let dc = Thirty360US;
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();

        assert_eq!(dc.day_count(start, end), 60);
    }

    #[test]
    fn test_thirty360_us_feb_eom_no_special_case() {
        // D1 is not 31, so it is left as-is (28), not rolled to 30.
        let dc = Thirty360US;
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();

        assert_eq!(dc.day_count(start, end), 33);
    }

    #[test]
    fn test_thirty360_us_feb_eom_leap_no_special_case() {
        // D1 = 29 on a leap year is left as-is; only day 31 is capped.
        let dc = Thirty360US;
        let start = Date::from_ymd(2024, 2, 29).unwrap();
        let end = Date::from_ymd(2024, 3, 31).unwrap();

        assert_eq!(dc.day_count(start, end), 32);
    }

    #[test]
    fn test_thirty360_us_feb_eom_to_feb_eom() {
        // 2024-02-29 -> 2024-05-29: D1 = 29 (unchanged), D2 = 29 (not 31),
        // so the period is exactly 3 months of 30 days each.
        let dc = Thirty360US;
        let start = Date::from_ymd(2024, 2, 29).unwrap();
        let end = Date::from_ymd(2024, 5, 29).unwrap();

        assert_eq!(dc.day_count(start, end), 90);
    }

    #[test]
    fn test_thirty360e_day_31_adjustment() {
        let dc = Thirty360E;
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();

        assert_eq!(dc.day_count(start, end), 60);
    }

    #[test]
    fn test_thirty360_us_vs_thirty360e() {
        let us = Thirty360US;
        let eu = Thirty360E;

        let start = Date::from_ymd(2025, 1, 30).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();

        assert_eq!(us.day_count(start, end), eu.day_count(start, end));
    }

    #[test]
    fn test_thirty360_eisda_eom() {
        let dc = Thirty360EIsda;
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 8, 31).unwrap();

        assert_eq!(dc.day_count(start, end), 180);
    }

    #[test]
    fn test_thirty360_german_eom() {
        let dc = Thirty360German;
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 8, 31).unwrap();

        assert_eq!(dc.day_count(start, end), 180);
    }

    // Bloomberg validation: Boeing 7.5% 06/15/2025, CUSIP 097023AH7,
    // settlement 04/29/2020 shows 134 accrued days under 30/360 US.
    #[test]
    fn test_bloomberg_boeing_validation() {
        let dc = Thirty360US;
        let last_coupon = Date::from_ymd(2019, 12, 15).unwrap();
        let settlement = Date::from_ymd(2020, 4, 29).unwrap();

        assert_eq!(dc.day_count(last_coupon, settlement), 134);
    }
}
