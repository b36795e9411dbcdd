//! Tenor / date interval parsing (e.g. "3M", "5Y", "1W").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;

use crate::calendars::nth_weekday_of_month;
use crate::error::CoreError;
use crate::types::Date;

/// The unit of a date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalUnit {
    /// Calendar day.
    Day,
    /// Calendar week (7 days).
    Week,
    /// Calendar month.
    Month,
    /// Calendar quarter (3 months).
    Quarter,
    /// Half year (6 months).
    HalfYear,
    /// Calendar year (12 months).
    Year,
    /// End-of-month: reduces to months, then always rolls forward to the
    /// last day of the resulting month.
    EndOfMonth,
    /// Flexible end-of-month: reduces to months; rolls to the last day of
    /// the resulting month only when the start date is itself EOM.
    FlexEndOfMonth,
    /// Quarterly IMM period: 3rd Wednesday of Mar/Jun/Sep/Dec.
    QuarterlyImm,
    /// Monthly IMM period: 3rd Wednesday of the month.
    MonthlyImm,
    /// Equity-derivatives expiry: 3rd Friday of the month.
    ThirdFriday,
    /// Lunar period: exact blocks of 28 days.
    Lunar,
}

impl IntervalUnit {
    fn letter(self) -> char {
        match self {
            IntervalUnit::Day => 'D',
            IntervalUnit::Week => 'W',
            IntervalUnit::Month => 'M',
            IntervalUnit::Quarter => 'Q',
            IntervalUnit::HalfYear => 'S',
            IntervalUnit::Year => 'Y',
            IntervalUnit::EndOfMonth => 'E',
            IntervalUnit::FlexEndOfMonth => 'F',
            IntervalUnit::QuarterlyImm => 'I',
            IntervalUnit::MonthlyImm => 'J',
            IntervalUnit::ThirdFriday => 'T',
            IntervalUnit::Lunar => 'U',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'D' => Some(IntervalUnit::Day),
            'W' => Some(IntervalUnit::Week),
            'M' => Some(IntervalUnit::Month),
            'Q' => Some(IntervalUnit::Quarter),
            'S' => Some(IntervalUnit::HalfYear),
            'Y' | 'A' => Some(IntervalUnit::Year),
            'E' => Some(IntervalUnit::EndOfMonth),
            'F' => Some(IntervalUnit::FlexEndOfMonth),
            'I' => Some(IntervalUnit::QuarterlyImm),
            'J' => Some(IntervalUnit::MonthlyImm),
            'T' => Some(IntervalUnit::ThirdFriday),
            'U' => Some(IntervalUnit::Lunar),
            _ => None,
        }
    }
}

/// A tenor such as "3M" or "5Y", parsed into a signed count, a unit, and an
/// offset flag (0 = offset is the value date; -1 = offset is the previous
/// date in an enclosing date array; any other value indexes into that
/// array). The flag is opaque to [`DateInterval::apply`], which always
/// applies the interval relative to the date it is given; schedule
/// generators that build date arrays interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    count: i32,
    unit: IntervalUnit,
    flag: i32,
}

impl DateInterval {
    /// Builds an interval directly from a signed count and unit, with the
    /// default flag (0, offset from the value date).
    #[must_use]
    pub fn new(count: i32, unit: IntervalUnit) -> Self {
        Self {
            count,
            unit,
            flag: 0,
        }
    }

    /// Builds an interval with an explicit offset flag.
    #[must_use]
    pub fn with_flag(count: i32, unit: IntervalUnit, flag: i32) -> Self {
        Self { count, unit, flag }
    }

    /// Returns the signed count.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    /// Returns the offset flag.
    #[must_use]
    pub fn flag(&self) -> i32 {
        self.flag
    }

    /// Applies the interval to a date, following calendar roll rules
    /// (months/quarters/half-years/years are applied in month units with
    /// end-of-month clamping; days/weeks/lunar periods are exact day
    /// arithmetic; IMM/3rd-Friday kinds land on the named weekday of the
    /// target month).
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting date is out of the representable
    /// range.
    pub fn apply(&self, date: Date) -> Result<Date, CoreError> {
        match self.unit {
            IntervalUnit::Day => Ok(date.add_days(i64::from(self.count))),
            IntervalUnit::Week => Ok(date.add_days(i64::from(self.count) * 7)),
            IntervalUnit::Month => date.add_months(self.count),
            IntervalUnit::Quarter => date.add_months(self.count * 3),
            IntervalUnit::HalfYear => date.add_months(self.count * 6),
            IntervalUnit::Year => date.add_years(self.count),
            IntervalUnit::EndOfMonth => Ok(date.add_months(self.count)?.end_of_month()),
            IntervalUnit::FlexEndOfMonth => {
                let advanced = date.add_months(self.count)?;
                if date.is_end_of_month() {
                    Ok(advanced.end_of_month())
                } else {
                    Ok(advanced)
                }
            }
            IntervalUnit::QuarterlyImm => self.apply_imm(date, 3),
            IntervalUnit::MonthlyImm => self.apply_imm(date, 1),
            IntervalUnit::ThirdFriday => self.apply_third_friday(date),
            IntervalUnit::Lunar => Ok(date.add_days(i64::from(self.count) * 28)),
        }
    }

    fn apply_imm(&self, date: Date, months_per_period: i32) -> Result<Date, CoreError> {
        let advanced = date.add_months(self.count * months_per_period)?;
        let imm = nth_weekday_of_month(advanced.year(), advanced.month(), chrono::Weekday::Wed, 3)
            .ok_or_else(|| CoreError::invalid_input("no IMM date for target month"))?;
        Ok(Date::from_ymd(imm.year(), imm.month(), imm.day())?)
    }

    fn apply_third_friday(&self, date: Date) -> Result<Date, CoreError> {
        let advanced = date.add_months(self.count)?;
        let third_friday =
            nth_weekday_of_month(advanced.year(), advanced.month(), chrono::Weekday::Fri, 3)
                .ok_or_else(|| CoreError::invalid_input("no 3rd Friday for target month"))?;
        Ok(Date::from_ymd(
            third_friday.year(),
            third_friday.month(),
            third_friday.day(),
        )?)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.letter())
    }
}

impl FromStr for DateInterval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::invalid_input("empty date interval"));
        }
        let last = s
            .chars()
            .last()
            .ok_or_else(|| CoreError::invalid_input("empty date interval"))?;
        let unit = IntervalUnit::from_letter(last)
            .ok_or_else(|| CoreError::invalid_input(format!("unknown interval unit: {s}")))?;
        let digits = &s[..s.len() - last.len_utf8()];
        let count: i32 = digits
            .parse()
            .map_err(|_| CoreError::invalid_input(format!("invalid interval count: {s}")))?;
        Ok(Self {
            count,
            unit,
            flag: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_tenors() {
        assert_eq!(
            "3M".parse::<DateInterval>().unwrap(),
            DateInterval::new(3, IntervalUnit::Month)
        );
        assert_eq!(
            "5Y".parse::<DateInterval>().unwrap(),
            DateInterval::new(5, IntervalUnit::Year)
        );
        assert_eq!(
            "1W".parse::<DateInterval>().unwrap(),
            DateInterval::new(1, IntervalUnit::Week)
        );
        assert_eq!(
            "6S".parse::<DateInterval>().unwrap(),
            DateInterval::new(6, IntervalUnit::HalfYear)
        );
    }

    #[test]
    fn test_parse_negative_count() {
        assert_eq!(
            "-3M".parse::<DateInterval>().unwrap(),
            DateInterval::new(-3, IntervalUnit::Month)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!("3X".parse::<DateInterval>().is_err());
        assert!("".parse::<DateInterval>().is_err());
        assert!("M".parse::<DateInterval>().is_err());
    }

    #[test]
    fn test_apply_to_date() {
        let start = Date::from_ymd(2024, 1, 31).unwrap();
        let interval: DateInterval = "1M".parse().unwrap();
        let result = interval.apply(start).unwrap();
        assert_eq!(result, Date::from_ymd(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_display_roundtrip() {
        let interval: DateInterval = "10Y".parse().unwrap();
        assert_eq!(interval.to_string(), "10Y");
    }

    #[test]
    fn test_parse_extended_kinds() {
        assert_eq!(
            "1E".parse::<DateInterval>().unwrap(),
            DateInterval::new(1, IntervalUnit::EndOfMonth)
        );
        assert_eq!(
            "1F".parse::<DateInterval>().unwrap(),
            DateInterval::new(1, IntervalUnit::FlexEndOfMonth)
        );
        assert_eq!(
            "3I".parse::<DateInterval>().unwrap(),
            DateInterval::new(3, IntervalUnit::QuarterlyImm)
        );
        assert_eq!(
            "1J".parse::<DateInterval>().unwrap(),
            DateInterval::new(1, IntervalUnit::MonthlyImm)
        );
        assert_eq!(
            "1T".parse::<DateInterval>().unwrap(),
            DateInterval::new(1, IntervalUnit::ThirdFriday)
        );
        assert_eq!(
            "2U".parse::<DateInterval>().unwrap(),
            DateInterval::new(2, IntervalUnit::Lunar)
        );
    }

    #[test]
    fn test_with_flag() {
        let interval = DateInterval::with_flag(3, IntervalUnit::Month, -1);
        assert_eq!(interval.flag(), -1);
        assert_eq!(interval.count(), 3);
        assert_eq!(DateInterval::new(3, IntervalUnit::Month).flag(), 0);
    }

    #[test]
    fn test_apply_end_of_month() {
        let start = Date::from_ymd(2024, 1, 15).unwrap();
        let interval = DateInterval::new(1, IntervalUnit::EndOfMonth);
        assert_eq!(
            interval.apply(start).unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_apply_flex_end_of_month() {
        let non_eom = Date::from_ymd(2024, 1, 15).unwrap();
        let interval = DateInterval::new(1, IntervalUnit::FlexEndOfMonth);
        assert_eq!(
            interval.apply(non_eom).unwrap(),
            Date::from_ymd(2024, 2, 15).unwrap()
        );

        let eom = Date::from_ymd(2024, 4, 30).unwrap();
        assert_eq!(
            interval.apply(eom).unwrap(),
            Date::from_ymd(2024, 5, 31).unwrap()
        );
    }

    #[test]
    fn test_apply_lunar() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let interval = DateInterval::new(2, IntervalUnit::Lunar);
        assert_eq!(interval.apply(start).unwrap(), start.add_days(56));
    }

    #[test]
    fn test_apply_quarterly_imm_lands_on_wednesday() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let interval = DateInterval::new(3, IntervalUnit::QuarterlyImm);
        let result = interval.apply(start).unwrap();

        assert_eq!(result.month(), 10);
        assert_eq!(result.weekday(), chrono::Weekday::Wed);
        assert!((15..=21).contains(&result.day()));
    }

    #[test]
    fn test_apply_third_friday() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let interval = DateInterval::new(1, IntervalUnit::ThirdFriday);
        let result = interval.apply(start).unwrap();

        assert_eq!(result.month(), 2);
        assert_eq!(result.weekday(), chrono::Weekday::Fri);
        assert!((15..=21).contains(&result.day()));
    }
}
