//! Parser for ISDA-style holiday calendar text files.
//!
//! The format is line-oriented:
//!
//! ```text
//! # comment lines start with '#'
//! MONDAY_ALWAYS_HOLIDAY    (or NOT_ALWAYS_HOLIDAY variants for each weekday)
//! SATURDAY_NOT_ALWAYS_HOLIDAY
//! SUNDAY_NOT_ALWAYS_HOLIDAY
//! 19991225   # one date per line, YYYYMMDD, strictly ascending, after 1601-01-01
//! ```

use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};

use super::bitmap::WeekendType;
use super::dynamic::DynamicCalendar;
use crate::error::{CoreError, CoreResult};

const EARLIEST_ALLOWED: i32 = 16_010_101;

/// Parses a holiday file from disk into a named calendar.
///
/// # Errors
///
/// Returns a file error if the file cannot be read, or an invalid-input
/// error if its contents are malformed (unknown sentinel, bad date,
/// non-ascending date list, date before 1601-01-01).
pub fn parse_file(name: &str, path: impl AsRef<Path>) -> CoreResult<DynamicCalendar> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| CoreError::file_error(format!("failed to read holiday file: {e}")))?;
    parse_str(name, &content)
}

/// Parses holiday file content already read into memory.
///
/// # Errors
///
/// See [`parse_file`].
pub fn parse_str(name: &str, content: &str) -> CoreResult<DynamicCalendar> {
    let mut weekend_days: std::collections::HashSet<Weekday> =
        [Weekday::Sat, Weekday::Sun].into_iter().collect();
    let mut dates = Vec::new();
    let mut last_serial: Option<i32> = None;

    for raw_line in content.lines() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if let Some(weekday) = sentinel_always_holiday(line) {
            weekend_days.insert(weekday);
            continue;
        }
        if let Some(weekday) = sentinel_not_always_holiday(line) {
            weekend_days.remove(&weekday);
            continue;
        }

        let ymd: i32 = line
            .parse()
            .map_err(|_| CoreError::invalid_input(format!("malformed holiday line: {line}")))?;
        if ymd < EARLIEST_ALLOWED {
            return Err(CoreError::invalid_input(format!(
                "holiday date {ymd} precedes the minimum supported date 1601-01-01"
            )));
        }
        let date = parse_yyyymmdd(ymd)?;
        let serial = date.num_days_from_ce();
        if let Some(last) = last_serial {
            if serial <= last {
                return Err(CoreError::invalid_input(format!(
                    "holiday dates must be strictly ascending; {ymd} is out of order"
                )));
            }
        }
        last_serial = Some(serial);
        dates.push(date);
    }

    let weekend = classify_weekend(&weekend_days)?;
    Ok(DynamicCalendar::from_naive_dates(name, weekend, dates))
}

fn sentinel_always_holiday(line: &str) -> Option<Weekday> {
    match line {
        "MONDAY_ALWAYS_HOLIDAY" => Some(Weekday::Mon),
        "TUESDAY_ALWAYS_HOLIDAY" => Some(Weekday::Tue),
        "WEDNESDAY_ALWAYS_HOLIDAY" => Some(Weekday::Wed),
        "THURSDAY_ALWAYS_HOLIDAY" => Some(Weekday::Thu),
        "FRIDAY_ALWAYS_HOLIDAY" => Some(Weekday::Fri),
        "SATURDAY_ALWAYS_HOLIDAY" => Some(Weekday::Sat),
        "SUNDAY_ALWAYS_HOLIDAY" => Some(Weekday::Sun),
        _ => None,
    }
}

fn sentinel_not_always_holiday(line: &str) -> Option<Weekday> {
    match line {
        "MONDAY_NOT_ALWAYS_HOLIDAY" => Some(Weekday::Mon),
        "TUESDAY_NOT_ALWAYS_HOLIDAY" => Some(Weekday::Tue),
        "WEDNESDAY_NOT_ALWAYS_HOLIDAY" => Some(Weekday::Wed),
        "THURSDAY_NOT_ALWAYS_HOLIDAY" => Some(Weekday::Thu),
        "FRIDAY_NOT_ALWAYS_HOLIDAY" => Some(Weekday::Fri),
        "SATURDAY_NOT_ALWAYS_HOLIDAY" => Some(Weekday::Sat),
        "SUNDAY_NOT_ALWAYS_HOLIDAY" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_yyyymmdd(ymd: i32) -> CoreResult<NaiveDate> {
    let year = ymd / 10_000;
    let month = (ymd / 100) % 100;
    let day = ymd % 100;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or_else(|| CoreError::invalid_input(format!("invalid holiday date: {ymd}")))
}

fn classify_weekend(days: &std::collections::HashSet<Weekday>) -> CoreResult<WeekendType> {
    use Weekday::{Fri, Sat, Sun, Thu};
    let mut sorted: Vec<Weekday> = days.iter().copied().collect();
    sorted.sort_by_key(Weekday::num_days_from_monday);
    match sorted.as_slice() {
        [] => Ok(WeekendType::None),
        [Sun] => Ok(WeekendType::SundayOnly),
        [Thu, Fri] => Ok(WeekendType::ThursdayFriday),
        [Fri, Sat] => Ok(WeekendType::FridaySaturday),
        [Sat, Sun] => Ok(WeekendType::SaturdaySunday),
        _ => Err(CoreError::invalid_input(
            "unsupported weekend day combination in holiday file",
        )),
    }
}
