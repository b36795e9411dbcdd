//! CLI command implementations.

pub mod cds;
pub mod config;
pub mod credit;
pub mod curve;

// Re-export argument types for convenience
pub use cds::CdsArgs;
pub use config::ConfigArgs;
pub use credit::CreditArgs;
pub use curve::CurveArgs;

use chrono::{Datelike, NaiveDate};
use cds_core::calendars::{BusinessDayConvention, WeekendCalendar};
use cds_core::types::{Date, Frequency};

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    let naive = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(s.to_string()))?;

    Date::from_ymd(naive.year(), naive.month(), naive.day())
        .map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Returns today's date.
pub fn today() -> CliResult<Date> {
    let now = chrono::Utc::now().date_naive();
    Date::from_ymd(now.year(), now.month(), now.day())
        .map_err(|_| CliError::InvalidDate("today".to_string()))
}

/// Validates a spread/coupon quoted in basis points.
pub fn validate_spread_bps(spread_bps: f64) -> CliResult<f64> {
    if !(0.0..=10_000.0).contains(&spread_bps) {
        return Err(CliError::InvalidSpread(spread_bps));
    }
    Ok(spread_bps)
}

/// Validates a recovery rate.
pub fn validate_recovery(recovery: f64) -> CliResult<f64> {
    if !(0.0..1.0).contains(&recovery) {
        return Err(CliError::InvalidRecovery(recovery));
    }
    Ok(recovery)
}

/// Parses a comma-separated list of tenors in years.
pub fn parse_tenors(tenors_str: &str) -> anyhow::Result<Vec<f64>> {
    tenors_str
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("Invalid tenor: {}", e))
        })
        .collect()
}

/// Parses a comma-separated list of rates, given in percent, into decimals.
pub fn parse_rates_pct(rates_str: &str) -> anyhow::Result<Vec<f64>> {
    rates_str
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map(|r| r / 100.0)
                .map_err(|e| anyhow::anyhow!("Invalid rate: {}", e))
        })
        .collect()
}

/// Parses a comma-separated list of dates in YYYY-MM-DD format.
pub fn parse_dates(dates_str: &str) -> anyhow::Result<Vec<Date>> {
    dates_str
        .split(',')
        .map(|s| parse_date(s.trim()).map_err(|e| anyhow::anyhow!("{}", e)))
        .collect()
}

/// Parses a comma-separated list of spreads, given in basis points, into
/// decimals (e.g. `100` -> `0.0100`).
pub fn parse_spreads_bps(spreads_str: &str) -> anyhow::Result<Vec<f64>> {
    spreads_str
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map(|bps| bps / 10_000.0)
                .map_err(|e| anyhow::anyhow!("Invalid spread: {}", e))
        })
        .collect()
}

/// Parses a zero-curve instrument list of the form `M:2025-04-08:5.25,
/// S:2027-01-08:4.50` into [`ZeroCurveInstrument`] values, where the leading
/// letter is `M` (money market) or `S` (par swap), the date is `YYYY-MM-DD`,
/// and the rate is quoted in percent.
pub fn parse_zero_curve_instruments(
    instruments_str: &str,
) -> anyhow::Result<Vec<cds_curves::bootstrap::ZeroCurveInstrument>> {
    use cds_curves::bootstrap::ZeroCurveInstrument;

    instruments_str
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            let mut parts = entry.splitn(3, ':');
            let letter = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Missing instrument letter in '{}'", entry))?
                .trim();
            let date_str = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Missing instrument date in '{}'", entry))?
                .trim();
            let rate_str = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Missing instrument rate in '{}'", entry))?
                .trim();

            let date = parse_date(date_str).map_err(|e| anyhow::anyhow!("{}", e))?;
            let rate = rate_str
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("Invalid instrument rate: {}", e))?
                / 100.0;

            match letter.to_uppercase().as_str() {
                "M" => Ok(ZeroCurveInstrument::Money { date, rate }),
                "S" => Ok(ZeroCurveInstrument::Swap { date, rate }),
                other => Err(anyhow::anyhow!(
                    "Unknown instrument letter '{}' (expected M or S)",
                    other
                )),
            }
        })
        .collect()
}

/// Parses a payment frequency from a name or spec-style shorthand
/// (`Annual`/`A`, `SemiAnnual`/`S`, `Quarterly`/`Q`, `Monthly`/`M`).
pub fn parse_frequency(s: &str) -> anyhow::Result<Frequency> {
    match s.trim().to_uppercase().as_str() {
        "ANNUAL" | "A" | "Y" => Ok(Frequency::Annual),
        "SEMIANNUAL" | "SEMI-ANNUAL" | "S" => Ok(Frequency::SemiAnnual),
        "QUARTERLY" | "Q" => Ok(Frequency::Quarterly),
        "MONTHLY" | "M" => Ok(Frequency::Monthly),
        "ZERO" | "Z" => Ok(Frequency::Zero),
        other => Err(anyhow::anyhow!("Unknown frequency '{}'", other)),
    }
}

/// Parses a business day convention from a name or the named single-character
/// codes (`N` none, `F` follow, `P` previous, `M` modified-following).
/// Case-insensitive.
pub fn parse_bdc(s: &str) -> anyhow::Result<BusinessDayConvention> {
    match s.trim().to_uppercase().as_str() {
        "N" | "NONE" | "UNADJUSTED" => Ok(BusinessDayConvention::Unadjusted),
        "F" | "FOLLOW" | "FOLLOWING" => Ok(BusinessDayConvention::Following),
        "P" | "PREVIOUS" | "PRECEDING" => Ok(BusinessDayConvention::Preceding),
        "M" | "MODIFIED" | "MODIFIEDFOLLOWING" | "MODIFIED FOLLOWING" => {
            Ok(BusinessDayConvention::ModifiedFollowing)
        }
        other => Err(anyhow::anyhow!("Unknown business day convention '{}'", other)),
    }
}

/// Resolves a holiday calendar by name.
///
/// Only the weekend-only calendar is currently wired; any other name is
/// rejected rather than silently falling back, so a typo in `--calendar`
/// surfaces as an error instead of a silently wrong curve.
pub fn resolve_calendar(name: &str) -> anyhow::Result<WeekendCalendar> {
    match name.trim().to_uppercase().as_str() {
        "WEEKEND" | "NONE" | "" => Ok(WeekendCalendar),
        other => Err(anyhow::anyhow!(
            "Unknown holiday calendar '{}' (only 'weekend' is available)",
            other
        )),
    }
}
