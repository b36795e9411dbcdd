//! Process-wide cache of named holiday calendars.
//!
//! Calendars are looked up by name (case-insensitive) and loaded lazily
//! from holiday files on first use. Two standard calendars — `NONE` (no
//! holidays at all) and `NO_WEEKENDS` (no holidays, no weekend mask) —
//! are always present and cannot be purged.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::bitmap::WeekendType;
use super::dynamic::DynamicCalendar;
use crate::error::{CoreError, CoreResult};

/// Name of the calendar with no holidays and the standard Saturday/Sunday
/// weekend mask.
pub const STANDARD_WEEKEND_ONLY: &str = "NONE";
/// Name of the calendar with no holidays and no weekend mask at all.
pub const NO_WEEKENDS: &str = "NO_WEEKENDS";

static CACHE: Lazy<RwLock<HashMap<String, DynamicCalendar>>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        STANDARD_WEEKEND_ONLY.to_string(),
        DynamicCalendar::new(STANDARD_WEEKEND_ONLY, WeekendType::SaturdaySunday),
    );
    map.insert(
        NO_WEEKENDS.to_string(),
        DynamicCalendar::new(NO_WEEKENDS, WeekendType::None),
    );
    RwLock::new(map)
});

fn key(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// Registers (or replaces) a calendar under the given name.
pub fn register(name: &str, calendar: DynamicCalendar) {
    CACHE.write().insert(key(name), calendar);
}

/// Returns a clone of the calendar registered under `name`, if any.
#[must_use]
pub fn get(name: &str) -> Option<DynamicCalendar> {
    CACHE.read().get(&key(name)).cloned()
}

/// Loads a calendar from a holiday file and registers it under `name`,
/// unless a calendar with that name is already cached.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_or_get(name: &str, path: impl AsRef<Path>) -> CoreResult<DynamicCalendar> {
    if let Some(existing) = get(name) {
        return Ok(existing);
    }
    let calendar = super::holiday_file::parse_file(name, path)?;
    register(name, calendar.clone());
    Ok(calendar)
}

/// Removes every cached calendar except the two standard ones.
pub fn purge_except_standards() {
    let mut guard = CACHE.write();
    guard.retain(|k, _| k == STANDARD_WEEKEND_ONLY || k == NO_WEEKENDS);
}

/// Returns the number of calendars currently cached.
#[must_use]
pub fn len() -> usize {
    CACHE.read().len()
}

/// Looks up a calendar by name, returning an error if it is not cached.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` if no calendar is registered under
/// `name`.
pub fn require(name: &str) -> CoreResult<DynamicCalendar> {
    get(name).ok_or_else(|| CoreError::invalid_input(format!("unknown calendar: {name}")))
}
