//! Stub period convention for schedule generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Where a short/long stub period falls in a generated schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StubPosition {
    /// Stub sits at the front of the schedule (first period).
    Front,
    /// Stub sits at the back of the schedule (last period).
    Back,
}

/// Whether a stub period is shorter or longer than a regular period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StubLength {
    /// The stub is shorter than a regular period.
    Short,
    /// The stub is longer than a regular period (merged with the adjacent one).
    Long,
}

/// The stub method for a generated payment schedule: a position
/// (front/back) crossed with a length (short/long). `None` represents a
/// schedule with no stub at all (the tenor divides evenly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StubMethod {
    /// No stub; the schedule divides evenly into regular periods.
    #[default]
    None,
    /// Short stub at the front of the schedule.
    ShortFront,
    /// Long stub at the front of the schedule.
    LongFront,
    /// Short stub at the back of the schedule.
    ShortBack,
    /// Long stub at the back of the schedule.
    LongBack,
}

impl StubMethod {
    /// Builds a stub method from a position/length pair.
    #[must_use]
    pub fn from_parts(position: StubPosition, length: StubLength) -> Self {
        match (position, length) {
            (StubPosition::Front, StubLength::Short) => StubMethod::ShortFront,
            (StubPosition::Front, StubLength::Long) => StubMethod::LongFront,
            (StubPosition::Back, StubLength::Short) => StubMethod::ShortBack,
            (StubPosition::Back, StubLength::Long) => StubMethod::LongBack,
        }
    }

    /// Returns the stub position, if any.
    #[must_use]
    pub fn position(&self) -> Option<StubPosition> {
        match self {
            StubMethod::None => None,
            StubMethod::ShortFront | StubMethod::LongFront => Some(StubPosition::Front),
            StubMethod::ShortBack | StubMethod::LongBack => Some(StubPosition::Back),
        }
    }

    /// Returns true if the schedule is rolled forward from the effective
    /// date (front stub or no stub), false if rolled backward from maturity.
    #[must_use]
    pub fn rolls_forward(&self) -> bool {
        matches!(self, StubMethod::ShortFront | StubMethod::LongFront)
    }
}

impl fmt::Display for StubMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StubMethod::None => "None",
            StubMethod::ShortFront => "F/S",
            StubMethod::LongFront => "F/L",
            StubMethod::ShortBack => "B/S",
            StubMethod::LongBack => "B/L",
        };
        write!(f, "{s}")
    }
}

impl FromStr for StubMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" | "N" => Ok(StubMethod::None),
            "F" | "F/S" | "SHORTFRONT" => Ok(StubMethod::ShortFront),
            "F/L" | "LONGFRONT" => Ok(StubMethod::LongFront),
            "B" | "B/S" | "SHORTBACK" => Ok(StubMethod::ShortBack),
            "B/L" | "LONGBACK" => Ok(StubMethod::LongBack),
            _ => Err(CoreError::invalid_input(format!(
                "unknown stub method: {s}"
            ))),
        }
    }
}
