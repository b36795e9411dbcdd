//! # CDS Core
//!
//! Core date, calendar, and day-count types underpinning the ISDA CDS
//! standard model implementation.
//!
//! This crate provides the foundational building blocks used throughout
//! the curve and credit crates:
//!
//! - **Types**: `Date`, `DateInterval`, `Frequency`, `StubMethod`
//! - **Day Count Conventions**: Industry-standard day count fraction calculations
//! - **Business Day Calendars**: Holiday calendars, bitmap lookups, and a
//!   process-wide calendar cache
//! - **Schedule Generation**: Stub-aware premium accrual schedules
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Zero-Cost Abstractions**: Trait-based design with no runtime overhead
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use cds_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 6, 20).unwrap();
//! let tenor: DateInterval = "5Y".parse().unwrap();
//! let maturity = tenor.apply(start).unwrap();
//!
//! let dc = DayCountConvention::Act360.to_day_count();
//! let accrual = dc.year_fraction(start, maturity);
//! assert!(accrual > 4.9 && accrual < 5.1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::{generate_schedule, Schedule, SchedulePeriod};
    pub use crate::types::{Date, DateInterval, Frequency, StubMethod};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use schedule::{generate_schedule, Schedule, SchedulePeriod};
pub use types::{Date, DateInterval, Frequency};
