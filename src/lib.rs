//! Lightweight recurrence period parser and schedule activity evaluator.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a tiny crate, intended to:
//! - parse recurrence periods written in a small cron-like rule language;
//! - answer whether a named schedule of such periods is active at a given instant;
//! - derive the effective begin/end boundary times of a schedule for the current day.
//!
//! _This is not a scheduler._ The crate never reads the wall clock: every verdict is
//! computed from an instant the caller passes in, so evaluation is deterministic and
//! repeatable. Parsing and validation happen once, when a [`Period`] or [`Schedule`]
//! is built, evaluation itself is infallible.
//!
//! ## Rule language
//!
//! A period constrains up to three calendar dimensions and a daily time window.
//! Each dimension holds a comma separated list of expressions and matches when at
//! least one expression in the list matches. An omitted dimension matches everything.
//!
//! | Dimension   | Allowed values           | Allowed expressions            |
//! |-------------|--------------------------|--------------------------------|
//! | `Months`    | `1`-`12`, `jan`-`dec`    | exact, `-`, `/`, `-/`          |
//! | `MonthDays` | `1`-`31`                 | exact, `-`, `/`, `-/`, `L`, `W`|
//! | `Weekdays`  | `0`-`6`, `mon`-`sun`     | exact, `-`, `-/`, `L`, `#`     |
//!
//! Weekdays are numbered from Monday: `mon` is `0`, `sun` is `6`. Names are
//! three-letter, case insensitive.
//!
//! Expression meanings:
//! - exact value: `15`, `jan`, `fri`;
//! - `-`: inclusive range of values: `1-15`, `jan-jun`, `mon-fri`;
//! - `/`: repeating values anchored at the start: `3/2` matches every value at a whole
//!   number of steps from `3`, below the start as well (`1`, `3`, `5`, ...);
//! - `-/`: range with a step: `jan-jun/2`, `0-4/2`;
//! - `L`: for days of month, the last day of the month, leap years respected;
//!   for weekdays, the last such weekday of the month: `friL`;
//! - `W`: the weekday (neither Saturday nor Sunday) nearest to the target day, never
//!   leaving the month: `15W`; if the month is too short to contain the target day,
//!   nothing matches;
//! - `#`: the n-th (1-5) such weekday of the month: `mon#1`, `4#2`.
//!
//! The daily window is set by begin and end times with minute resolution. With
//! `begin <= end` the window is half-open: the begin minute is active, the end minute
//! is not. With `begin > end` the window is an overnight one and wraps past midnight.
//! Either bound may be omitted, such window is open on that side.
//!
//! ## How to use
//!
//! Build periods with the `with_*` methods (or convert from [`PeriodDef`] records),
//! put them into a map, and query schedules against that map.
//!
//! ### Example with a single period
//!
//! ```rust
//! use chrono::TimeZone;
//! use period_lite::{Period, Result};
//!
//! fn office_hours() -> Result<()> {
//!     let period = Period::new()
//!         .with_weekdays("mon-fri")?
//!         .with_begin_time("08:00")?
//!         .with_end_time("18:00")?;
//!
//!     // Wednesday morning, inside the window
//!     let now = chrono_tz::UTC.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
//!     assert!(period.is_active(chrono_tz::UTC, &now));
//!
//!     // Saturday never matches
//!     let now = chrono_tz::UTC.with_ymd_and_hms(2024, 1, 13, 9, 30, 0).unwrap();
//!     assert!(!period.is_active(chrono_tz::UTC, &now));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Example with a schedule
//!
//! ```rust
//! use chrono::TimeZone;
//! use period_lite::{Period, Result, Schedule};
//! use std::collections::HashMap;
//!
//! fn office_schedule() -> Result<()> {
//!     let mut periods = HashMap::new();
//!     periods.insert(
//!         "office-hours".to_string(),
//!         Period::new()
//!             .with_weekdays("0-4")?
//!             .with_begin_time("08:00")?
//!             .with_end_time("18:00")?,
//!     );
//!
//!     let schedule = Schedule::new("office")
//!         .with_timezone("Asia/Ho_Chi_Minh")?
//!         .with_periods(["office-hours"]);
//!
//!     // Wednesday, 10:00 in Ho Chi Minh City
//!     let now = chrono_tz::Asia::Ho_Chi_Minh.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
//!     assert!(schedule.is_active(&periods, &now));
//!
//!     // boundary times of the current day, for consumers planning transitions
//!     let boundaries = schedule.boundary_times(&periods, &now);
//!     assert_eq!(boundaries.soonest_begin, Some("08:00".parse()?));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature flags
//!
//! The default feature set is empty.
//! * `serde`: adds `Serialize`/`Deserialize` implementations for the configuration
//!   record types ([`PeriodDef`], [`ScheduleDef`], [`ScheduleFlags`]) and [`TimeOfDay`].

/// Crate specific Errors implementation.
pub mod error;
mod expression;
/// Recurrence periods: parsing and evaluation.
pub mod period;
/// Schedules: aggregation of named periods.
pub mod schedule;
mod utils;

// Re-export of public entities.
pub use error::Error;
pub use period::{Period, PeriodDef, TimeOfDay};
pub use schedule::{BoundaryTimes, Schedule, ScheduleDef, ScheduleFlags};

/// Convenient alias for `Result`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
