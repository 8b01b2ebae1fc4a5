use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Error {
    /// Error parsing recurrence rule expression.
    #[error("invalid rule expression: {0}")]
    InvalidRuleExpression(String),
    /// Invalid month value specified.
    #[error("invalid month value: {0}")]
    InvalidMonthValue(String),
    /// Invalid day of month value specified.
    #[error("invalid day of month value: {0}")]
    InvalidDayOfMonthValue(String),
    /// Invalid day of week value specified.
    #[error("invalid day of week value: {0}")]
    InvalidDayOfWeekValue(String),
    /// Invalid range value specified.
    #[error("invalid range value: {0}")]
    InvalidRangeValue(String),
    /// Invalid repeating pattern specified.
    #[error("invalid repeating pattern: {0}")]
    InvalidRepeatingPattern(String),
    /// Invalid time of day value specified.
    #[error("invalid time value: {0}")]
    InvalidTimeValue(String),
    /// Invalid or unknown timezone name specified.
    #[error("invalid timezone: {0}")]
    InvalidTimeZone(String),
}
