use crate::{
    expression::{DateRule, Field},
    utils, Error, Result,
};
use chrono::{DateTime, TimeZone, Timelike};
use std::{fmt::Display, str::FromStr};

/// Wall clock time of day with minute resolution.
///
/// Parsed from `HH:MM` strings, one-digit hours and minutes are accepted as well.
/// Values compare chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Constructs a time of day from hour (0-23) and minute (0-59) numbers.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidTimeValue(format!("{hour:02}:{minute:02}")));
        }

        Ok(Self { hour, minute })
    }

    /// Hour part, 0-23.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute part, 0-59.
    pub fn minute(&self) -> u8 {
        self.minute
    }

    fn parse(input: &str) -> Result<Self> {
        let err = || Error::InvalidTimeValue(input.to_owned());

        let (hour, minute) = input.trim().split_once(':').ok_or_else(err)?;
        if !(1..=2).contains(&hour.len()) || !(1..=2).contains(&minute.len()) {
            return Err(err());
        }

        let hour = utils::parse_digital_value(hour, 0, 23).ok_or_else(err)?;
        let minute = utils::parse_digital_value(minute, 0, 59).ok_or_else(err)?;

        Ok(Self { hour, minute })
    }

    /// Truncates a timestamp to its wall clock hour and minute.
    fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self {
            hour: instant.hour() as u8,
            minute: instant.minute() as u8,
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TimeOfDay {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Raw period record, as it arrives from a configuration store.
///
/// Every field is optional, absent (or blank) fields mean "no constraint".
/// It's an intermediate representation: convert it into a [`Period`] with
/// `try_from` to validate the rules and get something that can be evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase", default))]
pub struct PeriodDef {
    /// Month expressions, e.g. `["jan-jun/2", "dec"]`.
    pub months: Option<Vec<String>>,
    /// Day of month expressions, e.g. `["1-15", "L"]`.
    pub month_days: Option<Vec<String>>,
    /// Weekday expressions, e.g. `["mon#1", "fri"]`.
    pub weekdays: Option<Vec<String>>,
    /// Start of the daily activity window, `HH:MM`.
    pub begin_time: Option<String>,
    /// End of the daily activity window, `HH:MM`.
    pub end_time: Option<String>,
}

/// Named recurrence rule: which calendar dates and which part of the day count as active.
///
/// A new period has no constraints at all and is active at every instant, each
/// `with_*` call narrows one dimension. All parsing and validation happens in the
/// builder methods, so evaluation never fails: a successfully built period can be
/// queried with any instant, in any timezone, repeatedly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Period {
    months: DateRule,
    month_days: DateRule,
    weekdays: DateRule,
    begin_time: Option<TimeOfDay>,
    end_time: Option<TimeOfDay>,
}

impl Period {
    /// Creates a period without constraints: every date and every time of day is active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the period to months matching any of the comma separated expressions.
    pub fn with_months(mut self, months: impl AsRef<str>) -> Result<Self> {
        self.months = DateRule::parse(Field::Months, months.as_ref())?;
        Ok(self)
    }

    /// Restricts the period to days of month matching any of the comma separated expressions.
    pub fn with_month_days(mut self, month_days: impl AsRef<str>) -> Result<Self> {
        self.month_days = DateRule::parse(Field::MonthDays, month_days.as_ref())?;
        Ok(self)
    }

    /// Restricts the period to weekdays matching any of the comma separated expressions,
    /// weekdays are numbered from Monday: `mon` is `0`, `sun` is `6`.
    pub fn with_weekdays(mut self, weekdays: impl AsRef<str>) -> Result<Self> {
        self.weekdays = DateRule::parse(Field::Weekdays, weekdays.as_ref())?;
        Ok(self)
    }

    /// Sets the start of the daily activity window (inclusive), `HH:MM`.
    pub fn with_begin_time(mut self, begin_time: impl AsRef<str>) -> Result<Self> {
        self.begin_time = Some(begin_time.as_ref().parse()?);
        Ok(self)
    }

    /// Sets the end of the daily activity window (exclusive), `HH:MM`.
    pub fn with_end_time(mut self, end_time: impl AsRef<str>) -> Result<Self> {
        self.end_time = Some(end_time.as_ref().parse()?);
        Ok(self)
    }

    /// Start of the daily activity window, if declared.
    pub fn begin_time(&self) -> Option<TimeOfDay> {
        self.begin_time
    }

    /// End of the daily activity window, if declared.
    pub fn end_time(&self) -> Option<TimeOfDay> {
        self.end_time
    }

    /// Returns `true` if the period is active at `now`, evaluated on the wall clock of `tz`.
    ///
    /// All populated date dimensions have to match the local date, and the local time
    /// of day (truncated to the minute) has to fall into the declared window. A window
    /// with `begin <= end` is half-open: the begin minute is active, the end minute is
    /// not. A window with `begin > end` is an overnight one and wraps past midnight.
    /// Equal begin and end form an empty window.
    pub fn is_active<Tz: TimeZone>(&self, tz: chrono_tz::Tz, now: &DateTime<Tz>) -> bool {
        let local = now.with_timezone(&tz);

        self.date_matches(&local) && self.time_matches(TimeOfDay::from_instant(&local))
    }

    /// Returns `true` if the period's date dimensions cover the day of `now` on the
    /// wall clock of `tz`, regardless of the daily time window.
    pub fn is_date_active<Tz: TimeZone>(&self, tz: chrono_tz::Tz, now: &DateTime<Tz>) -> bool {
        self.date_matches(&now.with_timezone(&tz))
    }

    fn date_matches(&self, local: &DateTime<chrono_tz::Tz>) -> bool {
        self.months.matches(local) && self.month_days.matches(local) && self.weekdays.matches(local)
    }

    fn time_matches(&self, now: TimeOfDay) -> bool {
        match (self.begin_time, self.end_time) {
            (Some(begin), Some(end)) if begin <= end => begin <= now && now < end,
            // overnight window
            (Some(begin), Some(end)) => now >= begin || now < end,
            (Some(begin), None) => now >= begin,
            (None, Some(end)) => now < end,
            (None, None) => true,
        }
    }
}

impl TryFrom<&PeriodDef> for Period {
    type Error = Error;

    fn try_from(def: &PeriodDef) -> Result<Self> {
        let mut period = Period::new();

        if let Some(months) = join_expressions(&def.months) {
            period = period.with_months(months)?;
        }
        if let Some(month_days) = join_expressions(&def.month_days) {
            period = period.with_month_days(month_days)?;
        }
        if let Some(weekdays) = join_expressions(&def.weekdays) {
            period = period.with_weekdays(weekdays)?;
        }
        if let Some(begin_time) = def.begin_time.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            period = period.with_begin_time(begin_time)?;
        }
        if let Some(end_time) = def.end_time.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            period = period.with_end_time(end_time)?;
        }

        Ok(period)
    }
}

impl TryFrom<PeriodDef> for Period {
    type Error = Error;

    fn try_from(def: PeriodDef) -> Result<Self> {
        Self::try_from(&def)
    }
}

/// Joins a def's expression list into a single comma separated rule,
/// absent and blank lists mean "no constraint".
fn join_expressions(expressions: &Option<Vec<String>>) -> Option<String> {
    let joined = expressions.as_ref()?.join(",");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}
