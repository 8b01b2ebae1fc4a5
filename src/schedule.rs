use crate::{period::Period, Error, Result, TimeOfDay};
use chrono::{DateTime, TimeZone};
use std::{collections::HashMap, str::FromStr};

/// Pass-through behavior flags of a schedule.
///
/// The evaluator stores and serializes them but never reads them: activity verdicts
/// depend only on the periods, the timezone and the supplied instant. The flags tell
/// the consuming enforcement logic how to act on those verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase", default))]
pub struct ScheduleFlags {
    /// Enforce the schedule state even on manually changed resources.
    pub enforced: bool,
    /// Hibernate instead of a plain stop when the window closes.
    pub hibernate: bool,
    /// Keep already running resources running outside of the window.
    pub retain_running: bool,
    /// Refuse to start resources created inside an inactive window.
    pub stop_new_instances: bool,
    /// Emit per-schedule usage metrics.
    pub use_metric: bool,
}

/// Schedule level clock time envelope for the current day.
///
/// Collected from the periods whose date dimensions cover the current day:
/// the soonest declared window begin and the latest declared window end.
/// Either bound is `None` if no date-active period declares it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoundaryTimes {
    /// Earliest begin time among the date-active periods.
    pub soonest_begin: Option<TimeOfDay>,
    /// Latest end time among the date-active periods.
    pub latest_end: Option<TimeOfDay>,
}

/// Raw schedule record, as it arrives from a configuration store.
///
/// Convert it into a [`Schedule`] with `try_from` to validate the timezone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct ScheduleDef {
    /// Unique schedule name.
    pub name: String,
    /// IANA timezone name, `UTC` is used when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timezone: Option<String>,
    /// Names of the periods the schedule is made of.
    #[cfg_attr(feature = "serde", serde(default))]
    pub period_names: Vec<String>,
    /// Behavior flags, passed through to the consumer.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub flags: ScheduleFlags,
}

/// Named binding of recurrence periods to a timezone and behavior flags.
///
/// A schedule refers to its periods by name, the actual [`Period`] instances
/// live in a map supplied at evaluation time. This way a single pool of parsed
/// periods can be shared by any number of schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    name: String,
    timezone: chrono_tz::Tz,
    period_names: Vec<String>,
    flags: ScheduleFlags,
}

impl Schedule {
    /// Creates a schedule without periods, in the `UTC` timezone, with all flags off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timezone: chrono_tz::UTC,
            period_names: Vec::new(),
            flags: ScheduleFlags::default(),
        }
    }

    /// Sets the schedule's timezone from an IANA name, e.g. `Europe/Kyiv`.
    pub fn with_timezone(mut self, timezone: impl AsRef<str>) -> Result<Self> {
        let timezone = timezone.as_ref();
        self.timezone =
            chrono_tz::Tz::from_str(timezone).map_err(|_| Error::InvalidTimeZone(timezone.to_owned()))?;

        Ok(self)
    }

    /// Replaces the list of period names the schedule refers to.
    pub fn with_periods<I, S>(mut self, period_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.period_names = period_names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the behavior flags.
    pub fn with_flags(mut self, flags: ScheduleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Schedule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schedule timezone.
    pub fn timezone(&self) -> chrono_tz::Tz {
        self.timezone
    }

    /// Referred period names, in the configuration order.
    pub fn period_names(&self) -> &[String] {
        &self.period_names
    }

    /// Behavior flags.
    pub fn flags(&self) -> ScheduleFlags {
        self.flags
    }

    /// Returns `true` if at least one of the referred periods is active at `now`,
    /// evaluated on the wall clock of the schedule's timezone.
    ///
    /// Period names missing from `periods` are skipped: configuration drift between
    /// the schedule and the period store must not fail the whole evaluation.
    /// A schedule without a single resolvable period is never active.
    pub fn is_active<Tz: TimeZone>(&self, periods: &HashMap<String, Period>, now: &DateTime<Tz>) -> bool {
        self.resolved_periods(periods).any(|p| p.is_active(self.timezone, now))
    }

    /// Returns the clock time envelope of the referred periods whose date dimensions
    /// cover the current day of the schedule's timezone.
    ///
    /// Periods inactive on the current date don't contribute their window bounds,
    /// so both bounds are `None` when no period covers today.
    pub fn boundary_times<Tz: TimeZone>(
        &self,
        periods: &HashMap<String, Period>,
        now: &DateTime<Tz>,
    ) -> BoundaryTimes {
        let mut boundaries = BoundaryTimes::default();

        for period in self.resolved_periods(periods) {
            if !period.is_date_active(self.timezone, now) {
                continue;
            }

            if let Some(begin) = period.begin_time() {
                boundaries.soonest_begin = Some(boundaries.soonest_begin.map_or(begin, |b| b.min(begin)));
            }
            if let Some(end) = period.end_time() {
                boundaries.latest_end = Some(boundaries.latest_end.map_or(end, |e| e.max(end)));
            }
        }

        boundaries
    }

    fn resolved_periods<'a>(&'a self, periods: &'a HashMap<String, Period>) -> impl Iterator<Item = &'a Period> {
        self.period_names.iter().filter_map(|name| periods.get(name))
    }
}

impl TryFrom<&ScheduleDef> for Schedule {
    type Error = Error;

    fn try_from(def: &ScheduleDef) -> Result<Self> {
        let mut schedule = Schedule::new(&def.name)
            .with_periods(def.period_names.iter().cloned())
            .with_flags(def.flags);

        if let Some(timezone) = def.timezone.as_deref() {
            schedule = schedule.with_timezone(timezone)?;
        }

        Ok(schedule)
    }
}

impl TryFrom<ScheduleDef> for Schedule {
    type Error = Error;

    fn try_from(def: ScheduleDef) -> Result<Self> {
        Self::try_from(&def)
    }
}
