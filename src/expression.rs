use crate::{utils, Error, Result};
use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

pub(crate) type ExpressionValueType = u8;

/// Calendar dimension a rule expression applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Field {
    Months,
    MonthDays,
    Weekdays,
}

impl Field {
    const DAYS_OF_WEEK: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    fn min_max(&self) -> (ExpressionValueType, ExpressionValueType) {
        match self {
            Self::Months => (1, 12),
            Self::MonthDays => (1, 31),
            Self::Weekdays => (0, 6),
        }
    }

    /// Parses a single numeric or mnemonic value of this field.
    fn parse(&self, input: &str) -> Result<ExpressionValueType> {
        let (min, max) = self.min_max();

        let value = match self {
            Self::Months => {
                utils::parse_digital_value(input, min, max).or_else(|| {
                    // mnemonic months are numbered from 1
                    utils::parse_string_value(input, &Self::MONTHS).map(|value| value + 1)
                })
            }
            Self::MonthDays => utils::parse_digital_value(input, min, max),
            Self::Weekdays => utils::parse_digital_value(input, min, max)
                .or_else(|| utils::parse_string_value(input, &Self::DAYS_OF_WEEK)),
        };

        value.ok_or_else(|| self.value_error(input))
    }

    fn value_error(&self, input: &str) -> Error {
        let input = input.to_owned();
        match self {
            Self::Months => Error::InvalidMonthValue(input),
            Self::MonthDays => Error::InvalidDayOfMonthValue(input),
            Self::Weekdays => Error::InvalidDayOfWeekValue(input),
        }
    }

    /// Extracts this field's value from a date, weekdays are numbered from Monday.
    fn value_of<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> ExpressionValueType {
        match self {
            Self::Months => date.month() as ExpressionValueType,
            Self::MonthDays => date.day() as ExpressionValueType,
            Self::Weekdays => date.weekday().num_days_from_monday() as ExpressionValueType,
        }
    }
}

/// Single parsed rule expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum ExpressionItem {
    /// single value
    Exact(ExpressionValueType),
    /// start-finish
    Range(ExpressionValueType, ExpressionValueType),
    /// start/step
    Step(ExpressionValueType, ExpressionValueType),
    /// start-finish/step
    RangeStep(ExpressionValueType, ExpressionValueType, ExpressionValueType),
    /// last day of the month
    LastDayOfMonth,
    /// weekday nearest to the target day, within the same month
    NearestWeekday(ExpressionValueType),
    /// weekday#nth
    NthWeekday(ExpressionValueType, ExpressionValueType),
    /// last weekday of the month
    LastWeekday(ExpressionValueType),
}

impl Display for ExpressionItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpressionItem::Exact(value) => write!(f, "{value}"),
            ExpressionItem::Range(start, finish) => write!(f, "{start}-{finish}"),
            ExpressionItem::Step(start, step) => write!(f, "{start}/{step}"),
            ExpressionItem::RangeStep(start, finish, step) => write!(f, "{start}-{finish}/{step}"),
            ExpressionItem::LastDayOfMonth => write!(f, "L"),
            ExpressionItem::NearestWeekday(day) => write!(f, "{day}W"),
            ExpressionItem::NthWeekday(dow, n) => write!(f, "{dow}#{n}"),
            ExpressionItem::LastWeekday(dow) => write!(f, "{dow}L"),
        }
    }
}

/// Rule expression bound to the field it constrains.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Expression {
    field: Field,
    item: ExpressionItem,
}

impl Expression {
    /// Parses a single (trimmed, case insensitive) rule expression of the field's mini-language.
    pub(crate) fn parse(field: Field, input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidRuleExpression(input.to_owned()));
        }

        let item = if field == Field::MonthDays && input.eq_ignore_ascii_case("L") {
            ExpressionItem::LastDayOfMonth
        } else if field == Field::MonthDays && (input.ends_with('W') || input.ends_with('w')) {
            ExpressionItem::NearestWeekday(field.parse(&input[..input.len() - 1])?)
        } else if field == Field::Weekdays && (input.ends_with('L') || input.ends_with('l')) {
            ExpressionItem::LastWeekday(field.parse(&input[..input.len() - 1])?)
        } else if field == Field::Weekdays && input.contains('#') {
            let (dow, number) = input.split_once('#').unwrap();
            let number = utils::parse_digital_value(number, 1, 5)
                .ok_or_else(|| Error::InvalidDayOfWeekValue(input.to_owned()))?;
            ExpressionItem::NthWeekday(field.parse(dow)?, number)
        } else if input.contains('/') {
            let (base, repeater) = input.split_once('/').unwrap();
            let repeater = match repeater.parse::<ExpressionValueType>() {
                Ok(repeater) if repeater >= 1 => repeater,
                _ => return Err(Error::InvalidRepeatingPattern(input.to_owned())),
            };

            if base.contains('-') {
                let (start, finish) = base.split_once('-').unwrap();
                let (start, finish) = (field.parse(start)?, field.parse(finish)?);
                if start > finish {
                    return Err(Error::InvalidRangeValue(input.to_owned()));
                }
                ExpressionItem::RangeStep(start, finish, repeater)
            } else if field == Field::Weekdays {
                // open-ended weekday steps are not part of the language
                return Err(Error::InvalidRepeatingPattern(input.to_owned()));
            } else {
                ExpressionItem::Step(field.parse(base)?, repeater)
            }
        } else if input.contains('-') {
            let (start, finish) = input.split_once('-').unwrap();
            let (start, finish) = (field.parse(start)?, field.parse(finish)?);
            if start > finish {
                return Err(Error::InvalidRangeValue(input.to_owned()));
            }
            ExpressionItem::Range(start, finish)
        } else {
            ExpressionItem::Exact(field.parse(input)?)
        };

        Ok(Self { field, item })
    }

    /// Returns `true` if the date satisfies this expression.
    pub(crate) fn matches<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> bool {
        let year = date.year();
        let month = date.month() as ExpressionValueType;
        let day = date.day() as ExpressionValueType;
        let value = self.field.value_of(date);

        match &self.item {
            ExpressionItem::Exact(expected) => value == *expected,
            ExpressionItem::Range(start, finish) => (*start..=*finish).contains(&value),
            ExpressionItem::Step(start, step) => step_matches(value, *start, *step),
            ExpressionItem::RangeStep(start, finish, step) => {
                (*start..=*finish).contains(&value) && step_matches(value, *start, *step)
            }
            ExpressionItem::LastDayOfMonth => day == utils::days_in_month(year, month),
            ExpressionItem::NearestWeekday(target) => utils::nearest_weekday(year, month, *target) == Some(day),
            ExpressionItem::NthWeekday(dow, n) => utils::nth_dow(year, month, *dow, *n) == Some(day),
            ExpressionItem::LastWeekday(dow) => day == utils::last_dow(year, month, *dow),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.item)
    }
}

/// Values at a whole number of steps from the start match, below the start as well.
fn step_matches(value: ExpressionValueType, start: ExpressionValueType, step: ExpressionValueType) -> bool {
    (value as i16 - start as i16).rem_euclid(step as i16) == 0
}

/// Parsed rule for one calendar dimension of a period.
///
/// An omitted dimension matches any date, a present one matches if at least one
/// of its expressions does. The two cases are kept distinct so that an explicitly
/// empty list never silently turns into a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum DateRule {
    #[default]
    Any,
    AnyOf(Vec<Expression>),
}

impl DateRule {
    /// Parses a comma separated list of rule expressions.
    pub(crate) fn parse(field: Field, input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(Error::InvalidRuleExpression(input.to_owned()));
        }

        let mut error_indicator = Ok(());
        let expressions = input
            .split(',')
            .map(|value| Expression::parse(field, value))
            .scan(&mut error_indicator, |err, res| match res {
                Ok(expression) => Some(expression),
                Err(e) => {
                    **err = Err(e);
                    None
                }
            })
            .collect::<Vec<_>>();

        error_indicator?;

        Ok(Self::AnyOf(expressions))
    }

    /// Returns `true` if the date satisfies this rule.
    pub(crate) fn matches<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> bool {
        match self {
            Self::Any => true,
            Self::AnyOf(expressions) => expressions.iter().any(|e| e.matches(date)),
        }
    }
}

impl Display for DateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::AnyOf(expressions) => {
                let expressions = expressions.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(",");
                write!(f, "{expressions}")
            }
        }
    }
}
