/// Common calendar helper functions.
use crate::expression::ExpressionValueType;
use std::cmp::Ordering;

/// Converts string into unsigned number with bounds validation.
pub(crate) fn parse_digital_value(
    input: &str,
    min: ExpressionValueType,
    max: ExpressionValueType,
) -> Option<ExpressionValueType> {
    input
        .parse::<ExpressionValueType>()
        .ok()
        .filter(|value| (min..=max).contains(value))
}

/// Converts string with mnemonic value representation into unsigned number.
pub(crate) fn parse_string_value(input: &str, values: &[&str]) -> Option<ExpressionValueType> {
    if input.is_empty() {
        None
    } else {
        values
            .iter()
            .position(|x| x.eq_ignore_ascii_case(input))
            .map(|i| i as ExpressionValueType)
    }
}

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month.
pub(crate) fn days_in_month(year: i32, month: ExpressionValueType) -> ExpressionValueType {
    if month == 0 || month > 12 {
        panic!("Invalid month: {month}");
    }

    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!(),
    }
}

/// Calculates day of week for specified date, Monday is 0, Sunday is 6.
pub(crate) fn day_of_week(year: i32, month: ExpressionValueType, day: ExpressionValueType) -> ExpressionValueType {
    if day == 0 || month == 0 || month > 12 || day > days_in_month(year, month) {
        panic!("Invalid date: {year:04}-{month:02}-{day:02}");
    }

    let month_offset: i32 = if is_leap_year(year) {
        [0, 3, 4, 0, 2, 5, 0, 3, 6, 1, 4, 6]
    } else {
        [0, 3, 3, 6, 1, 4, 6, 2, 5, 0, 3, 5]
    }[(month - 1) as usize];

    let year = year - 1;
    // the raw formula counts from Sunday, rotate it to start the week on Monday
    let sunday_first = (day as i32
        + month_offset
        + 5 * year.rem_euclid(4)
        + 4 * year.rem_euclid(100)
        + 6 * year.rem_euclid(400))
    .rem_euclid(7);

    ((sunday_first + 6) % 7) as ExpressionValueType
}

/// Returns day in the month for the last specified day of the week.
pub(crate) fn last_dow(year: i32, month: ExpressionValueType, dow: ExpressionValueType) -> ExpressionValueType {
    if month == 0 || month > 12 || dow > 6 {
        panic!("Invalid month or day of week: {month:02}/{dow}");
    }

    let mut last_day = days_in_month(year, month);

    while day_of_week(year, month, last_day) != dow {
        last_day -= 1;
    }

    last_day
}

/// Returns date (day in the month) of the specified N-th day of the week,
/// or `None` if the month has fewer occurrences of that weekday.
pub(crate) fn nth_dow(
    year: i32,
    month: ExpressionValueType,
    dow: ExpressionValueType,
    n: ExpressionValueType,
) -> Option<ExpressionValueType> {
    if month == 0 || month > 12 || dow > 6 || n == 0 || n > 5 {
        panic!("Invalid month, day of week or nth occurrence: {month:02}/{dow}/{n}");
    }

    let first_dow = day_of_week(year, month, 1);

    let mut day = 1 + (n - 1) * 7;

    match first_dow.cmp(&dow) {
        Ordering::Greater => day += 7 - (first_dow - dow),
        Ordering::Less => day += dow - first_dow,
        Ordering::Equal => {}
    }

    if day > days_in_month(year, month) {
        None
    } else {
        Some(day)
    }
}

/// Returns date of the weekday (not Sunday or Saturday) nearest to the specified date
/// in the same month, or `None` if the month is too short to contain the target date.
pub(crate) fn nearest_weekday(
    year: i32,
    month: ExpressionValueType,
    day: ExpressionValueType,
) -> Option<ExpressionValueType> {
    if day == 0 || month == 0 || month > 12 {
        panic!("Invalid date: {year:04}-{month:02}-{day:02}");
    }

    let last_day = days_in_month(year, month);
    if day > last_day {
        return None;
    }

    let dow = day_of_week(year, month, day);

    // middle of the week
    let nearest = if dow < 5 {
        day
    } else if dow == 5 {
        // saturday
        if day > 1 {
            day - 1
        } else {
            day + 2
        }
    } else {
        // sunday
        if day == last_day {
            day - 2
        } else {
            day + 1
        }
    };

    Some(nearest)
}
