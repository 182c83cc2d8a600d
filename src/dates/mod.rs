//! Date parsing, formatting and calendar arithmetic.
//!
//! Entry dates are free text in `DD/MM/YYYY` form, edited directly by the
//! user, so parsing here is deliberately permissive: the shape must be three
//! `/`-separated numbers, but out-of-range day and month values roll over
//! into adjacent months and years instead of being rejected. `32/13/2025`
//! parses to 2026-02-01. Callers that want strict validation must layer it
//! on top.
//!
//! Month parameters throughout this crate are 0-based (0 = January), the
//! convention the calendar views count in.

use crate::constants;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

/// Formats a date in the `DD/MM/YYYY` display form.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use diario::dates;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();
/// assert_eq!(dates::format_date(date), "07/10/2025");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format(constants::DISPLAY_DATE_FORMAT).to_string()
}

/// Today's date in the `DD/MM/YYYY` display form, local calendar.
pub fn current_date() -> String {
    format_date(Local::now().date_naive())
}

/// Parses a `DD/MM/YYYY` string.
///
/// Returns `None` unless the input is exactly three `/`-separated integer
/// fields. Field values outside their calendar range are not rejected: they
/// roll over, so day 0 is the last day of the previous month and month 13
/// lands in January of the next year.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use diario::dates;
///
/// assert_eq!(
///     dates::parse_date("07/10/2025"),
///     NaiveDate::from_ymd_opt(2025, 10, 7)
/// );
/// assert_eq!(
///     dates::parse_date("32/13/2025"),
///     NaiveDate::from_ymd_opt(2026, 2, 1)
/// );
/// assert_eq!(dates::parse_date("07-10-2025"), None);
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let day = parts.next()?.parse::<i64>().ok()?;
    let month = parts.next()?.parse::<i64>().ok()?;
    let year = parts.next()?.parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    date_with_rollover(year, month.checked_sub(1)?, day)
}

/// Builds a date from a year, 0-based month and day, letting out-of-range
/// month and day values roll over the way the original app's date
/// construction did.
fn date_with_rollover(year: i64, month0: i64, day: i64) -> Option<NaiveDate> {
    let year = year.checked_add(month0.div_euclid(12))?;
    let month = month0.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first.checked_add_signed(Duration::try_days(day.checked_sub(1)?)?)
}

/// Number of days in the given 0-based month.
pub fn days_in_month(month0: u32, year: i32) -> u32 {
    // Day 0 of the next month is the last day of this one.
    date_with_rollover(year as i64, month0 as i64 + 1, 0).map_or(0, |d| d.day())
}

/// Weekday index of the first day of the given 0-based month, 0 = Sunday.
pub fn first_weekday_of_month(month0: u32, year: i32) -> u32 {
    date_with_rollover(year as i64, month0 as i64, 1)
        .map_or(0, |d| d.weekday().num_days_from_sunday())
}

/// The cells of a 7-column calendar grid for the given 0-based month.
///
/// Leading `None` placeholders cover the weekday offset of day 1, followed
/// by `Some(1)..=Some(days_in_month)`. The tail is not padded to a multiple
/// of 7; a trailing short row is the grid renderer's problem.
///
/// # Examples
///
/// ```
/// use diario::dates;
///
/// // February 2024: leap year, the 1st is a Thursday.
/// let days = dates::calendar_days(1, 2024);
/// assert_eq!(days.len(), 4 + 29);
/// assert_eq!(days[3], None);
/// assert_eq!(days[4], Some(1));
/// assert_eq!(days.last(), Some(&Some(29)));
/// ```
pub fn calendar_days(month0: u32, year: i32) -> Vec<Option<u32>> {
    let offset = first_weekday_of_month(month0, year);
    let mut days: Vec<Option<u32>> = vec![None; offset as usize];
    days.extend((1..=days_in_month(month0, year)).map(Some));
    days
}

/// Whether two instants fall on the same local calendar day.
pub fn is_same_day(a: &DateTime<Local>, b: &DateTime<Local>) -> bool {
    a.date_naive() == b.date_naive()
}
