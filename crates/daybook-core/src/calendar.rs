//! Date and calendar helpers shared by every page of a document.
//!
//! All week math goes through [`week_start`] so that week boundaries, week
//! numbers and week link ids agree for a given first day of the week.
//!
//! Weekdays are addressed by their Sunday-zero offset (`0` = Sunday,
//! `6` = Saturday) wherever they appear in a persisted configuration.

use std::collections::BTreeSet;
use std::fmt;

use jiff::civil::{Date, Weekday};
use jiff::ToSpan;
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, Result};

/// Weekdays indexed by their Sunday-zero offset.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the weekday for a Sunday-zero offset, wrapping out-of-range values.
pub fn weekday_from_index(index: u8) -> Weekday {
    WEEKDAYS[usize::from(index % 7)]
}

/// Returns the Sunday-zero offset of a weekday.
pub fn weekday_index(weekday: Weekday) -> u8 {
    // to_sunday_zero_offset is always within 0..=6
    weekday.to_sunday_zero_offset().unsigned_abs()
}

/// The seven weekdays starting at `first_day`, wrapping circularly.
pub fn weekday_order(first_day: Weekday) -> [Weekday; 7] {
    let start = weekday_index(first_day);
    let mut order = [first_day; 7];
    for (offset, slot) in (0u8..).zip(order.iter_mut()) {
        *slot = weekday_from_index(start + offset);
    }
    order
}

/// Validates a set of weekend day offsets, returning them deduplicated and
/// sorted.
///
/// # Errors
///
/// Returns `DaybookError::InvalidConfiguration` if any element is outside
/// `0..=6`.
pub fn weekend_day_set(weekend_days: &[u8]) -> Result<BTreeSet<u8>> {
    weekend_days
        .iter()
        .map(|&day| {
            if day <= 6 {
                Ok(day)
            } else {
                Err(DaybookError::invalid_configuration("weekendDays")
                    .with_reason(format!("weekday {day} is outside 0..=6")))
            }
        })
        .collect()
}

/// First day of the week containing `date`.
pub fn week_start(date: Date, first_day: Weekday) -> Result<Date> {
    let offset = (date.weekday().to_sunday_zero_offset() - first_day.to_sunday_zero_offset())
        .rem_euclid(7);
    Ok(date.checked_sub(i64::from(offset).days())?)
}

/// Last day of the week containing `date`.
pub fn week_end(date: Date, first_day: Weekday) -> Result<Date> {
    Ok(week_start(date, first_day)?.checked_add(6.days())?)
}

/// Week number together with the year the week is counted in.
///
/// The year is not always the calendar year of a given day: the last days
/// of December may belong to week 1 of the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekNumber {
    /// Year the week is counted in
    pub year: i16,
    /// Week of that year, starting at 1
    pub week: i8,
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.week)
    }
}

/// Week number of `date` for weeks starting on `first_day`.
///
/// A week belongs to the year that contains its fourth day, and week 1 is the
/// first such week of that year. With a Monday start this is exactly the ISO
/// 8601 week date; for other start days the same rule is applied to the
/// shifted week, so every day of one week reports the same number.
pub fn week_number(date: Date, first_day: Weekday) -> Result<WeekNumber> {
    let anchor = week_start(date, first_day)?.checked_add(3.days())?;
    let week = (anchor.day_of_year() - 1) / 7 + 1;
    Ok(WeekNumber {
        year: anchor.year(),
        // at most 53
        week: i8::try_from(week).unwrap_or(i8::MAX),
    })
}

/// Year-independent key used to look up special dates (`DD-MM`).
pub fn special_date_key(date: Date) -> String {
    format!("{:02}-{:02}", date.day(), date.month())
}

/// Parses a `DD-MM` special date key into `(day, month)`.
///
/// The key must consist of two zero-padded two-digit numbers forming a day
/// that exists in at least one year (so `29-02` is accepted).
pub fn parse_special_date_key(key: &str) -> Option<(i8, i8)> {
    let (day, month) = key.split_once('-')?;
    if day.len() != 2 || month.len() != 2 {
        return None;
    }
    if !day.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day: i8 = day.parse().ok()?;
    let month: i8 = month.parse().ok()?;
    // 2000 is a leap year
    Date::new(2000, month, day).ok()?;
    Some((day, month))
}

/// English name of a month (1-based).
pub fn month_name(month: i8) -> &'static str {
    let index = usize::try_from(month - 1).unwrap_or(0);
    MONTH_NAMES.get(index).copied().unwrap_or("")
}

/// Short English name of a month (1-based).
pub fn month_short_name(month: i8) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

/// English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

/// Two-letter weekday label used in calendar headers.
pub fn weekday_min_name(weekday: Weekday) -> &'static str {
    let name = weekday_name(weekday);
    name.get(..2).unwrap_or(name)
}
