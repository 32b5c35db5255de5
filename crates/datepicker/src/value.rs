//! Naive calendar values with carry normalization.
//!
//! A [`CalendarValue`] is a point on the local calendar with no time zone.
//! Building one from out-of-range parts carries the excess into the next
//! larger unit, so day 32 of January is the 1st of February and month 12 is
//! January of the following year.

use std::fmt;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, Timelike};

pub const MONTH_NAMES: [&str; 12] = [
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

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Column headers for the day grid, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Earliest year a value may hold. Formatted years are unsigned, so
/// anything before year 1 would not survive a parse/format round trip.
pub const MIN_YEAR: i32 = 1;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// An immutable {year, month, day, hour, minute, second, millisecond} tuple.
///
/// Months are zero based (0 = January) everywhere in this crate except in
/// formatted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarValue {
    inner: NaiveDateTime,
}

impl CalendarValue {
    /// Midnight on the given date, normalizing out-of-range parts.
    pub fn new(year: i32, month: i32, day: i32) -> Option<Self> {
        Self::from_parts(year, month, day, 0, 0, 0, 0)
    }

    /// Builds a value from raw parts, carrying any overflow or underflow
    /// into the next larger unit.
    ///
    /// Returns `None` when the normalized value falls before [`MIN_YEAR`] or
    /// outside chrono's supported range.
    pub fn from_parts(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Option<Self> {
        let total_months = i64::from(year) * 12 + i64::from(month);
        let year = i32::try_from(total_months.div_euclid(12)).ok()?;
        let month = total_months.rem_euclid(12) as u32;

        let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?.and_hms_opt(0, 0, 0)?;
        let offset = (i64::from(day) - 1) * MS_PER_DAY
            + i64::from(hour) * MS_PER_HOUR
            + i64::from(minute) * MS_PER_MINUTE
            + i64::from(second) * MS_PER_SECOND
            + i64::from(millisecond);

        let inner = first.checked_add_signed(Duration::try_milliseconds(offset)?)?;
        Self::floored(inner)
    }

    fn floored(inner: NaiveDateTime) -> Option<Self> {
        (inner.year() >= MIN_YEAR).then_some(Self { inner })
    }

    /// The host's current local wall-clock time.
    pub fn now() -> Self {
        Self {
            inner: Local::now().naive_local(),
        }
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    /// Zero-based month (0 = January).
    pub fn month(&self) -> u32 {
        self.inner.month0()
    }

    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.inner.nanosecond() / 1_000_000
    }

    /// Weekday of the first day of this value's month, 0 = Sunday.
    pub fn first_weekday_of_month(&self) -> u32 {
        let weekday = self.inner.weekday().num_days_from_sunday();
        let back = (self.day() - 1) % 7;
        (weekday + 7 - back) % 7
    }

    /// Number of days in this value's month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Replaces the day of month, keeping the time of day. Out-of-range days
    /// carry into the neighbouring months.
    pub fn with_day(&self, day: i32) -> Option<Self> {
        self.with_month_and_day(self.month() as i32, day)
    }

    /// Moves to `month` (which may be outside 0..12) and sets the day, with
    /// full carry normalization.
    pub fn with_month_and_day(&self, month: i32, day: i32) -> Option<Self> {
        Self::from_parts(
            self.year(),
            month,
            day,
            self.hour() as i32,
            self.minute() as i32,
            self.second() as i32,
            self.millisecond() as i32,
        )
    }

    /// Shifts by whole months. The day is clamped to the length of the
    /// target month, so Jan 31 + 1 month is the last day of February.
    pub fn add_months(&self, delta: i32) -> Option<Self> {
        let months = Months::new(delta.unsigned_abs());
        let inner = if delta < 0 {
            self.inner.checked_sub_months(months)?
        } else {
            self.inner.checked_add_months(months)?
        };
        Self::floored(inner)
    }

    /// Jumps to the given zero-based month of the same year, clamping the day.
    pub fn with_month(&self, month: u32) -> Option<Self> {
        self.add_months(month as i32 - self.month() as i32)
    }

    /// Jumps to the same month of `year`, clamping the day (Feb 29 becomes
    /// Feb 28 in a common year).
    pub fn with_year(&self, year: i32) -> Option<Self> {
        let delta = (i64::from(year) - i64::from(self.year())) * 12;
        self.add_months(i32::try_from(delta).ok()?)
    }

    /// Same date at the given time of day.
    pub fn at_time(&self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<Self> {
        let inner = self
            .inner
            .date()
            .and_hms_milli_opt(hour, minute, second, millisecond)?;
        Some(Self { inner })
    }
}

impl fmt::Display for CalendarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Days in the zero-based `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month + 1 {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Month `delta` steps away from (`year`, `month`), carrying the year.
pub(crate) fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 + delta;
    (total.div_euclid(12), total.rem_euclid(12) as u32)
}
