/// Calendar date handling for the scheduling system.
///
/// Appointment dates and dates of birth arrive as raw month/day/year input,
/// so `CalendarDate` keeps the three components as plain numbers and makes
/// validity an explicit check rather than a construction-time guarantee.
/// Calendar math (weekday, month arithmetic) goes through chrono once a
/// date is known to be valid.
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Months, NaiveDate, Weekday};

/// A plain year/month/day value.
///
/// Invalid dates (2/30/2023, month 13, day 0) are representable; callers
/// must check `is_valid` before relying on calendar semantics. Ordering is
/// lexicographic over (year, month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        CalendarDate { year, month, day }
    }

    /// The current date from the local system clock.
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        CalendarDate::new(now.year(), now.month(), now.day())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Checks that this is a real calendar date.
    ///
    /// February gets 29 days in leap years (divisible by 4, except
    /// centuries not divisible by 400).
    pub fn is_valid(&self) -> bool {
        if self.year < 1 || self.month < 1 || self.month > 12 || self.day < 1 {
            return false;
        }
        self.day <= self.days_in_month()
    }

    fn is_leap_year(&self) -> bool {
        self.year % 4 == 0 && (self.year % 100 != 0 || self.year % 400 == 0)
    }

    fn days_in_month(&self) -> u32 {
        const DAYS: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        if self.month == 2 && self.is_leap_year() {
            29
        } else {
            DAYS[self.month as usize]
        }
    }

    fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Checks if the date falls on a Saturday or Sunday.
    ///
    /// Only meaningful for dates that pass `is_valid`.
    pub fn is_weekend(&self) -> bool {
        self.to_naive()
            .map(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .unwrap_or(false)
    }

    /// Checks if the date lies in the inclusive window
    /// [`today`, `today` + 6 calendar months].
    ///
    /// The upper bound uses calendar-month addition with day clamping,
    /// so six months after 8/31 is the last day of February.
    pub fn is_within_six_months(&self, today: CalendarDate) -> bool {
        let limit = match today
            .to_naive()
            .and_then(|d| d.checked_add_months(Months::new(6)))
        {
            Some(limit) => CalendarDate::from(limit),
            None => return false,
        };
        *self >= today && *self <= limit
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{:04}", self.month, self.day, self.year)
    }
}

impl FromStr for CalendarDate {
    type Err = String;

    /// Parses month/day/year input such as `9/30/2024`.
    ///
    /// Only the token shape is checked here; range validity stays with
    /// `is_valid` so out-of-range dates can be reported by the right rule.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || format!("{} is not a valid calendar date.", s);
        let mut parts = s.trim().split('/');
        let (month, day, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(d), Some(y), None) => (m, d, y),
            _ => return Err(error()),
        };
        let month: u32 = month.trim().parse().map_err(|_| error())?;
        let day: u32 = day.trim().parse().map_err(|_| error())?;
        let year: i32 = year.trim().parse().map_err(|_| error())?;
        Ok(CalendarDate::new(year, month, day))
    }
}
