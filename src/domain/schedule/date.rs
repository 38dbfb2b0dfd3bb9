//! Day-granularity calendar date with the canonical `YYYYMMDD` wire form.

use crate::domain::errors::ScheduleError;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

/// Largest year that still fits the 8-digit form.
const MAX_YEAR: i32 = 9999;

/// A calendar date without time-of-day or timezone.
///
/// Always holds a valid proleptic Gregorian date in years 0000..=9999, so
/// `to_string()` followed by `parse()` yields the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::checked)
    }

    fn checked(date: NaiveDate) -> Option<Self> {
        (0..=MAX_YEAR).contains(&date.year()).then_some(Self(date))
    }

    /// Nearest representable date: years outside 0000..=9999 clamp to the
    /// first or last day of the range.
    pub fn clamped(date: NaiveDate) -> Self {
        let year = date.year().clamp(0, MAX_YEAR);
        if year == date.year() {
            return Self(date);
        }
        let (month, day) = if year == 0 { (1, 1) } else { (12, 31) };
        Self(NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn add_days(self, days: u64) -> Result<Self, ScheduleError> {
        self.0
            .checked_add_days(Days::new(days))
            .and_then(Self::checked)
            .ok_or(ScheduleError::DateOutOfRange)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ScheduleError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::checked(date).ok_or(ScheduleError::DateOutOfRange)
    }
}

impl FromStr for CalendarDate {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ScheduleError::DateParse(s.to_owned());
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        // All-ASCII digits, so byte slicing is safe.
        let year: i32 = s[0..4].parse().map_err(|_| err())?;
        let month: u32 = s[4..6].parse().map_err(|_| err())?;
        let day: u32 = s[6..8].parse().map_err(|_| err())?;
        Self::from_ymd(year, month, day).ok_or_else(err)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_canonical() {
        let d: CalendarDate = "20240229".parse().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
        assert_eq!(d.to_string(), "20240229");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "", "2024011", "202401150", "2024-01-15", "20241301", "20230229", "2024011a", "+2024011",
            "２０２４０１１５",
        ] {
            assert_eq!(
                bad.parse::<CalendarDate>(),
                Err(ScheduleError::DateParse(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_add_days_crosses_month_and_year() {
        let d: CalendarDate = "20231230".parse().unwrap();
        assert_eq!(d.add_days(3).unwrap().to_string(), "20240102");
    }

    #[test]
    fn test_add_days_past_year_9999_is_out_of_range() {
        let d: CalendarDate = "99991231".parse().unwrap();
        assert_eq!(d.add_days(1), Err(ScheduleError::DateOutOfRange));
    }

    #[test]
    fn test_clamped() {
        let far = NaiveDate::from_ymd_opt(12000, 6, 1).unwrap();
        assert_eq!(CalendarDate::clamped(far).to_string(), "99991231");
        let near = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(CalendarDate::clamped(near).to_string(), "20240601");
    }

    #[test]
    fn test_days_until_is_signed() {
        let a: CalendarDate = "20240110".parse().unwrap();
        let b: CalendarDate = "20240115".parse().unwrap();
        assert_eq!(a.days_until(b), 5);
        assert_eq!(b.days_until(a), -5);
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_round_trips(days in 0i64..3_652_425) {
            let base = NaiveDate::from_ymd_opt(0, 1, 1).unwrap();
            let date = CalendarDate::try_from(base + chrono::Duration::days(days)).unwrap();
            let text = date.to_string();
            prop_assert_eq!(text.len(), 8);
            prop_assert_eq!(text.parse::<CalendarDate>().unwrap(), date);
        }
    }
}
