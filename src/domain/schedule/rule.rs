//! Recurrence rule classification.
//!
//! Grammar (first match wins):
//! - `""`: no recurrence
//! - `"y"`: yearly on the anchor's month and day
//! - `"d <N>"`: every N days, N in 1..=400
//! - `"w <D>[,<D>...]"`: on weekdays D (1 = Monday .. 7 = Sunday), no repeats
//!
//! Everything else is unsupported, including the reserved `"m ..."` shape.

use crate::domain::errors::ScheduleError;
use chrono::Weekday;
use std::str::FromStr;

pub const MAX_DAILY_INTERVAL: u16 = 400;

/// Set of weekdays stored as a bitmask (bit 0 = Monday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weekdays(u8);

impl Weekdays {
    pub const fn empty() -> Self {
        Self(0)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Adds `day`; returns false if it was already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        let fresh = !self.contains(day);
        self.0 |= Self::bit(day);
        fresh
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

}

impl FromIterator<Weekday> for Weekdays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// A classified recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// Empty rule text: the task does not recur.
    None,
    Daily(u16),
    Yearly,
    Weekly(Weekdays),
    /// Rule text that matches no implemented shape. Keeps the raw text.
    Unsupported(String),
}

impl Recurrence {
    /// Total classification: anything that does not parse strictly becomes
    /// [`Recurrence::Unsupported`]. Use `str::parse` to learn why a rule was
    /// rejected.
    pub fn parse(text: &str) -> Self {
        text.parse()
            .unwrap_or_else(|_| Self::Unsupported(text.to_owned()))
    }
}

impl FromStr for Recurrence {
    type Err = ScheduleError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Ok(Self::None);
        }
        if text == "y" {
            return Ok(Self::Yearly);
        }
        if let Some(interval) = text.strip_prefix("d ") {
            return parse_daily(text, interval).map(Self::Daily);
        }
        if let Some(list) = text.strip_prefix("w ") {
            return parse_weekly(text, list).map(Self::Weekly);
        }
        Err(ScheduleError::RuleUnsupported(text.to_owned()))
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_daily(rule: &str, interval: &str) -> Result<u16, ScheduleError> {
    if !is_decimal(interval) {
        return Err(ScheduleError::invalid_parameter(
            rule,
            "day interval must be a decimal number",
        ));
    }
    // Too many digits for u32 is out of range as well.
    match interval.parse::<u32>() {
        Ok(n) if (1..=u32::from(MAX_DAILY_INTERVAL)).contains(&n) => Ok(n as u16),
        _ => Err(ScheduleError::invalid_parameter(
            rule,
            format!("day interval must be within 1..={MAX_DAILY_INTERVAL}"),
        )),
    }
}

fn parse_weekly(rule: &str, list: &str) -> Result<Weekdays, ScheduleError> {
    let mut days = Weekdays::empty();
    for item in list.split(',') {
        let day = is_decimal(item)
            .then(|| item.parse::<u8>().ok())
            .flatten()
            .filter(|n| (1..=7).contains(n))
            .and_then(|n| Weekday::try_from(n - 1).ok())
            .ok_or_else(|| {
                ScheduleError::invalid_parameter(rule, format!("invalid day of the week: {item:?}"))
            })?;
        if !days.insert(day) {
            return Err(ScheduleError::invalid_parameter(
                rule,
                format!("duplicate day of the week: {item}"),
            ));
        }
    }
    Ok(days)
}
