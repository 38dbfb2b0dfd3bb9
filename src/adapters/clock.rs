//! ClockPort implementations.

use crate::domain::CalendarDate;
use crate::ports::ClockPort;
use chrono::Local;

/// Today's date in the host's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::clamped(Local::now().date_naive())
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl ClockPort for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
