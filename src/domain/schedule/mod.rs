//! Recurrence date calculator. Pure functions over dates and rule text.
//!
//! Task validator -> rule parser -> date advancer. No I/O, no global state.

pub mod advance;
pub mod date;
pub mod normalize;
pub mod rule;

pub use advance::{advance, next_date};
pub use date::CalendarDate;
pub use normalize::normalize;
pub use rule::{Recurrence, Weekdays};
