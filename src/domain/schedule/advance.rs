//! Date advancer: next occurrence of a recurring rule strictly after today.
//!
//! Daily and yearly rules step from the anchor date; weekly rules step from
//! today and never return today itself.

use super::date::CalendarDate;
use super::rule::{Recurrence, Weekdays};
use crate::domain::errors::ScheduleError;

/// Next occurrence of `rule` strictly after `today`, starting from `anchor`.
pub fn advance(
    today: CalendarDate,
    anchor: CalendarDate,
    rule: &Recurrence,
) -> Result<CalendarDate, ScheduleError> {
    match rule {
        Recurrence::Daily(interval) => advance_daily(today, anchor, *interval),
        Recurrence::Yearly => advance_yearly(today, anchor),
        Recurrence::Weekly(days) => advance_weekly(today, *days),
        Recurrence::None => Err(ScheduleError::NoRecurrence),
        Recurrence::Unsupported(raw) => Err(ScheduleError::RuleUnsupported(raw.clone())),
    }
}

/// String-level entry point: `date` and the result are `YYYYMMDD`, `repeat`
/// is raw rule text and is classified strictly.
pub fn next_date(today: CalendarDate, date: &str, repeat: &str) -> Result<String, ScheduleError> {
    let anchor: CalendarDate = date.parse()?;
    let rule: Recurrence = repeat.parse()?;
    advance(today, anchor, &rule).map(|d| d.to_string())
}

fn advance_daily(
    today: CalendarDate,
    anchor: CalendarDate,
    interval: u16,
) -> Result<CalendarDate, ScheduleError> {
    if interval == 0 {
        return Err(ScheduleError::invalid_parameter(
            "d 0",
            "day interval must be positive",
        ));
    }
    let step = u64::from(interval);
    // The first step is always taken, even for anchors already in the future.
    let next = anchor.add_days(step)?;
    let behind = next.days_until(today);
    if behind < 0 {
        return Ok(next);
    }
    // Skip the whole periods that still land on or before today.
    let periods = behind as u64 / step + 1;
    next.add_days(periods * step)
}

/// Anchor shifted by `years`. A Feb 29 anchor lands on Mar 1 in common years
/// and back on Feb 29 in leap years.
fn anniversary(anchor: CalendarDate, years: i32) -> Result<CalendarDate, ScheduleError> {
    let year = anchor
        .year()
        .checked_add(years)
        .ok_or(ScheduleError::DateOutOfRange)?;
    CalendarDate::from_ymd(year, anchor.month(), anchor.day())
        .or_else(|| {
            if (anchor.month(), anchor.day()) == (2, 29) {
                CalendarDate::from_ymd(year, 3, 1)
            } else {
                None
            }
        })
        .ok_or(ScheduleError::DateOutOfRange)
}

fn advance_yearly(
    today: CalendarDate,
    anchor: CalendarDate,
) -> Result<CalendarDate, ScheduleError> {
    // Earlier anniversaries fall in years before today's and cannot qualify.
    let mut years = (today.year() - anchor.year()).max(1);
    loop {
        let next = anniversary(anchor, years)?;
        if next > today {
            return Ok(next);
        }
        years += 1;
    }
}

fn advance_weekly(today: CalendarDate, days: Weekdays) -> Result<CalendarDate, ScheduleError> {
    if days.is_empty() {
        return Err(ScheduleError::EmptyWeekdays);
    }
    for offset in 1..=7 {
        let candidate = today.add_days(offset)?;
        if days.contains(candidate.weekday()) {
            return Ok(candidate);
        }
    }
    Err(ScheduleError::EmptyWeekdays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use proptest::prelude::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn rule(s: &str) -> Recurrence {
        s.parse().unwrap()
    }

    #[test]
    fn test_daily_steps_past_today() {
        let next = advance(date("20240115"), date("20240110"), &rule("d 3")).unwrap();
        assert_eq!(next.to_string(), "20240116");
    }

    #[test]
    fn test_daily_candidate_equal_to_today_keeps_going() {
        let next = advance(date("20240115"), date("20240112"), &rule("d 3")).unwrap();
        assert_eq!(next.to_string(), "20240118");
    }

    #[test]
    fn test_daily_future_anchor_still_steps_once() {
        let next = advance(date("20240101"), date("20240301"), &rule("d 7")).unwrap();
        assert_eq!(next.to_string(), "20240308");
    }

    #[test]
    fn test_daily_skips_many_periods() {
        let next = advance(date("20240126"), date("20000101"), &rule("d 1")).unwrap();
        assert_eq!(next.to_string(), "20240127");
        let next = advance(date("20240126"), date("20240113"), &rule("d 7")).unwrap();
        assert_eq!(next.to_string(), "20240127");
    }

    #[test]
    fn test_yearly_on_today_moves_to_next_year() {
        let next = advance(date("20240301"), date("20230301"), &rule("y")).unwrap();
        assert_eq!(next.to_string(), "20250301");
    }

    #[test]
    fn test_yearly_future_anchor_adds_one_year() {
        let next = advance(date("20240101"), date("20260615"), &rule("y")).unwrap();
        assert_eq!(next.to_string(), "20270615");
    }

    #[test]
    fn test_yearly_from_far_past() {
        let next = advance(date("20240126"), date("16990101"), &rule("y")).unwrap();
        assert_eq!(next.to_string(), "20250101");
    }

    #[test]
    fn test_yearly_feb29_anchor_lands_on_mar1_in_common_years() {
        let next = advance(date("20240301"), date("20240229"), &rule("y")).unwrap();
        assert_eq!(next.to_string(), "20250301");
        // No drift: the leap-year anniversary is Feb 29 again.
        let next = advance(date("20270301"), date("20240229"), &rule("y")).unwrap();
        assert_eq!(next.to_string(), "20280229");
    }

    #[test]
    fn test_weekly_returns_next_matching_day() {
        // 2024-01-17 is a Wednesday.
        let next = advance(date("20240117"), date("19000101"), &rule("w 1,3")).unwrap();
        assert_eq!(next.to_string(), "20240122");
    }

    #[test]
    fn test_weekly_never_returns_today() {
        let next = advance(date("20240117"), date("20240117"), &rule("w 3")).unwrap();
        assert_eq!(next.to_string(), "20240124");
    }

    #[test]
    fn test_weekly_ignores_anchor() {
        let a = advance(date("20240117"), date("20240101"), &rule("w 5")).unwrap();
        let b = advance(date("20240117"), date("20300101"), &rule("w 5")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "20240119");
    }

    #[test]
    fn test_weekly_empty_set_fails() {
        let err = advance(
            date("20240117"),
            date("20240117"),
            &Recurrence::Weekly(Weekdays::empty()),
        )
        .unwrap_err();
        assert_eq!(err, ScheduleError::EmptyWeekdays);
    }

    #[test]
    fn test_non_recurring_rules_are_rejected() {
        let today = date("20240117");
        assert_eq!(
            advance(today, today, &Recurrence::None),
            Err(ScheduleError::NoRecurrence)
        );
        assert_eq!(
            advance(today, today, &Recurrence::parse("m 1,5 3")),
            Err(ScheduleError::RuleUnsupported("m 1,5 3".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        assert_eq!(
            advance(date("99991231"), date("99991230"), &rule("d 5")),
            Err(ScheduleError::DateOutOfRange)
        );
    }

    #[test]
    fn test_next_date_strings() {
        let today = date("20240126");
        assert_eq!(next_date(today, "20240113", "d 7").unwrap(), "20240127");
        assert_eq!(
            next_date(today, "2024-01-13", "d 7"),
            Err(ScheduleError::DateParse("2024-01-13".to_string()))
        );
        assert_eq!(next_date(today, "20240113", ""), Err(ScheduleError::NoRecurrence));
        assert!(matches!(
            next_date(today, "20240113", "d 401"),
            Err(ScheduleError::RuleInvalidParameter { .. })
        ));
        assert_eq!(
            next_date(today, "20240113", "m 4"),
            Err(ScheduleError::RuleUnsupported("m 4".to_string()))
        );
    }

    fn any_date() -> impl Strategy<Value = CalendarDate> {
        // 1900-01-01 .. ~2150
        (0i64..90_000).prop_map(|offset| {
            let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
            CalendarDate::try_from(base + chrono::Duration::days(offset)).unwrap()
        })
    }

    fn any_weekdays() -> impl Strategy<Value = Weekdays> {
        (1u8..128).prop_map(|mask| {
            (0u8..7)
                .filter(|i| mask & (1 << i) != 0)
                .filter_map(|i| Weekday::try_from(i).ok())
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_daily_after_today_and_congruent(
            today in any_date(),
            anchor in any_date(),
            n in 1u16..=400,
        ) {
            let next = advance(today, anchor, &Recurrence::Daily(n)).unwrap();
            prop_assert!(next > today);
            let distance = anchor.days_until(next);
            prop_assert!(distance > 0);
            prop_assert_eq!(distance % i64::from(n), 0);
            // More than one step taken: the previous candidate was not after today.
            if distance > i64::from(n) {
                prop_assert!(today.days_until(next) <= i64::from(n));
            }
        }

        #[test]
        fn prop_yearly_keeps_month_and_day(today in any_date(), anchor in any_date()) {
            let next = advance(today, anchor, &Recurrence::Yearly).unwrap();
            prop_assert!(next > today);
            prop_assert!(next.year() > anchor.year());
            let leap = NaiveDate::from_ymd_opt(next.year(), 2, 29).is_some();
            if (anchor.month(), anchor.day()) == (2, 29) && !leap {
                prop_assert_eq!((next.month(), next.day()), (3, 1));
            } else {
                prop_assert_eq!((next.month(), next.day()), (anchor.month(), anchor.day()));
            }
        }

        #[test]
        fn prop_weekly_within_a_week(today in any_date(), days in any_weekdays()) {
            let next = advance(today, today, &Recurrence::Weekly(days)).unwrap();
            let offset = today.days_until(next);
            prop_assert!((1..=7).contains(&offset));
            prop_assert!(days.contains(next.weekday()));
        }
    }
}
