//! Task validation on create/update: fills in or advances the stored date.

use super::advance::advance;
use super::date::CalendarDate;
use super::rule::Recurrence;
use crate::domain::entities::Task;
use crate::domain::errors::DomainError;

/// Validates `task` and rewrites `task.date` so it is never in the past.
///
/// - empty title: [`DomainError::MissingTitle`]
/// - empty date: set to `today`, rule not consulted
/// - date today or later: left as is
/// - past date without rule: set to `today`
/// - past date with rule: rule is parsed strictly and the date advanced
///
/// On error `task` is not modified.
pub fn normalize(task: &mut Task, today: CalendarDate) -> Result<(), DomainError> {
    if task.title.is_empty() {
        return Err(DomainError::MissingTitle);
    }
    if task.date.is_empty() {
        task.date = today.to_string();
        return Ok(());
    }

    let date: CalendarDate = task.date.parse()?;
    if date >= today {
        return Ok(());
    }
    if task.repeat.is_empty() {
        task.date = today.to_string();
        return Ok(());
    }

    let rule: Recurrence = task.repeat.parse()?;
    let next = advance(today, date, &rule)?;
    task.date = next.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ScheduleError;
    use proptest::prelude::*;

    fn today() -> CalendarDate {
        "20240110".parse().unwrap()
    }

    fn task(date: &str, repeat: &str) -> Task {
        Task {
            title: "x".to_string(),
            date: date.to_string(),
            repeat: repeat.to_string(),
            ..Task::default()
        }
    }

    #[test]
    fn test_empty_date_defaults_to_today() {
        let mut t = task("", "");
        normalize(&mut t, today()).unwrap();
        assert_eq!(t.date, "20240110");
    }

    #[test]
    fn test_empty_date_ignores_rule() {
        let mut t = task("", "m 1");
        normalize(&mut t, today()).unwrap();
        assert_eq!(t.date, "20240110");
    }

    #[test]
    fn test_missing_title() {
        let mut t = task("20240101", "");
        t.title.clear();
        assert!(matches!(
            normalize(&mut t, today()),
            Err(DomainError::MissingTitle)
        ));
        assert_eq!(t.date, "20240101");
    }

    #[test]
    fn test_malformed_date() {
        let mut t = task("10.01.2024", "");
        assert!(matches!(
            normalize(&mut t, today()),
            Err(DomainError::Schedule(ScheduleError::DateParse(_)))
        ));
        assert_eq!(t.date, "10.01.2024");
    }

    #[test]
    fn test_today_and_future_dates_are_kept() {
        for date in ["20240110", "20240111", "20300101"] {
            let mut t = task(date, "d 5");
            normalize(&mut t, today()).unwrap();
            assert_eq!(t.date, date);
        }
    }

    #[test]
    fn test_past_date_without_rule_becomes_today() {
        let mut t = task("20200101", "");
        normalize(&mut t, today()).unwrap();
        assert_eq!(t.date, "20240110");
    }

    #[test]
    fn test_past_date_with_rule_is_advanced() {
        let mut t = task("20240101", "d 4");
        normalize(&mut t, today()).unwrap();
        assert_eq!(t.date, "20240113");

        let mut t = task("20230110", "y");
        normalize(&mut t, today()).unwrap();
        assert_eq!(t.date, "20250110");
    }

    #[test]
    fn test_duplicate_weekdays_rejected_and_date_unchanged() {
        let mut t = task("20200101", "w 1,1");
        let err = normalize(&mut t, today()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Schedule(ScheduleError::RuleInvalidParameter { .. })
        ));
        assert_eq!(t.date, "20200101");
    }

    #[test]
    fn test_monthly_rule_rejected() {
        let mut t = task("20200101", "m 1,5 3");
        assert!(matches!(
            normalize(&mut t, today()),
            Err(DomainError::Schedule(ScheduleError::RuleUnsupported(_)))
        ));
    }

    proptest! {
        #[test]
        fn prop_idempotent_for_current_dates(offset in 0u64..5000, n in 1u16..=400) {
            let date = today().add_days(offset).unwrap().to_string();
            let mut t = task(&date, &format!("d {n}"));
            normalize(&mut t, today()).unwrap();
            let once = t.clone();
            normalize(&mut t, today()).unwrap();
            prop_assert_eq!(t, once);
        }
    }
}
