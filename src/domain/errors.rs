//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Errors raised by the recurrence calculator. Pure values, no I/O context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid date {0:?}: expected YYYYMMDD")]
    DateParse(String),

    #[error("repetition pattern is not supported: {0:?}")]
    RuleUnsupported(String),

    #[error("invalid repetition parameter in {rule:?}: {reason}")]
    RuleInvalidParameter { rule: String, reason: String },

    /// Advancing requires a recurring rule.
    #[error("no repetition rule set")]
    NoRecurrence,

    #[error("weekly rule has no days")]
    EmptyWeekdays,

    #[error("date is out of the supported calendar range")]
    DateOutOfRange,
}

impl ScheduleError {
    pub(crate) fn invalid_parameter(rule: &str, reason: impl Into<String>) -> Self {
        Self::RuleInvalidParameter {
            rule: rule.to_owned(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("title is not provided")]
    MissingTitle,

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("invalid task id: {0:?}")]
    InvalidId(String),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repo(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}
