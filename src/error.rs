//! Error types for roster generation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that abort a roster generation run.
///
/// Non-fatal conditions (quota overruns, feasibility warnings, duplicate
/// staff) are reported through `tracing` and never surface here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RosterError {
    /// The requested month is outside 1..=12.
    #[error("month must be between 1 and 12 inclusive, got {month}")]
    InvalidMonth { year: i32, month: u32 },

    /// The requested year is outside the supported calendar.
    #[error("year {year} is outside the supported calendar range")]
    YearOutOfRange { year: i32 },

    /// The staff collection is empty.
    #[error("have no nurses to roster")]
    EmptyStaff,

    /// A scheduler was asked to choose from an empty candidate pool.
    #[error("cannot choose a nurse from an empty candidate pool")]
    EmptyPool,

    /// A shift's candidate pool ran out before its headcount was met.
    #[error(
        "not enough nurses to satisfy the {shift} shift of day {day}: \
         needed {required}, assigned {assigned}"
    )]
    InsufficientCandidates {
        /// 1-based day of the month.
        day: usize,
        shift: String,
        required: usize,
        assigned: usize,
    },

    /// The staff list contains unusable ids.
    #[error("invalid staff list: {}", join_messages(.0))]
    InvalidStaff(Vec<ValidationError>),

    /// The generator configuration failed validation.
    #[error("invalid generator configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
