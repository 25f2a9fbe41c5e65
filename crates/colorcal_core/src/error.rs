//! Calendar core error taxonomy.
//!
//! # Responsibility
//! - Provide one error type for every fallible core operation.
//! - Classify failures as configuration errors or caller contract violations.
//!
//! # Invariants
//! - Core never substitutes a default value for a failed operation silently.
//! - Errors are deterministic; there is nothing to retry.

use crate::model::date::{CalendarDate, YearMonth};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Coarse classification used by hosts to decide how to surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarErrorKind {
    /// Widget cannot be constructed from the supplied options.
    Configuration,
    /// Caller passed a value outside the operation contract.
    InvalidArgument,
}

/// Error returned by calendar core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Initial current date lies before the navigation start bound.
    CurrentBeforeStart {
        current: CalendarDate,
        start: YearMonth,
    },
    /// Initial current date lies after the navigation end bound.
    CurrentAfterEnd {
        current: CalendarDate,
        end: YearMonth,
    },
    /// Start bound is later than end bound.
    InvertedBounds { start: YearMonth, end: YearMonth },
    /// Month index outside `0..=11`.
    InvalidMonth(i64),
    /// Day component does not exist in the given month.
    InvalidDay { year: i32, month: u8, day: u8 },
    /// Year cannot be represented by the date backend.
    YearOutOfRange(i32),
    /// Start weekday outside `0..=6`.
    InvalidStartWeekday(u8),
    /// Year picker index outside `0..12`.
    InvalidPickerIndex(usize),
    /// Date does not resolve to any cell of the rendered grid.
    DateNotInGrid(CalendarDate),
    /// Date month lies outside navigation bounds.
    DateOutOfBounds(CalendarDate),
}

impl CalendarError {
    pub fn kind(&self) -> CalendarErrorKind {
        match self {
            Self::CurrentBeforeStart { .. }
            | Self::CurrentAfterEnd { .. }
            | Self::InvertedBounds { .. } => CalendarErrorKind::Configuration,
            Self::InvalidMonth(_)
            | Self::InvalidDay { .. }
            | Self::YearOutOfRange(_)
            | Self::InvalidStartWeekday(_)
            | Self::InvalidPickerIndex(_)
            | Self::DateNotInGrid(_)
            | Self::DateOutOfBounds(_) => CalendarErrorKind::InvalidArgument,
        }
    }
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentBeforeStart { current, start } => write!(
                f,
                "current date {current} cannot be earlier than start month {start}"
            ),
            Self::CurrentAfterEnd { current, end } => write!(
                f,
                "current date {current} cannot be later than end month {end}"
            ),
            Self::InvertedBounds { start, end } => {
                write!(f, "start month {start} must not be after end month {end}")
            }
            Self::InvalidMonth(value) => write!(f, "month index must be 0..=11, got {value}"),
            Self::InvalidDay { year, month, day } => write!(
                f,
                "day {day} does not exist in {year:04}-{:02}",
                u32::from(*month) + 1
            ),
            Self::YearOutOfRange(year) => write!(f, "year {year} is out of supported range"),
            Self::InvalidStartWeekday(value) => {
                write!(f, "start weekday must be 0..=6, got {value}")
            }
            Self::InvalidPickerIndex(value) => {
                write!(f, "year picker index must be 0..12, got {value}")
            }
            Self::DateNotInGrid(date) => write!(f, "date {date} is not in the rendered grid"),
            Self::DateOutOfBounds(date) => {
                write!(f, "date {date} is outside navigation bounds")
            }
        }
    }
}

impl Error for CalendarError {}
