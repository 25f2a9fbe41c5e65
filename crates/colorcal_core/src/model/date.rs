//! Calendar date value types.
//!
//! # Responsibility
//! - Define the validated `(year, month, day)` triple used across core.
//! - Provide a month-granularity view (`YearMonth`) for bound comparisons.
//!
//! # Invariants
//! - `month` is zero-based (`0..=11`); `day` is `1..=days_in_month`.
//! - Ordering is lexicographic over `(year, month, day)`.
//! - Years are limited to the range representable by `chrono::NaiveDate`.

use crate::calendar_math::month_length;
use crate::error::{CalendarError, CalendarResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Month-granularity calendar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a month position after validating year range and month index.
    pub fn new(year: i32, month: u8) -> CalendarResult<Self> {
        ensure_year(year)?;
        if month > 11 {
            return Err(CalendarError::InvalidMonth(i64::from(month)));
        }
        Ok(Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    pub fn month(self) -> u8 {
        self.month
    }

    /// Number of days in this month.
    pub fn days(self) -> u8 {
        month_length(self.year, self.month)
    }

    /// Shifts by `months`, wrapping across year boundaries.
    ///
    /// Fails only when the resulting year leaves the supported range.
    pub fn offset(self, months: i32) -> CalendarResult<Self> {
        let total = i64::from(self.year) * 12 + i64::from(self.month) + i64::from(months);
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u8;
        let year = i32::try_from(year).map_err(|_| CalendarError::YearOutOfRange(i32::MAX))?;
        Self::new(year, month)
    }

    /// First day of this month.
    pub fn first_day(self) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    /// Day `day` of this month, clamped to the last valid day.
    pub fn day_clamped(self, day: u8) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
            day: day.clamp(1, self.days()),
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u32::from(self.month) + 1)
    }
}

/// Calendar date without time-of-day significance.
///
/// Serialized as `{ "year": .., "month": .., "day": .. }` with a zero-based
/// month; deserialization re-validates the triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "CalendarDateParts")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a validated date.
    ///
    /// # Errors
    /// - `InvalidMonth` when `month > 11`.
    /// - `InvalidDay` when `day` is 0 or past the month length.
    /// - `YearOutOfRange` when `year` is not representable.
    pub fn new(year: i32, month: u8, day: u8) -> CalendarResult<Self> {
        let year_month = YearMonth::new(year, month)?;
        if day == 0 || day > year_month.days() {
            return Err(CalendarError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Converts a `chrono` date, which is always a valid triple.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0() as u8,
            day: date.day() as u8,
        }
    }

    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, u32::from(self.month) + 1, u32::from(self.day))
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// Returns whether both dates share `(year, month)`.
    pub fn same_month(self, other: CalendarDate) -> bool {
        self.year_month() == other.year_month()
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year,
            u32::from(self.month) + 1,
            self.day
        )
    }
}

/// Unvalidated wire shape for `CalendarDate`.
#[derive(Debug, Clone, Copy, Deserialize)]
struct CalendarDateParts {
    year: i32,
    month: u8,
    day: u8,
}

impl TryFrom<CalendarDateParts> for CalendarDate {
    type Error = CalendarError;

    fn try_from(value: CalendarDateParts) -> Result<Self, Self::Error> {
        CalendarDate::new(value.year, value.month, value.day)
    }
}

fn ensure_year(year: i32) -> CalendarResult<()> {
    if year < NaiveDate::MIN.year() || year > NaiveDate::MAX.year() {
        return Err(CalendarError::YearOutOfRange(year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CalendarDate, YearMonth};
    use crate::error::CalendarError;

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(
            CalendarDate::new(2024, 12, 1).unwrap_err(),
            CalendarError::InvalidMonth(12)
        );
        assert_eq!(
            CalendarDate::new(2023, 1, 29).unwrap_err(),
            CalendarError::InvalidDay {
                year: 2023,
                month: 1,
                day: 29
            }
        );
        assert!(CalendarDate::new(2024, 1, 29).is_ok());
        assert!(CalendarDate::new(2024, 0, 0).is_err());
    }

    #[test]
    fn orders_by_year_month_day() {
        let a = CalendarDate::new(2023, 11, 31).unwrap();
        let b = CalendarDate::new(2024, 0, 1).unwrap();
        let c = CalendarDate::new(2024, 0, 2).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn offset_wraps_across_years() {
        let jan = YearMonth::new(2024, 0).unwrap();
        assert_eq!(jan.offset(-1).unwrap(), YearMonth::new(2023, 11).unwrap());
        assert_eq!(jan.offset(25).unwrap(), YearMonth::new(2026, 1).unwrap());
        assert_eq!(jan.offset(-25).unwrap(), YearMonth::new(2021, 11).unwrap());
    }

    #[test]
    fn display_uses_one_based_month() {
        let date = CalendarDate::new(2024, 1, 9).unwrap();
        assert_eq!(date.to_string(), "2024-02-09");
        assert_eq!(date.year_month().to_string(), "2024-02");
    }
}
