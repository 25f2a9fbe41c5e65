//! Pure Gregorian calendar arithmetic.
//!
//! # Invariants
//! - Leap year: divisible by 4, not by 100 unless by 400.
//! - Weekday indices are `0 = Sunday ..= 6 = Saturday` before rotation.
//! - All functions are pure; malformed months are rejected, never clamped.

use crate::error::{CalendarError, CalendarResult};
use crate::model::date::{CalendarDate, YearMonth};
use chrono::{Datelike, Local, NaiveDate};

/// Number of weekday columns in the grid.
pub const DAYS_PER_WEEK: u8 = 7;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (zero-based) of `year`.
pub fn days_in_month(year: i32, month: u8) -> CalendarResult<u8> {
    Ok(YearMonth::new(year, month)?.days())
}

/// Weekday column of the 1st of the month, rotated so that `start_weekday`
/// maps to column 0.
pub fn first_weekday_of_month(year: i32, month: u8, start_weekday: u8) -> CalendarResult<u8> {
    let year_month = YearMonth::new(year, month)?;
    let first = NaiveDate::from_ymd_opt(year_month.year(), u32::from(month) + 1, 1)
        .ok_or(CalendarError::YearOutOfRange(year))?;
    let weekday = first.weekday().num_days_from_sunday() as u8;
    rotate_weekday(weekday, start_weekday)
}

/// Maps a Sunday-based weekday index to its column under `start_weekday`.
pub fn rotate_weekday(weekday: u8, start_weekday: u8) -> CalendarResult<u8> {
    if start_weekday >= DAYS_PER_WEEK {
        return Err(CalendarError::InvalidStartWeekday(start_weekday));
    }
    Ok((weekday % DAYS_PER_WEEK + DAYS_PER_WEEK - start_weekday) % DAYS_PER_WEEK)
}

/// Adds `months` to `date`, clamping the day to the last day of the target
/// month (Jan 31 + 1 month is the last day of February).
pub fn add_months(date: CalendarDate, months: i32) -> CalendarResult<CalendarDate> {
    let target = date.year_month().offset(months)?;
    Ok(target.day_clamped(date.day()))
}

/// Today's date from the local wall clock.
pub fn today() -> CalendarDate {
    CalendarDate::from_naive(Local::now().date_naive())
}

pub(crate) fn month_length(year: i32, month: u8) -> u8 {
    match month {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{add_months, days_in_month, first_weekday_of_month, is_leap_year, rotate_weekday};
    use crate::error::CalendarError;
    use crate::model::date::CalendarDate;

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn days_in_month_handles_february() {
        assert_eq!(days_in_month(2024, 1).unwrap(), 29);
        assert_eq!(days_in_month(2100, 1).unwrap(), 28);
        assert_eq!(days_in_month(2024, 3).unwrap(), 30);
        assert_eq!(days_in_month(2024, 11).unwrap(), 31);
        assert_eq!(
            days_in_month(2024, 12).unwrap_err(),
            CalendarError::InvalidMonth(12)
        );
    }

    #[test]
    fn first_weekday_rotates_with_start_weekday() {
        // 2024-02-01 is a Thursday.
        assert_eq!(first_weekday_of_month(2024, 1, 0).unwrap(), 4);
        assert_eq!(first_weekday_of_month(2024, 1, 1).unwrap(), 3);
        assert_eq!(first_weekday_of_month(2024, 1, 4).unwrap(), 0);
        assert_eq!(first_weekday_of_month(2024, 1, 5).unwrap(), 6);
        // 2023-10-01 is a Sunday.
        assert_eq!(first_weekday_of_month(2023, 9, 0).unwrap(), 0);
    }

    #[test]
    fn rotate_rejects_invalid_start_weekday() {
        assert_eq!(
            rotate_weekday(3, 7).unwrap_err(),
            CalendarError::InvalidStartWeekday(7)
        );
    }

    #[test]
    fn add_months_clamps_day() {
        let jan31 = CalendarDate::new(2024, 0, 31).unwrap();
        assert_eq!(
            add_months(jan31, 1).unwrap(),
            CalendarDate::new(2024, 1, 29).unwrap()
        );
        assert_eq!(
            add_months(jan31, -2).unwrap(),
            CalendarDate::new(2023, 10, 30).unwrap()
        );
        assert_eq!(
            add_months(jan31, 12).unwrap(),
            CalendarDate::new(2025, 0, 31).unwrap()
        );
    }

    #[test]
    fn add_months_round_trips_on_month() {
        let start = CalendarDate::new(2024, 4, 31).unwrap();
        for n in -30..=30 {
            let there = add_months(start, n).unwrap();
            let back = add_months(there, -n).unwrap();
            assert_eq!(back.year_month(), start.year_month(), "n = {n}");
        }
    }
}
