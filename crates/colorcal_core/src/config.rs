//! Calendar construction options and display-variant resolution.
//!
//! # Responsibility
//! - Define the serde-readable option set recognized at construction.
//! - Resolve weekday label variants into one closed set.
//!
//! # Invariants
//! - Unknown `weekdayDisplayType` values resolve to `short`; this is a
//!   default-value policy, not error suppression.
//! - Custom weekday labels are used only when exactly seven are supplied.

use crate::calendar_math::{rotate_weekday, DAYS_PER_WEEK};
use crate::error::{CalendarError, CalendarResult};
use crate::model::date::CalendarDate;
use log::warn;
use serde::{Deserialize, Serialize};

const SHORT_WEEKDAYS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const LONG_LOWER_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const LONG_UPPER_WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Weekday header label variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekdayDisplayType {
    Short,
    LongLower,
    LongUpper,
}

impl WeekdayDisplayType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::LongLower => "long-lower",
            Self::LongUpper => "long-upper",
        }
    }

    /// Parses a wire name; `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "short" => Some(Self::Short),
            "long-lower" => Some(Self::LongLower),
            "long-upper" => Some(Self::LongUpper),
            _ => None,
        }
    }

    /// Sunday-first labels for this variant.
    pub fn labels(self) -> [&'static str; 7] {
        match self {
            Self::Short => SHORT_WEEKDAYS,
            Self::LongLower => LONG_LOWER_WEEKDAYS,
            Self::LongUpper => LONG_UPPER_WEEKDAYS,
        }
    }
}

/// Resolves a configured weekday display name, falling back to `short`.
///
/// Logs the fallback; call once per configuration.
pub fn resolve_weekday_display_type(value: &str) -> WeekdayDisplayType {
    WeekdayDisplayType::parse(value).unwrap_or_else(|| {
        warn!(
            "event=config_fallback module=config field=weekday_display_type value={} fallback=short",
            value.trim()
        );
        WeekdayDisplayType::Short
    })
}

/// Month header format variant, consumed by the rendering layer only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthDisplayType {
    #[default]
    Long,
    Short,
    Narrow,
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
}

/// Construction options recognized by the calendar core.
///
/// Keys are camelCase on the wire; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Initial display date; defaults to today.
    pub current_date: Option<CalendarDate>,
    /// Inclusive lower navigation bound (month granularity).
    pub start_month: Option<CalendarDate>,
    /// Inclusive upper navigation bound (month granularity).
    pub end_month: Option<CalendarDate>,
    /// Weekday shown in the first column, `0 = Sunday ..= 6 = Saturday`.
    pub start_weekday: u8,
    /// Whether construction selects the current date's cell.
    pub select_initial_date: bool,
    pub weekday_display_type: String,
    pub month_display_type: MonthDisplayType,
    pub custom_weekday_values: Option<Vec<String>>,
    pub disable_day_click: bool,
    pub disable_month_arrow_click: bool,
    pub disable_month_year_pickers: bool,
    /// Clock override; defaults to the local wall-clock date.
    pub today: Option<CalendarDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            current_date: None,
            start_month: None,
            end_month: None,
            start_weekday: 0,
            select_initial_date: true,
            weekday_display_type: WeekdayDisplayType::LongLower.as_str().to_string(),
            month_display_type: MonthDisplayType::Long,
            custom_weekday_values: None,
            disable_day_click: false,
            disable_month_arrow_click: false,
            disable_month_year_pickers: false,
            today: None,
        }
    }
}

impl CalendarConfig {
    /// Validated start weekday.
    pub fn start_weekday(&self) -> CalendarResult<u8> {
        if self.start_weekday >= DAYS_PER_WEEK {
            return Err(CalendarError::InvalidStartWeekday(self.start_weekday));
        }
        Ok(self.start_weekday)
    }

    /// Effective weekday variant; unknown names read as `short` silently.
    pub fn weekday_display_type(&self) -> WeekdayDisplayType {
        WeekdayDisplayType::parse(&self.weekday_display_type).unwrap_or(WeekdayDisplayType::Short)
    }

    /// Weekday header labels in grid column order.
    ///
    /// This is where an unknown variant name is reported; `Calendar`
    /// resolves labels once at construction.
    pub fn weekday_labels(&self) -> CalendarResult<Vec<String>> {
        let start_weekday = self.start_weekday()?;
        let sunday_first: Vec<String> = match self.custom_weekday_values.as_deref() {
            Some(custom) if custom.len() == usize::from(DAYS_PER_WEEK) => custom.to_vec(),
            _ => resolve_weekday_display_type(&self.weekday_display_type)
                .labels()
                .iter()
                .map(|label| label.to_string())
                .collect(),
        };
        rotate_labels(sunday_first, start_weekday)
    }
}

fn rotate_labels(mut labels: Vec<String>, start_weekday: u8) -> CalendarResult<Vec<String>> {
    // Column of Sunday under this start weekday; rotating right by it puts
    // `start_weekday` first.
    let sunday_column = rotate_weekday(0, start_weekday)?;
    labels.rotate_right(usize::from(sunday_column));
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::{resolve_weekday_display_type, CalendarConfig, MonthDisplayType, WeekdayDisplayType};
    use crate::error::CalendarError;

    #[test]
    fn resolves_known_and_unknown_weekday_types() {
        assert_eq!(
            resolve_weekday_display_type("long-upper"),
            WeekdayDisplayType::LongUpper
        );
        assert_eq!(
            resolve_weekday_display_type(" long-lower "),
            WeekdayDisplayType::LongLower
        );
        assert_eq!(
            resolve_weekday_display_type("fancy"),
            WeekdayDisplayType::Short
        );
    }

    #[test]
    fn parse_does_not_fall_back() {
        assert_eq!(WeekdayDisplayType::parse("short"), Some(WeekdayDisplayType::Short));
        assert_eq!(WeekdayDisplayType::parse("medium"), None);

        let config = CalendarConfig {
            weekday_display_type: "medium".to_string(),
            ..CalendarConfig::default()
        };
        for _ in 0..3 {
            assert_eq!(config.weekday_display_type(), WeekdayDisplayType::Short);
        }
    }

    #[test]
    fn default_labels_are_sunday_first_long_lower() {
        let labels = CalendarConfig::default().weekday_labels().unwrap();
        assert_eq!(labels, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    }

    #[test]
    fn labels_rotate_with_start_weekday() {
        let config = CalendarConfig {
            start_weekday: 1,
            weekday_display_type: "long-upper".to_string(),
            ..CalendarConfig::default()
        };
        let labels = config.weekday_labels().unwrap();
        assert_eq!(labels.first().map(String::as_str), Some("MON"));
        assert_eq!(labels.last().map(String::as_str), Some("SUN"));
    }

    #[test]
    fn custom_labels_require_exactly_seven_values() {
        let custom: Vec<String> = ["D", "L", "M", "X", "J", "V", "S"]
            .iter()
            .map(|value| value.to_string())
            .collect();
        let config = CalendarConfig {
            custom_weekday_values: Some(custom),
            start_weekday: 6,
            ..CalendarConfig::default()
        };
        assert_eq!(
            config.weekday_labels().unwrap(),
            vec!["S", "D", "L", "M", "X", "J", "V"]
        );

        let config = CalendarConfig {
            custom_weekday_values: Some(vec!["x".to_string()]),
            weekday_display_type: "short".to_string(),
            ..CalendarConfig::default()
        };
        assert_eq!(config.weekday_labels().unwrap()[0], "S");
    }

    #[test]
    fn rejects_invalid_start_weekday() {
        let config = CalendarConfig {
            start_weekday: 7,
            ..CalendarConfig::default()
        };
        assert_eq!(
            config.weekday_labels().unwrap_err(),
            CalendarError::InvalidStartWeekday(7)
        );
    }

    #[test]
    fn month_display_type_defaults_to_long() {
        assert_eq!(CalendarConfig::default().month_display_type, MonthDisplayType::Long);
    }
}
