//! Month/year navigation state machine.
//!
//! # Responsibility
//! - Own the displayed date, today's date and optional month bounds.
//! - Own the rolling 12-year picker window offset.
//! - Derive navigation flags and picker option states from live state.
//!
//! # Invariants
//! - The displayed month always lies inside bounds; blocked moves are no-ops.
//! - Bounds compare at month granularity; day-of-month is ignored.
//! - A direction is disabled only when the next step would cross a bound
//!   or land on a month whose neighbours cannot be represented.
//! - A year picker option is enabled exactly when `go_to_year` would move.
//! - Flags and picker options are derived on demand, never cached.

use crate::calendar_math::add_months;
use crate::error::{CalendarError, CalendarResult};
use crate::model::date::{CalendarDate, YearMonth};
use serde::Serialize;

/// Number of years shown by the year picker.
pub const PICKER_WINDOW_SIZE: usize = 12;
/// Window index of today's year when the picker offset is zero.
pub const PICKER_TODAY_INDEX: usize = 4;

const PICKER_PAGE_YEARS: i32 = PICKER_WINDOW_SIZE as i32;
const MONTHS_PER_YEAR: u8 = 12;

/// Inclusive month-granularity navigation range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationBounds {
    start: Option<YearMonth>,
    end: Option<YearMonth>,
}

impl NavigationBounds {
    /// Creates bounds, rejecting `start > end`.
    pub fn new(start: Option<YearMonth>, end: Option<YearMonth>) -> CalendarResult<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(CalendarError::InvertedBounds { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Creates bounds from dates, ignoring their day component.
    pub fn from_dates(
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    ) -> CalendarResult<Self> {
        Self::new(
            start.map(CalendarDate::year_month),
            end.map(CalendarDate::year_month),
        )
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<YearMonth> {
        self.start
    }

    pub fn end(&self) -> Option<YearMonth> {
        self.end
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        self.start.map_or(true, |start| month >= start) && self.end.map_or(true, |end| month <= end)
    }

    /// Pulls `month` into `[start, end]`.
    pub fn clamp(&self, month: YearMonth) -> YearMonth {
        let month = self.start.map_or(month, |start| month.max(start));
        self.end.map_or(month, |end| month.min(end))
    }

    /// Validates an initial current date against bounds.
    ///
    /// # Errors
    /// - `CurrentBeforeStart` / `CurrentAfterEnd` when outside.
    pub fn check_current(&self, current: CalendarDate) -> CalendarResult<()> {
        let month = current.year_month();
        if let Some(start) = self.start {
            if month < start {
                return Err(CalendarError::CurrentBeforeStart { current, start });
            }
        }
        if let Some(end) = self.end {
            if month > end {
                return Err(CalendarError::CurrentAfterEnd { current, end });
            }
        }
        Ok(())
    }
}

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Navigation step size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationUnit {
    Month,
    Year,
}

impl NavigationUnit {
    fn months(self, direction: Direction) -> i32 {
        let size = match self {
            Self::Month => 1,
            Self::Year => i32::from(MONTHS_PER_YEAR),
        };
        match direction {
            Direction::Prev => -size,
            Direction::Next => size,
        }
    }
}

/// Which navigation steps are currently allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationFlags {
    pub can_go_prev_month: bool,
    pub can_go_next_month: bool,
    pub can_go_prev_year: bool,
    pub can_go_next_year: bool,
}

/// One option of the month picker for the displayed year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    pub month: u8,
    /// Displayed year is today's year and this is today's month.
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// One option of the year picker window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearOption {
    pub year: i32,
    pub is_today: bool,
    pub is_selected: bool,
    /// Selecting this year would not move the display.
    pub is_disabled: bool,
}

/// Snapshot of the 12 years currently shown by the year picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerWindow {
    pub first_year: i32,
    pub options: Vec<YearOption>,
}

impl PickerWindow {
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.options.iter().map(|option| option.year)
    }

    pub fn today_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.is_today)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.is_selected)
    }
}

/// Navigation state for one calendar instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current: CalendarDate,
    today: CalendarDate,
    bounds: NavigationBounds,
    picker_offset: i32,
}

impl NavigationState {
    /// Creates navigation state with the picker window centred on `current`.
    ///
    /// # Errors
    /// - Configuration errors when `current` lies outside `bounds`.
    pub fn new(
        current: CalendarDate,
        today: CalendarDate,
        bounds: NavigationBounds,
    ) -> CalendarResult<Self> {
        bounds.check_current(current)?;
        ensure_renderable(current.year_month())?;
        let mut state = Self {
            current,
            today,
            bounds,
            picker_offset: 0,
        };
        state.recenter_picker(current.year(), PICKER_TODAY_INDEX);
        Ok(state)
    }

    pub fn current(&self) -> CalendarDate {
        self.current
    }

    pub fn display_month(&self) -> YearMonth {
        self.current.year_month()
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn bounds(&self) -> &NavigationBounds {
        &self.bounds
    }

    pub fn picker_offset(&self) -> i32 {
        self.picker_offset
    }

    /// Moves one step; returns `false` when a bound blocks the move.
    pub fn step(&mut self, direction: Direction, unit: NavigationUnit) -> bool {
        match self.step_target(unit.months(direction)) {
            Some(target) => {
                self.apply(target);
                true
            }
            None => false,
        }
    }

    pub fn go_to_prev_month(&mut self) -> bool {
        self.step(Direction::Prev, NavigationUnit::Month)
    }

    pub fn go_to_next_month(&mut self) -> bool {
        self.step(Direction::Next, NavigationUnit::Month)
    }

    pub fn go_to_prev_year(&mut self) -> bool {
        self.step(Direction::Prev, NavigationUnit::Year)
    }

    pub fn go_to_next_year(&mut self) -> bool {
        self.step(Direction::Next, NavigationUnit::Year)
    }

    /// Sets the month within the displayed year.
    ///
    /// # Errors
    /// - `InvalidMonth` when `month > 11`.
    pub fn go_to_month(&mut self, month: u8) -> CalendarResult<bool> {
        let target = YearMonth::new(self.current.year(), month)?;
        if !self.allows(target) {
            return Ok(false);
        }
        self.apply(target.day_clamped(self.current.day()));
        Ok(true)
    }

    /// Sets the displayed year, keeping the month when it is inside bounds
    /// and otherwise clamping to the nearest bound month of that year.
    ///
    /// With `index`, the picker window is recentred so that `year` sits at
    /// that position.
    ///
    /// # Errors
    /// - `InvalidPickerIndex` when `index >= 12`.
    /// - `YearOutOfRange` when `year` is not representable.
    pub fn go_to_year(&mut self, year: i32, index: Option<usize>) -> CalendarResult<bool> {
        if let Some(index) = index {
            if index >= PICKER_WINDOW_SIZE {
                return Err(CalendarError::InvalidPickerIndex(index));
            }
        }
        let Some(target) = self.year_target(year)? else {
            return Ok(false);
        };
        self.current = target.day_clamped(self.current.day());
        match index {
            Some(index) => self.recenter_picker(year, index),
            None => self.follow_year(year),
        }
        Ok(true)
    }

    /// Moves the displayed date to `date`, which must lie inside bounds.
    pub fn set_current(&mut self, date: CalendarDate) -> CalendarResult<()> {
        if !self.bounds.contains(date.year_month()) {
            return Err(CalendarError::DateOutOfBounds(date));
        }
        ensure_renderable(date.year_month())?;
        self.apply(date);
        Ok(())
    }

    /// Re-initializes around `date` without touching bounds.
    pub fn reset(&mut self, date: CalendarDate) -> CalendarResult<()> {
        self.bounds.check_current(date)?;
        ensure_renderable(date.year_month())?;
        self.current = date;
        self.recenter_picker(date.year(), PICKER_TODAY_INDEX);
        Ok(())
    }

    pub fn page_years_back(&mut self) {
        self.picker_offset = self.picker_offset.saturating_sub(PICKER_PAGE_YEARS);
    }

    pub fn page_years_forward(&mut self) {
        self.picker_offset = self.picker_offset.saturating_add(PICKER_PAGE_YEARS);
    }

    pub fn flags(&self) -> NavigationFlags {
        NavigationFlags {
            can_go_prev_month: self.step_target(-1).is_some(),
            can_go_next_month: self.step_target(1).is_some(),
            can_go_prev_year: self.step_target(-i32::from(MONTHS_PER_YEAR)).is_some(),
            can_go_next_year: self.step_target(i32::from(MONTHS_PER_YEAR)).is_some(),
        }
    }

    /// First year of the picker window: `today.year + offset - 4`.
    pub fn picker_first_year(&self) -> i32 {
        self.today
            .year()
            .saturating_add(self.picker_offset)
            .saturating_sub(PICKER_TODAY_INDEX as i32)
    }

    pub fn picker_window(&self) -> PickerWindow {
        let first_year = self.picker_first_year();
        let options = (0..PICKER_WINDOW_SIZE as i32)
            .map(|index| {
                let year = first_year.saturating_add(index);
                YearOption {
                    year,
                    is_today: year == self.today.year(),
                    is_selected: year == self.current.year(),
                    is_disabled: !matches!(self.year_target(year), Ok(Some(_))),
                }
            })
            .collect();
        PickerWindow {
            first_year,
            options,
        }
    }

    /// Month picker options for the displayed year.
    pub fn month_options(&self) -> Vec<MonthOption> {
        let year = self.current.year();
        (0..MONTHS_PER_YEAR)
            .map(|month| MonthOption {
                month,
                is_today: year == self.today.year() && month == self.today.month(),
                is_selected: month == self.current.month(),
                is_disabled: YearMonth::new(year, month)
                    .map(|target| !self.allows(target))
                    .unwrap_or(true),
            })
            .collect()
    }

    fn step_target(&self, months: i32) -> Option<CalendarDate> {
        add_months(self.current, months)
            .ok()
            .filter(|target| self.allows(target.year_month()))
    }

    fn allows(&self, month: YearMonth) -> bool {
        self.bounds.contains(month) && ensure_renderable(month).is_ok()
    }

    /// Month a jump to `year` lands on, or `None` when the year is blocked.
    fn year_target(&self, year: i32) -> CalendarResult<Option<YearMonth>> {
        let target = self.bounds.clamp(YearMonth::new(year, self.current.month())?);
        Ok((target.year() == year && self.allows(target)).then_some(target))
    }

    fn apply(&mut self, target: CalendarDate) {
        self.current = target;
        self.follow_year(target.year());
    }

    /// Pages the picker window until `year` is visible.
    fn follow_year(&mut self, year: i32) {
        while year < self.picker_first_year() {
            self.page_years_back();
        }
        while year > self.picker_first_year().saturating_add(PICKER_PAGE_YEARS - 1) {
            self.page_years_forward();
        }
    }

    fn recenter_picker(&mut self, year: i32, index: usize) {
        self.picker_offset = year
            .saturating_sub(self.today.year())
            .saturating_add(PICKER_TODAY_INDEX as i32)
            .saturating_sub(index as i32);
    }
}

/// A month can be displayed only when both neighbours exist for its
/// overflow cells.
fn ensure_renderable(month: YearMonth) -> CalendarResult<()> {
    month.offset(-1)?;
    month.offset(1)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Direction, NavigationBounds, NavigationState, NavigationUnit};
    use crate::error::{CalendarError, CalendarErrorKind};
    use crate::model::date::{CalendarDate, YearMonth};
    use chrono::{Datelike, NaiveDate};

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).expect("valid date")
    }

    fn month(year: i32, month: u8) -> YearMonth {
        YearMonth::new(year, month).expect("valid month")
    }

    #[test]
    fn rejects_current_outside_bounds() {
        let bounds = NavigationBounds::new(Some(month(2024, 2)), Some(month(2024, 8))).unwrap();
        let err = NavigationState::new(date(2024, 1, 29), date(2024, 1, 1), bounds).unwrap_err();
        assert_eq!(err.kind(), CalendarErrorKind::Configuration);
        assert!(matches!(err, CalendarError::CurrentBeforeStart { .. }));

        let err = NavigationState::new(date(2024, 9, 1), date(2024, 1, 1), bounds).unwrap_err();
        assert!(matches!(err, CalendarError::CurrentAfterEnd { .. }));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = NavigationBounds::new(Some(month(2024, 5)), Some(month(2024, 4))).unwrap_err();
        assert_eq!(err.kind(), CalendarErrorKind::Configuration);
    }

    #[test]
    fn month_steps_wrap_years() {
        let mut state =
            NavigationState::new(date(2024, 0, 31), date(2024, 0, 1), NavigationBounds::unbounded())
                .unwrap();
        assert!(state.go_to_prev_month());
        assert_eq!(state.current(), date(2023, 11, 31));
        assert!(state.go_to_next_month());
        assert!(state.go_to_next_month());
        assert_eq!(state.current(), date(2024, 1, 29));
        assert!(state.step(Direction::Next, NavigationUnit::Year));
        assert_eq!(state.current(), date(2025, 1, 28));
    }

    #[test]
    fn boundary_month_is_reachable_but_not_crossable() {
        let bounds = NavigationBounds::new(Some(month(2024, 0)), None).unwrap();
        let mut state = NavigationState::new(date(2024, 1, 10), date(2024, 1, 10), bounds).unwrap();
        assert!(state.flags().can_go_prev_month);
        assert!(state.go_to_prev_month());
        assert!(!state.flags().can_go_prev_month);
        assert!(!state.go_to_prev_month());
        assert_eq!(state.current(), date(2024, 0, 10));
    }

    #[test]
    fn year_flags_respect_bounds() {
        let bounds = NavigationBounds::new(Some(month(2023, 6)), Some(month(2025, 3))).unwrap();
        let state = NavigationState::new(date(2024, 4, 1), date(2024, 4, 1), bounds).unwrap();
        let flags = state.flags();
        assert!(!flags.can_go_prev_year);
        assert!(!flags.can_go_next_year);
        assert!(flags.can_go_prev_month);
        assert!(flags.can_go_next_month);
    }

    #[test]
    fn go_to_month_validates_and_checks_bounds() {
        let bounds = NavigationBounds::new(Some(month(2024, 2)), Some(month(2024, 8))).unwrap();
        let mut state = NavigationState::new(date(2024, 4, 31), date(2024, 4, 1), bounds).unwrap();
        assert_eq!(state.go_to_month(12).unwrap_err(), CalendarError::InvalidMonth(12));
        assert!(!state.go_to_month(1).unwrap());
        assert!(state.go_to_month(5).unwrap());
        assert_eq!(state.current(), date(2024, 5, 30));
    }

    #[test]
    fn go_to_year_clamps_month_into_bounds() {
        let bounds = NavigationBounds::new(Some(month(2023, 6)), Some(month(2025, 2))).unwrap();
        let mut state = NavigationState::new(date(2024, 4, 10), date(2024, 4, 10), bounds).unwrap();
        let window = state.picker_window();
        for option in &window.options {
            let enabled = (2023..=2025).contains(&option.year);
            assert_eq!(option.is_disabled, !enabled, "{}", option.year);
        }

        assert!(state.go_to_year(2025, None).unwrap());
        assert_eq!(state.current(), date(2025, 2, 10));
        assert!(state.go_to_year(2023, None).unwrap());
        assert_eq!(state.current(), date(2023, 6, 10));
        assert!(!state.go_to_year(2026, None).unwrap());
        assert_eq!(state.current(), date(2023, 6, 10));
    }

    #[test]
    fn last_representable_month_is_not_reachable() {
        let max_year = NaiveDate::MAX.year();
        let november = date(max_year, 10, 15);
        let mut state =
            NavigationState::new(november, november, NavigationBounds::unbounded()).unwrap();

        assert!(!state.flags().can_go_next_month);
        assert!(!state.go_to_next_month());
        assert!(!state.go_to_month(11).unwrap());
        assert!(state.month_options()[11].is_disabled);
        assert_eq!(
            state.set_current(date(max_year, 11, 1)).unwrap_err(),
            CalendarError::YearOutOfRange(max_year + 1)
        );
        assert_eq!(state.current(), november);
        assert!(state.flags().can_go_prev_month);

        let err = NavigationState::new(
            date(max_year, 11, 1),
            november,
            NavigationBounds::unbounded(),
        )
        .unwrap_err();
        assert_eq!(err, CalendarError::YearOutOfRange(max_year + 1));
    }

    #[test]
    fn picker_window_pages_by_twelve_and_marks_today() {
        let mut state =
            NavigationState::new(date(2024, 4, 1), date(2024, 4, 1), NavigationBounds::unbounded())
                .unwrap();
        let window = state.picker_window();
        assert_eq!(window.first_year, 2020);
        assert_eq!(window.today_index(), Some(4));
        assert_eq!(window.selected_index(), Some(4));

        state.page_years_forward();
        let window = state.picker_window();
        assert_eq!(window.first_year, 2032);
        assert_eq!(window.today_index(), None);
        assert_eq!(state.picker_offset(), 12);

        state.page_years_back();
        state.page_years_back();
        assert_eq!(state.picker_window().first_year, 2008);
    }

    #[test]
    fn go_to_year_with_index_recenters_window() {
        let mut state =
            NavigationState::new(date(2024, 4, 1), date(2024, 4, 1), NavigationBounds::unbounded())
                .unwrap();
        assert!(state.go_to_year(2030, Some(9)).unwrap());
        let window = state.picker_window();
        assert_eq!(window.options[9].year, 2030);
        assert!(window.options[9].is_selected);
        assert_eq!(
            state.go_to_year(2030, Some(12)).unwrap_err(),
            CalendarError::InvalidPickerIndex(12)
        );
    }

    #[test]
    fn month_navigation_pages_window_when_year_leaves_it() {
        let mut state =
            NavigationState::new(date(2020, 0, 15), date(2024, 4, 1), NavigationBounds::unbounded())
                .unwrap();
        assert_eq!(state.picker_window().first_year, 2016);
        state.page_years_forward();
        assert_eq!(state.picker_window().first_year, 2028);

        assert!(state.go_to_prev_month());
        let window = state.picker_window();
        assert!(window.years().any(|year| year == 2019));
        assert_eq!(window.first_year, 2016);
    }

    #[test]
    fn month_options_disable_out_of_range_months() {
        let bounds = NavigationBounds::new(Some(month(2024, 2)), Some(month(2024, 8))).unwrap();
        let state = NavigationState::new(date(2024, 4, 1), date(2024, 3, 9), bounds).unwrap();
        let options = state.month_options();
        let disabled: Vec<u8> = options
            .iter()
            .filter(|option| option.is_disabled)
            .map(|option| option.month)
            .collect();
        assert_eq!(disabled, vec![0, 1, 9, 10, 11]);
        assert!(options[3].is_today);
        assert!(options[4].is_selected);
    }
}
