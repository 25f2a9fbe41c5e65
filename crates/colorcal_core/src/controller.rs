//! Calendar controller: the navigation → grid → notification pipeline.
//!
//! # Responsibility
//! - Own navigation state, the event index and the rendered grid.
//! - Run every public operation in a fixed step order.
//! - Expose a command surface for the rendering layer.
//!
//! # Invariants
//! - Grid regeneration happens before any flag read or callback.
//! - Transitions build the new grid first; navigation, selection and grid
//!   are committed together or not at all.
//! - At most one cell is selected; month changes drop the selection.
//! - Callbacks fire synchronously, after state is fully updated.

use crate::calendar_math;
use crate::config::{CalendarConfig, MonthDisplayType};
use crate::error::{CalendarError, CalendarResult};
use crate::events::EventIndex;
use crate::grid::{GridRequest, MonthGrid};
use crate::model::cell::{CellOrigin, DayCell};
use crate::model::date::{CalendarDate, YearMonth};
use crate::model::event::EventRecord;
use crate::navigation::{
    Direction, MonthOption, NavigationBounds, NavigationFlags, NavigationState, NavigationUnit,
    PickerWindow,
};
use log::{debug, info, warn};
use std::sync::Arc;

/// Notification callback receiving a date and the events relevant to it.
///
/// Callbacks run synchronously inside the triggering operation. They do not
/// receive the calendar; hosts that reach it through shared interior
/// mutability must not start another navigation or selection from inside a
/// callback.
pub type DateCallback<P> = Box<dyn FnMut(CalendarDate, &[Arc<EventRecord<P>>])>;

/// Optional notification hooks.
pub struct CalendarCallbacks<P> {
    /// Fired after any month-level change with the displayed month's events.
    pub month_changed: Option<DateCallback<P>>,
    /// Fired after any selection change with the selected date's events.
    pub date_changed: Option<DateCallback<P>>,
    /// Fired only for user date clicks, never for `set_date`.
    pub selected_date_clicked: Option<DateCallback<P>>,
}

impl<P> Default for CalendarCallbacks<P> {
    fn default() -> Self {
        Self {
            month_changed: None,
            date_changed: None,
            selected_date_clicked: None,
        }
    }
}

impl<P> CalendarCallbacks<P> {
    pub fn on_month_changed(
        mut self,
        callback: impl FnMut(CalendarDate, &[Arc<EventRecord<P>>]) + 'static,
    ) -> Self {
        self.month_changed = Some(Box::new(callback));
        self
    }

    pub fn on_date_changed(
        mut self,
        callback: impl FnMut(CalendarDate, &[Arc<EventRecord<P>>]) + 'static,
    ) -> Self {
        self.date_changed = Some(Box::new(callback));
        self
    }

    pub fn on_selected_date_clicked(
        mut self,
        callback: impl FnMut(CalendarDate, &[Arc<EventRecord<P>>]) + 'static,
    ) -> Self {
        self.selected_date_clicked = Some(Box::new(callback));
        self
    }
}

/// Everything needed to initialize a calendar.
pub struct CalendarOptions<P> {
    pub config: CalendarConfig,
    pub events_data: Vec<EventRecord<P>>,
    pub callbacks: CalendarCallbacks<P>,
}

impl<P> Default for CalendarOptions<P> {
    fn default() -> Self {
        Self {
            config: CalendarConfig::default(),
            events_data: Vec::new(),
            callbacks: CalendarCallbacks::default(),
        }
    }
}

impl<P> CalendarOptions<P> {
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

/// Month or year picker panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Month,
    Year,
}

/// Picker panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerState {
    pub kind: PickerKind,
    pub is_open: bool,
}

/// Input commands issued by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCommand {
    NavigatePrevMonth,
    NavigateNextMonth,
    NavigatePrevYear,
    NavigateNextYear,
    SelectMonth(u8),
    SelectYear { year: i32, index: Option<usize> },
    PageYearsBack,
    PageYearsForward,
    ClickDate(CalendarDate),
    TogglePicker(PickerKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionSource {
    Click,
    Programmatic,
}

/// Interactive month calendar core.
pub struct Calendar<P> {
    config: CalendarConfig,
    start_weekday: u8,
    weekday_labels: Vec<String>,
    navigation: NavigationState,
    events: EventIndex<P>,
    grid: MonthGrid<P>,
    selected: Option<CalendarDate>,
    month_events: Vec<Arc<EventRecord<P>>>,
    picker: PickerState,
    callbacks: CalendarCallbacks<P>,
}

impl<P> Calendar<P> {
    /// Builds a calendar and emits the initial notifications.
    ///
    /// Steps: validate bounds → index events → generate grid → initial
    /// selection → `date_changed` → `month_changed`.
    ///
    /// # Errors
    /// - Configuration errors when the current date lies outside bounds or
    ///   bounds are inverted.
    /// - `InvalidStartWeekday` when `start_weekday > 6`.
    pub fn initialize(options: CalendarOptions<P>) -> CalendarResult<Self> {
        let CalendarOptions {
            config,
            events_data,
            callbacks,
        } = options;

        let start_weekday = config.start_weekday()?;
        let weekday_labels = config.weekday_labels()?;
        let today = config.today.unwrap_or_else(calendar_math::today);
        let current = config.current_date.unwrap_or(today);
        let navigation = NavigationBounds::from_dates(config.start_month, config.end_month)
            .and_then(|bounds| NavigationState::new(current, today, bounds))
            .map_err(|err| {
                warn!("event=calendar_init module=controller status=error error={err}");
                err
            })?;

        let mut events = EventIndex::new();
        let indexed = events.replace_all(events_data);

        let selected = config.select_initial_date.then_some(current);
        let grid = MonthGrid::generate(&GridRequest {
            month: current.year_month(),
            start_weekday,
            today,
            selected,
            events: &events,
        })?;
        let month_events = events.lookup_month(current.year_month());

        info!(
            "event=calendar_init module=controller status=ok month={} events={} bounded={}",
            current.year_month(),
            indexed,
            navigation.bounds().is_bounded()
        );

        let mut calendar = Self {
            config,
            start_weekday,
            weekday_labels,
            navigation,
            events,
            grid,
            selected,
            month_events,
            picker: PickerState {
                kind: PickerKind::Month,
                is_open: false,
            },
            callbacks,
        };
        calendar.emit_date_changed(current);
        calendar.emit_month_changed();
        Ok(calendar)
    }

    /// Moves the display one month or year.
    ///
    /// Returns `false` without side effects when a bound blocks the move.
    pub fn navigate(&mut self, direction: Direction, unit: NavigationUnit) -> CalendarResult<bool> {
        let mut navigation = self.navigation.clone();
        if !navigation.step(direction, unit) {
            debug!(
                "event=navigate module=controller status=blocked direction={direction:?} unit={unit:?} month={}",
                self.navigation.display_month()
            );
            return Ok(false);
        }
        self.after_month_change(navigation)?;
        Ok(true)
    }

    pub fn prev_month(&mut self) -> CalendarResult<bool> {
        self.navigate(Direction::Prev, NavigationUnit::Month)
    }

    pub fn next_month(&mut self) -> CalendarResult<bool> {
        self.navigate(Direction::Next, NavigationUnit::Month)
    }

    pub fn prev_year(&mut self) -> CalendarResult<bool> {
        self.navigate(Direction::Prev, NavigationUnit::Year)
    }

    pub fn next_year(&mut self) -> CalendarResult<bool> {
        self.navigate(Direction::Next, NavigationUnit::Year)
    }

    /// Displays `month` of the current year (month picker selection).
    pub fn go_to_month(&mut self, month: u8) -> CalendarResult<bool> {
        let mut navigation = self.navigation.clone();
        if !navigation.go_to_month(month)? {
            return Ok(false);
        }
        self.after_month_change(navigation)?;
        Ok(true)
    }

    /// Displays `year` (year picker selection), keeping the current month
    /// when bounds allow it and otherwise the nearest bound month.
    pub fn go_to_year(&mut self, year: i32, index: Option<usize>) -> CalendarResult<bool> {
        let mut navigation = self.navigation.clone();
        if !navigation.go_to_year(year, index)? {
            return Ok(false);
        }
        self.after_month_change(navigation)?;
        Ok(true)
    }

    pub fn page_years_back(&mut self) {
        self.navigation.page_years_back();
    }

    pub fn page_years_forward(&mut self) {
        self.navigation.page_years_forward();
    }

    /// Opens `kind`, or toggles it when it is already the active panel.
    ///
    /// Returns `false` when pickers are disabled.
    pub fn toggle_picker(&mut self, kind: PickerKind) -> bool {
        if self.config.disable_month_year_pickers {
            return false;
        }
        if self.picker.kind == kind {
            self.picker.is_open = !self.picker.is_open;
        } else {
            self.picker.kind = kind;
            self.picker.is_open = true;
        }
        true
    }

    pub fn close_picker(&mut self) {
        self.picker.is_open = false;
    }

    /// Selects `date` as a user click.
    ///
    /// `date` must resolve to a cell of the rendered grid. Clicking an
    /// overflow cell moves the display into that month first.
    ///
    /// # Errors
    /// - `DateNotInGrid` when no cell resolves to `date`.
    /// - `DateOutOfBounds` when the overflow month lies outside bounds.
    pub fn select_date(&mut self, date: CalendarDate) -> CalendarResult<()> {
        self.select(date, SelectionSource::Click)
    }

    /// Selects `date` programmatically, displaying its month when needed.
    ///
    /// Emits `date_changed` only, never `selected_date_clicked`.
    ///
    /// # Errors
    /// - `DateOutOfBounds` when the date's month lies outside bounds.
    pub fn set_date(&mut self, date: CalendarDate) -> CalendarResult<()> {
        self.select(date, SelectionSource::Programmatic)
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.selected
    }

    /// Replaces all events; returns the number indexed.
    pub fn set_events_data<I, E>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<EventRecord<P>>>,
    {
        let count = self.events.replace_all(events);
        self.refresh_events();
        info!("event=events_replaced module=controller status=ok count={count}");
        count
    }

    /// Adds events; returns the total count after the merge.
    pub fn add_events_data<I, E>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<EventRecord<P>>>,
    {
        let total = self.events.add(events);
        self.refresh_events();
        info!("event=events_added module=controller status=ok total={total}");
        total
    }

    pub fn date_events(&self, date: CalendarDate) -> Vec<Arc<EventRecord<P>>> {
        self.events.lookup(date)
    }

    /// Events of the displayed month, ordered by day.
    pub fn month_events(&self) -> &[Arc<EventRecord<P>>] {
        &self.month_events
    }

    /// Re-initializes the display around `date` (today when `None`),
    /// keeping bounds, options, events and callbacks.
    ///
    /// An explicit `date` is always selected. With `None`, today is selected
    /// only when `select_initial_date` is set, matching construction.
    ///
    /// # Errors
    /// - Configuration errors when `date` lies outside bounds.
    pub fn reset(&mut self, date: Option<CalendarDate>) -> CalendarResult<()> {
        let explicit = date.is_some();
        let date = date.unwrap_or_else(|| self.navigation.today());
        let mut navigation = self.navigation.clone();
        navigation.reset(date)?;
        let selected = (explicit || self.config.select_initial_date).then_some(date);
        self.commit(navigation, selected)?;
        info!(
            "event=calendar_reset module=controller status=ok month={}",
            date.year_month()
        );
        self.emit_date_changed(date);
        self.emit_month_changed();
        Ok(())
    }

    /// Applies one rendering-layer command, honouring interaction gates.
    ///
    /// Returns whether the command changed state.
    pub fn dispatch(&mut self, command: CalendarCommand) -> CalendarResult<bool> {
        let arrows_disabled = self.config.disable_month_arrow_click;
        let pickers_disabled = self.config.disable_month_year_pickers;
        match command {
            CalendarCommand::NavigatePrevMonth if !arrows_disabled => self.prev_month(),
            CalendarCommand::NavigateNextMonth if !arrows_disabled => self.next_month(),
            CalendarCommand::NavigatePrevYear if !arrows_disabled => self.prev_year(),
            CalendarCommand::NavigateNextYear if !arrows_disabled => self.next_year(),
            CalendarCommand::SelectMonth(month) if !pickers_disabled => self.go_to_month(month),
            CalendarCommand::SelectYear { year, index } if !pickers_disabled => {
                self.go_to_year(year, index)
            }
            CalendarCommand::PageYearsBack if !pickers_disabled => {
                self.page_years_back();
                Ok(true)
            }
            CalendarCommand::PageYearsForward if !pickers_disabled => {
                self.page_years_forward();
                Ok(true)
            }
            CalendarCommand::ClickDate(date) if !self.config.disable_day_click => {
                self.select_date(date).map(|()| true)
            }
            CalendarCommand::TogglePicker(kind) => Ok(self.toggle_picker(kind)),
            ignored => {
                debug!("event=dispatch module=controller status=ignored command={ignored:?}");
                Ok(false)
            }
        }
    }

    pub fn grid(&self) -> &MonthGrid<P> {
        &self.grid
    }

    pub fn cells(&self) -> &[DayCell<P>] {
        self.grid.cells()
    }

    /// Returns whether `cell` lies outside navigation bounds.
    pub fn is_out_of_range(&self, cell: &DayCell<P>) -> bool {
        cell.is_out_of_range(self.navigation.bounds())
    }

    pub fn flags(&self) -> NavigationFlags {
        self.navigation.flags()
    }

    /// Current display date (the selected date after a selection).
    pub fn current_date(&self) -> CalendarDate {
        self.navigation.current()
    }

    pub fn display_month(&self) -> YearMonth {
        self.navigation.display_month()
    }

    pub fn today(&self) -> CalendarDate {
        self.navigation.today()
    }

    pub fn bounds(&self) -> &NavigationBounds {
        self.navigation.bounds()
    }

    pub fn picker(&self) -> PickerState {
        self.picker
    }

    pub fn picker_window(&self) -> PickerWindow {
        self.navigation.picker_window()
    }

    pub fn month_options(&self) -> Vec<MonthOption> {
        self.navigation.month_options()
    }

    pub fn weekday_labels(&self) -> &[String] {
        &self.weekday_labels
    }

    pub fn start_weekday(&self) -> u8 {
        self.start_weekday
    }

    pub fn month_display_type(&self) -> MonthDisplayType {
        self.config.month_display_type
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn event_index(&self) -> &EventIndex<P> {
        &self.events
    }

    fn select(&mut self, date: CalendarDate, source: SelectionSource) -> CalendarResult<()> {
        let month_change = match self.grid.cell(date).map(|cell| cell.origin) {
            Some(CellOrigin::CurrentMonth) => false,
            Some(CellOrigin::PrevMonth | CellOrigin::NextMonth) => true,
            None if source == SelectionSource::Programmatic => true,
            None => return Err(CalendarError::DateNotInGrid(date)),
        };

        let mut navigation = self.navigation.clone();
        navigation.set_current(date)?;
        if month_change {
            self.commit(navigation, Some(date))?;
            self.emit_month_changed();
        } else {
            self.navigation = navigation;
            self.selected = Some(date);
            self.grid.select(Some(date));
        }

        debug!(
            "event=date_selected module=controller status=ok date={date} source={source:?} month_changed={month_change}"
        );
        self.emit_date_changed(date);
        if source == SelectionSource::Click {
            let events = self.events.lookup(date);
            if let Some(callback) = self.callbacks.selected_date_clicked.as_mut() {
                callback(date, &events);
            }
        }
        Ok(())
    }

    fn after_month_change(&mut self, navigation: NavigationState) -> CalendarResult<()> {
        self.commit(navigation, None)?;
        self.emit_month_changed();
        Ok(())
    }

    /// Builds the grid for `navigation`, then swaps in the whole display
    /// state. On error nothing is changed.
    fn commit(
        &mut self,
        navigation: NavigationState,
        selected: Option<CalendarDate>,
    ) -> CalendarResult<()> {
        let month = navigation.display_month();
        let grid = MonthGrid::generate(&GridRequest {
            month,
            start_weekday: self.start_weekday,
            today: navigation.today(),
            selected,
            events: &self.events,
        })?;
        self.navigation = navigation;
        self.selected = selected;
        self.grid = grid;
        self.picker.is_open = false;
        self.month_events = self.events.lookup_month(month);
        debug!(
            "event=grid_regenerated module=controller status=ok month={month} month_events={}",
            self.month_events.len()
        );
        Ok(())
    }

    fn refresh_events(&mut self) {
        self.grid.refresh_events(&self.events);
        self.month_events = self.events.lookup_month(self.navigation.display_month());
    }

    fn emit_date_changed(&mut self, date: CalendarDate) {
        if let Some(callback) = self.callbacks.date_changed.as_mut() {
            let events = self.events.lookup(date);
            callback(date, &events);
        }
    }

    fn emit_month_changed(&mut self) {
        let current = self.navigation.current();
        if let Some(callback) = self.callbacks.month_changed.as_mut() {
            callback(current, &self.month_events);
        }
    }
}
