//! Month day-grid generation.
//!
//! # Responsibility
//! - Build the 42-cell grid for one displayed month.
//! - Resolve today/selection/event state for every cell.
//!
//! # Invariants
//! - A grid always holds exactly `GRID_CELL_COUNT` cells, week-major.
//! - Cell dates are strictly ascending with no gaps or duplicates.
//! - Leading cells come from the previous month, trailing cells from the next.

use crate::calendar_math::{add_months, first_weekday_of_month, DAYS_PER_WEEK};
use crate::error::CalendarResult;
use crate::events::EventIndex;
use crate::model::cell::{CellOrigin, DayCell};
use crate::model::date::{CalendarDate, YearMonth};
use serde::Serialize;

/// Six weeks of seven days.
pub const GRID_CELL_COUNT: usize = 42;

/// Inputs for one grid generation pass.
pub struct GridRequest<'a, P> {
    pub month: YearMonth,
    /// Weekday shown in column 0 (`0 = Sunday`).
    pub start_weekday: u8,
    pub today: CalendarDate,
    pub selected: Option<CalendarDate>,
    pub events: &'a EventIndex<P>,
}

/// Generated grid for one displayed month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid<P> {
    month: YearMonth,
    start_weekday: u8,
    cells: Vec<DayCell<P>>,
}

impl<P> MonthGrid<P> {
    /// Generates the full grid for `request.month`.
    ///
    /// # Errors
    /// - `InvalidStartWeekday` when `start_weekday > 6`.
    /// - `YearOutOfRange` when a neighbouring month is not representable.
    pub fn generate(request: &GridRequest<'_, P>) -> CalendarResult<Self> {
        let month = request.month;
        let leading = first_weekday_of_month(month.year(), month.month(), request.start_weekday)?;
        let prev = add_months(month.first_day(), -1)?.year_month();
        let next = add_months(month.first_day(), 1)?.year_month();

        let mut cells = Vec::with_capacity(GRID_CELL_COUNT);
        let prev_days = prev.days();
        for day in (prev_days - leading + 1)..=prev_days {
            cells.push(resolve_cell(request, prev, day, CellOrigin::PrevMonth));
        }
        for day in 1..=month.days() {
            cells.push(resolve_cell(request, month, day, CellOrigin::CurrentMonth));
        }
        let mut day = 1;
        while cells.len() < GRID_CELL_COUNT {
            cells.push(resolve_cell(request, next, day, CellOrigin::NextMonth));
            day += 1;
        }

        Ok(Self {
            month,
            start_weekday: request.start_weekday,
            cells,
        })
    }

    /// Displayed month.
    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn start_weekday(&self) -> u8 {
        self.start_weekday
    }

    pub fn cells(&self) -> &[DayCell<P>] {
        &self.cells
    }

    /// Cells grouped into six rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<P>]> {
        self.cells.chunks(usize::from(DAYS_PER_WEEK))
    }

    /// Cell resolving to `date`, including overflow cells.
    pub fn cell(&self, date: CalendarDate) -> Option<&DayCell<P>> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.cell(date).is_some()
    }

    pub fn selected_cell(&self) -> Option<&DayCell<P>> {
        self.cells.iter().find(|cell| cell.is_selected)
    }

    /// Marks at most one cell as selected.
    ///
    /// Returns `false` when `date` is set but no cell resolves to it; all
    /// cells are deselected in that case.
    pub fn select(&mut self, date: Option<CalendarDate>) -> bool {
        let mut matched = false;
        for cell in &mut self.cells {
            cell.is_selected = Some(cell.date) == date;
            matched |= cell.is_selected;
        }
        matched || date.is_none()
    }

    /// Re-resolves every cell's `events` from `index` without regenerating.
    pub fn refresh_events(&mut self, index: &EventIndex<P>) {
        for cell in &mut self.cells {
            cell.events = index.lookup(cell.date);
        }
    }
}

fn resolve_cell<P>(
    request: &GridRequest<'_, P>,
    month: YearMonth,
    day: u8,
    origin: CellOrigin,
) -> DayCell<P> {
    let date = month.day_clamped(day);
    DayCell {
        date,
        day_number: date.day(),
        origin,
        is_today: date == request.today,
        is_selected: Some(date) == request.selected,
        events: request.events.lookup(date),
    }
}
