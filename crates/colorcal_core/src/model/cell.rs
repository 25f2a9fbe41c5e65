//! Day cell produced by grid generation.

use crate::model::date::CalendarDate;
use crate::model::event::EventRecord;
use crate::navigation::NavigationBounds;
use serde::Serialize;
use std::sync::Arc;

/// Month a grid cell belongs to, relative to the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOrigin {
    PrevMonth,
    CurrentMonth,
    NextMonth,
}

/// One of the 42 cells of a month grid.
///
/// Cells are rebuilt on every month change. Only `is_selected` and `events`
/// are refreshed in place, by selection changes and event re-resolution.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell<P> {
    pub date: CalendarDate,
    pub day_number: u8,
    pub origin: CellOrigin,
    pub is_today: bool,
    pub is_selected: bool,
    /// Events for `date`, in index insertion order.
    pub events: Vec<Arc<EventRecord<P>>>,
}

impl<P> DayCell<P> {
    /// Returns whether this cell's month lies outside `bounds`.
    ///
    /// Derived on demand; out-of-range state is never stored on the cell.
    pub fn is_out_of_range(&self, bounds: &NavigationBounds) -> bool {
        !bounds.contains(self.date.year_month())
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}
