//! Core computation layer for the colorcal month calendar widget.
//!
//! Grid generation, month/year navigation, the per-date event index and the
//! selection pipeline live here. Rendering layers consume cells, flags and
//! picker options, and feed input back through `CalendarCommand`.

pub mod calendar_math;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod grid;
pub mod logging;
pub mod model;
pub mod navigation;

pub use calendar_math::{add_months, days_in_month, first_weekday_of_month, is_leap_year};
pub use config::{
    resolve_weekday_display_type, CalendarConfig, MonthDisplayType, WeekdayDisplayType,
};
pub use controller::{
    Calendar, CalendarCallbacks, CalendarCommand, CalendarOptions, DateCallback, PickerKind,
    PickerState,
};
pub use error::{CalendarError, CalendarErrorKind, CalendarResult};
pub use events::{DateKey, EventIndex};
pub use grid::{GridRequest, MonthGrid, GRID_CELL_COUNT};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::cell::{CellOrigin, DayCell};
pub use model::date::{CalendarDate, YearMonth};
pub use model::event::EventRecord;
pub use navigation::{
    Direction, MonthOption, NavigationBounds, NavigationFlags, NavigationState, NavigationUnit,
    PickerWindow, YearOption,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
