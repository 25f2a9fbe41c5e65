//! Event record attached to one calendar date.

use crate::model::date::CalendarDate;
use serde::{Deserialize, Serialize};

/// Caller-supplied payload associated with exactly one calendar date.
///
/// Core treats `payload` as opaque. Records are shared between the caller,
/// the event index and grid cells through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord<P> {
    pub date: CalendarDate,
    pub payload: P,
}

impl<P> EventRecord<P> {
    pub fn new(date: CalendarDate, payload: P) -> Self {
        Self { date, payload }
    }
}
