//! Date-keyed event index.
//!
//! # Responsibility
//! - Group event records by exact calendar date.
//! - Answer per-date and per-month queries in stable order.
//!
//! # Invariants
//! - Bucket order equals insertion order.
//! - Month queries are ordered by day ascending, then insertion order.
//! - Keys are exact `(year, month, day)` triples; no time zone handling.

use crate::model::date::{CalendarDate, YearMonth};
use crate::model::event::EventRecord;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Normalized index key for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(CalendarDate);

impl From<CalendarDate> for DateKey {
    fn from(value: CalendarDate) -> Self {
        Self(value)
    }
}

impl DateKey {
    pub fn date(self) -> CalendarDate {
        self.0
    }
}

/// In-memory index from date key to shared event records.
#[derive(Debug, Clone)]
pub struct EventIndex<P> {
    buckets: BTreeMap<DateKey, Vec<Arc<EventRecord<P>>>>,
    len: usize,
}

impl<P> Default for EventIndex<P> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<P> EventIndex<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the index and rebuilds it from `events`.
    ///
    /// Returns the number of records indexed.
    pub fn replace_all<I, E>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<EventRecord<P>>>,
    {
        self.buckets.clear();
        self.len = 0;
        self.add(events)
    }

    /// Merges `events` into existing buckets.
    ///
    /// Returns the total record count after the merge.
    pub fn add<I, E>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<EventRecord<P>>>,
    {
        for event in events {
            let event = event.into();
            self.buckets
                .entry(DateKey::from(event.date))
                .or_default()
                .push(event);
            self.len += 1;
        }
        self.len
    }

    /// Events on exactly `date`, in insertion order.
    pub fn lookup(&self, date: CalendarDate) -> Vec<Arc<EventRecord<P>>> {
        self.buckets
            .get(&DateKey::from(date))
            .cloned()
            .unwrap_or_default()
    }

    /// Events in `(year, month)`, ordered by day then insertion order.
    pub fn lookup_month(&self, month: YearMonth) -> Vec<Arc<EventRecord<P>>> {
        let first = DateKey::from(month.first_day());
        let last = DateKey::from(month.day_clamped(month.days()));
        self.buckets
            .range(first..=last)
            .flat_map(|(_, bucket)| bucket.iter().cloned())
            .collect()
    }

    /// Iterates all records ordered by date, then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EventRecord<P>>> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct dates carrying at least one event.
    pub fn date_count(&self) -> usize {
        self.buckets.len()
    }
}
