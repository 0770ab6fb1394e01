use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::core::trip::TripEvent;

/// Why the projection stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Halt {
    /// Not enough charge left for the next trip.
    Exhausted,

    /// The travel day budget is spent.
    BudgetReached,

    /// Ran past the last representable date.
    EndOfCalendar,
}

/// Outcome of a single projection run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[must_use]
pub struct ForecastResult {
    trip_log: Vec<TripEvent>,
    remaining_trip_count: usize,
    remaining_days: usize,
    last_sustainable_date: Option<NaiveDate>,
    is_critical: bool,
    halt: Halt,
}

impl ForecastResult {
    /// `is_critical` must be computed from the input battery level, not from the log.
    pub fn new(trip_log: Vec<TripEvent>, is_critical: bool, halt: Halt) -> Self {
        Self {
            remaining_trip_count: trip_log.len(),
            remaining_days: trip_log.iter().map(TripEvent::occurs_on).dedup().count(),
            last_sustainable_date: trip_log.last().map(TripEvent::occurs_on),
            trip_log,
            is_critical,
            halt,
        }
    }

    #[must_use]
    pub fn trip_log(&self) -> &[TripEvent] {
        &self.trip_log
    }

    #[must_use]
    pub const fn remaining_trip_count(&self) -> usize {
        self.remaining_trip_count
    }

    /// Number of distinct days with at least one trip.
    #[must_use]
    pub const fn remaining_days(&self) -> usize {
        self.remaining_days
    }

    #[must_use]
    pub const fn last_sustainable_date(&self) -> Option<NaiveDate> {
        self.last_sustainable_date
    }

    #[must_use]
    pub const fn is_critical(&self) -> bool {
        self.is_critical
    }

    #[must_use]
    pub const fn halt(&self) -> Halt {
        self.halt
    }
}
