//! Commute schedule and battery constants the forecast is computed against.

use std::iter;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{
    core::trip::{DayKind, TripLabel},
    prelude::*,
    quantity::Percent,
};

#[derive(Clone, Debug)]
pub struct CommutePolicy {
    /// Charge consumed by a single one-way trip.
    pub trip_cost: Percent,

    /// Trips ending below this charge are flagged.
    pub low_battery_threshold: Percent,

    /// Maximum number of travel days to simulate. Rest days do not count.
    pub max_weekdays: u32,

    /// Trips attempted on every travel day, in order.
    pub trips_per_day: Vec<TripLabel>,

    pub is_rest_day: fn(Weekday) -> bool,

    /// Stop the whole projection when a trip cannot be afforded in the middle of a day,
    /// otherwise just end the day there.
    pub stop_on_partial_day: bool,
}

impl Default for CommutePolicy {
    fn default() -> Self {
        Self::school_run()
    }
}

impl CommutePolicy {
    pub const TRIP_COST: Percent = Percent(13);
    pub const LOW_BATTERY_THRESHOLD: Percent = Percent(20);
    pub const MAX_WEEKDAYS: u32 = 30;

    /// There and back again, Monday through Friday.
    #[must_use]
    pub fn school_run() -> Self {
        Self {
            trip_cost: Self::TRIP_COST,
            low_battery_threshold: Self::LOW_BATTERY_THRESHOLD,
            max_weekdays: Self::MAX_WEEKDAYS,
            trips_per_day: vec![TripLabel::Outbound, TripLabel::Return],
            is_rest_day: is_weekend,
            stop_on_partial_day: true,
        }
    }

    pub fn validate(&self) -> Result {
        ensure!(self.trip_cost > Percent::ZERO, "trip cost must be positive");
        ensure!(self.trip_cost <= Percent::FULL, "trip cost {} exceeds 100%", self.trip_cost);
        ensure!(
            self.low_battery_threshold <= Percent::FULL,
            "low battery threshold {} exceeds 100%",
            self.low_battery_threshold,
        );
        ensure!(!self.trips_per_day.is_empty(), "at least one trip per day is required");
        ensure!(
            iter::successors(Some(Weekday::Mon), |weekday| Some(weekday.succ()))
                .take(7)
                .any(|weekday| !(self.is_rest_day)(weekday)),
            "every day of the week is a rest day",
        );
        Ok(())
    }

    #[must_use]
    pub fn day_kind(&self, date: NaiveDate) -> DayKind {
        if (self.is_rest_day)(date.weekday()) { DayKind::Weekend } else { DayKind::Weekday }
    }

    #[must_use]
    pub fn is_low(&self, battery: Percent) -> bool {
        battery < self.low_battery_threshold
    }
}

#[must_use]
pub const fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
