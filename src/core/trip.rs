use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::quantity::Percent;

/// Commute direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripLabel {
    #[display("to school")]
    Outbound,

    #[display("to home")]
    Return,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayKind {
    Weekday,
    Weekend,
}

/// Single simulated one-way trip.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[must_use]
pub struct TripEvent {
    occurs_on: NaiveDate,
    label: TripLabel,
    day_kind: DayKind,
    battery_before: Percent,
    battery_after: Percent,
    is_low_battery: bool,
}

impl TripEvent {
    /// The low-battery flag is derived from the charge left after the trip.
    pub fn new(
        occurs_on: NaiveDate,
        label: TripLabel,
        battery_before: Percent,
        battery_after: Percent,
        low_battery_threshold: Percent,
    ) -> Self {
        debug_assert!(battery_after <= battery_before);
        Self {
            occurs_on,
            label,
            day_kind: DayKind::Weekday,
            battery_before,
            battery_after,
            is_low_battery: battery_after < low_battery_threshold,
        }
    }

    #[must_use]
    pub const fn occurs_on(&self) -> NaiveDate {
        self.occurs_on
    }

    #[must_use]
    pub const fn label(&self) -> TripLabel {
        self.label
    }

    #[must_use]
    pub const fn battery_before(&self) -> Percent {
        self.battery_before
    }

    #[must_use]
    pub const fn battery_after(&self) -> Percent {
        self.battery_after
    }

    #[must_use]
    pub const fn is_low_battery(&self) -> bool {
        self.is_low_battery
    }
}
