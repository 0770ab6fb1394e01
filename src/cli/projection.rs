use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    core::{engine::Forecaster, forecast::ForecastResult, policy::CommutePolicy},
    prelude::*,
    quantity::Percent,
};

#[derive(Parser)]
pub struct ProjectionArgs {
    /// Current battery level in percent.
    #[clap(long = "battery", env = "BATTERY_PERCENT")]
    pub battery: Percent,

    /// First day of the projection, today by default.
    #[clap(long = "start-date", env = "START_DATE")]
    pub start_date: Option<NaiveDate>,

    #[clap(flatten)]
    pub policy: PolicyArgs,
}

impl ProjectionArgs {
    pub fn start_date(&self) -> NaiveDate {
        self.start_date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn project(&self) -> Result<Projection> {
        let forecaster = Forecaster::new(self.policy.to_policy())?;
        let start_date = self.start_date();
        let forecast = forecaster.try_project(self.battery, start_date)?;
        info!(
            n_trips = forecast.remaining_trip_count(),
            last_sustainable_date = ?forecast.last_sustainable_date(),
            is_critical = forecast.is_critical(),
            "projected",
        );
        Ok(Projection { forecaster, start_date, forecast })
    }
}

pub struct Projection {
    pub forecaster: Forecaster,
    pub start_date: NaiveDate,
    pub forecast: ForecastResult,
}

#[derive(Copy, Clone, Parser)]
pub struct PolicyArgs {
    /// Battery charge consumed by a single one-way trip.
    #[clap(long = "trip-cost-percent", default_value = "13", env = "TRIP_COST_PERCENT")]
    pub trip_cost: Percent,

    /// Trips ending below this charge level are flagged.
    #[clap(
        long = "low-battery-threshold-percent",
        default_value = "20",
        env = "LOW_BATTERY_THRESHOLD_PERCENT"
    )]
    pub low_battery_threshold: Percent,
}

impl PolicyArgs {
    pub fn to_policy(self) -> CommutePolicy {
        CommutePolicy {
            trip_cost: self.trip_cost,
            low_battery_threshold: self.low_battery_threshold,
            ..CommutePolicy::school_run()
        }
    }
}
