use clap::Parser;

use crate::{
    cli::projection::{Projection, ProjectionArgs},
    prelude::*,
    quantity::Percent,
    tables::{build_summary_table, build_timeline_table},
};

#[derive(Parser)]
pub struct ForecastArgs {
    #[clap(flatten)]
    pub projection: ProjectionArgs,

    /// Print the forecast as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

#[instrument(skip_all)]
pub fn forecast(args: &ForecastArgs) -> Result {
    let projection = args.projection.project()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection.forecast)?);
    } else {
        render(args.projection.battery, &projection);
    }
    Ok(())
}

pub fn render(battery: Percent, projection: &Projection) {
    let policy = projection.forecaster.policy();
    println!("{}", build_summary_table(battery, &projection.forecast, policy));
    if projection.forecast.is_critical() {
        println!(
            "⚠️ Battery is below {}, the next trip may not be possible. Charge immediately!",
            policy.low_battery_threshold,
        );
    }
    if projection.forecast.trip_log().is_empty() {
        println!("🪫 Battery too low to travel, charge now!");
    } else {
        println!("{}", build_timeline_table(&projection.forecast));
    }
}
