use chrono::Datelike;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        forecast::{ForecastResult, Halt},
        policy::CommutePolicy,
        trip::{TripEvent, TripLabel},
    },
    quantity::Percent,
};

/// Charge level above which the battery is comfortably full.
const COMFORTABLE_CHARGE: Percent = Percent(50);

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn battery_color(battery: Percent, policy: &CommutePolicy) -> Color {
    if policy.is_low(battery) {
        Color::Red
    } else if battery < COMFORTABLE_CHARGE {
        Color::DarkYellow
    } else {
        Color::Green
    }
}

pub fn build_summary_table(
    battery: Percent,
    forecast: &ForecastResult,
    policy: &CommutePolicy,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Battery", "Per trip", "Trips left", "Days left", "Last day", "Stop"]);
    table.add_row(vec![
        Cell::new(battery)
            .fg(battery_color(battery, policy))
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
        Cell::new(policy.trip_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim),
        Cell::new(forecast.remaining_trip_count()).set_alignment(CellAlignment::Right),
        Cell::new(forecast.remaining_days()).set_alignment(CellAlignment::Right),
        forecast.last_sustainable_date().map_or_else(
            || Cell::new("—").fg(Color::Red),
            |date| Cell::new(date.format("%a %b %d")),
        ),
        Cell::new(match forecast.halt() {
            Halt::Exhausted => "empty",
            Halt::BudgetReached => "horizon",
            Halt::EndOfCalendar => "calendar",
        })
        .add_attribute(Attribute::Dim),
    ]);
    table
}

pub fn build_timeline_table(forecast: &ForecastResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Day", "Trip", "Before", "After"]);
    let n_trips = forecast.trip_log().len();
    for (index, event) in forecast.trip_log().iter().enumerate() {
        let is_last = index + 1 == n_trips;
        table.add_row(build_timeline_row(event, is_last));
    }
    table
}

fn build_timeline_row(event: &TripEvent, is_last: bool) -> Vec<Cell> {
    let after_color = if event.is_low_battery() {
        Color::Red
    } else if is_last {
        Color::Cyan
    } else {
        Color::Reset
    };
    let mut after =
        Cell::new(event.battery_after()).set_alignment(CellAlignment::Right).fg(after_color);
    if is_last {
        after = after.add_attribute(Attribute::Bold);
    }
    vec![
        Cell::new(event.occurs_on().format("%b %d")),
        Cell::new(event.occurs_on().weekday()).add_attribute(Attribute::Dim),
        Cell::new(event.label()).fg(match event.label() {
            TripLabel::Outbound => Color::Blue,
            TripLabel::Return => Color::Green,
        }),
        Cell::new(event.battery_before())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim),
        after,
    ]
}
