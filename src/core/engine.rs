//! Day-stepping battery projection.
//!
//! The projection is a fold of [`Forecaster::transition`] over an immutable [`State`]:
//! every step either emits at most one trip and moves to the next state, or halts.

use chrono::NaiveDate;

use crate::{
    core::{
        forecast::{ForecastResult, Halt},
        policy::CommutePolicy,
        trip::{DayKind, TripEvent, TripLabel},
    },
    prelude::*,
    quantity::Percent,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct State {
    pub battery: Percent,
    pub date: NaiveDate,

    /// Travel days already simulated, rest days excluded.
    pub n_weekdays: u32,

    /// Index of the next trip within the current day, zero at the start of a day.
    pub next_trip: usize,
}

impl State {
    pub const fn new(battery: Percent, date: NaiveDate) -> Self {
        Self { battery, date, n_weekdays: 0, next_trip: 0 }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Rest day: move on without spending anything.
    ScanningWeekend,

    AttemptTrip(TripLabel),

    /// All of the day's trips are done or abandoned.
    EndOfDay,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum Transition {
    Advance { next: State, event: Option<TripEvent> },
    Halt(Halt),
}

/// Forecast engine bound to a validated policy.
pub struct Forecaster {
    policy: CommutePolicy,
}

impl Forecaster {
    pub fn new(policy: CommutePolicy) -> Result<Self> {
        policy.validate().context("invalid commute policy")?;
        Ok(Self { policy })
    }

    #[must_use]
    pub const fn policy(&self) -> &CommutePolicy {
        &self.policy
    }

    /// Check the battery level and project.
    pub fn try_project(&self, battery: Percent, start: NaiveDate) -> Result<ForecastResult> {
        ensure!(battery <= Percent::FULL, "battery level {battery} is out of range");
        Ok(self.project(battery, start))
    }

    #[instrument(skip_all, fields(battery = %battery, start = %start))]
    pub fn project(&self, battery: Percent, start: NaiveDate) -> ForecastResult {
        let mut trip_log = Vec::new();
        let mut state = State::new(battery, start);
        let halt = loop {
            match self.transition(state) {
                Transition::Advance { next, event } => {
                    trip_log.extend(event);
                    state = next;
                }
                Transition::Halt(halt) => break halt,
            }
        };
        debug!(n_trips = trip_log.len(), ?halt, n_weekdays = state.n_weekdays, "projected");
        ForecastResult::new(trip_log, self.policy.is_low(battery), halt)
    }

    pub fn phase(&self, state: &State) -> Phase {
        match self.policy.trips_per_day.get(state.next_trip) {
            None => Phase::EndOfDay,
            Some(_) if state.next_trip == 0
                && self.policy.day_kind(state.date) == DayKind::Weekend =>
            {
                Phase::ScanningWeekend
            }
            Some(label) => Phase::AttemptTrip(*label),
        }
    }

    /// Single step of the projection.
    pub fn transition(&self, state: State) -> Transition {
        if state.next_trip == 0 {
            if state.battery < self.policy.trip_cost {
                return Transition::Halt(Halt::Exhausted);
            }
            if state.n_weekdays >= self.policy.max_weekdays {
                return Transition::Halt(Halt::BudgetReached);
            }
        }

        match self.phase(&state) {
            Phase::ScanningWeekend => match state.date.succ_opt() {
                Some(date) => Transition::Advance { next: State { date, ..state }, event: None },
                None => Transition::Halt(Halt::EndOfCalendar),
            },

            Phase::EndOfDay => match state.date.succ_opt() {
                Some(date) => Transition::Advance {
                    next: State { date, n_weekdays: state.n_weekdays + 1, next_trip: 0, ..state },
                    event: None,
                },
                None => Transition::Halt(Halt::EndOfCalendar),
            },

            Phase::AttemptTrip(label) => match state.battery.checked_sub(self.policy.trip_cost) {
                Some(battery_after) => Transition::Advance {
                    next: State { battery: battery_after, next_trip: state.next_trip + 1, ..state },
                    event: Some(TripEvent::new(
                        state.date,
                        label,
                        state.battery,
                        battery_after,
                        self.policy.low_battery_threshold,
                    )),
                },
                None if self.policy.stop_on_partial_day => Transition::Halt(Halt::Exhausted),
                None => Transition::Advance {
                    next: State { next_trip: self.policy.trips_per_day.len(), ..state },
                    event: None,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Weekday};
    use itertools::Itertools;

    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn school_run() -> Forecaster {
        Forecaster::new(CommutePolicy::school_run()).unwrap()
    }

    fn batteries(result: &ForecastResult) -> Vec<(u16, u16)> {
        result
            .trip_log()
            .iter()
            .map(|event| (event.battery_before().0, event.battery_after().0))
            .collect()
    }

    #[test]
    fn typical_charge() {
        let result = school_run().project(Percent(65), monday());
        assert_eq!(batteries(&result), [(65, 52), (52, 39), (39, 26), (26, 13), (13, 0)]);
        assert_eq!(
            result.trip_log().iter().map(TripEvent::label).collect_vec(),
            [
                TripLabel::Outbound,
                TripLabel::Return,
                TripLabel::Outbound,
                TripLabel::Return,
                TripLabel::Outbound,
            ],
        );
        assert_eq!(
            result.trip_log().iter().map(TripEvent::is_low_battery).collect_vec(),
            [false, false, false, true, true],
        );
        assert_eq!(result.remaining_trip_count(), 5);
        assert_eq!(result.remaining_days(), 3);
        assert_eq!(result.last_sustainable_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(result.halt(), Halt::Exhausted);
        assert!(!result.is_critical());
    }

    #[test]
    fn below_single_trip() {
        let result = school_run().project(Percent(10), monday());
        assert!(result.trip_log().is_empty());
        assert_eq!(result.remaining_trip_count(), 0);
        assert_eq!(result.last_sustainable_date(), None);
        assert!(result.is_critical());
        assert_eq!(result.halt(), Halt::Exhausted);
    }

    #[test]
    fn exactly_one_trip() {
        let result = school_run().project(Percent(13), monday());
        assert_eq!(batteries(&result), [(13, 0)]);
        assert_eq!(result.trip_log()[0].label(), TripLabel::Outbound);
        assert!(result.is_critical());
    }

    #[test]
    fn friday_start_skips_weekend() {
        let result = school_run().project(Percent(100), friday());
        let dates = result.trip_log().iter().map(TripEvent::occurs_on).collect_vec();
        assert_eq!(dates[0], friday());
        assert_eq!(dates[1], friday());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(result.remaining_trip_count(), 7);
    }

    #[test]
    fn weekend_start() {
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let result = school_run().project(Percent(30), sunday);
        assert_eq!(result.last_sustainable_date(), NaiveDate::from_ymd_opt(2024, 1, 8));
        assert_eq!(result.remaining_trip_count(), 2);
    }

    #[test]
    fn one_day_exactly() {
        let result = school_run().project(Percent(26), monday());
        assert_eq!(batteries(&result), [(26, 13), (13, 0)]);
        assert!(result.trip_log()[1].is_low_battery());
        assert_eq!(result.remaining_days(), 1);
    }

    #[test]
    fn input_threshold_drives_critical_flag() {
        assert!(school_run().project(Percent(19), monday()).is_critical());
        assert!(!school_run().project(Percent(20), monday()).is_critical());
    }

    #[test]
    fn budget_caps_weekdays_not_calendar_days() -> Result {
        let forecaster =
            Forecaster::new(CommutePolicy { trip_cost: Percent(1), ..CommutePolicy::default() })?;
        let result = forecaster.project(Percent::FULL, monday());
        assert_eq!(result.remaining_trip_count(), 60);
        assert_eq!(result.halt(), Halt::BudgetReached);
        assert_eq!(result.trip_log().last().unwrap().battery_after(), Percent(40));
        assert_eq!(result.last_sustainable_date(), NaiveDate::from_ymd_opt(2024, 2, 9));
        Ok(())
    }

    #[test]
    fn zero_budget() -> Result {
        let forecaster =
            Forecaster::new(CommutePolicy { max_weekdays: 0, ..CommutePolicy::default() })?;
        let result = forecaster.project(Percent::FULL, monday());
        assert!(result.trip_log().is_empty());
        assert_eq!(result.halt(), Halt::BudgetReached);
        Ok(())
    }

    #[test]
    fn partial_day_without_hard_stop() -> Result {
        let forecaster = Forecaster::new(CommutePolicy {
            stop_on_partial_day: false,
            ..CommutePolicy::default()
        })?;
        let result = forecaster.project(Percent(13), monday());
        assert_eq!(batteries(&result), [(13, 0)]);
        assert_eq!(result.halt(), Halt::Exhausted);
        Ok(())
    }

    #[test]
    fn alternate_schedule() -> Result {
        let forecaster = Forecaster::new(CommutePolicy {
            trips_per_day: vec![TripLabel::Outbound, TripLabel::Return, TripLabel::Outbound],
            is_rest_day: |weekday| weekday == Weekday::Sun,
            ..CommutePolicy::default()
        })?;
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let result = forecaster.project(Percent(60), saturday);
        let dates = result.trip_log().iter().map(TripEvent::occurs_on).collect_vec();
        assert_eq!(dates, [saturday, saturday, saturday, monday() + chrono::Days::new(7)]);
        Ok(())
    }

    #[test]
    fn try_project_rejects_overcharge() {
        assert!(school_run().try_project(Percent(101), monday()).is_err());
        assert!(school_run().try_project(Percent::FULL, monday()).is_ok());
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let policy = CommutePolicy { trip_cost: Percent::ZERO, ..CommutePolicy::default() };
        assert!(Forecaster::new(policy).is_err());
    }

    #[test]
    fn weekend_transition_is_free() {
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let forecaster = school_run();
        let state = State::new(Percent(50), saturday);
        assert_eq!(forecaster.phase(&state), Phase::ScanningWeekend);
        assert_eq!(
            forecaster.transition(state),
            Transition::Advance {
                next: State { date: saturday.succ_opt().unwrap(), ..state },
                event: None,
            },
        );
    }

    #[test]
    fn return_trip_hard_stop() {
        let forecaster = school_run();
        let state = State { next_trip: 1, ..State::new(Percent(12), monday()) };
        assert_eq!(forecaster.phase(&state), Phase::AttemptTrip(TripLabel::Return));
        assert_eq!(forecaster.transition(state), Transition::Halt(Halt::Exhausted));
    }

    #[test]
    fn end_of_day_consumes_budget() {
        let forecaster = school_run();
        let state = State { next_trip: 2, ..State::new(Percent(50), monday()) };
        assert_eq!(forecaster.phase(&state), Phase::EndOfDay);
        let Transition::Advance { next, event: None } = forecaster.transition(state) else {
            panic!("expected the day to end");
        };
        assert_eq!(next.n_weekdays, 1);
        assert_eq!(next.next_trip, 0);
        assert_eq!(next.date, monday().succ_opt().unwrap());
    }

    #[test]
    fn end_of_calendar() {
        let forecaster = school_run();
        let state = State { next_trip: 2, ..State::new(Percent(50), NaiveDate::MAX) };
        assert_eq!(forecaster.transition(state), Transition::Halt(Halt::EndOfCalendar));
    }

    /// Invariants over every battery level and every weekday to start on.
    #[test]
    fn invariants() {
        let forecaster = school_run();
        let policy = forecaster.policy();
        for start in monday().iter_days().take(7) {
            for level in 0..=100 {
                let battery = Percent(level);
                let result = forecaster.project(battery, start);
                assert_eq!(result, forecaster.project(battery, start));
                assert!(result.remaining_trip_count() <= 2 * policy.max_weekdays as usize);
                assert_eq!(result.is_critical(), battery < policy.low_battery_threshold);
                if let Some(first) = result.trip_log().first() {
                    assert_eq!(first.battery_before(), battery);
                }
                for event in result.trip_log() {
                    assert!(!matches!(event.occurs_on().weekday(), Weekday::Sat | Weekday::Sun));
                    assert_eq!(policy.day_kind(event.occurs_on()), DayKind::Weekday);
                    assert_eq!(event.battery_before().0 - event.battery_after().0, 13);
                    assert_eq!(
                        event.is_low_battery(),
                        event.battery_after() < policy.low_battery_threshold,
                    );
                }
                for (previous, next) in result.trip_log().iter().tuple_windows() {
                    assert_eq!(next.battery_before(), previous.battery_after());
                    assert!(next.occurs_on() >= previous.occurs_on());
                }
            }
        }
    }
}
