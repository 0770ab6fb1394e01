//! Free-text charging advice from a language model.
//!
//! The advice never fails: missing credentials, service errors, and empty answers
//! all turn into fixed fallback messages.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use bon::Builder;
use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;

use crate::{
    core::{forecast::ForecastResult, policy::CommutePolicy},
    prelude::*,
    quantity::Percent,
};

pub const NO_CREDENTIALS: &str = "No API key configured, unable to fetch AI advice.";
pub const SERVICE_ERROR: &str =
    "Advice is unavailable right now. To be safe, please charge as soon as you can.";
pub const EMPTY_ADVICE: &str = "Charge whenever you can and stay topped up!";

/// Text generation backend.
#[async_trait]
pub trait Generate: Send + Sync {
    /// Generate a completion for the prompt, `None` if the model returned nothing.
    async fn generate(&self, prompt: &str) -> Result<Option<String>>;
}

pub struct Advisor<G> {
    /// `None` when no credentials are configured.
    generator: Option<G>,

    language: String,
}

impl<G: Generate> Advisor<G> {
    pub const fn new(generator: Option<G>, language: String) -> Self {
        Self { generator, language }
    }

    #[instrument(skip_all, fields(battery = %battery))]
    pub async fn advise(
        &self,
        battery: Percent,
        forecast: &ForecastResult,
        policy: &CommutePolicy,
        today: NaiveDate,
    ) -> String {
        let Some(generator) = &self.generator else {
            warn!("no API key configured");
            return NO_CREDENTIALS.to_owned();
        };
        let prompt = Prompt::builder()
            .battery(battery)
            .forecast(forecast)
            .policy(policy)
            .today(today)
            .language(&self.language)
            .build()
            .to_string();
        debug!(%prompt, "asking for advice…");
        match generator.generate(&prompt).await {
            Ok(Some(advice)) => advice.trim().to_owned(),
            Ok(None) => {
                warn!("the model returned no text");
                EMPTY_ADVICE.to_owned()
            }
            Err(error) => {
                error!("failed to fetch the advice: {error:#}");
                SERVICE_ERROR.to_owned()
            }
        }
    }
}

#[derive(Builder)]
struct Prompt<'a> {
    battery: Percent,
    forecast: &'a ForecastResult,
    policy: &'a CommutePolicy,
    today: NaiveDate,
    language: &'a str,
}

impl Display for Prompt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let riding_days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|weekday| !(self.policy.is_rest_day)(*weekday))
        .join(", ");

        writeln!(f, "Context:")?;
        writeln!(f, "- The user rides an e-bike 9 km to school and back home.")?;
        writeln!(
            f,
            "- Consumption: {} per trip, {} trips per day.",
            self.policy.trip_cost,
            self.policy.trips_per_day.len(),
        )?;
        writeln!(f, "- Current battery: {}.", self.battery)?;
        writeln!(f, "- Remaining trips possible: {}.", self.forecast.remaining_trip_count())?;
        match self.forecast.last_sustainable_date() {
            Some(date) => writeln!(
                f,
                "- The battery will run out around {date} ({}, {} days from today).",
                date.weekday(),
                (date - self.today).num_days(),
            )?,
            None => writeln!(f, "- The battery cannot sustain even a single trip.")?,
        }
        writeln!(f, "- The user rides on {riding_days}.")?;
        writeln!(f, "- Today is {}, {}.", self.today.weekday(), self.today)?;
        writeln!(f)?;
        writeln!(f, "Task:")?;
        writeln!(
            f,
            "Give a short and friendly charging tip in {}, at most 2 sentences.",
            self.language,
        )?;
        writeln!(
            f,
            "If the battery is very low (below {}), make the tone urgent.",
            self.policy.low_battery_threshold,
        )?;
        writeln!(f, "If it is Friday and the charge lasts until Monday, mention that.")?;
        write!(f, "Use emoji.")
    }
}
