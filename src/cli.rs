mod advise;
mod forecast;
mod gemini;
mod projection;

use clap::{Parser, Subcommand};

pub use self::{
    advise::{AdviseArgs, advise},
    forecast::{ForecastArgs, forecast},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project the remaining commutes and print the timeline.
    #[clap(name = "forecast")]
    Forecast(Box<ForecastArgs>),

    /// Project the remaining commutes and ask the language model for charging advice.
    #[clap(name = "advise")]
    Advise(Box<AdviseArgs>),
}
