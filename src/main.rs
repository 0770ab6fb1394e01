#![allow(clippy::doc_markdown)]

mod advisory;
mod api;
mod cli;
mod core;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, advise, forecast},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Forecast(args) => forecast(&args)?,
        Command::Advise(args) => advise(&args).await?,
    }

    info!("done!");
    Ok(())
}
