use clap::Parser;

use crate::{
    cli::{forecast::render, gemini::GeminiArgs, projection::ProjectionArgs},
    prelude::*,
};

#[derive(Parser)]
pub struct AdviseArgs {
    #[clap(flatten)]
    pub projection: ProjectionArgs,

    #[clap(flatten)]
    pub gemini: GeminiArgs,
}

#[instrument(skip_all)]
pub async fn advise(args: &AdviseArgs) -> Result {
    let projection = args.projection.project()?;
    render(args.projection.battery, &projection);

    let advice = args
        .gemini
        .try_new_advisor()?
        .advise(
            args.projection.battery,
            &projection.forecast,
            projection.forecaster.policy(),
            projection.start_date,
        )
        .await;
    println!("✨ {advice}");
    Ok(())
}
