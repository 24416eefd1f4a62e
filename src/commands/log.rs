use anyhow::Result;
use owo_colors::OwoColorize;

use super::CliContext;
use crate::render::Render;

pub fn run(ctx: &CliContext, date: &str) -> Result<()> {
    let record = ctx.tracker.log_period(&ctx.identity, date)?;
    println!("{} {}", "Recorded".green(), record.render());

    if let Some(prediction) = ctx.tracker.prediction(&ctx.identity)? {
        println!();
        println!("{}", prediction.render());
    }

    Ok(())
}
