use anyhow::Result;
use owo_colors::OwoColorize;

use super::CliContext;
use crate::render::Render;

/// Show settings, or update them when either length is given.
pub fn run(ctx: &CliContext, cycle_length: Option<i64>, period_length: Option<i64>) -> Result<()> {
    let current = ctx.tracker.settings(&ctx.identity)?;

    if cycle_length.is_none() && period_length.is_none() {
        println!("{}", current.render());
        return Ok(());
    }

    let updated = ctx
        .tracker
        .update_settings(&ctx.identity, current.with_overrides(cycle_length, period_length))?;

    println!("{}", "Settings saved".green());
    println!("{}", updated.render());
    Ok(())
}
