use anyhow::Result;
use owo_colors::OwoColorize;

use super::CliContext;

pub fn run(ctx: &CliContext, date: &str) -> Result<()> {
    ctx.tracker.remove_period(&ctx.identity, date)?;
    println!("{} {}", "Removed".yellow(), date.trim());
    Ok(())
}
