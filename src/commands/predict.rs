use anyhow::Result;
use owo_colors::OwoColorize;

use cycledir_core::record::latest_record;
use cycledir_core::{Prediction, predict, predict_from};

use super::CliContext;
use crate::render::Render;

/// Prediction from `from` (or the latest record) with optional setting overrides.
fn resolve(
    ctx: &CliContext,
    from: Option<&str>,
    cycle_length: Option<i64>,
    period_length: Option<i64>,
) -> Result<Option<Prediction>> {
    let settings = ctx
        .tracker
        .settings(&ctx.identity)?
        .with_overrides(cycle_length, period_length);

    if let Some(from) = from {
        return Ok(predict(from, &settings));
    }

    let records = ctx.tracker.records(&ctx.identity)?;
    Ok(latest_record(&records).and_then(|r| predict_from(r.date, &settings)))
}

pub fn run(
    ctx: &CliContext,
    from: Option<&str>,
    cycle_length: Option<i64>,
    period_length: Option<i64>,
    json: bool,
) -> Result<()> {
    let prediction = resolve(ctx, from, cycle_length, period_length)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    match prediction {
        Some(p) => println!("{}", p.render()),
        None => {
            println!("{}", "No prediction available yet.".dimmed());
            println!("Record a period start with: cycledir log YYYY-MM-DD");
        }
    }

    Ok(())
}
