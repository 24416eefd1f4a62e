use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::CliContext;
use crate::render::{Render, long_date};

pub fn run(ctx: &CliContext, today: NaiveDate) -> Result<()> {
    for line in lines(ctx, today)? {
        println!("{}", line);
    }
    Ok(())
}

fn lines(ctx: &CliContext, today: NaiveDate) -> Result<Vec<String>> {
    let overview = ctx.tracker.overview(&ctx.identity, today)?;

    let (Some(prediction), Some(countdown)) = (overview.prediction, overview.countdown) else {
        return Ok(vec![
            "Welcome to cycledir!".bold().to_string(),
            "Record your last period start to get predictions:".to_string(),
            "  cycledir log YYYY-MM-DD".to_string(),
        ]);
    };

    let mut lines = vec![countdown.render()];

    if today == prediction.ovulation_day {
        lines.push("Estimated ovulation day".blue().to_string());
    } else if prediction.contains_fertile(today) {
        lines.push("In the fertile window".green().to_string());
    }

    if let Some(last) = overview.records.first() {
        lines.push(format!("Last period started {}", long_date(last.date).dimmed()));
    }

    lines.push(String::new());
    lines.extend(prediction.render().lines().map(str::to_string));

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn joined(ctx: &CliContext, today: &str) -> String {
        lines(ctx, date(today)).unwrap().join("\n")
    }

    #[test]
    fn welcome_before_first_record() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let out = joined(&ctx, "2024-02-03");
        assert!(out.contains("Welcome to cycledir!"));
        assert!(!out.contains("Next period"));
    }

    #[test]
    fn ovulation_day_is_called_out() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        crate::commands::log::run(&ctx, "2024-01-20").unwrap();

        let out = joined(&ctx, "2024-02-03");
        assert!(out.contains("Next period in"));
        assert!(out.contains("Estimated ovulation day"));
        assert!(!out.contains("In the fertile window"));
        assert!(out.contains("Last period started"));
        assert!(out.contains("Sat 20 Jan 2024"));
        assert!(out.contains("Sat 17 Feb 2024 → Wed 21 Feb 2024"));
    }

    #[test]
    fn fertile_window_and_ordinary_days() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        crate::commands::log::run(&ctx, "2024-01-20").unwrap();

        let fertile = joined(&ctx, "2024-01-30");
        assert!(fertile.contains("In the fertile window"));
        assert!(!fertile.contains("Estimated ovulation day"));

        let ordinary = joined(&ctx, "2024-02-10");
        assert!(!ordinary.contains("In the fertile window"));
        assert!(!ordinary.contains("Estimated ovulation day"));
    }

    #[test]
    fn overdue_period_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        crate::commands::log::run(&ctx, "2024-01-20").unwrap();

        assert!(joined(&ctx, "2024-02-20").contains("late"));
    }
}
