use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};

use cycledir_core::markers::month_markers;

use super::CliContext;
use crate::render::render_month;

/// Parse `YYYY-MM`.
fn parse_month(s: &str) -> Result<(i32, u32)> {
    let s = s.trim();
    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());

    let parsed = s.split_once('-').and_then(|(y, m)| {
        if !digits(y, 4) || !digits(m, 2) {
            return None;
        }
        let year = y.parse::<i32>().ok()?;
        let month = m.parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| (year, month))
    });

    match parsed {
        Some(ym) => Ok(ym),
        None => bail!("Invalid month '{}'. Expected YYYY-MM", s),
    }
}

pub fn run(ctx: &CliContext, month: Option<&str>, today: NaiveDate) -> Result<()> {
    println!("{}", month_view(ctx, month, today)?);
    Ok(())
}

fn month_view(ctx: &CliContext, month: Option<&str>, today: NaiveDate) -> Result<String> {
    let (year, month) = match month {
        Some(m) => parse_month(m)?,
        None => (today.year(), today.month()),
    };

    let overview = ctx.tracker.overview(&ctx.identity, today)?;
    let Some(days) = month_markers(
        year,
        month,
        &overview.records,
        &overview.settings,
        overview.prediction.as_ref(),
    ) else {
        bail!("Invalid month {}-{:02}", year, month);
    };

    Ok(render_month(&days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::render::Render;
    use cycledir_core::DayKind;

    #[test]
    fn parses_year_month() {
        assert_eq!(parse_month("2024-02").unwrap(), (2024, 2));
        assert_eq!(parse_month(" 2023-12 ").unwrap(), (2023, 12));
    }

    #[test]
    fn rejects_bad_months() {
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-2").is_err());
        assert!(parse_month("2024-+2").is_err());
        assert!(parse_month("+024-02").is_err());
        assert!(parse_month("February").is_err());
        assert!(parse_month("2024-02-01").is_err());
    }

    #[test]
    fn renders_requested_month() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        crate::commands::log::run(&ctx, "2024-01-20").unwrap();

        let feb = month_view(&ctx, Some("2024-02"), today).unwrap();
        let lines: Vec<&str> = feb.lines().collect();
        assert!(lines[0].contains("February 2024"));
        assert!(lines[1].contains("Mo Tu We Th Fr Sa Su"));
        // Feb 1 2024 is a Thursday.
        assert!(lines[2].starts_with("         "));
        assert!(lines[2].contains(" 1"));
        // 29 days over five week rows, a blank line and the legend.
        assert_eq!(lines.len(), 2 + 5 + 2);
        assert!(lines.last().unwrap().contains("ovulation"));

        let current = month_view(&ctx, None, today).unwrap();
        assert!(current.lines().next().unwrap().contains("January 2024"));
    }

    #[test]
    fn marks_follow_the_prediction() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        crate::commands::log::run(&ctx, "2024-01-20").unwrap();

        let feb = month_view(&ctx, Some("2024-02"), today).unwrap();
        let ovulation = (3u32, DayKind::Ovulation);
        let predicted = (17u32, DayKind::PredictedPeriod);
        let fertile = (1u32, DayKind::Fertile);

        assert!(feb.contains(&ovulation.render()));
        assert!(feb.contains(&predicted.render()));
        assert!(feb.contains(&fertile.render()));
    }

    #[test]
    fn invalid_month_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();

        assert!(month_view(&ctx, Some("2024-00"), today).is_err());
    }
}
