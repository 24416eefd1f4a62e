use anyhow::Result;
use owo_colors::OwoColorize;

use super::CliContext;
use crate::render::Render;

pub fn run(ctx: &CliContext, limit: Option<usize>) -> Result<()> {
    for line in lines(ctx, limit)? {
        println!("{}", line);
    }
    Ok(())
}

/// Recorded periods, most recent first, at most `limit` of them.
fn lines(ctx: &CliContext, limit: Option<usize>) -> Result<Vec<String>> {
    let records = ctx.tracker.records(&ctx.identity)?;

    if records.is_empty() {
        return Ok(vec![
            "No periods recorded yet.".dimmed().to_string(),
            "Record one with: cycledir log YYYY-MM-DD".to_string(),
        ]);
    }

    Ok(records
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|record| record.render())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn empty_store_prompts_to_log() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let lines = lines(&ctx, None).unwrap();
        assert!(lines[0].contains("No periods recorded yet."));
        assert!(lines[1].contains("cycledir log"));
    }

    #[test]
    fn limit_keeps_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        for date in ["2024-01-20", "2024-03-16", "2024-02-17"] {
            crate::commands::log::run(&ctx, date).unwrap();
        }

        let all = lines(&ctx, None).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[0].contains("2024-03-16"));
        assert!(all[2].contains("2024-01-20"));

        let one = lines(&ctx, Some(1)).unwrap();
        assert_eq!(one.len(), 1);
        assert!(one[0].contains("2024-03-16"));

        assert!(lines(&ctx, Some(0)).unwrap().is_empty());
    }
}
