//! Terminal rendering for cycledir types.

use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use cycledir_core::{Countdown, CycleSettings, DayKind, PeriodRecord, Prediction};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

pub fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// "Sat 20 Jan 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%a %-d %b %Y").to_string()
}

fn pluralize(word: &str, count: i64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

impl Render for PeriodRecord {
    fn render(&self) -> String {
        format!("{} {}", ymd(self.date).red(), long_date(self.date).dimmed())
    }
}

impl Render for CycleSettings {
    fn render(&self) -> String {
        format!(
            "Cycle length:  {} {}\nPeriod length: {} {}",
            self.cycle_length.bold(),
            pluralize("day", self.cycle_length),
            self.period_length.bold(),
            pluralize("day", self.period_length),
        )
    }
}

impl Render for Prediction {
    fn render(&self) -> String {
        let rows = [
            ("Next period", self.next_period_start, Some(self.next_period_end)),
            ("Ovulation", self.ovulation_day, None),
            (
                "Fertile window",
                self.fertile_window_start,
                Some(self.fertile_window_end),
            ),
        ];

        rows.iter()
            .map(|(label, start, end)| {
                let range = match end {
                    Some(end) if end != start => format!("{} → {}", long_date(*start), long_date(*end)),
                    _ => long_date(*start),
                };
                format!("{:<15} {}", label, range)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for Countdown {
    fn render(&self) -> String {
        match self {
            Countdown::Upcoming { days } => format!(
                "Next period in {} {}",
                days.bold(),
                pluralize("day", *days)
            ),
            Countdown::Today => "Next period expected today".bold().to_string(),
            Countdown::Overdue { days } => format!(
                "Period is {} {} late",
                days.yellow().bold(),
                pluralize("day", *days)
            ),
        }
    }
}

impl Render for (u32, DayKind) {
    fn render(&self) -> String {
        let (day, kind) = self;
        let text = format!("{:>2}", day);
        match kind {
            DayKind::RecordedPeriod => text.white().on_red().to_string(),
            DayKind::PredictedPeriod => text.red().to_string(),
            DayKind::Ovulation => text.blue().bold().to_string(),
            DayKind::Fertile => text.green().to_string(),
            DayKind::Ordinary => text,
        }
    }
}

/// Month grid, weeks starting on Monday, followed by a legend.
pub fn render_month(days: &[(NaiveDate, DayKind)]) -> String {
    let Some((first, _)) = days.first() else {
        return String::new();
    };

    let mut lines = vec![
        first.format("%B %Y").to_string().bold().to_string(),
        "Mo Tu We Th Fr Sa Su".dimmed().to_string(),
    ];

    let mut cells: Vec<String> = (0..first.weekday().num_days_from_monday())
        .map(|_| "  ".to_string())
        .collect();
    cells.extend(days.iter().map(|(date, kind)| (date.day(), *kind).render()));

    lines.extend(cells.chunks(7).map(|week| week.join(" ")));

    lines.push(String::new());
    lines.push(format!(
        "{} recorded  {} predicted  {} fertile  {} ovulation",
        "■".red(),
        "■".red().dimmed(),
        "■".green(),
        "■".blue()
    ));

    lines.join("\n")
}
