//! Calendar markers and countdown for front ends.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::prediction::Prediction;
use crate::record::PeriodRecord;
use crate::settings::CycleSettings;

/// Days from `today` until the next predicted period starts.
/// Negative when the period is overdue.
pub fn days_until(prediction: &Prediction, today: NaiveDate) -> i64 {
    (prediction.next_period_start - today).num_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Countdown {
    Upcoming { days: i64 },
    Today,
    Overdue { days: i64 },
}

impl Countdown {
    pub fn new(prediction: &Prediction, today: NaiveDate) -> Self {
        match days_until(prediction, today) {
            0 => Countdown::Today,
            d if d > 0 => Countdown::Upcoming { days: d },
            d => Countdown::Overdue { days: -d },
        }
    }
}

/// How a calendar day should be marked. Earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    RecordedPeriod,
    PredictedPeriod,
    Ovulation,
    Fertile,
    Ordinary,
}

fn is_recorded_period_day(date: NaiveDate, records: &[PeriodRecord], period_length: i64) -> bool {
    let span = period_length.max(1);
    records.iter().any(|r| {
        let offset = (date - r.date).num_days();
        (0..span).contains(&offset)
    })
}

pub fn classify_day(
    date: NaiveDate,
    records: &[PeriodRecord],
    settings: &CycleSettings,
    prediction: Option<&Prediction>,
) -> DayKind {
    if is_recorded_period_day(date, records, settings.period_length) {
        return DayKind::RecordedPeriod;
    }

    let Some(p) = prediction else {
        return DayKind::Ordinary;
    };

    if p.contains_period(date) {
        DayKind::PredictedPeriod
    } else if date == p.ovulation_day {
        DayKind::Ovulation
    } else if p.contains_fertile(date) {
        DayKind::Fertile
    } else {
        DayKind::Ordinary
    }
}

/// Markers for every day of `year`-`month`. `None` for an invalid month.
pub fn month_markers(
    year: i32,
    month: u32,
    records: &[PeriodRecord],
    settings: &CycleSettings,
    prediction: Option<&Prediction>,
) -> Option<Vec<(NaiveDate, DayKind)>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    Some(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|d| (d, classify_day(d, records, settings, prediction)))
            .collect(),
    )
}
