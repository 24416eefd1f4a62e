//! Cycle prediction.
//!
//! Predictions are plain calendar arithmetic on `NaiveDate`: no instants and
//! no time zones are involved, so the predicted calendar days never shift
//! with the caller's UTC offset.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::settings::CycleSettings;

/// Days between ovulation and the start of the next period.
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Days of the fertile window before ovulation.
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;

/// Days of the fertile window after ovulation.
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// Predicted dates for the next cycle. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub next_period_start: NaiveDate,
    /// Inclusive: the last expected day of the period.
    pub next_period_end: NaiveDate,
    pub ovulation_day: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub cycle_length: i64,
}

impl Prediction {
    /// Inclusive `(start, end)` of the fertile window.
    pub fn fertile_window(&self) -> (NaiveDate, NaiveDate) {
        (self.fertile_window_start, self.fertile_window_end)
    }

    pub fn contains_fertile(&self, date: NaiveDate) -> bool {
        date >= self.fertile_window_start && date <= self.fertile_window_end
    }

    pub fn contains_period(&self, date: NaiveDate) -> bool {
        date >= self.next_period_start && date <= self.next_period_end
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is ignored; anything else that is not exactly
/// four-digit year, two-digit month and two-digit day yields `None`.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Predict the next cycle from the last recorded period start.
///
/// Returns `None` when the date is empty or not a valid `YYYY-MM-DD` date,
/// or when either setting is not positive. Absence of a prediction is an
/// expected state (no data yet), not an error.
pub fn predict(last_period_date: &str, settings: &CycleSettings) -> Option<Prediction> {
    let last = parse_calendar_date(last_period_date)?;
    predict_from(last, settings)
}

/// Same as [`predict`] on an already parsed date.
pub fn predict_from(last_period_date: NaiveDate, settings: &CycleSettings) -> Option<Prediction> {
    if !settings.is_valid() {
        return None;
    }

    let next_period_start = shift(last_period_date, settings.cycle_length)?;
    let next_period_end = shift(next_period_start, settings.period_length - 1)?;
    let ovulation_day = shift(next_period_start, -LUTEAL_PHASE_DAYS)?;
    let fertile_window_start = shift(ovulation_day, -FERTILE_DAYS_BEFORE_OVULATION)?;
    let fertile_window_end = shift(ovulation_day, FERTILE_DAYS_AFTER_OVULATION)?;

    Some(Prediction {
        next_period_start,
        next_period_end,
        ovulation_day,
        fertile_window_start,
        fertile_window_end,
        cycle_length: settings.cycle_length,
    })
}

/// Whole-day offset; `None` outside chrono's date range.
fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}
