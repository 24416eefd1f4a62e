//! Recorded period start dates.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};
use crate::prediction::parse_calendar_date;

/// A recorded period start.
///
/// Records are identified by `date`; `timestamp` is the epoch-millisecond
/// instant of local midnight on that date and only drives ordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub date: NaiveDate,
    pub timestamp: i64,
}

impl PeriodRecord {
    pub fn new(date: NaiveDate) -> Self {
        PeriodRecord {
            date,
            timestamp: local_midnight_millis(date),
        }
    }

    /// Parse a `YYYY-MM-DD` string into a record.
    pub fn parse(s: &str) -> CycleResult<Self> {
        parse_calendar_date(s)
            .map(PeriodRecord::new)
            .ok_or_else(|| CycleError::InvalidDate(s.to_string()))
    }

    /// The `YYYY-MM-DD` key this record is stored under.
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl PartialEq for PeriodRecord {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for PeriodRecord {}

impl Hash for PeriodRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
    }
}

/// Epoch milliseconds of local midnight on `date`.
///
/// When midnight falls in a DST gap the first valid hour of the day is used;
/// UTC midnight is the last resort.
fn local_midnight_millis(date: NaiveDate) -> i64 {
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| {
            date.and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().timestamp_millis())
                .unwrap_or_default()
        })
}

fn most_recent_first(a: &PeriodRecord, b: &PeriodRecord) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| b.date.cmp(&a.date))
}

/// Sort records most-recent first (timestamp descending).
pub fn sort_records(records: &mut [PeriodRecord]) {
    records.sort_by(most_recent_first);
}

/// The most recent record, if any.
pub fn latest_record(records: &[PeriodRecord]) -> Option<&PeriodRecord> {
    records.iter().min_by(|a, b| most_recent_first(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn timestamp_is_local_midnight() {
        let record = PeriodRecord::new(date("2024-03-05"));
        let expected = Local
            .from_local_datetime(&date("2024-03-05").and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .timestamp_millis();
        assert_eq!(record.timestamp, expected);
    }

    #[test]
    fn identity_is_the_date() {
        let a = PeriodRecord {
            date: date("2024-03-05"),
            timestamp: 1,
        };
        let b = PeriodRecord {
            date: date("2024-03-05"),
            timestamp: 2,
        };
        assert_eq!(a, b);
        assert_ne!(a, PeriodRecord::new(date("2024-03-06")));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(PeriodRecord::parse("").is_err());
        assert!(PeriodRecord::parse("yesterday").is_err());
        assert!(PeriodRecord::parse("2024-02-30").is_err());
        assert_eq!(PeriodRecord::parse("2024-02-29").unwrap().key(), "2024-02-29");
    }

    #[test]
    fn sorts_most_recent_first() {
        let mut records = vec![
            PeriodRecord::new(date("2024-01-02")),
            PeriodRecord::new(date("2024-03-01")),
            PeriodRecord::new(date("2023-12-20")),
        ];
        sort_records(&mut records);
        let keys: Vec<_> = records.iter().map(|r| r.key()).collect();
        assert_eq!(keys, ["2024-03-01", "2024-01-02", "2023-12-20"]);
    }

    #[test]
    fn latest_follows_timestamp_order() {
        let records = vec![
            PeriodRecord::new(date("2024-01-02")),
            PeriodRecord::new(date("2024-03-01")),
        ];
        assert_eq!(latest_record(&records).unwrap().key(), "2024-03-01");
        assert!(latest_record(&[]).is_none());
    }

    #[test]
    fn serializes_date_as_string() {
        let record = PeriodRecord {
            date: date("2024-01-20"),
            timestamp: 1705708800000,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"date":"2024-01-20","timestamp":1705708800000}"#);
    }
}
