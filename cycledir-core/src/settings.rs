//! Per-user cycle settings.

use serde::{Deserialize, Serialize};

use crate::error::{CycleError, CycleResult};

pub const DEFAULT_CYCLE_LENGTH: i64 = 28;
pub const DEFAULT_PERIOD_LENGTH: i64 = 5;

/// Cycle and period lengths in days.
///
/// Lengths are signed so that non-positive input can be represented and
/// rejected by `validate` (and declined by the predictor) instead of failing
/// to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSettings {
    #[serde(alias = "cycle_length")]
    pub cycle_length: i64,
    #[serde(alias = "period_length")]
    pub period_length: i64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        CycleSettings {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_length: DEFAULT_PERIOD_LENGTH,
        }
    }
}

impl CycleSettings {
    pub fn new(cycle_length: i64, period_length: i64) -> Self {
        CycleSettings {
            cycle_length,
            period_length,
        }
    }

    /// Both lengths strictly positive.
    pub fn is_valid(&self) -> bool {
        self.cycle_length > 0 && self.period_length > 0
    }

    pub fn validate(&self) -> CycleResult<()> {
        if self.cycle_length <= 0 {
            return Err(CycleError::InvalidSettings(format!(
                "cycle length must be positive, got {}",
                self.cycle_length
            )));
        }
        if self.period_length <= 0 {
            return Err(CycleError::InvalidSettings(format!(
                "period length must be positive, got {}",
                self.period_length
            )));
        }
        Ok(())
    }

    /// Apply optional overrides, keeping current values where none is given.
    pub fn with_overrides(&self, cycle_length: Option<i64>, period_length: Option<i64>) -> Self {
        CycleSettings {
            cycle_length: cycle_length.unwrap_or(self.cycle_length),
            period_length: period_length.unwrap_or(self.period_length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_28_and_5() {
        let s = CycleSettings::default();
        assert_eq!(s.cycle_length, 28);
        assert_eq!(s.period_length, 5);
        assert!(s.is_valid());
    }

    #[test]
    fn validate_rejects_non_positive() {
        assert!(CycleSettings::new(0, 5).validate().is_err());
        assert!(CycleSettings::new(28, 0).validate().is_err());
        assert!(CycleSettings::new(-3, 5).validate().is_err());
        assert!(CycleSettings::new(28, -1).validate().is_err());
        assert!(CycleSettings::new(1, 1).validate().is_ok());
    }

    #[test]
    fn json_uses_camel_case() {
        let json = serde_json::to_string(&CycleSettings::new(30, 4)).unwrap();
        assert_eq!(json, r#"{"cycleLength":30,"periodLength":4}"#);
    }

    #[test]
    fn snake_case_is_accepted() {
        let s: CycleSettings = toml::from_str("cycle_length = 31\nperiod_length = 6\n").unwrap();
        assert_eq!(s, CycleSettings::new(31, 6));
    }

    #[test]
    fn overrides_keep_unset_values() {
        let s = CycleSettings::new(30, 4).with_overrides(None, Some(7));
        assert_eq!(s, CycleSettings::new(30, 7));
    }
}
