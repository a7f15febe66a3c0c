use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Location, Photo};

/// Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub location_id: String,
    pub week_start_date: NaiveDate,
    pub target_visits: u32,
    pub actual_visits: u32,
    /// Not clamped: 4 visits against a goal of 2 is 200.
    pub completion_percentage: f64,
}

impl WeeklyProgress {
    /// Ratio in `[0, 1]` for progress bars.
    pub fn bar_ratio(&self) -> f64 {
        (self.completion_percentage / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoStats {
    pub today: usize,
    pub this_week: usize,
    pub this_month: usize,
}

/// Everything the journal holds, as written by `wayfarer export`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalExport {
    pub photos: Vec<Photo>,
    pub locations: Vec<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(pct: f64) -> WeeklyProgress {
        WeeklyProgress {
            location_id: "a".to_string(),
            week_start_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            target_visits: 2,
            actual_visits: 0,
            completion_percentage: pct,
        }
    }

    #[test]
    fn test_bar_ratio_clamps() {
        assert_eq!(progress(0.0).bar_ratio(), 0.0);
        assert_eq!(progress(50.0).bar_ratio(), 0.5);
        assert_eq!(progress(250.0).bar_ratio(), 1.0);
    }
}
