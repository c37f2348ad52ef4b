// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training statistics aggregates for the dashboard.
//!
//! These are derived values, rebuilt from the training list on every request
//! and never updated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Total minutes for one activity label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityMinutes {
    pub activity: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub minutes: u64,
}

/// Total minutes for one calendar day ("YYYY-MM-DD", UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyMinutes {
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub minutes: u64,
}

/// Inclusive calendar-day range. An absent bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both ends inclusive, compared by calendar day.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }
}

/// Everything the statistics page needs for one date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsSummary {
    pub start: Option<String>,
    pub end: Option<String>,
    /// Minutes per activity, largest first
    pub activities: Vec<ActivityMinutes>,
    /// Minutes per day, oldest first
    pub daily: Vec<DailyMinutes>,
    /// First three entries of `activities`
    pub top_activities: Vec<ActivityMinutes>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_minutes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 31));
        assert!(range.contains(day(2024, 1, 1)));
        assert!(range.contains(day(2024, 1, 31)));
        assert!(!range.contains(day(2023, 12, 31)));
        assert!(!range.contains(day(2024, 2, 1)));
    }

    #[test]
    fn test_open_range_bounds() {
        let range = DateRange {
            start: None,
            end: Some(day(2024, 1, 31)),
        };
        assert!(range.contains(day(1999, 1, 1)));
        assert!(!range.contains(day(2024, 2, 1)));
        assert!(DateRange::default().contains(day(2100, 1, 1)));
    }
}
