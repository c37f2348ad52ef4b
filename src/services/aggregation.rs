// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training statistics: minutes per activity and per day over a date range.
//!
//! Every aggregate is rebuilt from the full training list. A training counts
//! when its date parses and its UTC calendar day lies inside the range.
//! Trainings with unparseable dates are left out of every bucket.

use crate::models::{ActivityMinutes, DailyMinutes, DateRange, StatsSummary, Training};
use crate::time_utils::{day_key, training_day};
use std::collections::{BTreeMap, HashMap};

/// Label for trainings with an empty or missing activity.
pub const UNKNOWN_ACTIVITY: &str = "Unknown";

/// How many activities the summary cards show.
pub const TOP_ACTIVITY_COUNT: usize = 3;

/// Minutes a training contributes; negative durations count as 0.
fn minutes(training: &Training) -> u64 {
    u64::try_from(training.duration).unwrap_or(0)
}

fn activity_key(training: &Training) -> String {
    let trimmed = training.activity.trim();
    if trimmed.is_empty() {
        UNKNOWN_ACTIVITY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trainings inside `range`, paired with their calendar day.
fn in_range<'a>(
    records: &'a [Training],
    range: &'a DateRange,
) -> impl Iterator<Item = (chrono::NaiveDate, &'a Training)> + 'a {
    records.iter().filter_map(move |t| {
        training_day(&t.date)
            .filter(|day| range.contains(*day))
            .map(|day| (day, t))
    })
}

/// Total minutes per activity, largest first. Ties keep first-seen order.
pub fn aggregate_by_activity(records: &[Training], range: &DateRange) -> Vec<ActivityMinutes> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<ActivityMinutes> = Vec::new();

    for (_, training) in in_range(records, range) {
        let key = activity_key(training);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(ActivityMinutes {
                activity: key,
                minutes: 0,
            });
            buckets.len() - 1
        });
        buckets[slot].minutes = buckets[slot].minutes.saturating_add(minutes(training));
    }

    // sort_by is stable
    buckets.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    buckets
}

/// Total minutes per calendar day, oldest first.
pub fn aggregate_by_day(records: &[Training], range: &DateRange) -> Vec<DailyMinutes> {
    let mut by_day: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();

    for (day, training) in in_range(records, range) {
        let total = by_day.entry(day).or_insert(0);
        *total = total.saturating_add(minutes(training));
    }

    by_day
        .into_iter()
        .map(|(day, minutes)| DailyMinutes {
            date: day_key(day),
            minutes,
        })
        .collect()
}

/// The first `n` entries of an activity aggregation.
pub fn top_activities(aggregation: &[ActivityMinutes], n: usize) -> Vec<ActivityMinutes> {
    aggregation.iter().take(n).cloned().collect()
}

/// Build everything the statistics page shows for `range`.
pub fn summarize(records: &[Training], range: &DateRange) -> StatsSummary {
    let activities = aggregate_by_activity(records, range);
    let daily = aggregate_by_day(records, range);
    let top = top_activities(&activities, TOP_ACTIVITY_COUNT);
    let total_minutes = activities
        .iter()
        .fold(0u64, |acc, a| acc.saturating_add(a.minutes));

    StatsSummary {
        start: range.start.map(day_key),
        end: range.end.map(day_key),
        activities,
        daily,
        top_activities: top,
        total_minutes,
    }
}
