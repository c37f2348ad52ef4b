// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar feed built from the training list.

use crate::models::{CalendarEvent, Training};
use crate::time_utils::{format_utc_rfc3339, parse_training_date};
use chrono::Duration;

/// One event per training with a parseable date.
///
/// Events end `duration` minutes after they start; a negative duration is
/// treated as zero so an event never ends before it begins.
pub fn build_events(trainings: &[Training]) -> Vec<CalendarEvent> {
    trainings
        .iter()
        .filter_map(|t| {
            let start = parse_training_date(&t.date)?;
            let end = start + Duration::minutes(t.duration.max(0));
            Some(CalendarEvent {
                id: t.delete_ref().map(str::to_string),
                title: event_title(t),
                start: format_utc_rfc3339(start),
                end: format_utc_rfc3339(end),
            })
        })
        .collect()
}

fn event_title(training: &Training) -> String {
    let (firstname, lastname) = training
        .customer
        .as_ref()
        .map(|c| (c.firstname.as_str(), c.lastname.as_str()))
        .unwrap_or(("", ""));

    format!("{} — {} {}", training.activity, firstname, lastname)
        .trim()
        .to_string()
}
