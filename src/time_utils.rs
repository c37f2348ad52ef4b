// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.
//!
//! Calendar days are always taken in UTC so that range checks, daily buckets
//! and calendar events agree with each other.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a training date as delivered by the trainer API or typed into a form.
///
/// Accepts RFC 3339 instants, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as
/// UTC) and bare `YYYY-MM-DD` (midnight UTC). Anything else is `None`.
pub fn parse_training_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar day (UTC) of a training date, if it parses.
pub fn training_day(raw: &str) -> Option<NaiveDate> {
    parse_training_date(raw).map(|dt| dt.date_naive())
}

/// `YYYY-MM-DD` key for a calendar day.
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
