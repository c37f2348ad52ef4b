// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Calendar event model.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One training rendered as a calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarEvent {
    /// Training id, or its self link when the id is unknown
    pub id: Option<String>,
    /// "<activity> — <firstname> <lastname>"
    pub title: String,
    /// RFC 3339, UTC
    pub start: String,
    /// `start` plus the training duration
    pub end: String,
}
