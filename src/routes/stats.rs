// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training statistics routes.

use super::csv_response;
use crate::error::{AppError, Result};
use crate::models::{DateRange, StatsSummary};
use crate::services::aggregation::{aggregate_by_activity, summarize};
use crate::services::csv_export::{activity_export_filename, to_csv, ACTIVITY_COLUMNS};
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::{Months, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// Statistics routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/stats/export.csv", get(export_activity_minutes))
}

#[derive(Debug, Default, Deserialize)]
struct StatsQuery {
    /// First day (YYYY-MM-DD), default one month before `end`
    start: Option<String>,
    /// Last day (YYYY-MM-DD), default today
    end: Option<String>,
}

fn parse_day(raw: &str, name: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid '{}' parameter: must be YYYY-MM-DD", name))
    })
}

/// Resolve the requested range against `today`.
fn resolve_range(params: &StatsQuery, today: NaiveDate) -> Result<DateRange> {
    let end = match params.end.as_deref() {
        Some(raw) => parse_day(raw, "end")?,
        None => today,
    };
    let start = match params.start.as_deref() {
        Some(raw) => parse_day(raw, "start")?,
        None => end.checked_sub_months(Months::new(1)).unwrap_or(end),
    };

    if start > end {
        return Err(AppError::BadRequest(
            "'start' must not be after 'end'".to_string(),
        ));
    }

    Ok(DateRange::new(start, end))
}

/// Minutes per activity and per day for the requested range.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsSummary>> {
    let range = resolve_range(&params, Utc::now().date_naive())?;
    tracing::debug!(start = ?range.start, end = ?range.end, "Computing training stats");

    let trainings = state.trainer_api.list_trainings().await?;
    Ok(Json(summarize(&trainings, &range)))
}

/// Download the activity aggregation as `activity_minutes_<today>.csv`.
async fn export_activity_minutes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsQuery>,
) -> Result<Response> {
    let today = Utc::now().date_naive();
    let range = resolve_range(&params, today)?;

    let trainings = state.trainer_api.list_trainings().await?;
    let rows = aggregate_by_activity(&trainings, &range);
    tracing::info!(rows = rows.len(), "Exporting activity minutes CSV");

    let body = to_csv(&rows, ACTIVITY_COLUMNS)?;
    Ok(csv_response(&activity_export_filename(today), body))
}
