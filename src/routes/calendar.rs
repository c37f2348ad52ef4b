// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar feed route.

use crate::error::Result;
use crate::models::CalendarEvent;
use crate::services::calendar::build_events;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/calendar", get(get_calendar))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarResponse {
    pub events: Vec<CalendarEvent>,
}

/// Every training as a calendar event.
async fn get_calendar(State(state): State<Arc<AppState>>) -> Result<Json<CalendarResponse>> {
    let trainings = state.trainer_api.list_trainings().await?;
    let events = build_events(&trainings);
    tracing::debug!(events = events.len(), "Built calendar feed");

    Ok(Json(CalendarResponse { events }))
}
