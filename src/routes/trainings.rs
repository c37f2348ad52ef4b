// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training routes: list/search, delete, CSV export.

use super::{csv_response, validate_id, SearchQuery};
use crate::error::{AppError, Result};
use crate::models::Training;
use crate::services::csv_export::{to_csv, TRAININGS_FILENAME, TRAINING_COLUMNS};
use crate::services::filter_records;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Training routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/trainings",
            get(list_trainings).delete(delete_training_by_href),
        )
        .route("/api/trainings/export.csv", get(export_trainings))
        .route("/api/trainings/{id}", delete(delete_training))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingsResponse {
    pub trainings: Vec<Training>,
    /// Number of trainings before filtering
    pub total: u32,
}

/// List trainings, optionally filtered by `q`.
async fn list_trainings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<TrainingsResponse>> {
    tracing::debug!(query = %params.q, "Fetching trainings");

    let all = state.trainer_api.list_trainings().await?;
    let total = all.len() as u32;
    let trainings = filter_records(all, &params.q);

    Ok(Json(TrainingsResponse { trainings, total }))
}

/// Download the (filtered) training list as `trainings.csv`.
async fn export_trainings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response> {
    let trainings = filter_records(state.trainer_api.list_trainings().await?, &params.q);
    tracing::info!(rows = trainings.len(), "Exporting trainings CSV");

    let body = to_csv(&trainings, TRAINING_COLUMNS)?;
    Ok(csv_response(TRAININGS_FILENAME, body))
}

/// Delete a training by id.
async fn delete_training(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    validate_id(&id)?;
    delete_resolved_training(&state, &id).await
}

#[derive(Deserialize)]
struct DeleteByHrefQuery {
    href: Option<String>,
}

/// Delete a training by its self link (`?href=`).
async fn delete_training_by_href(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteByHrefQuery>,
) -> Result<StatusCode> {
    let href = params
        .href
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'href' parameter".to_string()))?;

    let id = state.trainer_api.training_id_from_ref(href.trim())?;
    tracing::debug!(href = %href, training_id = %id, "Resolved training link");

    delete_resolved_training(&state, &id).await
}

/// Both delete routes share one in-flight key per training id.
async fn delete_resolved_training(state: &AppState, id: &str) -> Result<StatusCode> {
    tracing::info!(training_id = %id, "Deleting training");

    let _guard = state.inflight.begin(format!("delete-training:{}", id))?;
    state.trainer_api.delete_training(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
