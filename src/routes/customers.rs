// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Customer routes: list/search, create, update, delete, CSV export, and
//! adding a training for a customer.

use super::{csv_response, validate_id, SearchQuery};
use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerFields, NewTraining, TrainingForm};
use crate::services::csv_export::{to_csv, CUSTOMERS_FILENAME, CUSTOMER_COLUMNS};
use crate::services::filter_records;
use crate::services::validation::{parse_duration, validate_customer, validate_training};
use crate::time_utils::{format_utc_rfc3339, parse_training_date};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Customer routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/export.csv", get(export_customers))
        .route(
            "/api/customers/{id}",
            put(update_customer).delete(delete_customer),
        )
        .route("/api/customers/{id}/trainings", post(add_training))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CustomersResponse {
    pub customers: Vec<Customer>,
    /// Number of customers before filtering
    pub total: u32,
}

/// List customers, optionally filtered by `q`.
async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<CustomersResponse>> {
    tracing::debug!(query = %params.q, "Fetching customers");

    let all = state.trainer_api.list_customers().await?;
    let total = all.len() as u32;
    let customers = filter_records(all, &params.q);

    Ok(Json(CustomersResponse { customers, total }))
}

/// Download the (filtered) customer list as `customers.csv`.
async fn export_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response> {
    let customers = filter_records(state.trainer_api.list_customers().await?, &params.q);
    tracing::info!(rows = customers.len(), "Exporting customers CSV");

    let body = to_csv(&customers, CUSTOMER_COLUMNS)?;
    Ok(csv_response(CUSTOMERS_FILENAME, body))
}

// ─── Create / Update / Delete ────────────────────────────────

/// Validate and create a customer.
async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<CustomerFields>,
) -> Result<(StatusCode, Json<Customer>)> {
    let fields = fields.trimmed();
    let errors = validate_customer(&fields);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let _guard = state.inflight.begin(format!(
        "create-customer:{}",
        fields.email.to_lowercase()
    ))?;

    let customer = state.trainer_api.create_customer(&fields).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Validate and fully replace a customer's fields.
async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<CustomerFields>,
) -> Result<StatusCode> {
    validate_id(&id)?;

    let fields = fields.trimmed();
    let errors = validate_customer(&fields);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let _guard = state.inflight.begin(format!("update-customer:{}", id))?;
    state.trainer_api.update_customer(&id, &fields).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a customer.
async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    validate_id(&id)?;
    tracing::info!(customer_id = %id, "Deleting customer");

    let _guard = state.inflight.begin(format!("delete-customer:{}", id))?;
    state.trainer_api.delete_customer(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ─── Add Training ────────────────────────────────────────────

/// Validate the "add training" form and create the training for customer `id`.
async fn add_training(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<TrainingForm>,
) -> Result<(StatusCode, Json<NewTraining>)> {
    validate_id(&id)?;

    let validity = validate_training(&form);
    if !validity.can_save() {
        return Err(AppError::Validation(validity.field_errors()));
    }

    let new_training = build_new_training(&form, String::new())?;
    let _guard = state.inflight.begin(format!("add-training:{}", id))?;

    let customer = state.trainer_api.get_customer(&id).await?;
    let customer_url = customer
        .links
        .self_href
        .ok_or_else(|| AppError::NotFound(format!("Link for customer {}", id)))?;

    let new_training = NewTraining {
        customer: customer_url,
        ..new_training
    };
    state.trainer_api.add_training(&new_training).await?;

    Ok((StatusCode::CREATED, Json(new_training)))
}

/// Turn a validated form into the trainer API payload.
///
/// Minutes are rounded to a whole number, never below 1.
fn build_new_training(form: &TrainingForm, customer_url: String) -> Result<NewTraining> {
    let invalid = || AppError::BadRequest("Training form is not valid".to_string());

    let date = form
        .date
        .as_deref()
        .and_then(parse_training_date)
        .ok_or_else(invalid)?;
    let minutes = parse_duration(&form.duration).ok_or_else(invalid)?;

    Ok(NewTraining {
        date: format_utc_rfc3339(date),
        activity: form.activity.trim().to_string(),
        duration: minutes.round().clamp(1.0, u32::MAX as f64) as u32,
        customer: customer_url,
    })
}
