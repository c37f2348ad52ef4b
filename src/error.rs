// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::validation::FieldErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The trainer API could not be reached at all.
    #[error("Network error: {0}")]
    Network(String),

    /// The trainer API answered with a non-2xx status.
    #[error("Trainer API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Could not decode trainer API response: {0}")]
    Decode(String),

    /// Client-side form check failed; nothing was sent upstream.
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The same action is already in flight.
    #[error("Action already pending: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures that happened on the way to or from the trainer API.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::HttpStatus { .. } | AppError::Decode(_)
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, fields) = match self {
            AppError::Network(msg) => {
                tracing::error!(error = %msg, "Trainer API unreachable");
                (StatusCode::BAD_GATEWAY, "network_error", Some(msg), None)
            }
            AppError::HttpStatus { status: 404, body } => {
                (StatusCode::NOT_FOUND, "not_found", Some(body), None)
            }
            AppError::HttpStatus { status, body } => {
                tracing::error!(status, body = %body, "Trainer API returned an error status");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_status",
                    Some(format!("HTTP {}", status)),
                    None,
                )
            }
            AppError::Decode(msg) => {
                tracing::error!(error = %msg, "Trainer API response could not be decoded");
                (StatusCode::BAD_GATEWAY, "upstream_decode", None, None)
            }
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                None,
                Some(fields),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "action_pending", Some(msg), None),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
