// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error classification and upstream failure mapping.

mod common;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use common::*;
use personal_trainer::config::Config;
use personal_trainer::error::AppError;
use personal_trainer::routes::create_router;
use personal_trainer::services::TrainerApiClient;
use personal_trainer::AppState;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

#[test]
fn test_upstream_classification() {
    assert!(AppError::Network("refused".into()).is_upstream());
    assert!(AppError::HttpStatus {
        status: 500,
        body: String::new()
    }
    .is_upstream());
    assert!(AppError::Decode("eof".into()).is_upstream());

    assert!(!AppError::Validation(BTreeMap::new()).is_upstream());
    assert!(!AppError::BadRequest("x".into()).is_upstream());
    assert!(!AppError::Conflict("x".into()).is_upstream());
}

#[tokio::test]
async fn test_validation_error_response_lists_fields() {
    let mut fields = BTreeMap::new();
    fields.insert("email".to_string(), "Email is not valid".to_string());

    let response = AppError::Validation(fields).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_json(response).await;
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["fields"]["email"], "Email is not valid");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let response = AppError::Internal(anyhow::anyhow!("secret path /etc/x")).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_upstream_server_error_is_bad_gateway() {
    let fake = spawn_fake_api().await;
    fake.fail_with(500);
    let (app, _) = create_test_app(&fake);

    let response = app
        .oneshot(empty_request(Method::GET, "/api/customers"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert_eq!(body["error"], "upstream_status");
    assert_eq!(body["details"], "HTTP 500");
}

#[tokio::test]
async fn test_upstream_not_found_is_not_found() {
    let fake = spawn_fake_api().await;
    let (app, _) = create_test_app(&fake);

    let response = app
        .oneshot(empty_request(Method::DELETE, "/api/trainings/404"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_malformed_upstream_body_is_decode_error() {
    let fake = spawn_fake_api().await;
    fake.answer_garbage();
    let (app, _) = create_test_app(&fake);

    let response = app
        .oneshot(empty_request(Method::GET, "/api/trainings"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(response_json(response).await["error"], "upstream_decode");
}

#[tokio::test]
async fn test_client_surfaces_status_errors() {
    let fake = spawn_fake_api().await;
    fake.fail_with(503);
    let client = TrainerApiClient::new(fake.base_url.clone());

    let err = client.delete_customer("1").await.unwrap_err();
    assert!(err.is_upstream());
    assert!(matches!(err, AppError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = Config {
        trainer_api_url: format!("http://{}/api", addr),
        ..Config::test_default()
    };
    let app = create_router(Arc::new(AppState::new(config)));

    let response = app
        .oneshot(empty_request(Method::GET, "/api/trainings"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(response_json(response).await["error"], "network_error");
}
