// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process fake trainer API and request builders.

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use personal_trainer::config::Config;
use personal_trainer::routes::create_router;
use personal_trainer::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A training held by the fake API.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct FakeTraining {
    pub id: u64,
    pub date: String,
    pub activity: String,
    pub duration: Value,
    pub customer_id: Option<u64>,
}

#[derive(Default)]
struct FakeState {
    customers: Vec<(u64, Value)>,
    trainings: Vec<FakeTraining>,
    next_id: u64,
    requests: Vec<String>,
    fail_with: Option<u16>,
    garbage: bool,
    delete_delay: Option<Duration>,
}

/// Fake personal trainer REST API listening on an ephemeral port.
pub struct FakeApi {
    pub base_url: String,
    state: Mutex<FakeState>,
}

#[allow(dead_code)]
impl FakeApi {
    fn next_id(state: &mut FakeState) -> u64 {
        state.next_id += 1;
        state.next_id
    }

    /// Store a customer and return its id.
    pub fn add_customer(&self, fields: Value) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        state.customers.push((id, fields));
        id
    }

    /// Store a training and return its id.
    pub fn add_training(
        &self,
        date: &str,
        activity: &str,
        duration: Value,
        customer_id: Option<u64>,
    ) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        state.trainings.push(FakeTraining {
            id,
            date: date.to_string(),
            activity: activity.to_string(),
            duration,
            customer_id,
        });
        id
    }

    pub fn customer_href(&self, id: u64) -> String {
        format!("{}/customers/{}", self.base_url, id)
    }

    pub fn training_href(&self, id: u64) -> String {
        format!("{}/trainings/{}", self.base_url, id)
    }

    /// "METHOD /path" of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn customers(&self) -> Vec<(u64, Value)> {
        self.state.lock().unwrap().customers.clone()
    }

    pub fn trainings(&self) -> Vec<FakeTraining> {
        self.state.lock().unwrap().trainings.clone()
    }

    /// Answer every subsequent request with `status`.
    pub fn fail_with(&self, status: u16) {
        self.state.lock().unwrap().fail_with = Some(status);
    }

    /// Answer every subsequent request with a 200 that is not JSON.
    pub fn answer_garbage(&self) {
        self.state.lock().unwrap().garbage = true;
    }

    /// Hold DELETE requests for `delay` before answering.
    pub fn delay_deletes(&self, delay: Duration) {
        self.state.lock().unwrap().delete_delay = Some(delay);
    }

    fn customer_json(&self, id: u64, fields: &Value) -> Value {
        let href = self.customer_href(id);
        let mut record = fields.clone();
        record["_links"] = json!({
            "self": { "href": href },
            "customer": { "href": href },
            "trainings": { "href": format!("{}/trainings", href) }
        });
        record
    }
}

/// Start the fake trainer API on 127.0.0.1 and return a handle to it.
pub async fn spawn_fake_api() -> Arc<FakeApi> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake trainer API");
    let addr = listener.local_addr().unwrap();

    let fake = Arc::new(FakeApi {
        base_url: format!("http://{}/api", addr),
        state: Mutex::new(FakeState::default()),
    });

    let app = Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route(
            "/api/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/api/gettrainings", get(list_trainings))
        .route("/api/trainings", post(create_training))
        .route("/api/trainings/{id}", delete(delete_training))
        .layer(middleware::from_fn_with_state(fake.clone(), record_request))
        .with_state(fake.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    fake
}

/// Create the app under test, wired to `fake`.
#[allow(dead_code)]
pub fn create_test_app(fake: &FakeApi) -> (Router, Arc<AppState>) {
    let config = Config {
        trainer_api_url: fake.base_url.clone(),
        ..Config::test_default()
    };
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Alice in Helsinki and Bob in Espoo.
#[allow(dead_code)]
pub fn seed_customers(fake: &FakeApi) -> (u64, u64) {
    let alice = fake.add_customer(json!({
        "firstname": "Alice",
        "lastname": "Smith",
        "streetaddress": "1 Main",
        "postcode": "00100",
        "city": "Helsinki",
        "email": "alice@example.com",
        "phone": "123456"
    }));
    let bob = fake.add_customer(json!({
        "firstname": "Bob",
        "lastname": "Jones",
        "streetaddress": "2 Side",
        "postcode": "02100",
        "city": "Espoo",
        "email": "bob@example.com",
        "phone": "654321"
    }));
    (alice, bob)
}

#[allow(dead_code)]
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn response_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response was not JSON")
}

#[allow(dead_code)]
pub async fn response_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

// ─── Fake API handlers ───────────────────────────────────────

async fn record_request(State(fake): State<Arc<FakeApi>>, req: Request, next: Next) -> Response {
    let (fail_with, garbage, delay) = {
        let mut state = fake.state.lock().unwrap();
        state
            .requests
            .push(format!("{} {}", req.method(), req.uri().path()));
        (state.fail_with, state.garbage, state.delete_delay)
    };

    if let Some(status) = fail_with {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, "fake upstream failure").into_response();
    }

    if garbage {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }

    if req.method() == Method::DELETE {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    next.run(req).await
}

async fn list_customers(State(fake): State<Arc<FakeApi>>) -> Json<Value> {
    let customers: Vec<Value> = fake
        .customers()
        .iter()
        .map(|(id, fields)| fake.customer_json(*id, fields))
        .collect();
    Json(json!({ "_embedded": { "customers": customers } }))
}

async fn get_customer(State(fake): State<Arc<FakeApi>>, Path(id): Path<u64>) -> Response {
    match fake.customers().into_iter().find(|(cid, _)| *cid == id) {
        Some((id, fields)) => Json(fake.customer_json(id, &fields)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_customer(
    State(fake): State<Arc<FakeApi>>,
    Json(fields): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let id = fake.add_customer(fields.clone());
    (StatusCode::CREATED, Json(fake.customer_json(id, &fields)))
}

async fn update_customer(
    State(fake): State<Arc<FakeApi>>,
    Path(id): Path<u64>,
    Json(fields): Json<Value>,
) -> Response {
    let mut state = fake.state.lock().unwrap();
    match state.customers.iter_mut().find(|(cid, _)| *cid == id) {
        Some(entry) => {
            entry.1 = fields;
            StatusCode::OK.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_customer(State(fake): State<Arc<FakeApi>>, Path(id): Path<u64>) -> StatusCode {
    let mut state = fake.state.lock().unwrap();
    let before = state.customers.len();
    state.customers.retain(|(cid, _)| *cid != id);
    if state.customers.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn list_trainings(State(fake): State<Arc<FakeApi>>) -> Json<Value> {
    let customers = fake.customers();
    let trainings: Vec<Value> = fake
        .trainings()
        .iter()
        .map(|t| {
            let customer = t
                .customer_id
                .and_then(|cid| customers.iter().find(|(id, _)| *id == cid))
                .map(|(id, fields)| {
                    let mut embedded = fields.clone();
                    embedded["id"] = json!(id);
                    embedded
                })
                .unwrap_or(Value::Null);

            json!({
                "id": t.id,
                "date": t.date,
                "activity": t.activity,
                "duration": t.duration,
                "customer": customer
            })
        })
        .collect();
    Json(Value::Array(trainings))
}

async fn create_training(State(fake): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Response {
    let customer_id = body["customer"]
        .as_str()
        .and_then(|href| href.rsplit('/').next())
        .and_then(|id| id.parse::<u64>().ok())
        .filter(|id| fake.customers().iter().any(|(cid, _)| cid == id));

    let Some(customer_id) = customer_id else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    fake.add_training(
        body["date"].as_str().unwrap_or_default(),
        body["activity"].as_str().unwrap_or_default(),
        body["duration"].clone(),
        Some(customer_id),
    );
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn delete_training(State(fake): State<Arc<FakeApi>>, Path(id): Path<u64>) -> StatusCode {
    let mut state = fake.state.lock().unwrap();
    let before = state.trainings.len();
    state.trainings.retain(|t| t.id != id);
    if state.trainings.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
