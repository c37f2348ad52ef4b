// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal trainer REST API client.
//!
//! Handles:
//! - Customer listing (HAL `_embedded` collection), create, update, delete
//! - Training listing, create and delete (by id or by self link)
//! - Normalizing loosely-typed records into the crate's models
//!
//! Every call is a single attempt. There is no retry, backoff or timeout
//! policy; a failure is returned to the action that triggered it.

use crate::error::{AppError, Result};
use crate::models::customer::{id_from_href, is_valid_id};
use crate::models::{
    Customer, CustomerFields, CustomerLinks, CustomerRef, NewTraining, Training, TrainingLinks,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Public trainer API used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str =
    "https://customer-rest-service-frontend-personaltrainer.2.rahtiapp.fi/api";

static FALLBACK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Trainer API client.
#[derive(Clone)]
pub struct TrainerApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl TrainerApiClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Customers ───────────────────────────────────────────────────────────

    /// `GET /customers`, unwrapping the HAL collection.
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let url = format!("{}/customers", self.base_url);
        let collection: CustomerCollection = self.get_json(&url).await?;

        let customers: Vec<Customer> = collection
            .embedded
            .map(|e| e.customers)
            .unwrap_or_default()
            .into_iter()
            .map(CustomerRecord::into_customer)
            .collect();

        tracing::debug!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }

    /// `GET /customers/{id}`.
    pub async fn get_customer(&self, id: &str) -> Result<Customer> {
        let url = format!("{}/customers/{}", self.base_url, id);
        let record: CustomerRecord = self.get_json(&url).await?;
        Ok(record.into_customer())
    }

    /// `POST /customers`, returning the record the server created.
    pub async fn create_customer(&self, fields: &CustomerFields) -> Result<Customer> {
        let url = format!("{}/customers", self.base_url);
        let request = self.http.post(&url).json(fields);
        let record: CustomerRecord = self.send_json(request, &url).await?;
        let customer = record.into_customer();

        tracing::info!(customer_id = %customer.id, name = %customer.full_name(), "Customer created");
        Ok(customer)
    }

    /// `PUT /customers/{id}` with the full field set.
    pub async fn update_customer(&self, id: &str, fields: &CustomerFields) -> Result<()> {
        let url = format!("{}/customers/{}", self.base_url, id);
        self.send(self.http.put(&url).json(fields), &url).await?;

        tracing::info!(customer_id = %id, "Customer updated");
        Ok(())
    }

    /// `DELETE /customers/{id}`.
    pub async fn delete_customer(&self, id: &str) -> Result<()> {
        let url = format!("{}/customers/{}", self.base_url, id);
        self.send(self.http.delete(&url), &url).await?;

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }

    // ─── Trainings ───────────────────────────────────────────────────────────

    /// `GET /gettrainings` (trainings with embedded customers).
    pub async fn list_trainings(&self) -> Result<Vec<Training>> {
        let url = format!("{}/gettrainings", self.base_url);
        let records: Vec<TrainingRecord> = self.get_json(&url).await?;

        let trainings: Vec<Training> = records
            .into_iter()
            .map(TrainingRecord::into_training)
            .collect();

        tracing::debug!(count = trainings.len(), "Fetched trainings");
        Ok(trainings)
    }

    /// `POST /trainings`.
    pub async fn add_training(&self, training: &NewTraining) -> Result<()> {
        let url = format!("{}/trainings", self.base_url);
        self.send(self.http.post(&url).json(training), &url).await?;

        tracing::info!(
            customer = %training.customer,
            activity = %training.activity,
            duration = training.duration,
            "Training added"
        );
        Ok(())
    }

    /// `DELETE /trainings/{id}`.
    pub async fn delete_training(&self, id: &str) -> Result<()> {
        let url = format!("{}/trainings/{}", self.base_url, id);
        self.send(self.http.delete(&url), &url).await?;

        tracing::info!(training_id = %id, "Training deleted");
        Ok(())
    }

    /// Resolve a training reference (a bare id or the training's self link)
    /// to its id.
    ///
    /// A link must be exactly `<api root>/trainings/<id>`. Links to other
    /// hosts, other resources or nested paths are rejected, so a training
    /// reference can never address anything but a training.
    pub fn training_id_from_ref(&self, id_or_href: &str) -> Result<String> {
        if is_valid_id(id_or_href) {
            return Ok(id_or_href.to_string());
        }

        let prefix = format!("{}/trainings/", self.base_url);
        id_or_href
            .strip_prefix(&prefix)
            .filter(|id| is_valid_id(id))
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::BadRequest("Not a training link of the trainer API".to_string())
            })
    }

    // ─── Transport ───────────────────────────────────────────────────────────

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send_json(self.http.get(url), url).await
    }

    /// Send a request and parse its JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T> {
        let response = self.send(request, url).await?;
        response.json().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Trainer API returned malformed JSON");
            AppError::Decode(e.to_string())
        })
    }

    /// Send a request once and reject non-2xx responses.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Trainer API request failed");
            AppError::Network(e.to_string())
        })?;

        self.check_response(response, url).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(
        &self,
        response: reqwest::Response,
        url: &str,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(url = %url, status, "Trainer API returned an error status");

        Err(AppError::HttpStatus { status, body })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire records
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /customers` response body.
#[derive(Debug, Deserialize)]
struct CustomerCollection {
    #[serde(rename = "_embedded", default)]
    embedded: Option<EmbeddedCustomers>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedCustomers {
    #[serde(default)]
    customers: Vec<CustomerRecord>,
}

/// Customer as the trainer API sends it; every field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CustomerRecord {
    firstname: Option<String>,
    lastname: Option<String>,
    streetaddress: Option<String>,
    postcode: Option<String>,
    city: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    #[serde(rename = "_links", alias = "links")]
    links: Option<HalLinks>,
}

impl CustomerRecord {
    fn into_customer(self) -> Customer {
        let links = self.links.unwrap_or_default();
        let self_href = links.self_link.map(|l| l.href);
        let id = self_href
            .as_deref()
            .and_then(id_from_href)
            .unwrap_or_else(fallback_id);

        let fields = CustomerFields {
            firstname: self.firstname.unwrap_or_default(),
            lastname: self.lastname.unwrap_or_default(),
            streetaddress: self.streetaddress.unwrap_or_default(),
            postcode: self.postcode.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
        };
        let links = CustomerLinks {
            self_href,
            customer: links.customer.map(|l| l.href),
            trainings: links.trainings.map(|l| l.href),
        };

        Customer::from_fields(id, fields, links)
    }
}

/// Training as the trainer API sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TrainingRecord {
    id: Option<serde_json::Value>,
    date: Option<String>,
    activity: Option<String>,
    duration: Option<serde_json::Value>,
    customer: Option<EmbeddedCustomer>,
    #[serde(rename = "_links", alias = "links")]
    links: Option<HalLinks>,
}

impl TrainingRecord {
    fn into_training(self) -> Training {
        let links = self.links.unwrap_or_default();
        let self_href = links.self_link.map(|l| l.href);
        let id = self
            .id
            .as_ref()
            .and_then(value_to_id)
            .or_else(|| self_href.as_deref().and_then(id_from_href));

        Training {
            id,
            date: self.date.unwrap_or_default(),
            activity: self.activity.unwrap_or_default(),
            duration: self.duration.as_ref().map(value_to_minutes).unwrap_or(0),
            customer: self.customer.map(EmbeddedCustomer::into_ref),
            links: TrainingLinks {
                self_href,
                training: links.training.map(|l| l.href),
                customer: links.customer.map(|l| l.href),
            },
        }
    }
}

/// Customer embedded in a training record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmbeddedCustomer {
    id: Option<serde_json::Value>,
    firstname: Option<String>,
    lastname: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl EmbeddedCustomer {
    fn into_ref(self) -> CustomerRef {
        CustomerRef {
            id: self.id.as_ref().and_then(value_to_id),
            firstname: self.firstname.unwrap_or_default(),
            lastname: self.lastname.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HalLinks {
    #[serde(rename = "self")]
    self_link: Option<HalLink>,
    customer: Option<HalLink>,
    trainings: Option<HalLink>,
    training: Option<HalLink>,
}

#[derive(Debug, Deserialize)]
struct HalLink {
    href: String,
}

fn value_to_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Minutes from a loosely-typed duration; anything non-numeric is 0.
fn value_to_minutes(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Temporary key for a record the server returned without a self link.
///
/// `<epoch millis>-<sequence>`; the sequence keeps keys distinct within one
/// millisecond.
fn fallback_id() -> String {
    let seq = FALLBACK_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), seq)
}
