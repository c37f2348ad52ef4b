// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Personal Trainer: admin API for a personal-training business
//!
//! This crate fronts the personal trainer REST service for the admin UI:
//! customer and training management, search, CSV export, a calendar feed
//! and training statistics.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{InFlight, TrainerApiClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub trainer_api: TrainerApiClient,
    pub inflight: InFlight,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let trainer_api = TrainerApiClient::new(config.trainer_api_url.clone());
        Self {
            config,
            trainer_api,
            inflight: InFlight::new(),
        }
    }
}
