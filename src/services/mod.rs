// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregation;
pub mod calendar;
pub mod csv_export;
pub mod filter;
pub mod inflight;
pub mod trainer_api;
pub mod validation;

pub use filter::{filter_records, Searchable};
pub use inflight::{ActionGuard, InFlight};
pub use trainer_api::TrainerApiClient;
