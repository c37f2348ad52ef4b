// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calendar;
pub mod customer;
pub mod stats;
pub mod training;

pub use calendar::CalendarEvent;
pub use customer::{Customer, CustomerFields, CustomerLinks};
pub use stats::{ActivityMinutes, DailyMinutes, DateRange, StatsSummary};
pub use training::{CustomerRef, NewTraining, Training, TrainingForm, TrainingLinks};
