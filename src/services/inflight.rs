// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Guard against repeating a mutating action while it is still pending.
//!
//! A second "delete customer 5" arriving before the first has finished is
//! rejected instead of being forwarded to the trainer API again.

use crate::error::AppError;
use dashmap::DashSet;
use std::sync::Arc;

/// Keys of actions currently in flight.
#[derive(Clone, Default)]
pub struct InFlight {
    pending: Arc<DashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as pending until the returned guard is dropped.
    ///
    /// Fails with `AppError::Conflict` when the same key is already pending.
    pub fn begin(&self, key: impl Into<String>) -> Result<ActionGuard, AppError> {
        let key = key.into();
        if !self.pending.insert(key.clone()) {
            tracing::warn!(action = %key, "Ignoring repeated action while one is pending");
            return Err(AppError::Conflict(key));
        }

        Ok(ActionGuard {
            pending: self.pending.clone(),
            key,
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains(key)
    }
}

/// Releases its action key on drop, whether the action succeeded or not.
pub struct ActionGuard {
    pending: Arc<DashSet<String>>,
    key: String,
}

impl Drop for ActionGuard {
    fn drop(&mut self) {
        self.pending.remove(&self.key);
    }
}
