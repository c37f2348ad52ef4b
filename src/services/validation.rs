// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form checks run before anything is sent to the trainer API.

use crate::models::{CustomerFields, TrainingForm};
use crate::time_utils::parse_training_date;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> error message. Empty means the form is valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Check a customer form. Street address and postcode are free-form.
pub fn validate_customer(form: &CustomerFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let required = [
        ("firstname", &form.firstname, "First name is required"),
        ("lastname", &form.lastname, "Last name is required"),
        ("email", &form.email, "Email is required"),
        ("phone", &form.phone, "Phone is required"),
        ("city", &form.city, "City is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.insert(field.to_string(), message.to_string());
        }
    }

    if !errors.contains_key("email") && !is_email_shaped(form.email.trim()) {
        errors.insert("email".to_string(), "Email is not valid".to_string());
    }

    errors
}

/// `local@domain.tld`: one `@`, a dot inside the domain, no whitespace.
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Per-field verdict for the "add training" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainingValidity {
    pub activity_invalid: bool,
    pub duration_invalid: bool,
    pub date_invalid: bool,
}

impl TrainingValidity {
    /// Save is allowed only when no field is invalid.
    pub fn can_save(&self) -> bool {
        !(self.activity_invalid || self.duration_invalid || self.date_invalid)
    }

    /// Messages for the invalid fields, keyed like the form.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.activity_invalid {
            errors.insert("activity".to_string(), "Activity is required".to_string());
        }
        if self.duration_invalid {
            errors.insert(
                "duration".to_string(),
                "Duration must be a positive number of minutes".to_string(),
            );
        }
        if self.date_invalid {
            errors.insert("date".to_string(), "Date is not valid".to_string());
        }
        errors
    }
}

/// Check an "add training" form.
pub fn validate_training(form: &TrainingForm) -> TrainingValidity {
    TrainingValidity {
        activity_invalid: form.activity.trim().is_empty(),
        duration_invalid: parse_duration(&form.duration).is_none(),
        date_invalid: form
            .date
            .as_deref()
            .and_then(parse_training_date)
            .is_none(),
    }
}

/// Positive, finite number of minutes typed into the form.
pub fn parse_duration(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|minutes| minutes.is_finite() && *minutes > 0.0)
}
