// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training session model for the admin API.

use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A training session as served to the admin UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Training {
    /// Server id, from the record itself or its self link
    pub id: Option<String>,
    /// Start time as delivered by the trainer API (ISO 8601)
    pub date: String,
    /// Free-text activity label
    pub activity: String,
    /// Duration in minutes; non-numeric upstream values become 0
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: i64,
    /// Embedded customer, if the trainer API supplied one
    pub customer: Option<CustomerRef>,
    pub links: TrainingLinks,
}

impl Training {
    /// "First Last" of the embedded customer, or `None` when there is none.
    pub fn customer_name(&self) -> Option<String> {
        self.customer.as_ref().map(|c| {
            format!("{} {}", c.firstname, c.lastname)
                .trim()
                .to_string()
        })
    }

    /// Reference used to delete this training: its id, else its self link.
    pub fn delete_ref(&self) -> Option<&str> {
        self.id.as_deref().or(self.links.self_href.as_deref())
    }
}

/// Customer data embedded in a training record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CustomerRef {
    pub id: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
}

/// HAL links carried by a training record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingLinks {
    pub self_href: Option<String>,
    pub training: Option<String>,
    pub customer: Option<String>,
}

/// Body of `POST /trainings` on the trainer API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTraining {
    /// RFC 3339 instant
    pub date: String,
    pub activity: String,
    pub duration: u32,
    /// Self URL of the customer the training belongs to
    pub customer: String,
}

/// Raw "add training" form as submitted by the UI.
///
/// `duration` is kept as the text the user typed so that validation can
/// reject blanks and non-numbers instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainingForm {
    pub date: Option<String>,
    pub activity: String,
    #[serde(deserialize_with = "string_or_number")]
    pub duration: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_form_accepts_numeric_duration() {
        let form: TrainingForm = serde_json::from_value(serde_json::json!({
            "date": "2024-01-05T10:00:00Z",
            "activity": "Running",
            "duration": 45
        }))
        .unwrap();
        assert_eq!(form.duration, "45");
    }

    #[test]
    fn test_training_form_defaults_missing_fields() {
        let form: TrainingForm = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(form, TrainingForm::default());

        let form: TrainingForm =
            serde_json::from_value(serde_json::json!({ "duration": null })).unwrap();
        assert_eq!(form.duration, "");
    }

    #[test]
    fn test_delete_ref_prefers_id() {
        let mut training = Training {
            id: Some("7".to_string()),
            date: String::new(),
            activity: String::new(),
            duration: 0,
            customer: None,
            links: TrainingLinks {
                self_href: Some("https://example.com/api/trainings/7".to_string()),
                ..Default::default()
            },
        };
        assert_eq!(training.delete_ref(), Some("7"));

        training.id = None;
        assert_eq!(
            training.delete_ref(),
            Some("https://example.com/api/trainings/7")
        );
        assert_eq!(training.customer_name(), None);
    }
}
