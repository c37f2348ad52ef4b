// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Customer model for the admin API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A customer as served to the admin UI.
///
/// Every string field is present; missing values from the trainer API are
/// normalized to `""` when the record is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Customer {
    /// Last path segment of the self link (server-assigned)
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub streetaddress: String,
    pub postcode: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub links: CustomerLinks,
}

/// HAL links carried by a customer record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CustomerLinks {
    /// Canonical URL of the customer; used as the reference when adding trainings
    pub self_href: Option<String>,
    pub customer: Option<String>,
    pub trainings: Option<String>,
}

impl Customer {
    /// Build a customer from its editable fields plus server-side identity.
    pub fn from_fields(id: String, fields: CustomerFields, links: CustomerLinks) -> Self {
        Self {
            id,
            firstname: fields.firstname,
            lastname: fields.lastname,
            streetaddress: fields.streetaddress,
            postcode: fields.postcode,
            city: fields.city,
            email: fields.email,
            phone: fields.phone,
            links,
        }
    }

    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_string()
    }
}

/// Editable customer fields.
///
/// This is both the form state submitted by the UI and the body sent to the
/// trainer API on create (POST) and full replace (PUT).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CustomerFields {
    pub firstname: String,
    pub lastname: String,
    pub streetaddress: String,
    pub postcode: String,
    pub city: String,
    pub email: String,
    pub phone: String,
}

impl CustomerFields {
    /// The same fields with surrounding whitespace removed.
    ///
    /// Forms are validated and sent upstream in this form, so what was
    /// checked is exactly what gets stored.
    pub fn trimmed(self) -> Self {
        let trim = |s: String| s.trim().to_string();
        Self {
            firstname: trim(self.firstname),
            lastname: trim(self.lastname),
            streetaddress: trim(self.streetaddress),
            postcode: trim(self.postcode),
            city: trim(self.city),
            email: trim(self.email),
            phone: trim(self.phone),
        }
    }
}

/// Longest record id accepted from callers.
pub const MAX_ID_LEN: usize = 64;

/// Ids are ASCII alphanumerics, `-` and `_`, so they never add path segments
/// or a query when placed in an upstream URL.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Extract the trailing path segment of a HAL link, e.g.
/// `https://host/api/customers/12` -> `12`.
pub fn id_from_href(href: &str) -> Option<String> {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .map(str::to_string)
}
