// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Free-text search over customer and training lists.

use crate::models::{Customer, Training};

/// A record that can be matched by free-text search.
pub trait Searchable {
    /// Fields to search, in a fixed order. Missing fields are `""`.
    fn search_fields(&self) -> Vec<String>;

    /// Fields joined by single spaces and lower-cased.
    fn search_text(&self) -> String {
        self.search_fields().join(" ").to_lowercase()
    }
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.firstname.clone(),
            self.lastname.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.city.clone(),
            self.streetaddress.clone(),
            self.postcode.clone(),
        ]
    }
}

impl Searchable for Training {
    fn search_fields(&self) -> Vec<String> {
        let (firstname, lastname) = self
            .customer
            .as_ref()
            .map(|c| (c.firstname.clone(), c.lastname.clone()))
            .unwrap_or_default();

        vec![
            self.activity.clone(),
            self.date.clone(),
            self.duration.to_string(),
            firstname,
            lastname,
        ]
    }
}

/// Keep the records whose search text contains `query` (case-insensitive).
///
/// Output order equals input order. A blank query returns every record.
pub fn filter_records<T: Searchable>(records: Vec<T>, query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| record.search_text().contains(&needle))
        .collect()
}
