// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export for spreadsheets.
//!
//! Format: an unquoted header line, then one line per row with every cell
//! quoted (embedded `"` doubled). Lines are joined with `\n` and the whole
//! text starts with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding.

use crate::error::{AppError, Result};
use crate::models::{ActivityMinutes, Customer, Training};
use chrono::NaiveDate;

/// UTF-8 byte-order mark.
pub const BOM: &str = "\u{FEFF}";

pub const CUSTOMER_COLUMNS: &[&str] = &[
    "firstname",
    "lastname",
    "email",
    "phone",
    "city",
    "streetaddress",
    "postcode",
];

pub const TRAINING_COLUMNS: &[&str] = &["date", "activity", "duration", "customer"];

pub const ACTIVITY_COLUMNS: &[&str] = &["activity", "minutes"];

pub const CUSTOMERS_FILENAME: &str = "customers.csv";
pub const TRAININGS_FILENAME: &str = "trainings.csv";

/// A row that can be written to CSV.
pub trait CsvRow {
    /// Value of the named column; `None` for unknown or missing columns.
    fn field(&self, column: &str) -> Option<String>;
}

impl CsvRow for Customer {
    fn field(&self, column: &str) -> Option<String> {
        let value = match column {
            "id" => &self.id,
            "firstname" => &self.firstname,
            "lastname" => &self.lastname,
            "streetaddress" => &self.streetaddress,
            "postcode" => &self.postcode,
            "city" => &self.city,
            "email" => &self.email,
            "phone" => &self.phone,
            _ => return None,
        };
        Some(value.clone())
    }
}

impl CsvRow for Training {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "id" => self.id.clone(),
            "date" => Some(self.date.clone()),
            "activity" => Some(self.activity.clone()),
            "duration" => Some(self.duration.to_string()),
            "customer" => self.customer_name(),
            _ => None,
        }
    }
}

impl CsvRow for ActivityMinutes {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "activity" => Some(self.activity.clone()),
            "minutes" => Some(self.minutes.to_string()),
            _ => None,
        }
    }
}

/// Serialize `rows` to BOM-prefixed CSV text with the given columns.
pub fn to_csv<R: CsvRow>(rows: &[R], columns: &[&str]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|column| row.field(column).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV flush failed: {}", e)))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV is not UTF-8: {}", e)))?;

    let mut out = String::with_capacity(BOM.len() + body.len() + 64);
    out.push_str(BOM);
    out.push_str(&columns.join(","));
    if !body.is_empty() {
        out.push('\n');
        // The writer terminates every record; lines are joined, not terminated.
        out.push_str(body.strip_suffix('\n').unwrap_or(&body));
    }
    Ok(out)
}

/// `activity_minutes_<YYYY-MM-DD>.csv`
pub fn activity_export_filename(today: NaiveDate) -> String {
    format!("activity_minutes_{}.csv", today.format("%Y-%m-%d"))
}
