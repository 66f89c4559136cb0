//! Record normalizer: raw JSON documents to flat [`NormalizedRecord`]s
//!
//! Normalization is total: a malformed document or field never raises, it
//! degrades to `None` and is rejected later by the classifier with an
//! explicit reason.

use crate::record::NormalizedRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Date encodings accepted from the source, tried in order.
///
/// Date-only formats parse to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%SZ",
    "%d-%m-%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
];

static CUSTOMER_ID_RE: OnceLock<Regex> = OnceLock::new();

fn customer_id_regex() -> &'static Regex {
    CUSTOMER_ID_RE.get_or_init(|| Regex::new(r"C[0-9]+").expect("valid regex"))
}

/// Normalize a batch of raw documents, in input order.
///
/// One ingestion timestamp is captured for the whole batch, so timestamps
/// are monotonically non-decreasing across a run without being unique.
pub fn normalize_batch(docs: &[Value]) -> Vec<NormalizedRecord> {
    let ingested_at = Utc::now();
    docs.iter()
        .map(|doc| normalize_one(doc, ingested_at))
        .collect()
}

/// Normalize a single raw document.
///
/// A document that is not an object yields an all-null record.
pub fn normalize_one(doc: &Value, ingested_at: DateTime<Utc>) -> NormalizedRecord {
    let obj = match doc.as_object() {
        Some(obj) => obj,
        None => {
            log::warn!("Skipping field extraction for non-object document");
            return NormalizedRecord::empty(ingested_at);
        }
    };

    let product = obj.get("product").and_then(Value::as_object);

    NormalizedRecord {
        transaction_id: get_string(doc, "transaction_id"),
        customer_id: get_string(doc, "customer_id").and_then(|raw| extract_customer_id(&raw)),
        product_id: product.and_then(|p| p.get("id")).and_then(value_to_string),
        product_name: product.and_then(|p| p.get("name")).and_then(value_to_string),
        category: product
            .and_then(|p| p.get("category"))
            .and_then(value_to_string),
        price: product.and_then(|p| p.get("price")).and_then(Value::as_f64),
        quantity: obj.get("quantity").and_then(Value::as_i64),
        discount: obj.get("discount").and_then(Value::as_f64),
        sale_date: obj
            .get("date")
            .and_then(Value::as_str)
            .and_then(parse_date_safe),
        region: get_string(doc, "region"),
        ingested_at,
    }
}

/// Safely parse a date string by trying each supported format in order.
///
/// Returns `None` for empty or unparseable input, never an error.
pub fn parse_date_safe(date_str: &str) -> Option<NaiveDateTime> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Canonicalize a raw customer reference to its `C<digits>` token.
///
/// The source system pads and suffixes customer ids inconsistently; the
/// first `C[0-9]+` match is the stable reference. No match means the
/// reference is unusable.
pub fn extract_customer_id(raw: &str) -> Option<String> {
    customer_id_regex()
        .find(raw.trim())
        .map(|m| m.as_str().to_string())
}

fn get_string(doc: &Value, key: &str) -> Option<String> {
    doc.get(key).and_then(value_to_string)
}

/// Read a scalar as a string, tolerating numeric ids in the source.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
