//! Data-quality classifier: fixed rule set over one record
//!
//! Classification is pure and per-record: it never consults other records
//! or external state. Deduplication by natural key is not a classifier
//! concern, it happens at merge time via the upsert.

use crate::record::{ClassifiedRecord, NormalizedRecord};

/// Reason attached when the natural key is missing
pub const REASON_MISSING_TRANSACTION_ID: &str = "missing transaction_id";
/// Reason attached when the customer reference is missing
pub const REASON_MISSING_CUSTOMER_ID: &str = "missing customer_id";
/// Reason attached when the unit price is missing
pub const REASON_MISSING_PRICE: &str = "missing price";
/// Reason attached when the quantity is zero or negative
pub const REASON_INVALID_QUANTITY: &str = "invalid quantity";
/// Reason attached when the discount falls outside [0, 1]
pub const REASON_INVALID_DISCOUNT: &str = "invalid discount";

/// Apply field defaults ahead of classification.
///
/// A missing discount means "no discount", so it is defaulted to 0 rather
/// than flagged. Defaulting is a distinct step and must run before
/// [`classify`].
pub fn apply_defaults(record: &mut NormalizedRecord) {
    if record.discount.is_none() {
        record.discount = Some(0.0);
    }
}

/// Classify one record against the rule set.
///
/// Rules are independent and evaluated in a fixed order; a record can
/// accumulate several reasons.
pub fn classify(record: NormalizedRecord) -> ClassifiedRecord {
    let mut reasons = Vec::new();

    if record.transaction_id.is_none() {
        reasons.push(REASON_MISSING_TRANSACTION_ID.to_string());
    }
    if record.customer_id.is_none() {
        reasons.push(REASON_MISSING_CUSTOMER_ID.to_string());
    }
    if record.price.is_none() {
        reasons.push(REASON_MISSING_PRICE.to_string());
    }
    if matches!(record.quantity, Some(q) if q <= 0) {
        reasons.push(REASON_INVALID_QUANTITY.to_string());
    }
    if matches!(record.discount, Some(d) if !(0.0..=1.0).contains(&d)) {
        reasons.push(REASON_INVALID_DISCOUNT.to_string());
    }

    ClassifiedRecord { record, reasons }
}

/// Default, classify, and split a batch into (valid, invalid), preserving
/// input order within each partition.
pub fn partition(records: Vec<NormalizedRecord>) -> (Vec<ClassifiedRecord>, Vec<ClassifiedRecord>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for mut record in records {
        apply_defaults(&mut record);
        let classified = classify(record);
        if classified.is_valid() {
            valid.push(classified);
        } else {
            invalid.push(classified);
        }
    }

    log::info!(
        "Classified records: {} valid, {} invalid",
        valid.len(),
        invalid.len()
    );

    (valid, invalid)
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
