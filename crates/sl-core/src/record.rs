//! Record types shared across the pipeline stages

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flattened sales transaction as produced by the normalizer.
///
/// Every source-derived field is optional: the normalizer never rejects a
/// record, it maps anything unusable to `None` and defers the decision to
/// the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Natural key of the transaction
    pub transaction_id: Option<String>,

    /// Customer reference, canonicalized to the `C<digits>` form
    pub customer_id: Option<String>,

    /// Product reference, flattened from the nested `product` object
    pub product_id: Option<String>,

    /// Product display name
    pub product_name: Option<String>,

    /// Product category
    pub category: Option<String>,

    /// Unit price
    pub price: Option<f64>,

    /// Units sold
    pub quantity: Option<i64>,

    /// Discount fraction in [0, 1]
    pub discount: Option<f64>,

    /// Sale date, parsed from one of the supported encodings
    pub sale_date: Option<NaiveDateTime>,

    /// Sales region tag
    pub region: Option<String>,

    /// Ingestion timestamp assigned by the normalizer
    pub ingested_at: DateTime<Utc>,
}

impl NormalizedRecord {
    /// A record with every source field null, used for documents that
    /// could not be read as an object at all.
    pub fn empty(ingested_at: DateTime<Utc>) -> Self {
        Self {
            transaction_id: None,
            customer_id: None,
            product_id: None,
            product_name: None,
            category: None,
            price: None,
            quantity: None,
            discount: None,
            sale_date: None,
            region: None,
            ingested_at,
        }
    }
}

/// A normalized record plus the data-quality reasons it accumulated.
///
/// `reasons` is ordered by rule evaluation order; an empty list means the
/// record passed every rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// The underlying record
    pub record: NormalizedRecord,

    /// One entry per violated rule, in rule order
    pub reasons: Vec<String>,
}

impl ClassifiedRecord {
    /// A record is valid iff it accumulated zero reasons
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Reasons joined for the audit sink's `dq_errors` column
    pub fn dq_errors(&self) -> String {
        self.reasons.join("; ")
    }
}
