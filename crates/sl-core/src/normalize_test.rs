use super::*;
use chrono::NaiveDate;
use serde_json::json;

fn ts() -> DateTime<Utc> {
    Utc::now()
}

#[test]
fn test_flattens_nested_product() {
    let doc = json!({
        "transaction_id": "T1001",
        "customer_id": "C42",
        "product": {
            "id": "P7",
            "name": "Espresso Machine",
            "category": "Kitchen",
            "price": 249.99
        },
        "quantity": 2,
        "discount": 0.15,
        "date": "2024-03-01",
        "region": "EMEA"
    });

    let rec = normalize_one(&doc, ts());
    assert_eq!(rec.transaction_id.as_deref(), Some("T1001"));
    assert_eq!(rec.customer_id.as_deref(), Some("C42"));
    assert_eq!(rec.product_id.as_deref(), Some("P7"));
    assert_eq!(rec.product_name.as_deref(), Some("Espresso Machine"));
    assert_eq!(rec.category.as_deref(), Some("Kitchen"));
    assert_eq!(rec.price, Some(249.99));
    assert_eq!(rec.quantity, Some(2));
    assert_eq!(rec.discount, Some(0.15));
    assert_eq!(rec.region.as_deref(), Some("EMEA"));
    assert_eq!(
        rec.sale_date,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0)
    );
}

#[test]
fn test_missing_fields_become_none() {
    let doc = json!({ "transaction_id": "T1" });
    let rec = normalize_one(&doc, ts());

    assert_eq!(rec.transaction_id.as_deref(), Some("T1"));
    assert!(rec.customer_id.is_none());
    assert!(rec.product_id.is_none());
    assert!(rec.price.is_none());
    assert!(rec.quantity.is_none());
    assert!(rec.discount.is_none());
    assert!(rec.sale_date.is_none());
    assert!(rec.region.is_none());
}

#[test]
fn test_non_object_document_yields_empty_record() {
    let rec = normalize_one(&json!([1, 2, 3]), ts());
    assert!(rec.transaction_id.is_none());
    assert!(rec.quantity.is_none());

    let rec = normalize_one(&json!("garbage"), ts());
    assert!(rec.transaction_id.is_none());
}

#[test]
fn test_mistyped_fields_become_none() {
    let doc = json!({
        "transaction_id": true,
        "customer_id": {"nested": "C1"},
        "product": "not-an-object",
        "quantity": "three",
        "discount": "half",
        "date": 20240301
    });
    let rec = normalize_one(&doc, ts());

    assert!(rec.transaction_id.is_none());
    assert!(rec.customer_id.is_none());
    assert!(rec.product_id.is_none());
    assert!(rec.quantity.is_none());
    assert!(rec.discount.is_none());
    assert!(rec.sale_date.is_none());
}

#[test]
fn test_fractional_quantity_not_coerced() {
    let doc = json!({ "quantity": 2.5 });
    assert!(normalize_one(&doc, ts()).quantity.is_none());
}

#[test]
fn test_date_format_ladder() {
    let cases = [
        ("2024/03/01 10:30:00", (2024, 3, 1, 10, 30, 0)),
        ("2024-03-01T10:30:00", (2024, 3, 1, 10, 30, 0)),
        ("2024-03-01T10:30:00Z", (2024, 3, 1, 10, 30, 0)),
        ("01-03-2024", (2024, 3, 1, 0, 0, 0)),
        ("2024-03-01 10:30:00", (2024, 3, 1, 10, 30, 0)),
        ("2024-03-01", (2024, 3, 1, 0, 0, 0)),
    ];

    for (input, (y, m, d, hh, mm, ss)) in cases {
        let expected = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap();
        assert_eq!(parse_date_safe(input), Some(expected), "format: {input}");
    }
}

#[test]
fn test_unparseable_date_is_none() {
    assert_eq!(parse_date_safe(""), None);
    assert_eq!(parse_date_safe("   "), None);
    assert_eq!(parse_date_safe("yesterday"), None);
    assert_eq!(parse_date_safe("13/13/2024"), None);
}

#[test]
fn test_customer_id_extraction() {
    assert_eq!(extract_customer_id("  C123  "), Some("C123".to_string()));
    assert_eq!(extract_customer_id("C9-inactive"), Some("C9".to_string()));
    assert_eq!(extract_customer_id("cust-9"), None);
    assert_eq!(extract_customer_id(""), None);
}

#[test]
fn test_batch_shares_one_ingestion_timestamp() {
    let docs = vec![
        json!({"transaction_id": "T1"}),
        json!({"transaction_id": "T2"}),
        json!({"transaction_id": "T3"}),
    ];

    let records = normalize_batch(&docs);
    assert_eq!(records.len(), 3);

    // Input order preserved, one timestamp per batch
    assert_eq!(records[0].transaction_id.as_deref(), Some("T1"));
    assert_eq!(records[2].transaction_id.as_deref(), Some("T3"));
    assert!(records.iter().all(|r| r.ingested_at == records[0].ingested_at));
}

#[test]
fn test_numeric_ids_read_as_strings() {
    let doc = json!({
        "transaction_id": 1001,
        "product": { "id": 7 }
    });
    let rec = normalize_one(&doc, ts());
    assert_eq!(rec.transaction_id.as_deref(), Some("1001"));
    assert_eq!(rec.product_id.as_deref(), Some("7"));
}
