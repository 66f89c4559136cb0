use super::*;
use crate::watermark::beginning_of_time;
use chrono::{NaiveDate, TimeZone};

fn record(transaction_id: &str, ingested_at: DateTime<Utc>) -> NormalizedRecord {
    NormalizedRecord {
        transaction_id: Some(transaction_id.to_string()),
        customer_id: Some("C1".to_string()),
        product_id: Some("P1".to_string()),
        product_name: Some("Widget".to_string()),
        category: Some("Tools".to_string()),
        price: Some(10.0),
        quantity: Some(2),
        discount: Some(0.1),
        sale_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0),
        region: Some("NA".to_string()),
        ingested_at,
    }
}

fn ts(secs: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, secs).unwrap()
}

#[tokio::test]
async fn test_append_and_full_extract() {
    let store = DuckDbStore::open_memory().unwrap();

    let written = store
        .append_batch(&[record("T1", ts(1)), record("T2", ts(2))])
        .await
        .unwrap();
    assert_eq!(written, 2);
    assert_eq!(store.landing_count().await.unwrap(), 2);

    let extracted = store.extract_since(beginning_of_time()).await.unwrap();
    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].transaction_id.as_deref(), Some("T1"));
    assert_eq!(extracted[1].transaction_id.as_deref(), Some("T2"));
    assert_eq!(extracted[0].ingested_at, ts(1));
    assert_eq!(
        extracted[0].sale_date,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0)
    );
}

#[tokio::test]
async fn test_extract_is_strictly_greater_than_watermark() {
    let store = DuckDbStore::open_memory().unwrap();
    store
        .append_batch(&[record("T1", ts(1)), record("T2", ts(2)), record("T3", ts(3))])
        .await
        .unwrap();

    // Boundary row at ts(2) must be excluded
    let extracted = store.extract_since(ts(2)).await.unwrap();
    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0].transaction_id.as_deref(), Some("T3"));
}

#[tokio::test]
async fn test_extract_orders_by_ingestion_timestamp() {
    let store = DuckDbStore::open_memory().unwrap();
    store
        .append_batch(&[record("T3", ts(3)), record("T1", ts(1)), record("T2", ts(2))])
        .await
        .unwrap();

    let extracted = store.extract_since(beginning_of_time()).await.unwrap();
    let ids: Vec<_> = extracted
        .iter()
        .map(|r| r.transaction_id.clone().unwrap())
        .collect();
    assert_eq!(ids, vec!["T1", "T2", "T3"]);
}

#[tokio::test]
async fn test_zero_rows_is_not_an_error() {
    let store = DuckDbStore::open_memory().unwrap();
    let extracted = store.extract_since(beginning_of_time()).await.unwrap();
    assert!(extracted.is_empty());
}

#[tokio::test]
async fn test_null_fields_round_trip() {
    let store = DuckDbStore::open_memory().unwrap();
    let mut rec = NormalizedRecord::empty(ts(1));
    rec.transaction_id = Some("T1".to_string());
    store.append_batch(&[rec]).await.unwrap();

    let extracted = store.extract_since(beginning_of_time()).await.unwrap();
    assert_eq!(extracted.len(), 1);
    assert!(extracted[0].customer_id.is_none());
    assert!(extracted[0].price.is_none());
    assert!(extracted[0].quantity.is_none());
    assert!(extracted[0].sale_date.is_none());
}

#[tokio::test]
async fn test_max_ingested_at() {
    let store = DuckDbStore::open_memory().unwrap();
    assert_eq!(store.max_ingested_at().await.unwrap(), None);

    store
        .append_batch(&[record("T1", ts(1)), record("T2", ts(5))])
        .await
        .unwrap();
    assert_eq!(store.max_ingested_at().await.unwrap(), Some(ts(5)));
}

#[tokio::test]
async fn test_empty_batch_is_noop() {
    let store = DuckDbStore::open_memory().unwrap();
    assert_eq!(store.append_batch(&[]).await.unwrap(), 0);
    assert_eq!(store.landing_count().await.unwrap(), 0);
}
