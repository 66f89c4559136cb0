use super::*;
use chrono::TimeZone;

fn ts(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 8, 30, 0).unwrap()
}

#[test]
fn test_beginning_of_time_sentinel() {
    let sentinel = beginning_of_time();
    assert_eq!(sentinel, Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap());
}

#[tokio::test]
async fn test_absent_watermark_reads_none() {
    let store = DuckDbStore::open_memory().unwrap();
    assert_eq!(store.read_watermark("sales_silver").await.unwrap(), None);
}

#[tokio::test]
async fn test_commit_and_read_back() {
    let store = DuckDbStore::open_memory().unwrap();
    store.commit_watermark("sales_silver", ts(1)).await.unwrap();
    assert_eq!(
        store.read_watermark("sales_silver").await.unwrap(),
        Some(ts(1))
    );
}

#[tokio::test]
async fn test_commit_overwrites_single_row() {
    let store = DuckDbStore::open_memory().unwrap();
    store.commit_watermark("sales_silver", ts(1)).await.unwrap();
    store.commit_watermark("sales_silver", ts(2)).await.unwrap();

    assert_eq!(
        store.read_watermark("sales_silver").await.unwrap(),
        Some(ts(2))
    );
    assert_eq!(store.count_rows("silver.etl_metadata").unwrap(), 1);
}

#[tokio::test]
async fn test_pipeline_identities_are_independent() {
    let store = DuckDbStore::open_memory().unwrap();
    store.commit_watermark("sales_silver", ts(1)).await.unwrap();
    store.commit_watermark("returns_silver", ts(5)).await.unwrap();

    assert_eq!(
        store.read_watermark("sales_silver").await.unwrap(),
        Some(ts(1))
    );
    assert_eq!(
        store.read_watermark("returns_silver").await.unwrap(),
        Some(ts(5))
    );
}

#[tokio::test]
async fn test_subsecond_precision_round_trips() {
    let store = DuckDbStore::open_memory().unwrap();
    let precise = ts(1) + chrono::Duration::microseconds(123_456);
    store.commit_watermark("sales_silver", precise).await.unwrap();
    assert_eq!(
        store.read_watermark("sales_silver").await.unwrap(),
        Some(precise)
    );
}
