//! Tests for engine module

use super::*;
use crate::auth::Token;
use crate::config::WhoopConfig;
use crate::error::Error;
use crate::sink::{MemoryStore, UpsertReport};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WhoopClient {
    let config = WhoopConfig {
        api_url: server.uri(),
        ..WhoopConfig::default()
    };
    let token = Token {
        access_token: "tok".to_string(),
        expires_in: None,
        user_id: Some("10129".to_string()),
    };
    WhoopClient::with_token(&config, &token).unwrap()
}

fn range() -> DateRange {
    let day = NaiveDate::from_ymd_opt(2022, 4, 24).unwrap();
    DateRange::last_days(day, 4)
}

fn raw_sleep(id: i64) -> Value {
    json!({
        "id": id,
        "start": "2022-04-24T02:25:44.774Z",
        "end": "2022-04-24T10:25:44.774Z",
        "timezone_offset": "+05:00",
        "score": {
            "stage_summary": {
                "total_in_bed_time_milli": 61_999,
                "total_slow_wave_sleep_time_milli": 1_000,
                "total_rem_sleep_time_milli": 999
            },
            "sleep_needed": {"need_from_sleep_debt_milli": 0},
            "sleep_performance_percentage": 87.5
        }
    })
}

async fn mount_sleeps(server: &MockServer, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/v1/activity/sleep"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": records,
            "next_token": null
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn test_message_serialization() {
    let msg = Message::Sync(SyncStats {
        records_fetched: 3,
        report: UpsertReport {
            created: 2,
            skipped: 1,
            failed: 0,
        },
        duration_ms: 5,
    });
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({
            "type": "SYNC",
            "records_fetched": 3,
            "created": 2,
            "skipped": 1,
            "failed": 0,
            "duration_ms": 5
        })
    );

    let msg = Message::records("subscriptions", &[json!({"id": "a"})]).unwrap();
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({"type": "RECORDS", "stream": "subscriptions", "records": [{"id": "a"}]})
    );
}

// ============================================================================
// Export Tests
// ============================================================================

#[tokio::test]
async fn test_export_sleep_writes_csv() {
    let server = MockServer::start().await;
    mount_sleeps(&server, vec![raw_sleep(1), raw_sleep(2)]).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("whoop_sleep_data.csv");

    let stats = export_sleep(&client_for(&server), &range(), &output)
        .await
        .unwrap();
    assert_eq!(stats.records_fetched, 2);
    assert_eq!(stats.rows_written, 2);

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "1,+05:00,2022-04-23T21:25:44.774+00:00,2022-04-24T05:25:44.774+00:00,61,1,0,87.5,0"
    );
}

#[tokio::test]
async fn test_export_bad_record_writes_nothing() {
    let server = MockServer::start().await;
    let mut broken = raw_sleep(2);
    broken["score"] = Value::Null;
    mount_sleeps(&server, vec![raw_sleep(1), broken]).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let err = export_sleep(&client_for(&server), &range(), &output)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingField { .. }));
    assert!(!output.exists());
}

// ============================================================================
// Sync Tests
// ============================================================================

#[tokio::test]
async fn test_sync_is_idempotent() {
    let server = MockServer::start().await;
    mount_sleeps(&server, vec![raw_sleep(1), raw_sleep(2)]).await;

    let client = client_for(&server);
    let store = MemoryStore::new();

    let first = sync_sleep(&client, &store, &range()).await.unwrap();
    assert_eq!(first.report.created, 2);

    let second = sync_sleep(&client, &store, &range()).await.unwrap();
    assert_eq!(second.report.created, 0);
    assert_eq!(second.report.skipped, 2);
    assert_eq!(store.len().await, 2);

    let stored = store.list().await.unwrap();
    assert_eq!(stored[0].fields["ID"], json!(1));
    assert_eq!(stored[0].fields["total_in_bed_time"], json!(61));
}

#[tokio::test]
async fn test_sync_propagates_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/activity/sleep"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let err = sync_sleep(&client_for(&server), &store, &range())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(store.is_empty().await);
}

// ============================================================================
// Chart Tests
// ============================================================================

#[tokio::test]
async fn test_chart_data_defaults() {
    let store = MemoryStore::new();
    store
        .create(
            json!({"Date": "2024-05-01", "Activity": "Run", "Elapsed Time": 42})
                .as_object()
                .unwrap()
                .clone(),
        )
        .await
        .unwrap();
    store
        .create(serde_json::Map::new())
        .await
        .unwrap();

    let points = chart_data(&store).await.unwrap();
    assert_eq!(
        serde_json::to_value(&points).unwrap(),
        json!([
            {"date": "2024-05-01", "activity": "Run", "elapsedTime": 42},
            {"date": "No Date", "activity": "No Activity", "elapsedTime": 0}
        ])
    );
}
