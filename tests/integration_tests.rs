//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → token request → paginated fetch →
//! flatten → CSV file or record store

use chrono::NaiveDate;
use personal_sync::config::{AppConfig, ENV_AIRTABLE_API_KEY, ENV_WHOOP_PASSWORD, ENV_WHOOP_USERNAME};
use personal_sync::engine::{export_sleep, sync_sleep};
use personal_sync::sink::{AirtableStore, MemoryStore, RecordStore};
use personal_sync::transform::{DateRange, SleepRecord};
use personal_sync::whoop::WhoopClient;
use personal_sync::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn raw_sleep(id: i64, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "user_id": 10129,
        "created_at": "2022-04-24T11:25:44.774Z",
        "updated_at": "2022-04-24T14:25:44.774Z",
        "start": start,
        "end": end,
        "timezone_offset": "-05:00",
        "nap": false,
        "score_state": "SCORED",
        "score": {
            "stage_summary": {
                "total_in_bed_time_milli": 30_272_735,
                "total_awake_time_milli": 1_403_507,
                "total_slow_wave_sleep_time_milli": 6_630_370,
                "total_rem_sleep_time_milli": 5_879_573
            },
            "sleep_needed": {
                "baseline_milli": 27_395_716,
                "need_from_sleep_debt_milli": 352_230
            },
            "respiratory_rate": 16.11328125,
            "sleep_performance_percentage": 98,
            "sleep_consistency_percentage": 90
        }
    })
}

/// WHOOP token endpoint plus a three-page sleep collection
async fn mount_whoop(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_json(json!({
            "username": "me@example.com",
            "password": "pw",
            "grant_type": "password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "whoop-token",
            "user": {"id": 10129}
        })))
        .mount(server)
        .await;

    let pages = [
        (None, vec![raw_sleep(1, "2022-04-24T02:25:44.774Z", "2022-04-24T10:25:44.774Z")], Some("t2")),
        (Some("t2"), vec![raw_sleep(2, "2022-04-23T01:00:00.000Z", "2022-04-23T09:30:00.500Z")], Some("t3")),
        (Some("t3"), vec![], None),
    ];

    for (token, records, next) in pages {
        let mock = Mock::given(method("GET"))
            .and(path("/developer/v1/activity/sleep"))
            .and(header("Authorization", "Bearer whoop-token"))
            .and(query_param("limit", "25"))
            .and(query_param("start", "2022-04-20T00:00:00Z"))
            .and(query_param("end", "2022-04-24T23:59:59Z"));
        let mock = match token {
            Some(t) => mock.and(query_param("nextToken", t)),
            None => mock.and(query_param_is_missing("nextToken")),
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": records,
            "next_token": next
        })))
        .mount(server)
        .await;
    }
}

fn config_for(server: &MockServer) -> AppConfig {
    let file = format!(
        r#"{{
            "whoop": {{"auth_url": "{uri}", "api_url": "{uri}/developer"}},
            "airtable": {{"api_url": "{uri}/v0", "base_id": "appSleep", "table_name": "Sleep"}}
        }}"#,
        uri = server.uri()
    );
    AppConfig::from_json_str(&file).unwrap().with_env(vec![
        (ENV_WHOOP_USERNAME.to_string(), "me@example.com".to_string()),
        (ENV_WHOOP_PASSWORD.to_string(), "pw".to_string()),
        (ENV_AIRTABLE_API_KEY.to_string(), "pat-test".to_string()),
    ])
}

fn range() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2022, 4, 20).unwrap(),
        NaiveDate::from_ymd_opt(2022, 4, 24).unwrap(),
    )
    .unwrap()
}

// ============================================================================
// CSV Export
// ============================================================================

#[tokio::test]
async fn test_export_flow() {
    let server = MockServer::start().await;
    mount_whoop(&server).await;
    let config = config_for(&server);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("whoop_sleep_data.csv");
    std::fs::write(&output, "stale contents\n").unwrap();

    let client = WhoopClient::authenticate(&config.whoop).await.unwrap();
    assert_eq!(client.user_id(), Some("10129"));

    let stats = export_sleep(&client, &range(), &output).await.unwrap();
    assert_eq!(stats.records_fetched, 2);
    assert_eq!(stats.rows_written, 2);

    let contents = std::fs::read_to_string(&output).unwrap();
    let expected = [
        SleepRecord::HEADERS.join(","),
        "1,-05:00,2022-04-24T07:25:44.774+00:00,2022-04-24T15:25:44.774+00:00,30272,6630,5879,98,352"
            .to_string(),
        "2,-05:00,2022-04-23T06:00:00+00:00,2022-04-23T14:30:00.500+00:00,30272,6630,5879,98,352"
            .to_string(),
    ];
    assert_eq!(contents.lines().collect::<Vec<_>>(), expected);
}

// ============================================================================
// Store Sync
// ============================================================================

#[tokio::test]
async fn test_repeated_sync_inserts_once() {
    let server = MockServer::start().await;
    mount_whoop(&server).await;
    let config = config_for(&server);

    let client = WhoopClient::authenticate(&config.whoop).await.unwrap();
    let store = MemoryStore::new();

    let first = sync_sleep(&client, &store, &range()).await.unwrap();
    let second = sync_sleep(&client, &store, &range()).await.unwrap();

    assert_eq!(first.report.created, 2);
    assert_eq!(second.report.created, 0);
    assert_eq!(second.report.skipped, 2);

    let ids: Vec<Value> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.fields["ID"].clone())
        .collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);
}

#[tokio::test]
async fn test_airtable_sync_skips_existing() {
    let server = MockServer::start().await;
    mount_whoop(&server).await;
    let config = config_for(&server);

    Mock::given(method("GET"))
        .and(path("/v0/appSleep/Sleep"))
        .and(header("Authorization", "Bearer pat-test"))
        .and(query_param("filterByFormula", "{ID} = 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": "recExisting", "fields": {"ID": 1}}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v0/appSleep/Sleep"))
        .and(query_param("filterByFormula", "{ID} = 2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v0/appSleep/Sleep"))
        .and(body_json(json!({
            "fields": {
                "ID": 2,
                "timezone_offset": "-05:00",
                "timezone_adjusted_start": "2022-04-23T06:00:00+00:00",
                "timezone_adjusted_end": "2022-04-23T14:30:00.500+00:00",
                "total_in_bed_time": 30272,
                "total_slow_wave_sleep_time": 6630,
                "total_rem_sleep_time": 5879,
                "sleep_performance_percentage": 98,
                "need_from_sleep_debt": 352
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "recNew",
            "createdTime": "2022-04-25T00:00:00.000Z",
            "fields": {"ID": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WhoopClient::authenticate(&config.whoop).await.unwrap();
    let store = AirtableStore::new(&config.airtable).unwrap();

    let stats = sync_sleep(&client, &store, &range()).await.unwrap();
    assert_eq!(stats.records_fetched, 2);
    assert_eq!(stats.report.created, 1);
    assert_eq!(stats.report.skipped, 1);
    assert_eq!(stats.report.failed, 0);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_bad_password_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let err = WhoopClient::authenticate(&config_for(&server).whoop)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn test_not_found_aborts_before_writing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/developer/v1/activity/sleep"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = WhoopClient::authenticate(&config_for(&server).whoop)
        .await
        .unwrap();
    let store = MemoryStore::new();

    let err = sync_sleep(&client, &store, &range()).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert!(store.is_empty().await);
}
