//! Integration tests for `WarehouseClient` using wiremock HTTP mocks.

use dealrecon_warehouse::{PromotionRow, WarehouseClient, WarehouseError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test client with a zero-second retry delay so exhaustion tests run fast.
fn test_client(base_url: &str) -> WarehouseClient {
    WarehouseClient::new(base_url, "test-token", 30, "dealrecon-test/0.1", 5, 0)
        .expect("client construction should not fail")
}

fn events_body() -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "rows": [
            {
                "item_id": 100,
                "promotion_id": "9001",
                "type": "Insider Exclusive",
                "sale_price": 19.99,
                "start_date": "2025-01-25",
                "end_date": {"value": "2025-02-05"},
                "sales_channel": "Web"
            }
        ]
    })
}

#[tokio::test]
async fn run_query_returns_typed_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queries"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains("dim_promotion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let promotions = client.fetch_promotions("analytics.core").await;

    assert_eq!(promotions.len(), 1);
    assert_eq!(promotions[0].item_id, 100);
    assert_eq!(promotions[0].promotion_id, "9001");
    assert_eq!(promotions[0].sale_price.to_string(), "19.99");
}

#[tokio::test]
async fn unavailable_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queries"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let promotions = client.fetch_promotions("analytics.core").await;

    assert_eq!(promotions.len(), 1, "third attempt should have succeeded");
}

#[tokio::test]
async fn retry_budget_exhaustion_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queries"))
        .respond_with(ResponseTemplate::new(503))
        .expect(5)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let promotions = client.fetch_promotions("analytics.core").await;

    assert!(promotions.is_empty(), "exhausted retries degrade to empty");
}

#[tokio::test]
async fn query_error_is_not_retried_and_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ERROR",
            "message": "view not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let deals = client.fetch_crazy_deals("analytics.core").await;

    assert!(deals.is_empty());
}

#[tokio::test]
async fn run_query_surfaces_query_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ERROR",
            "message": "syntax error at line 1"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .run_query::<PromotionRow>("SELECT 1", "probe")
        .await;

    assert!(
        matches!(result, Err(WarehouseError::Query(ref msg)) if msg.contains("syntax error")),
        "expected Query error, got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_rows_are_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "rows": [{"item_id": "not-a-number"}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .run_query::<PromotionRow>("SELECT 1", "probe")
        .await;

    assert!(matches!(result, Err(WarehouseError::Deserialize { .. })));
}
