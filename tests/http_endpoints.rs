//! Integration tests for the HTTP endpoint set.

mod common;

#[tokio::test]
async fn root_returns_service_metadata() {
    let gateway = common::spawn_gateway("secret123").await;

    let body: serde_json::Value = reqwest::get(gateway.url("/"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["name"], "room-gateway");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["endpoints"]["health"], "/health");
}

#[tokio::test]
async fn health_succeeds_regardless_of_credentials() {
    let gateway = common::spawn_gateway("secret123").await;
    let client = reqwest::Client::new();

    // No credentials.
    let plain = client
        .get(gateway.url("/health"))
        .send()
        .await
        .expect("request");
    assert_eq!(plain.status(), 200);

    // Garbage credentials must not matter on a liveness probe.
    let with_bad_auth = client
        .get(gateway.url("/health"))
        .header("Authorization", "Bearer wrong")
        .send()
        .await
        .expect("request");
    assert_eq!(with_bad_auth.status(), 200);

    let body: serde_json::Value = with_bad_auth.json().await.expect("json body");
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn health_uptime_is_monotonic() {
    let gateway = common::spawn_gateway("secret123").await;
    let client = reqwest::Client::new();

    let first: serde_json::Value = client
        .get(gateway.url("/health"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    let second: serde_json::Value = client
        .get(gateway.url("/health"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");

    let a = first["uptime"].as_u64().expect("uptime");
    let b = second["uptime"].as_u64().expect("uptime");
    assert!(b >= a, "uptime went backwards: {a} then {b}");
}

#[tokio::test]
async fn stats_accepts_the_configured_bearer() {
    let gateway = common::spawn_gateway("secret123").await;
    let client = reqwest::Client::new();

    let response = client
        .get(gateway.url("/stats"))
        .header("Authorization", "Bearer secret123")
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["active_sessions"], 0);
}

#[tokio::test]
async fn stats_rejects_wrong_or_missing_credentials() {
    let gateway = common::spawn_gateway("secret123").await;
    let client = reqwest::Client::new();

    let wrong = client
        .get(gateway.url("/stats"))
        .header("Authorization", "Bearer wrong")
        .send()
        .await
        .expect("request");
    assert_eq!(wrong.status(), 401);
    let body: serde_json::Value = wrong.json().await.expect("json body");
    assert_eq!(body["error"], "Unauthorized");

    let missing = client
        .get(gateway.url("/stats"))
        .send()
        .await
        .expect("request");
    assert_eq!(missing.status(), 401);
}

#[tokio::test]
async fn stats_does_not_accept_the_query_fallback() {
    let gateway = common::spawn_gateway("secret123").await;

    // The query token is honored on the upgrade path only.
    let response = reqwest::get(gateway.url("/stats?auth=secret123"))
        .await
        .expect("request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn stats_passes_through_the_coordinator_body() {
    use std::sync::Arc;

    let coordinator = Arc::new(common::CountingCoordinator::default());
    let gateway = common::spawn_with(common::test_config("secret123"), Some(coordinator)).await;

    let body: serde_json::Value = reqwest::Client::new()
        .get(gateway.url("/stats"))
        .header("Authorization", "Bearer secret123")
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body, serde_json::json!({ "rooms": 0 }));
}
