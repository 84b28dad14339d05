mod common;

use common::{spawn_failing, user_body, TestApp};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "profile-service");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn readiness_fails_when_store_is_down() {
    let address = spawn_failing().await;

    let response = reqwest::get(format!("{}/ready", address)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // Liveness does not depend on the store.
    let response = reqwest::get(format!("{}/health", address)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let app = TestApp::spawn().await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn api_info_lists_endpoints() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["service"], "profile-service");
    assert_eq!(body["endpoints"]["register_user"], "POST /users/:user_id");
    assert_eq!(
        body["endpoints"]["goal_dashboard"],
        "GET /users/:user_id/goal_info/:goal_id/status/:status_id"
    );
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("x-request-id", "trace-abc-123")
        .send()
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-request-id").unwrap(), "trace-abc-123");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
}

#[tokio::test]
async fn json_route_with_status_as_user_id_keeps_strict_headers() {
    let app = TestApp::spawn().await;
    let response = app.register_user("status", &user_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.get("/users/status/goal_info").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        "default-src 'none'; frame-ancestors 'none'"
    );
}
