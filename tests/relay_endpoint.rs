//! Relay endpoint behavior against mock upstreams.

use std::time::Duration;

use axum::http::{header, StatusCode};
use serde_json::Value;

mod common;

use common::{base_url_for, body_string, get, relay_config, send, start_mock_upstream, start_raw_upstream};

fn assert_cors(headers: &axum::http::HeaderMap) {
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

#[tokio::test]
async fn test_successful_relay_returns_body_verbatim() {
    let upstream = start_mock_upstream("200 OK", r#"{"Series":[]}"#).await;
    let root = tempfile::tempdir().unwrap();
    let config = relay_config(&upstream.base_url(), root.path());

    let response = send(
        config,
        get("/api/bcentral?user=abc&timeseries=F022.PIB.FLUJO.CLP.Z.Z.0.A&function=GetSeries"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(response.headers());
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_string(response).await, r#"{"Series":[]}"#);

    let requests = upstream.recorded();
    assert_eq!(requests.len(), 1);
    let request_line = requests[0].lines().next().unwrap();
    assert_eq!(
        request_line,
        "GET /SieteRestWS/SieteRestWS.ashx?user=abc&pass=&firstdate=&lastdate=&timeseries=F022.PIB.FLUJO.CLP.Z.Z.0.A&function=GetSeries HTTP/1.1"
    );
    assert!(requests[0]
        .to_ascii_lowercase()
        .contains("user-agent: mozilla/5.0 (datos para chile proxy)"));
}

#[tokio::test]
async fn test_missing_parameters_are_sent_empty_with_default_function() {
    let upstream = start_mock_upstream("200 OK", "{}").await;
    let root = tempfile::tempdir().unwrap();

    let response = send(
        relay_config(&upstream.base_url(), root.path()),
        get("/api/bcentral?"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let request_line = upstream.recorded()[0].lines().next().unwrap().to_string();
    assert!(request_line.contains(
        "?user=&pass=&firstdate=&lastdate=&timeseries=&function=GetSeries "
    ));
}

#[tokio::test]
async fn test_first_occurrence_of_repeated_key_wins() {
    let upstream = start_mock_upstream("200 OK", "{}").await;
    let root = tempfile::tempdir().unwrap();

    send(
        relay_config(&upstream.base_url(), root.path()),
        get("/api/bcentral?function=SearchSeries&function=GetSeries&firstdate=2024-01-01&firstdate=2020-01-01"),
    )
    .await;

    let request_line = upstream.recorded()[0].lines().next().unwrap().to_string();
    assert!(request_line.contains("firstdate=2024-01-01&"));
    assert!(request_line.contains("function=SearchSeries "));
}

#[tokio::test]
async fn test_upstream_http_error_is_reported_in_body() {
    let upstream = start_mock_upstream("403 Forbidden", "denied").await;
    let root = tempfile::tempdir().unwrap();

    let response = send(
        relay_config(&upstream.base_url(), root.path()),
        get("/api/bcentral?user=abc"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(response.headers());
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        body_string(response).await,
        r#"{"error": "HTTP 403", "message": "Forbidden"}"#
    );
}

#[tokio::test]
async fn test_unreachable_upstream_is_connection_error() {
    let addr = common::unused_addr().await;
    let root = tempfile::tempdir().unwrap();

    let response = send(relay_config(&base_url_for(addr), root.path()), get("/api/bcentral?user=abc")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Connection Error");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_strict_status_reflects_failures() {
    let upstream = start_mock_upstream("404 Not Found", "").await;
    let root = tempfile::tempdir().unwrap();
    let mut config = relay_config(&upstream.base_url(), root.path());
    config.responses.strict_status = true;

    let response = send(config, get("/api/bcentral?timeseries=missing")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(response.headers());
    assert_eq!(
        body_string(response).await,
        r#"{"error": "HTTP 404", "message": "Not Found"}"#
    );

    let addr = common::unused_addr().await;
    let mut config = relay_config(&base_url_for(addr), root.path());
    config.responses.strict_status = true;
    let response = send(config, get("/api/bcentral?user=abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_upstream_timeout_is_connection_error() {
    let addr = common::start_silent_upstream().await;
    let root = tempfile::tempdir().unwrap();
    let mut config = relay_config(&base_url_for(addr), root.path());
    config.upstream.timeout_secs = 1;
    config.responses.strict_status = true;

    let response = send(config, get("/api/bcentral?user=abc")).await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Connection Error");
}

#[tokio::test]
async fn test_upstream_reason_phrase_is_passed_through() {
    let upstream = start_mock_upstream("403 Access Denied", "").await;
    let root = tempfile::tempdir().unwrap();

    let response = send(
        relay_config(&upstream.base_url(), root.path()),
        get("/api/bcentral?user=abc"),
    )
    .await;
    assert_eq!(
        body_string(response).await,
        r#"{"error": "HTTP 403", "message": "Access Denied"}"#
    );

    let upstream = start_mock_upstream("599 Custom Failure", "").await;
    let response = send(
        relay_config(&upstream.base_url(), root.path()),
        get("/api/bcentral?user=abc"),
    )
    .await;
    assert_eq!(
        body_string(response).await,
        r#"{"error": "HTTP 599", "message": "Custom Failure"}"#
    );
}

#[tokio::test]
async fn test_truncated_upstream_body_is_proxy_error() {
    static PARTS: &[&str] = &[
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"Series\"",
    ];
    let addr = start_raw_upstream(PARTS, Duration::ZERO).await;
    let root = tempfile::tempdir().unwrap();
    let mut config = relay_config(&base_url_for(addr), root.path());
    config.responses.strict_status = true;

    let response = send(config, get("/api/bcentral?user=abc")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(response.headers());
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Proxy Error");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unresolvable_upstream_host_is_connection_error() {
    let root = tempfile::tempdir().unwrap();
    let config = relay_config(
        "http://relay-test.invalid/SieteRestWS/SieteRestWS.ashx",
        root.path(),
    );

    let response = send(config, get("/api/bcentral?user=abc")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Connection Error");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_but_steady_body_outlasts_timeout() {
    static PARTS: &[&str] = &[
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 14\r\n\r\n",
        "{\"Series\"",
        ": []",
        "}",
    ];
    let addr = start_raw_upstream(PARTS, Duration::from_millis(600)).await;
    let root = tempfile::tempdir().unwrap();
    let mut config = relay_config(&base_url_for(addr), root.path());
    config.upstream.timeout_secs = 1;

    let response = send(config, get("/api/bcentral?user=abc")).await;

    assert_eq!(body_string(response).await, r#"{"Series": []}"#);
}
