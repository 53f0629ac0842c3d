//! Integration tests for mesh conversion and the health probe.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::helpers::TestApp;

fn convert_request(query: &str, body: &'static [u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/convert-obj{query}"))
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from(body))
        .expect("Failed to build request")
}

#[tokio::test]
async fn test_convert_returns_gltf_attachment() {
    let app = TestApp::new();

    let response = app
        .send(convert_request("?name=cube.obj", b"v 0 0 0\n"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "model/gltf+json");
    let disposition = response.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .expect("ascii header");
    assert!(disposition.contains("cube.gltf"), "{disposition}");
    assert_eq!(&response.body[..], b"gltf:v 0 0 0\n");
}

#[tokio::test]
async fn test_convert_rejects_bad_input() {
    let app = TestApp::new();

    for (query, body) in [
        ("?name=cube.fbx", &b"v 0 0 0"[..]),
        ("", &b"v 0 0 0"[..]),
        ("?name=cube.obj", &b""[..]),
    ] {
        let response = app.send(convert_request(query, body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "query {query:?}");
    }
}

#[tokio::test]
async fn test_convert_rejects_header_breaking_name() {
    let app = TestApp::new();

    let response = app
        .send(convert_request("?name=a%0D%0AX-Evil:%201.obj", b"v 0 0 0"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.headers.get("x-evil").is_none());
    let body: serde_json::Value =
        serde_json::from_slice(&response.body).expect("JSON error body");
    assert_eq!(body["error"], json!("VALIDATION_ERROR"));
    assert_eq!(body["retryable"], json!(false));
}

#[tokio::test]
async fn test_convert_enforces_body_limit() {
    let app = TestApp::new();
    static BIG: [u8; 4096] = [b'v'; 4096];

    let response = app.send(convert_request("?name=big.obj", &BIG)).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], json!("ok"));
    assert_eq!(response.body["data"]["store"], json!("memory"));
    assert!(response.body["data"].get("database").is_none());
}
