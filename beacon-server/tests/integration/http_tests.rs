use axum::body::Body;
use axum::http::{Request, StatusCode};
use beacon_core::{PeerId, RoomId};
use beacon_server::{RelayCommand, RelayConfig, RelayService, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::integration::init_tracing;

/// Send a GET to the app and return (status, parsed JSON body).
async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health_reports_counts() {
    init_tracing();

    let relay = RelayService::start(16);
    let app = build_router(relay.clone(), &RelayConfig::default());

    let (status, body) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "ok", "connections": 0, "peers": 0, "rooms": 0 })
    );

    relay
        .send(RelayCommand::Join {
            peer_id: PeerId::from("A"),
            room_id: RoomId::from("r1"),
        })
        .await
        .unwrap();

    let (_, body) = get_json(app, "/health").await;
    assert_eq!(body["peers"], 1);
    assert_eq!(body["rooms"], 1);
}

#[tokio::test]
async fn test_health_fails_after_shutdown() {
    init_tracing();

    let relay = RelayService::start(16);
    let app = build_router(relay.clone(), &RelayConfig::default());
    relay.shutdown().await;

    let (status, _) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_socket_path_requires_upgrade() {
    init_tracing();

    let relay = RelayService::start(16);
    let app = build_router(relay, &RelayConfig::default());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/socket")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    init_tracing();

    let relay = RelayService::start(16);
    let app = build_router(relay, &RelayConfig::default());

    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/health")
                .header("origin", "https://example.com")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
