use api::host::{health::health_check, telemetry::OtelTraceLayer};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

fn host_router() -> Router {
    api::host::health::record_start_time();
    Router::new()
        .route("/health", get(health_check))
        .layer(OtelTraceLayer)
}

#[tokio::test]
async fn health_reports_version_and_backend() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .header("user-agent", "Mozilla/5.0 Chrome")
        .header("x-request-id", "req-1")
        .body(Body::empty())
        .unwrap();

    let response = host_router().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["api_base_url"].as_str().unwrap().starts_with("http"));
}

#[tokio::test]
async fn trace_layer_passes_client_errors_through() {
    let req = Request::builder()
        .method("GET")
        .uri("/missing/42")
        .header("authorization", "Bearer abc")
        .body(Body::empty())
        .unwrap();

    let response = host_router().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
