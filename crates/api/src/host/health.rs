use axum::Json;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_base_url: String,
    pub config: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// `GET /health`. Reports the backend this host points clients at and
/// whether `config.toml` loaded.
pub async fn health_check() -> Json<HealthResponse> {
    let config = match super::config::load_config() {
        Ok(_) => "loaded".to_string(),
        Err(e) => format!("error: {e}"),
    };
    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        api_base_url: super::config::app_config().api.base_url.clone(),
        config,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
