use crate::HttpState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - hub status and subscriber count
pub async fn health_check(State(state): State<HttpState>) -> Response {
    let (status_code, status, connections) = match state.hub.connection_count().await {
        Ok(count) => (StatusCode::OK, "healthy", Some(count)),
        Err(e) => {
            log::warn!("Health check could not reach hub: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", None)
        }
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "connections": connections,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe: ready while the hub control loop runs
pub async fn readiness_check(State(state): State<HttpState>) -> Response {
    if state.hub.is_closed() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Hub stopped").into_response();
    }
    (StatusCode::OK, "Ready").into_response()
}
