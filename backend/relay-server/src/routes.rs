use crate::{HttpState, emojis, health, ingest};

use relay_hub::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Router for the subscriber listener: only the WebSocket upgrade.
///
/// Subscribers may connect on any path; `ws_path` is the advertised one.
pub fn build_ws_router(state: AppState, ws_path: &str) -> Router {
    Router::new()
        .route(ws_path, get(relay_hub::handler))
        .fallback(relay_hub::handler)
        .with_state(state)
}

/// Router for the static/metadata listener
pub fn build_http_router(state: HttpState) -> Router {
    let emoji_files = ServeDir::new(&state.emojis_dir);
    let public_files = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/api/emojis", get(emojis::list_emojis))
        .route("/api/events", post(ingest::submit_event))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .nest_service("/emojis", emoji_files)
        .fallback_service(public_files)
        .with_state(state)
        // Overlays are loaded from arbitrary origins (OBS browser sources)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
