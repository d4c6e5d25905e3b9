use crate::{
    ConnectionConfig, ConnectionId, Hub, Ingress, Metrics, ShutdownCoordinator,
    WebSocketConnection, create_connection_span,
};

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use log::{debug, error, warn};
use tracing::Instrument;

/// Shared application state for the subscriber endpoint
#[derive(Clone)]
pub struct AppState {
    pub hub: Hub,
    pub ingress: Ingress,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

impl AppState {
    pub fn new(
        hub: Hub,
        metrics: Metrics,
        shutdown: ShutdownCoordinator,
        config: ConnectionConfig,
    ) -> Self {
        let ingress = Ingress::new(hub.clone(), config.max_message_size, metrics.clone());
        Self {
            hub,
            ingress,
            metrics,
            shutdown,
            config,
        }
    }
}

/// WebSocket upgrade handler. Any client may subscribe.
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let connection_id = ConnectionId::new();
    debug!("WebSocket upgrade request, assigned {connection_id}");

    let max_size = state.config.max_message_size;
    let metrics = state.metrics.clone();

    ws.max_message_size(max_size)
        .max_frame_size(max_size)
        .on_failed_upgrade(move |e| {
            warn!("WebSocket upgrade failed for {connection_id}: {e}");
            metrics.error_occurred("upgrade_failed");
        })
        .on_upgrade(move |socket| handle_socket(socket, connection_id, state))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        connection_id,
        state.config,
        state.hub,
        state.ingress,
        state.metrics,
    );

    let result = connection
        .handle(socket, shutdown_guard)
        .instrument(create_connection_span(&connection_id))
        .await;

    if let Err(e) = result {
        error!("Connection {connection_id} error: {e}");
    }
}
