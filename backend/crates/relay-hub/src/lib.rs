pub mod app_state;
pub mod connection_config;
pub mod connection_id;
pub mod connection_state;
pub mod error;
pub mod event_message;
pub mod hub;
pub mod ingress;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod subscriber;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_state::{ConnectionLifecycle, ConnectionState};
pub use error::{HubError, Result};
pub use event_message::{EventMessage, normalize};
pub use hub::{Hub, HubRunner};
pub use ingress::{EventSource, Ingress};
pub use metrics::Metrics;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use subscriber::Subscriber;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one subscriber connection.
/// All log entries within the connection will include its id.
pub fn create_connection_span(connection_id: &ConnectionId) -> tracing::Span {
    info_span!("ws_connection", connection_id = %connection_id)
}
