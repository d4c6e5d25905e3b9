//! The two listeners and their shared lifetime.

use crate::error::{Result as ServerErrorResult, ServerError};
use crate::{HttpState, build_http_router, build_ws_router};

use relay_config::Config;
use relay_hub::{AppState, ConnectionConfig, Hub, Metrics, ShutdownCoordinator};

use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::serve::ListenerExt;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// How long the surviving listener and the hub get to drain
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound listeners plus the running hub, ready to serve
pub struct Relay {
    ws_listener: TcpListener,
    http_listener: TcpListener,
    ws_router: Router,
    http_router: Router,
    tcp_nodelay: bool,
    shutdown: ShutdownCoordinator,
    hub_task: JoinHandle<()>,
}

impl Relay {
    /// Start the hub and bind both listeners. Failing to bind either one is fatal.
    pub async fn bind(config: &Config, shutdown: ShutdownCoordinator) -> ServerErrorResult<Self> {
        let ws_addr = config.server.ws_socket_addr()?;
        let http_addr = config.server.http_socket_addr()?;

        let metrics = Metrics::new();
        let connection_config = ConnectionConfig::from(&config.hub);
        let (hub, hub_task) = Hub::spawn(&connection_config, metrics.clone(), &shutdown);

        let app_state = AppState::new(hub, metrics, shutdown.clone(), connection_config);
        let http_state = HttpState::new(&app_state, &config.assets);

        let ws_router = build_ws_router(app_state, &config.server.ws_path);
        let http_router = build_http_router(http_state);

        let ws_listener = bind_listener("websocket", ws_addr).await?;
        let http_listener = bind_listener("http", http_addr).await?;

        Ok(Self {
            ws_listener,
            http_listener,
            ws_router,
            http_router,
            tcp_nodelay: config.hub.tcp_nodelay,
            shutdown,
            hub_task,
        })
    }

    pub fn ws_local_addr(&self) -> io::Result<SocketAddr> {
        self.ws_listener.local_addr()
    }

    pub fn http_local_addr(&self) -> io::Result<SocketAddr> {
        self.http_listener.local_addr()
    }

    /// Serve both listeners until one stops.
    ///
    /// A listener stopping after shutdown was requested is a clean exit; one
    /// stopping on its own is an error. Either way the other listener and the
    /// hub are shut down before returning.
    pub async fn serve(self) -> ServerErrorResult<()> {
        let tcp_nodelay = self.tcp_nodelay;
        let ws_listener = self.ws_listener.tap_io(move |tcp| {
            if tcp_nodelay && let Err(e) = tcp.set_nodelay(true) {
                warn!("Failed to set TCP_NODELAY on subscriber socket: {e}");
            }
        });

        let mut ws_guard = self.shutdown.subscribe_guard();
        let ws_server = axum::serve(ws_listener, self.ws_router)
            .with_graceful_shutdown(async move { ws_guard.wait().await });

        let mut http_guard = self.shutdown.subscribe_guard();
        let http_server = axum::serve(self.http_listener, self.http_router)
            .with_graceful_shutdown(async move { http_guard.wait().await });

        let ws_task = tokio::spawn(ws_server.into_future());
        let http_task = tokio::spawn(http_server.into_future());

        info!("Relay ready to accept connections");

        supervise(ws_task, http_task, self.hub_task, &self.shutdown).await
    }
}

/// Wait for the first listener to stop, then shut down and drain the rest.
///
/// The outcome is judged against whether shutdown had already been requested
/// when that first listener returned.
pub(crate) async fn supervise(
    mut ws_task: JoinHandle<io::Result<()>>,
    mut http_task: JoinHandle<io::Result<()>>,
    hub_task: JoinHandle<()>,
    shutdown: &ShutdownCoordinator,
) -> ServerErrorResult<()> {
    let (name, outcome) = tokio::select! {
        outcome = &mut ws_task => ("websocket", outcome),
        outcome = &mut http_task => ("http", outcome),
    };
    let other = if name == "websocket" { http_task } else { ws_task };

    let requested = shutdown.is_shutdown();
    shutdown.shutdown();

    if timeout(DRAIN_TIMEOUT, other).await.is_err() {
        warn!("Listener did not drain within {DRAIN_TIMEOUT:?}");
    }
    if timeout(DRAIN_TIMEOUT, hub_task).await.is_err() {
        warn!("Hub did not stop within {DRAIN_TIMEOUT:?}");
    }

    match outcome.unwrap_or_else(|e| Err(io::Error::other(e))) {
        Err(source) => Err(ServerError::Serve { name, source }),
        Ok(()) if requested => {
            info!("Graceful shutdown complete");
            Ok(())
        }
        Ok(()) => {
            warn!("{name} listener stopped without a shutdown request");
            Err(ServerError::ListenerStopped { name })
        }
    }
}

async fn bind_listener(name: &'static str, addr: SocketAddr) -> ServerErrorResult<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { name, addr, source })?;

    match listener.local_addr() {
        Ok(actual) => info!("{name} listener on {actual}"),
        Err(_) => info!("{name} listener on {addr}"),
    }

    Ok(listener)
}
