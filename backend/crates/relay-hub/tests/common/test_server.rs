#![allow(dead_code)]

use relay_hub::{AppState, ConnectionConfig, Hub, Metrics, ShutdownCoordinator};

use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

impl TestServerWithState {
    /// Poll the hub until it reports `expected` subscribers
    pub async fn wait_for_subscribers(&self, expected: usize) {
        for _ in 0..200 {
            if self.app_state.hub.connection_count().await.unwrap() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("hub never reached {expected} subscribers");
    }
}

/// Create a TestServer with default configuration
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(ConnectionConfig::default())
}

/// Create a TestServer with custom configuration
pub fn create_test_server_with_config(config: ConnectionConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

/// Build the Axum Router with AppState
fn create_app(config: ConnectionConfig) -> (Router, AppState) {
    let metrics = Metrics::default();
    let shutdown = ShutdownCoordinator::new();
    let (hub, _hub_task) = Hub::spawn(&config, metrics.clone(), &shutdown);

    let app_state = AppState::new(hub, metrics, shutdown, config);

    let router = Router::new()
        .route("/", get(relay_hub::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
