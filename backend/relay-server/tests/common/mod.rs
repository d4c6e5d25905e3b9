#![allow(dead_code)]

//! Test infrastructure for relay-server HTTP tests

use relay_hub::{AppState, ConnectionConfig, EventMessage, Hub, Metrics, ShutdownCoordinator};
use relay_server::{HttpState, build_http_router};

use std::fs;

use axum::Router;
use axum::body::Body;
use http::{Request, Response};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Router plus the directories and hub behind it
pub struct TestApp {
    pub router: Router,
    pub app_state: AppState,
    pub shutdown: ShutdownCoordinator,
    pub assets: TempDir,
}

impl TestApp {
    pub fn emojis_dir(&self) -> std::path::PathBuf {
        self.assets.path().join("emojis")
    }

    /// Register a raw subscriber directly with the hub
    pub async fn subscribe(&self) -> mpsc::Receiver<EventMessage> {
        let (subscriber, receiver) =
            relay_hub::Subscriber::channel(relay_hub::ConnectionId::new(), 1);
        self.app_state.hub.register(subscriber).await.unwrap();
        receiver
    }
}

/// Build the HTTP router over temp `public/` and `emojis/` directories
pub fn create_test_app() -> TestApp {
    create_test_app_with_config(ConnectionConfig::default())
}

pub fn create_test_app_with_config(config: ConnectionConfig) -> TestApp {
    let assets = TempDir::new().unwrap();
    let public_dir = assets.path().join("public");
    let emojis_dir = assets.path().join("emojis");
    fs::create_dir_all(&public_dir).unwrap();
    fs::create_dir_all(&emojis_dir).unwrap();
    fs::write(public_dir.join("index.html"), "<html>overlay</html>").unwrap();

    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();
    let (hub, _hub_task) = Hub::spawn(&config, metrics.clone(), &shutdown);
    let app_state = AppState::new(hub, metrics, shutdown.clone(), config);

    let http_state = HttpState {
        hub: app_state.hub.clone(),
        ingress: app_state.ingress.clone(),
        emojis_dir,
        public_dir,
    };

    TestApp {
        router: build_http_router(http_state),
        app_state,
        shutdown,
        assets,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(body.into())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
