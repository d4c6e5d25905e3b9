mod ingress;
mod shutdown;

use crate::{
    ConnectionConfig, ConnectionId, EventMessage, Hub, Metrics, ShutdownCoordinator, Subscriber,
};

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Short deadlines so timing tests finish quickly
pub(crate) fn fast_config() -> ConnectionConfig {
    ConnectionConfig {
        send_buffer_size: 1,
        intake_capacity: 64,
        max_message_size: 64,
        pong_wait: Duration::from_millis(300),
        write_wait: Duration::from_millis(50),
    }
}

pub(crate) fn spawn_hub(config: &ConnectionConfig) -> (Hub, ShutdownCoordinator, JoinHandle<()>) {
    let coordinator = ShutdownCoordinator::new();
    let (hub, task) = Hub::spawn(config, Metrics::new(), &coordinator);
    (hub, coordinator, task)
}

pub(crate) async fn subscribe(
    hub: &Hub,
    capacity: usize,
) -> (ConnectionId, mpsc::Receiver<EventMessage>) {
    let connection_id = ConnectionId::new();
    let (subscriber, receiver) = Subscriber::channel(connection_id, capacity);
    hub.register(subscriber).await.unwrap();
    (connection_id, receiver)
}

pub(crate) fn event(text: &str) -> EventMessage {
    EventMessage::new(text, 4096).unwrap()
}

/// Poll the hub until it reports `expected` subscribers
pub(crate) async fn wait_for_count(hub: &Hub, expected: usize) {
    for _ in 0..200 {
        if hub.connection_count().await.unwrap() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("hub never reached {expected} subscribers");
}
