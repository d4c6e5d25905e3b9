use crate::tests::{fast_config, spawn_hub, subscribe};
use crate::{EventSource, HubError, Ingress, Metrics};

use tokio::sync::mpsc::error::TryRecvError;

#[tokio::test]
async fn given_producer_text_when_submitted_then_subscribers_receive_normalized() {
    // Given
    let config = fast_config();
    let (hub, _coordinator, _task) = spawn_hub(&config);
    let (_id, mut receiver) = subscribe(&hub, 1).await;
    let ingress = Ingress::new(hub.clone(), config.max_message_size, Metrics::new());

    // When
    ingress
        .submit_text("new\nfollower", EventSource::Producer)
        .await
        .unwrap();
    hub.connection_count().await.unwrap();

    // Then
    assert_eq!(receiver.try_recv().unwrap().as_str(), "new follower");
}

#[tokio::test]
async fn given_oversized_producer_payload_when_submitted_then_rejected_and_nothing_sent() {
    // Given
    let config = fast_config();
    let (hub, _coordinator, _task) = spawn_hub(&config);
    let (_id, mut receiver) = subscribe(&hub, 1).await;
    let ingress = Ingress::new(hub.clone(), config.max_message_size, Metrics::new());
    let payload = "y".repeat(config.max_message_size + 1);

    // When
    let result = ingress.submit_text(&payload, EventSource::Producer).await;
    hub.connection_count().await.unwrap();

    // Then
    assert!(matches!(result, Err(HubError::MessageTooLarge { .. })));
    assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn given_binary_payload_when_submitted_then_delivered_as_text() {
    // Given
    let config = fast_config();
    let (hub, _coordinator, _task) = spawn_hub(&config);
    let (_id, mut receiver) = subscribe(&hub, 1).await;
    let ingress = Ingress::new(hub.clone(), config.max_message_size, Metrics::new());

    // When
    ingress
        .submit_bytes(b"gift received", EventSource::Subscriber)
        .await
        .unwrap();
    hub.connection_count().await.unwrap();

    // Then
    assert_eq!(receiver.try_recv().unwrap().as_str(), "gift received");
    assert_eq!(ingress.max_message_size(), config.max_message_size);
}

#[tokio::test]
async fn given_stopped_hub_when_submitted_then_accepted_without_error() {
    // Given
    let config = fast_config();
    let (hub, coordinator, task) = spawn_hub(&config);
    let ingress = Ingress::new(hub, config.max_message_size, Metrics::new());
    coordinator.shutdown();
    task.await.unwrap();

    // When
    let result = ingress.submit_text("into the void", EventSource::Producer).await;

    // Then
    assert!(result.is_ok());
}
