use crate::{EventMessage, Hub, Metrics, Result as HubResult};

/// Where an event entered the system, for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// Text frame from a connected subscriber
    Subscriber,
    /// In-process producer (the scraping agent's endpoint)
    Producer,
}

impl EventSource {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Subscriber => "subscriber",
            Self::Producer => "producer",
        }
    }
}

/// Single entry point from producers and subscribers into [`Hub::submit`].
///
/// Validates and normalizes, then hands off. Holds no buffer of its own.
#[derive(Clone)]
pub struct Ingress {
    hub: Hub,
    max_message_size: usize,
    metrics: Metrics,
}

impl Ingress {
    pub fn new(hub: Hub, max_message_size: usize, metrics: Metrics) -> Self {
        Self {
            hub,
            max_message_size,
            metrics,
        }
    }

    /// Normalize and submit a text payload.
    ///
    /// Oversized payloads are rejected, not truncated.
    pub async fn submit_text(&self, text: &str, source: EventSource) -> HubResult<()> {
        let message = EventMessage::new(text, self.max_message_size)
            .inspect_err(|e| self.metrics.error_occurred(&e.error_code().to_lowercase()))?;
        self.accept(message, source).await;
        Ok(())
    }

    /// Same as [`Ingress::submit_text`] for a raw payload that must be UTF-8.
    pub async fn submit_bytes(&self, bytes: &[u8], source: EventSource) -> HubResult<()> {
        let message = EventMessage::from_bytes(bytes, self.max_message_size)
            .inspect_err(|e| self.metrics.error_occurred(&e.error_code().to_lowercase()))?;
        self.accept(message, source).await;
        Ok(())
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    async fn accept(&self, message: EventMessage, source: EventSource) {
        log::debug!(
            "Accepted {} byte event from {}",
            message.len(),
            source.as_str()
        );
        self.metrics.message_received(source.as_str());
        self.hub.submit(message).await;
    }
}
