use metrics::{counter, gauge};

/// Metrics collector for hub and connection activity
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "relay_hub" }
    }

    /// Record new connection established
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record an event accepted by the ingress (`source` is "subscriber" or "producer")
    pub fn message_received(&self, source: &str) {
        counter!(format!("{}.messages.received", self.prefix)).increment(1);
        counter!(format!("{}.messages.received.{}", self.prefix, source)).increment(1);
    }

    /// Record an event written to a subscriber
    pub fn message_sent(&self) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
    }

    /// Record one fan-out pass
    pub fn broadcast_published(&self, delivered: usize, dropped: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.dropped", self.prefix)).increment(dropped as u64);
        gauge!(format!("{}.broadcast.subscribers", self.prefix))
            .set((delivered + dropped) as f64);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
