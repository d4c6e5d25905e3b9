use relay_config::HubConfig;

use std::time::Duration;

/// Runtime knobs for one subscriber connection and for the hub
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound queue capacity. 1 means a slow subscriber skips, never lags
    pub send_buffer_size: usize,
    /// Hub intake channel capacity
    pub intake_capacity: usize,
    /// Largest payload accepted inbound or submitted by a producer
    pub max_message_size: usize,
    /// Liveness window, reset by every received frame
    pub pong_wait: Duration,
    /// Deadline for a single frame write
    pub write_wait: Duration,
}

impl ConnectionConfig {
    /// Keepalive ping interval: 9/10 of the liveness window, so one lost
    /// ping still leaves room for the next before the deadline.
    pub fn ping_period(&self) -> Duration {
        self.pong_wait * 9 / 10
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from(&HubConfig::default())
    }
}

impl From<&HubConfig> for ConnectionConfig {
    fn from(config: &HubConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            intake_capacity: config.intake_capacity,
            max_message_size: config.max_message_size,
            pong_wait: Duration::from_secs(config.pong_wait_secs),
            write_wait: Duration::from_millis(config.write_wait_ms),
        }
    }
}
