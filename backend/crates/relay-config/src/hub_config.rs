use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Per-subscriber outbound queue depth
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 1024;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 1;

// Hub intake channel depth
pub const MIN_INTAKE_CAPACITY: usize = 16;
pub const MAX_INTAKE_CAPACITY: usize = 1_000_000;
pub const DEFAULT_INTAKE_CAPACITY: usize = 1024;

// Event payload size (bytes)
pub const MIN_MAX_MESSAGE_SIZE: usize = 64;
pub const MAX_MAX_MESSAGE_SIZE: usize = 1_048_576;
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4096;

// Liveness window (seconds)
pub const MIN_PONG_WAIT_SECS: u64 = 5;
pub const MAX_PONG_WAIT_SECS: u64 = 600;
pub const DEFAULT_PONG_WAIT_SECS: u64 = 30;

// Per-write deadline (milliseconds)
pub const MIN_WRITE_WAIT_MS: u64 = 50;
pub const MAX_WRITE_WAIT_MS: u64 = 60_000;
pub const DEFAULT_WRITE_WAIT_MS: u64 = 1000;

/// Connection hub settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Outbound queue capacity per subscriber; 1 keeps delivery latest-favored
    pub send_buffer_size: usize,
    /// Capacity of the hub's control-loop intake channel
    pub intake_capacity: usize,
    /// Largest accepted event payload, inbound frames included
    pub max_message_size: usize,
    /// Liveness window: a subscriber silent for this long is dropped
    pub pong_wait_secs: u64,
    /// Deadline for a single frame write
    pub write_wait_ms: u64,
    /// Disable Nagle on accepted subscriber sockets
    pub tcp_nodelay: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            intake_capacity: DEFAULT_INTAKE_CAPACITY,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            pong_wait_secs: DEFAULT_PONG_WAIT_SECS,
            write_wait_ms: DEFAULT_WRITE_WAIT_MS,
            tcp_nodelay: true,
        }
    }
}

impl HubConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::check_range(
            "hub.send_buffer_size",
            self.send_buffer_size,
            MIN_SEND_BUFFER_SIZE,
            MAX_SEND_BUFFER_SIZE,
        )?;
        Self::check_range(
            "hub.intake_capacity",
            self.intake_capacity,
            MIN_INTAKE_CAPACITY,
            MAX_INTAKE_CAPACITY,
        )?;
        Self::check_range(
            "hub.max_message_size",
            self.max_message_size,
            MIN_MAX_MESSAGE_SIZE,
            MAX_MAX_MESSAGE_SIZE,
        )?;
        Self::check_range(
            "hub.pong_wait_secs",
            self.pong_wait_secs,
            MIN_PONG_WAIT_SECS,
            MAX_PONG_WAIT_SECS,
        )?;
        Self::check_range(
            "hub.write_wait_ms",
            self.write_wait_ms,
            MIN_WRITE_WAIT_MS,
            MAX_WRITE_WAIT_MS,
        )?;

        if self.write_wait_ms >= self.pong_wait_secs * 1000 {
            return Err(ConfigError::hub(format!(
                "hub.write_wait_ms ({}) must be shorter than hub.pong_wait_secs ({}s)",
                self.write_wait_ms, self.pong_wait_secs
            )));
        }

        Ok(())
    }

    /// Ping interval in milliseconds: 9/10 of the liveness window.
    pub fn ping_period_ms(&self) -> u64 {
        self.pong_wait_secs * 1000 * 9 / 10
    }

    #[track_caller]
    fn check_range<T>(field: &str, value: T, min: T, max: T) -> ConfigErrorResult<()>
    where
        T: PartialOrd + std::fmt::Display,
    {
        if value < min || value > max {
            return Err(ConfigError::hub(format!(
                "{field} must be {min}-{max}, got {value}"
            )));
        }
        Ok(())
    }
}
