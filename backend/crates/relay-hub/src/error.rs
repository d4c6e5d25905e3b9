use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Message too large: {size} bytes (max: {max}) {location}")]
    MessageTooLarge {
        size: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Invalid message: {message} {location}")]
    InvalidMessage {
        message: String,
        location: ErrorLocation,
    },

    #[error("Heartbeat timeout after {timeout_ms}ms {location}")]
    HeartbeatTimeout {
        timeout_ms: u128,
        location: ErrorLocation,
    },

    #[error("Write timed out after {timeout_ms}ms {location}")]
    WriteTimeout {
        timeout_ms: u128,
        location: ErrorLocation,
    },

    #[error("Hub control loop is not running {location}")]
    HubClosed { location: ErrorLocation },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl HubError {
    #[track_caller]
    pub fn connection_closed<S: Into<String>>(reason: S) -> Self {
        Self::ConnectionClosed {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn message_too_large(size: usize, max: usize) -> Self {
        Self::MessageTooLarge {
            size,
            max,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_message<S: Into<String>>(message: S) -> Self {
        Self::InvalidMessage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn heartbeat_timeout(timeout: Duration) -> Self {
        Self::HeartbeatTimeout {
            timeout_ms: timeout.as_millis(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn write_timeout(timeout: Duration) -> Self {
        Self::WriteTimeout {
            timeout_ms: timeout.as_millis(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True for the two deadline failures (liveness and write)
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::HeartbeatTimeout { .. } | Self::WriteTimeout { .. }
        )
    }

    #[track_caller]
    pub fn hub_closed() -> Self {
        Self::HubClosed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Stable code used for metrics labels and HTTP error bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::MessageTooLarge { .. } => "MESSAGE_TOO_LARGE",
            Self::InvalidMessage { .. } => "INVALID_MESSAGE",
            Self::HeartbeatTimeout { .. } => "HEARTBEAT_TIMEOUT",
            Self::WriteTimeout { .. } => "WRITE_TIMEOUT",
            Self::HubClosed { .. } => "HUB_CLOSED",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
