use crate::{ConfigError, ConfigErrorResult, DEFAULT_HTTP_ADDR, DEFAULT_WS_ADDR, DEFAULT_WS_PATH};

use std::net::SocketAddr;

use serde::Deserialize;

/// Listen addresses for the two listeners.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Subscriber WebSocket listener
    pub ws_addr: String,
    /// Static asset / metadata HTTP listener
    pub http_addr: String,
    /// Route the WebSocket upgrade is served on
    pub ws_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ws_addr: String::from(DEFAULT_WS_ADDR),
            http_addr: String::from(DEFAULT_HTTP_ADDR),
            ws_path: String::from(DEFAULT_WS_PATH),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let ws_addr = Self::parse_addr("server.ws_addr", &self.ws_addr)?;
        let http_addr = Self::parse_addr("server.http_addr", &self.http_addr)?;

        // Port 0 lets the OS pick, so two zero ports never collide.
        if ws_addr.port() != 0 && ws_addr == http_addr {
            return Err(ConfigError::server(format!(
                "server.ws_addr and server.http_addr must differ, both are {ws_addr}"
            )));
        }

        if !self.ws_path.starts_with('/') {
            return Err(ConfigError::server(format!(
                "server.ws_path must start with '/', got {:?}",
                self.ws_path
            )));
        }

        Ok(())
    }

    /// Parsed WebSocket listen address.
    pub fn ws_socket_addr(&self) -> ConfigErrorResult<SocketAddr> {
        Self::parse_addr("server.ws_addr", &self.ws_addr)
    }

    /// Parsed HTTP listen address.
    pub fn http_socket_addr(&self) -> ConfigErrorResult<SocketAddr> {
        Self::parse_addr("server.http_addr", &self.http_addr)
    }

    #[track_caller]
    fn parse_addr(field: &str, value: &str) -> ConfigErrorResult<SocketAddr> {
        // ":8080" is shorthand for all interfaces.
        let normalized = if value.starts_with(':') {
            format!("0.0.0.0{value}")
        } else {
            value.to_string()
        };

        normalized.parse().map_err(|e| {
            ConfigError::server(format!("{field} is not a valid socket address ({value}): {e}"))
        })
    }
}
