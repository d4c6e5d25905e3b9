mod assets_config;
mod config;
mod error;
mod hub_config;
mod log_level;
mod logging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use assets_config::AssetsConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use hub_config::{
    DEFAULT_INTAKE_CAPACITY, DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_PONG_WAIT_SECS,
    DEFAULT_SEND_BUFFER_SIZE, DEFAULT_WRITE_WAIT_MS, HubConfig,
};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".relay";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_WS_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_WS_PATH: &str = "/";

const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_EMOJIS_DIR: &str = "emojis";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
