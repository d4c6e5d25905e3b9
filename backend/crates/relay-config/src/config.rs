use crate::{
    AssetsConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, HubConfig, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub hub: HubConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for RELAY_CONFIG_DIR env var, else use ./.relay/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RELAY_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        Self::load_from(&Self::config_dir()?)
    }

    /// Same as [`Config::load`] with an explicit config directory.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RELAY_CONFIG_DIR env var > ./.relay/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.hub.validate()?;
        self.assets.validate()?;

        if let Some(ref file) = self.logging.file
            && (file.contains("..") || Path::new(file).is_absolute())
        {
            return Err(ConfigError::logging(
                "logging.file must be a relative file name and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: ws={} (path {}), http={}",
            self.server.ws_addr, self.server.ws_path, self.server.http_addr
        );
        info!(
            "  hub: queue={}, intake={}, max_message={}B, pong_wait={}s, ping={}ms, write_wait={}ms, nodelay={}",
            self.hub.send_buffer_size,
            self.hub.intake_capacity,
            self.hub.max_message_size,
            self.hub.pong_wait_secs,
            self.hub.ping_period_ms(),
            self.hub.write_wait_ms,
            self.hub.tcp_nodelay
        );
        info!(
            "  assets: public={}, emojis={}",
            self.assets.public_dir, self.assets.emojis_dir
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RELAY_WS_ADDR", &mut self.server.ws_addr);
        Self::apply_env_string("RELAY_HTTP_ADDR", &mut self.server.http_addr);
        Self::apply_env_string("RELAY_WS_PATH", &mut self.server.ws_path);

        // Hub
        Self::apply_env_parse(
            "RELAY_HUB_SEND_BUFFER_SIZE",
            &mut self.hub.send_buffer_size,
        );
        Self::apply_env_parse("RELAY_HUB_INTAKE_CAPACITY", &mut self.hub.intake_capacity);
        Self::apply_env_parse(
            "RELAY_HUB_MAX_MESSAGE_SIZE",
            &mut self.hub.max_message_size,
        );
        Self::apply_env_parse("RELAY_HUB_PONG_WAIT_SECS", &mut self.hub.pong_wait_secs);
        Self::apply_env_parse("RELAY_HUB_WRITE_WAIT_MS", &mut self.hub.write_wait_ms);
        Self::apply_env_bool("RELAY_HUB_TCP_NODELAY", &mut self.hub.tcp_nodelay);

        // Assets
        Self::apply_env_string("RELAY_ASSETS_PUBLIC_DIR", &mut self.assets.public_dir);
        Self::apply_env_string("RELAY_ASSETS_EMOJIS_DIR", &mut self.assets.emojis_dir);

        // Logging
        Self::apply_env_parse("RELAY_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RELAY_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RELAY_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
