use crate::{ConfigError, ConfigErrorResult, DEFAULT_EMOJIS_DIR, DEFAULT_PUBLIC_DIR};

use serde::Deserialize;

/// Directories served by the static/metadata HTTP listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub public_dir: String,
    pub emojis_dir: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            public_dir: String::from(DEFAULT_PUBLIC_DIR),
            emojis_dir: String::from(DEFAULT_EMOJIS_DIR),
        }
    }
}

impl AssetsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.public_dir.trim().is_empty() {
            return Err(ConfigError::assets("assets.public_dir cannot be empty"));
        }
        if self.emojis_dir.trim().is_empty() {
            return Err(ConfigError::assets("assets.emojis_dir cannot be empty"));
        }
        Ok(())
    }
}
