use relay_config::Config;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "relay-server")]
#[command(about = "Fans out live chat events to WebSocket overlay clients")]
#[command(version)]
pub struct Cli {
    /// Subscriber WebSocket listen address, e.g. ":8080" or "127.0.0.1:8080"
    #[arg(long)]
    pub ws_addr: Option<String>,

    /// Static asset / metadata HTTP listen address
    #[arg(long)]
    pub http_addr: Option<String>,

    /// Directory holding config.toml (defaults to RELAY_CONFIG_DIR or ./.relay)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Flags win over config.toml and RELAY_* env vars
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref addr) = self.ws_addr {
            config.server.ws_addr = addr.clone();
        }
        if let Some(ref addr) = self.http_addr {
            config.server.http_addr = addr.clone();
        }
        if let Some(ref level) = self.log_level {
            let Ok(level) = level.parse();
            config.logging.level = level;
        }
    }
}
