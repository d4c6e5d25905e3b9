use relay_config::AssetsConfig;
use relay_hub::{AppState, Hub, Ingress};

use std::path::PathBuf;

/// State for the static/metadata HTTP listener
#[derive(Clone)]
pub struct HttpState {
    pub hub: Hub,
    pub ingress: Ingress,
    pub emojis_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl HttpState {
    pub fn new(app_state: &AppState, assets: &AssetsConfig) -> Self {
        Self {
            hub: app_state.hub.clone(),
            ingress: app_state.ingress.clone(),
            emojis_dir: PathBuf::from(&assets.emojis_dir),
            public_dir: PathBuf::from(&assets.public_dir),
        }
    }
}
