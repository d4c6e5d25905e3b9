use crate::HttpState;
use crate::api_error::{ApiError, Result as ApiResult};

use std::collections::BTreeMap;
use std::path::Path;

use axum::{Json, extract::State};
use serde::Serialize;

/// Body of `GET /api/emojis`
#[derive(Debug, Serialize)]
pub struct EmojiListResponse {
    /// File stem -> URL under `/emojis/`
    pub emojis: BTreeMap<String, String>,
}

/// GET /api/emojis - custom emoji images available to overlays
pub async fn list_emojis(State(state): State<HttpState>) -> ApiResult<Json<EmojiListResponse>> {
    let emojis = read_emojis(&state.emojis_dir).await?;
    log::debug!("Listing {} emojis", emojis.len());
    Ok(Json(EmojiListResponse { emojis }))
}

/// Map every regular file in `dir` from its stem to its public URL.
///
/// Hidden files (including `.gitkeep`) are skipped. The stem is everything
/// before the last dot, so `party.blob.gif` becomes `party.blob`.
pub async fn read_emojis(dir: &Path) -> ApiResult<BTreeMap<String, String>> {
    let read_failed = |e: std::io::Error| {
        ApiError::internal(format!(
            "Failed to read emojis directory {}: {e}",
            dir.display()
        ))
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_failed)?;
    let mut emojis = BTreeMap::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        // Follows symlinks
        match tokio::fs::metadata(entry.path()).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => continue,
        }

        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        emojis.insert(stem.to_string(), format!("/emojis/{name}"));
    }

    Ok(emojis)
}
