use crate::emojis::read_emojis;

use std::fs;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use tempfile::TempDir;

#[tokio::test]
async fn given_image_files_when_read_then_stem_maps_to_url() {
    // Given
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("kekw.png"), b"png").unwrap();
    fs::write(temp.path().join("party.blob.gif"), b"gif").unwrap();

    // When
    let emojis = read_emojis(temp.path()).await.unwrap();

    // Then
    assert_that!(emojis.len(), eq(2));
    assert_eq!(emojis["kekw"], "/emojis/kekw.png");
    assert_eq!(emojis["party.blob"], "/emojis/party.blob.gif");
}

#[tokio::test]
async fn given_gitkeep_and_hidden_files_when_read_then_skipped() {
    // Given
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".gitkeep"), b"").unwrap();
    fs::write(temp.path().join(".DS_Store"), b"").unwrap();
    fs::write(temp.path().join("wave.webp"), b"webp").unwrap();

    // When
    let emojis = read_emojis(temp.path()).await.unwrap();

    // Then
    assert_eq!(emojis.keys().collect::<Vec<_>>(), vec!["wave"]);
}

#[tokio::test]
async fn given_subdirectory_and_extensionless_file_when_read_then_only_files_listed() {
    // Given
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("nested")).unwrap();
    fs::write(temp.path().join("plain"), b"raw").unwrap();

    // When
    let emojis = read_emojis(temp.path()).await;

    // Then
    assert_that!(emojis.as_ref().map(|e| e.len()), ok(eq(1)));
    assert_eq!(emojis.unwrap()["plain"], "/emojis/plain");
}

#[tokio::test]
async fn given_missing_directory_when_read_then_error() {
    let temp = TempDir::new().unwrap();

    let result = read_emojis(&temp.path().join("absent")).await;

    assert_that!(result, err(anything()));
}
