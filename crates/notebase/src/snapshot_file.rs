//! Snapshot file persistence for the command-line tool.
//!
//! The engine itself never touches the filesystem; these helpers load and
//! save a JSON snapshot so the CLI can operate across invocations.

use notebase_core::prelude::*;
use notebase_export::SnapshotExporter;
use notebase_store::NoteStore;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Load a store from `path`; a missing file yields an empty store
pub async fn load_store(path: &Path) -> Result<NoteStore> {
    if !fs::try_exists(path).await? {
        log::info!("No snapshot at {}, starting empty", path.display());
        return Ok(NoteStore::new());
    }

    let json = fs::read_to_string(path).await?;
    SnapshotExporter::from_json(&json)
}

/// Write the store to `path`, replacing any previous snapshot.
///
/// The snapshot is written beside the target first and renamed into place,
/// so an interrupted write never leaves a truncated file behind.
pub async fn save_store(store: &NoteStore, path: &Path, pretty: bool) -> Result<()> {
    let json = SnapshotExporter::to_json(store, pretty)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let staging = staging_path(path);
    fs::write(&staging, json).await?;
    fs::rename(&staging, path).await?;

    log::info!("Saved {} notes to {}", store.len(), path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_snapshot_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = load_store(&dir.path().join("notes.json")).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/notes.json");

        let mut store = NoteStore::new();
        store.create("Alpha", "Links to [[Beta]] #draft", Some("Work"));
        store.create("Beta", "no links", None);
        save_store(&store, &path, true).await.unwrap();

        assert!(!staging_path(&path).exists());
        let loaded = load_store(&path).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.backlinks_of("Beta").len(), 1);
        assert_eq!(
            loaded.notes().map(|n| n.title()).collect::<Vec<_>>(),
            vec!["Beta", "Alpha"]
        );
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = load_store(&path).await.unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("/data/notes.json")),
            PathBuf::from("/data/notes.json.tmp")
        );
    }
}
