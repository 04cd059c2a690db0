//! Repository adapters for persistence layer

use std::path::PathBuf;

use workforce_infra::FileSnapshotRepository;
use workforce_store::WorkforceStore;
use workforce_types::Result;

use crate::config::Config;

/// Open file-based snapshot repository
pub fn open_snapshot_repo(config: &Config) -> Result<FileSnapshotRepository> {
    FileSnapshotRepository::open(config.store_dir()?)
}

/// Open the entity store backed by the configured data directory
pub fn open_store(config: &Config) -> Result<WorkforceStore> {
    open_store_at(config.store_dir()?)
}

/// Open the entity store at a custom directory
pub fn open_store_at(store_dir: PathBuf) -> Result<WorkforceStore> {
    let repo = FileSnapshotRepository::open(store_dir)?;
    WorkforceStore::open(Box::new(repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use workforce_domain::{EntityState, Site};

    #[test]
    fn test_snapshot_repo_tracks_store_commits() {
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("ledger")),
            ..Default::default()
        };

        let repo = open_snapshot_repo(&config).unwrap();
        assert_eq!(repo.store_path(), dir.path().join("ledger").join("workforce.json"));
        assert!(repo.saved_at().unwrap().is_none());

        let store = open_store(&config).unwrap();
        store
            .update(|s| EntityState {
                sites: vec![Site::new("Harbor")],
                ..s.clone()
            })
            .unwrap();

        assert!(repo.saved_at().unwrap().is_some());
    }
}
