//! File-based snapshot repository implementation

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use workforce_domain::{EntityState, SnapshotRepository};
use workforce_types::{Error, Result};

/// On-disk form: the whole state under the time it was written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub saved_at: DateTime<Utc>,
    pub state: EntityState,
}

/// Older files hold the bare state without a timestamp
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFile {
    Stamped(PersistedSnapshot),
    Bare(EntityState),
}

/// File-based implementation of SnapshotRepository
///
/// Stores the entire snapshot as one JSON document.
pub struct FileSnapshotRepository {
    store_path: PathBuf,
}

impl FileSnapshotRepository {
    /// Open the repository in `store_dir`, creating the directory if needed
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("workforce.json");
        Ok(Self { store_path })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    fn read(&self) -> Result<Option<PersistedSnapshot>> {
        if !self.store_path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.store_path)?;
        let reader = BufReader::new(file);
        let stored: StoredFile = serde_json::from_reader(reader)?;
        Ok(Some(match stored {
            StoredFile::Stamped(snapshot) => snapshot,
            StoredFile::Bare(state) => PersistedSnapshot {
                saved_at: DateTime::<Utc>::UNIX_EPOCH,
                state,
            },
        }))
    }

    /// When the stored snapshot was written
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read()?.map(|s| s.saved_at))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn load(&self) -> std::result::Result<Option<EntityState>, Error> {
        Ok(self.read()?.map(|s| s.state))
    }

    fn save(&self, state: &EntityState) -> std::result::Result<(), Error> {
        let snapshot = PersistedSnapshot {
            saved_at: Utc::now(),
            state: state.clone(),
        };
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        debug!("snapshot written to {}", self.store_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use workforce_domain::{Site, Worker};

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::open(dir.path().to_path_buf()).unwrap();
        assert!(repo.load().unwrap().is_none());
        assert!(repo.saved_at().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::open(dir.path().join("data")).unwrap();

        let mut state = EntityState::default();
        state.sites.push(Site::new("Harbor").with_id("s1"));
        state.workers.push(Worker::driver("Omar", None, None, Some(12)).with_id("d1"));
        repo.save(&state).unwrap();

        assert_eq!(repo.load().unwrap(), Some(state));
        assert!(repo.saved_at().unwrap().is_some());
    }

    #[test]
    fn test_reads_bare_state_files() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::open(dir.path().to_path_buf()).unwrap();
        fs::write(
            repo.store_path(),
            r#"{"workers":[],"sites":[{"id":"s1","name":"Harbor","driverId":"d1","driverTransportCount":2,"assignedDrivers":[{"driverId":"d1","count":2}]}],"vehicles":[]}"#,
        )
        .unwrap();

        let state = repo.load().unwrap().unwrap();

        assert_eq!(state.sites[0].driver_id.as_deref(), Some("d1"));
        assert_eq!(state.sites[0].assigned_drivers[0].count, 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::open(dir.path().to_path_buf()).unwrap();
        fs::write(repo.store_path(), "not json").unwrap();

        assert!(repo.load().is_err());
    }
}
