//! Entity store holding the current workforce snapshot
//!
//! Every change is a pure updater from the previous snapshot to the next
//! one. Updaters run while the store lock is held, so at most one update is
//! in flight and no update is computed from a snapshot another update has
//! already replaced.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};
use workforce_domain::{EntityState, SnapshotRepository};
use workforce_types::{Error, Result};

struct Inner {
    state: EntityState,
    version: u64,
    repository: Option<Box<dyn SnapshotRepository + Send>>,
}

/// Store for the shared entity snapshot
pub struct WorkforceStore {
    inner: Mutex<Inner>,
}

impl WorkforceStore {
    /// Create an in-memory store seeded with `state`
    pub fn new(state: EntityState) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state,
                version: 0,
                repository: None,
            }),
        }
    }

    /// Create a store backed by a repository, loading its last snapshot
    pub fn open(repository: Box<dyn SnapshotRepository + Send>) -> Result<Self> {
        let state = repository.load()?.unwrap_or_default();
        Ok(Self {
            inner: Mutex::new(Inner {
                state,
                version: 0,
                repository: Some(repository),
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| Error::StorePoisoned)
    }

    /// Clone of the current snapshot
    pub fn snapshot(&self) -> Result<EntityState> {
        Ok(self.lock()?.state.clone())
    }

    /// Current snapshot together with the version it belongs to
    pub fn versioned_snapshot(&self) -> Result<(u64, EntityState)> {
        let inner = self.lock()?;
        Ok((inner.version, inner.state.clone()))
    }

    pub fn version(&self) -> Result<u64> {
        Ok(self.lock()?.version)
    }

    /// Apply an infallible updater. Returns the resulting version.
    pub fn update<F>(&self, f: F) -> Result<u64>
    where
        F: FnOnce(&EntityState) -> EntityState,
    {
        self.try_update(|state| Ok::<_, Error>(f(state)))
    }

    /// Apply a fallible updater. On error the snapshot and version are
    /// left exactly as they were.
    pub fn try_update<F, E>(&self, f: F) -> Result<u64>
    where
        F: FnOnce(&EntityState) -> std::result::Result<EntityState, E>,
        Error: From<E>,
    {
        let mut inner = self.lock()?;
        let next = f(&inner.state)?;
        commit(&mut inner, next)
    }

    /// Apply an updater only if the store is still at `expected`.
    ///
    /// Callers that built a draft from an earlier `versioned_snapshot` use
    /// this to avoid overwriting a change made in the meantime.
    pub fn update_if_version<F, E>(&self, expected: u64, f: F) -> Result<u64>
    where
        F: FnOnce(&EntityState) -> std::result::Result<EntityState, E>,
        Error: From<E>,
    {
        let mut inner = self.lock()?;
        if inner.version != expected {
            return Err(Error::StaleSnapshot {
                expected,
                actual: inner.version,
            });
        }
        let next = f(&inner.state)?;
        commit(&mut inner, next)
    }
}

impl Default for WorkforceStore {
    fn default() -> Self {
        Self::new(EntityState::default())
    }
}

fn commit(inner: &mut Inner, next: EntityState) -> Result<u64> {
    if next == inner.state {
        debug!("update produced no change (version {})", inner.version);
        return Ok(inner.version);
    }

    if let Some(repository) = &inner.repository {
        repository.save(&next)?;
    }

    inner.state = next;
    inner.version += 1;
    info!("store updated to version {}", inner.version);
    Ok(inner.version)
}
