//! Repository trait definitions for snapshot persistence

use workforce_types::Error;

use crate::model::EntityState;

/// Collaborator that stores whole entity snapshots.
///
/// The store calls `save` once per committed update; implementations
/// never see a partially applied change.
pub trait SnapshotRepository {
    /// Load the most recently saved snapshot, if any
    fn load(&self) -> Result<Option<EntityState>, Error>;

    /// Persist a full snapshot
    fn save(&self, state: &EntityState) -> Result<(), Error>;
}
