//! Workforce domain: entities, reconciliation services, and repository traits
//!
//! Every service in this crate is a pure `snapshot -> snapshot` function.
//! Callers hand in the current collections and receive replacement
//! collections; nothing is mutated in place.

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::SnapshotRepository;
