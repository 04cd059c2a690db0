//! Infrastructure adapters for the workforce ledger

pub mod persistence;

pub use persistence::FileSnapshotRepository;
