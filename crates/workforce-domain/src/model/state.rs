//! The shared entity snapshot

use serde::{Deserialize, Serialize};

use super::site::Site;
use super::vehicle::Vehicle;
use super::worker::Worker;

/// One complete, consistent view of every collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityState {
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

impl EntityState {
    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub fn site(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// All workers carrying the driver skill
    pub fn drivers(&self) -> Vec<&Worker> {
        self.workers.iter().filter(|w| w.is_driver()).collect()
    }

    pub fn violation_count(&self) -> usize {
        self.vehicles.iter().map(|v| v.violations.len()).sum()
    }
}
