//! Cascade deletion of workers and vehicles

use tracing::debug;

use crate::model::{Site, Vehicle, Worker};

/// Collections after a worker deletion
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    pub sites: Vec<Site>,
    pub workers: Vec<Worker>,
}

/// Remove a worker and purge every site reference to it.
///
/// A legacy slot held by the deleted worker is vacated without promoting a
/// remaining driver, unlike an assignment edit. The site can therefore be
/// left with drivers in `assigned_drivers` and an empty legacy slot until
/// one of those drivers is next edited. Unknown ids leave both collections
/// unchanged.
pub fn cascade_delete_worker(sites: &[Site], workers: &[Worker], worker_id: &str) -> CascadeOutcome {
    let sites = sites
        .iter()
        .map(|site| {
            let mut site = site.clone();
            if site.driver_id.as_deref() == Some(worker_id) {
                debug!("site {}: vacating legacy slot of deleted worker {}", site.id, worker_id);
                site.driver_id = None;
                site.driver_transport_count = None;
            }
            site.assigned_drivers.retain(|a| a.driver_id != worker_id);
            site
        })
        .collect();

    let workers = workers
        .iter()
        .filter(|w| w.id != worker_id)
        .cloned()
        .collect();

    CascadeOutcome { sites, workers }
}

/// Remove a vehicle. Its records are owned, so nothing else refers to it.
pub fn delete_vehicle(vehicles: &[Vehicle], vehicle_id: &str) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.id != vehicle_id)
        .cloned()
        .collect()
}
