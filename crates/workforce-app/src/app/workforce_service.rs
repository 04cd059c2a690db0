//! Workforce Service - use cases over the shared entity store
//!
//! Each use case runs as a single store update: the current snapshot is
//! read, the matching domain service computes the replacement, and the
//! store swaps it in. Lookups by id happen inside the same update so a
//! caller never validates against one snapshot and writes to another.
//!
//! Domain services treat unknown ids as silent no-ops. This layer reports
//! them as `Error::NotFound` instead, since a CLI user naming a missing id
//! almost always made a typo.

use serde::Serialize;
use tracing::info;
use workforce_domain::service::{self, DesiredAssignment, PayrollSummary, SalaryView};
use workforce_domain::{
    EntityState, MaintenanceRecord, SalaryRecord, Site, SiteDetails, Vehicle, VehicleDetails,
    ViolationRecord, Worker,
};
use workforce_store::WorkforceStore;
use workforce_types::{Error, Result};

/// Transport overview of one site
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTransportSummary {
    pub site_id: String,
    pub site_name: String,
    pub primary_driver_id: Option<String>,
    pub primary_driver_name: Option<String>,
    pub driver_count: usize,
    pub total_transport_count: u64,
}

pub struct WorkforceService {
    store: WorkforceStore,
}

fn require_worker<'a>(state: &'a EntityState, id: &str) -> Result<&'a Worker> {
    state
        .worker(id)
        .ok_or_else(|| Error::NotFound(format!("worker {}", id)))
}

fn require_site<'a>(state: &'a EntityState, id: &str) -> Result<&'a Site> {
    state
        .site(id)
        .ok_or_else(|| Error::NotFound(format!("site {}", id)))
}

fn require_vehicle<'a>(state: &'a EntityState, id: &str) -> Result<&'a Vehicle> {
    state
        .vehicle(id)
        .ok_or_else(|| Error::NotFound(format!("vehicle {}", id)))
}

impl WorkforceService {
    pub fn new(store: WorkforceStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &WorkforceStore {
        &self.store
    }

    pub fn snapshot(&self) -> Result<EntityState> {
        self.store.snapshot()
    }

    // ---- workers ----

    /// Register a worker (or driver) and return its id
    pub fn add_worker(&self, worker: Worker) -> Result<String> {
        let id = worker.id.clone();
        self.store.update(|s| EntityState {
            workers: service::add_worker(&s.workers, worker),
            ..s.clone()
        })?;
        info!("added worker {}", id);
        Ok(id)
    }

    /// Edit a worker's profile against the current snapshot.
    ///
    /// The id is kept and the salary ledger is left as stored.
    pub fn update_worker<F>(&self, worker_id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Worker),
    {
        self.store.try_update(|s| {
            let mut worker = require_worker(s, worker_id)?.clone();
            edit(&mut worker);
            worker.id = worker_id.to_string();
            Ok::<_, Error>(EntityState {
                workers: service::update_worker(&s.workers, worker),
                ..s.clone()
            })
        })?;
        Ok(())
    }

    /// Delete a worker and purge its site assignments
    pub fn delete_worker(&self, worker_id: &str) -> Result<()> {
        self.store.try_update(|s| {
            require_worker(s, worker_id)?;
            let outcome = service::cascade_delete_worker(&s.sites, &s.workers, worker_id);
            Ok::<_, Error>(EntityState {
                workers: outcome.workers,
                sites: outcome.sites,
                ..s.clone()
            })
        })?;
        info!("deleted worker {}", worker_id);
        Ok(())
    }

    pub fn set_salary(&self, worker_id: &str, record: SalaryRecord) -> Result<()> {
        self.store.try_update(|s| {
            require_worker(s, worker_id)?;
            Ok::<_, Error>(EntityState {
                workers: service::set_salary(&s.workers, worker_id, record),
                ..s.clone()
            })
        })?;
        Ok(())
    }

    pub fn salary_view(&self, worker_id: &str) -> Result<SalaryView> {
        let state = self.store.snapshot()?;
        let worker = require_worker(&state, worker_id)?;
        Ok(service::derive_salary_view(worker.salary.as_ref()))
    }

    /// Salary view of every worker plus payroll totals
    pub fn payroll(&self) -> Result<(Vec<(Worker, SalaryView)>, PayrollSummary)> {
        let state = self.store.snapshot()?;
        let rows = state
            .workers
            .iter()
            .map(|w| (w.clone(), service::derive_salary_view(w.salary.as_ref())))
            .collect();
        Ok((rows, service::payroll_summary(&state.workers)))
    }

    // ---- sites and transport assignments ----

    pub fn add_site(&self, site: Site) -> Result<String> {
        let id = site.id.clone();
        self.store.try_update(|s| {
            service::add_site(&s.sites, site).map(|sites| EntityState {
                sites,
                ..s.clone()
            })
        })?;
        info!("added site {}", id);
        Ok(id)
    }

    /// Edit a site's name, location, or requirements. Assignments are untouched.
    pub fn update_site<F>(&self, site_id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut SiteDetails),
    {
        self.store.try_update(|s| {
            let site = require_site(s, site_id)?;
            let mut details = SiteDetails {
                name: site.name.clone(),
                location: site.location.clone(),
                required_skills: site.required_skills.clone(),
            };
            edit(&mut details);
            let sites = service::update_site_details(&s.sites, site_id, details)?;
            Ok::<_, Error>(EntityState {
                sites,
                ..s.clone()
            })
        })?;
        Ok(())
    }

    /// Replace a driver's full set of site assignments.
    ///
    /// Rejects forms naming the same site twice and ids that are not drivers.
    pub fn edit_driver_assignments(&self, driver_id: &str, desired: &[DesiredAssignment]) -> Result<()> {
        if let Some(site_id) = service::find_duplicate_site(desired) {
            return Err(Error::InvalidInput(format!(
                "site {} selected more than once",
                site_id
            )));
        }

        self.store.try_update(|s| -> Result<EntityState> {
            let driver = require_worker(s, driver_id)?;
            if !driver.is_driver() {
                return Err(Error::InvalidInput(format!(
                    "worker {} is not a driver",
                    driver_id
                )));
            }
            for row in desired.iter().filter(|d| !d.site_id.is_empty()) {
                require_site(s, &row.site_id)?;
            }
            Ok(EntityState {
                sites: service::reconcile_driver_assignments(&s.sites, driver_id, desired),
                ..s.clone()
            })
        })?;
        info!("reconciled assignments for driver {}", driver_id);
        Ok(())
    }

    /// Current assignment rows of one driver
    pub fn driver_roster(&self, driver_id: &str) -> Result<Vec<DesiredAssignment>> {
        let state = self.store.snapshot()?;
        require_worker(&state, driver_id)?;
        Ok(service::driver_assignments(&state.sites, driver_id))
    }

    pub fn site_transport_summaries(&self) -> Result<Vec<SiteTransportSummary>> {
        let state = self.store.snapshot()?;
        Ok(state
            .sites
            .iter()
            .map(|site| SiteTransportSummary {
                site_id: site.id.clone(),
                site_name: site.name.clone(),
                primary_driver_id: site.driver_id.clone(),
                primary_driver_name: site
                    .driver_id
                    .as_deref()
                    .and_then(|id| state.worker(id))
                    .map(|w| w.name.clone()),
                driver_count: site.assigned_drivers.len(),
                total_transport_count: site.total_transport_count(),
            })
            .collect())
    }

    // ---- vehicles ----

    pub fn add_vehicle(&self, vehicle: Vehicle) -> Result<String> {
        let id = vehicle.id.clone();
        self.store.try_update(|s| {
            service::add_vehicle(&s.vehicles, vehicle).map(|vehicles| EntityState {
                vehicles,
                ..s.clone()
            })
        })?;
        info!("added vehicle {}", id);
        Ok(id)
    }

    pub fn update_vehicle<F>(&self, vehicle_id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut VehicleDetails),
    {
        self.store.try_update(|s| {
            let vehicle = require_vehicle(s, vehicle_id)?;
            let mut details = VehicleDetails {
                plate_number: vehicle.plate_number.clone(),
                make: vehicle.make.clone(),
                model: vehicle.model.clone(),
                year: vehicle.year,
            };
            edit(&mut details);
            let vehicles = service::update_vehicle_details(&s.vehicles, vehicle_id, details)?;
            Ok::<_, Error>(EntityState {
                vehicles,
                ..s.clone()
            })
        })?;
        Ok(())
    }

    pub fn delete_vehicle(&self, vehicle_id: &str) -> Result<()> {
        self.store.try_update(|s| {
            require_vehicle(s, vehicle_id)?;
            Ok::<_, Error>(EntityState {
                vehicles: service::delete_vehicle(&s.vehicles, vehicle_id),
                ..s.clone()
            })
        })?;
        info!("deleted vehicle {}", vehicle_id);
        Ok(())
    }

    // ---- violations ----

    /// Record a new violation on `vehicle_id`
    pub fn add_violation(&self, vehicle_id: &str, record: ViolationRecord) -> Result<String> {
        let id = record.id.clone();
        self.store.try_update(|s| {
            require_vehicle(s, vehicle_id)?;
            let vehicles = service::add_or_update_violation(&s.vehicles, record, None, vehicle_id)?;
            Ok::<_, Error>(EntityState {
                vehicles,
                ..s.clone()
            })
        })?;
        Ok(id)
    }

    /// Edit a violation, optionally moving it to `dest_vehicle_id`.
    ///
    /// The owner is looked up and the edit applied inside one update.
    pub fn update_violation<F>(&self, violation_id: &str, dest_vehicle_id: Option<&str>, edit: F) -> Result<()>
    where
        F: FnOnce(&mut ViolationRecord),
    {
        self.store.try_update(|s| {
            let owner = service::find_violation_owner(&s.vehicles, violation_id)
                .ok_or_else(|| Error::NotFound(format!("violation {}", violation_id)))?;
            let dest = match dest_vehicle_id {
                Some(dest) => require_vehicle(s, dest)?.id.as_str(),
                None => owner.id.as_str(),
            };
            let mut record = owner
                .violations
                .iter()
                .find(|r| r.id == violation_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("violation {}", violation_id)))?;
            edit(&mut record);
            record.id = violation_id.to_string();

            let vehicles = service::add_or_update_violation(&s.vehicles, record, Some(owner.id.as_str()), dest)?;
            Ok::<_, Error>(EntityState {
                vehicles,
                ..s.clone()
            })
        })?;
        Ok(())
    }

    pub fn delete_violation(&self, violation_id: &str) -> Result<()> {
        self.store.try_update(|s| {
            let owner = service::find_violation_owner(&s.vehicles, violation_id)
                .ok_or_else(|| Error::NotFound(format!("violation {}", violation_id)))?;
            Ok::<_, Error>(EntityState {
                vehicles: service::delete_violation(&s.vehicles, &owner.id, violation_id),
                ..s.clone()
            })
        })?;
        Ok(())
    }

    // ---- maintenance ----

    pub fn add_maintenance(&self, vehicle_id: &str, record: MaintenanceRecord) -> Result<String> {
        let id = record.id.clone();
        self.store.try_update(|s| {
            require_vehicle(s, vehicle_id)?;
            Ok::<_, Error>(EntityState {
                vehicles: service::add_maintenance(&s.vehicles, vehicle_id, record),
                ..s.clone()
            })
        })?;
        Ok(id)
    }

    pub fn update_maintenance<F>(&self, vehicle_id: &str, record_id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut MaintenanceRecord),
    {
        self.store.try_update(|s| {
            let mut record = require_vehicle(s, vehicle_id)?
                .maintenance_history
                .iter()
                .find(|m| m.id == record_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("maintenance record {}", record_id)))?;
            edit(&mut record);
            record.id = record_id.to_string();
            Ok::<_, Error>(EntityState {
                vehicles: service::update_maintenance(&s.vehicles, vehicle_id, record),
                ..s.clone()
            })
        })?;
        Ok(())
    }

    pub fn delete_maintenance(&self, vehicle_id: &str, record_id: &str) -> Result<()> {
        self.store.try_update(|s| {
            require_vehicle(s, vehicle_id)?;
            Ok::<_, Error>(EntityState {
                vehicles: service::delete_maintenance(&s.vehicles, vehicle_id, record_id),
                ..s.clone()
            })
        })?;
        Ok(())
    }
}
