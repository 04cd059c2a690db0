//! Single-record registry operations for workers, sites, and vehicles
//!
//! Duplicate site names and plate numbers are refused before any
//! collection is rebuilt.

use workforce_types::ValidationError;

use crate::model::{SalaryRecord, Site, SiteDetails, Vehicle, VehicleDetails, Worker};

/// Comparison key for names and plates: trimmed, case-folded
fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn add_worker(workers: &[Worker], worker: Worker) -> Vec<Worker> {
    let mut result = workers.to_vec();
    result.push(worker);
    result
}

/// Replace a worker's profile. The salary ledger is edited separately and
/// is carried over from the stored record.
pub fn update_worker(workers: &[Worker], worker: Worker) -> Vec<Worker> {
    workers
        .iter()
        .map(|existing| {
            if existing.id == worker.id {
                Worker {
                    salary: existing.salary.clone(),
                    ..worker.clone()
                }
            } else {
                existing.clone()
            }
        })
        .collect()
}

pub fn set_salary(workers: &[Worker], worker_id: &str, record: SalaryRecord) -> Vec<Worker> {
    workers
        .iter()
        .map(|w| {
            let mut w = w.clone();
            if w.id == worker_id {
                w.salary = Some(record.clone());
            }
            w
        })
        .collect()
}

fn ensure_unique_site_name(sites: &[Site], name: &str, exclude_id: Option<&str>) -> Result<(), ValidationError> {
    let key = normalize_key(name);
    let taken = sites
        .iter()
        .filter(|s| Some(s.id.as_str()) != exclude_id)
        .any(|s| normalize_key(&s.name) == key);
    if taken {
        Err(ValidationError::DuplicateSiteName(name.trim().to_string()))
    } else {
        Ok(())
    }
}

pub fn add_site(sites: &[Site], site: Site) -> Result<Vec<Site>, ValidationError> {
    ensure_unique_site_name(sites, &site.name, None)?;
    let mut result = sites.to_vec();
    result.push(site);
    Ok(result)
}

/// Apply a site-edit form. Transport assignment state is left as stored.
pub fn update_site_details(
    sites: &[Site],
    site_id: &str,
    details: SiteDetails,
) -> Result<Vec<Site>, ValidationError> {
    ensure_unique_site_name(sites, &details.name, Some(site_id))?;
    Ok(sites
        .iter()
        .map(|s| {
            let mut s = s.clone();
            if s.id == site_id {
                s.name = details.name.clone();
                s.location = details.location.clone();
                s.required_skills = details.required_skills.clone();
            }
            s
        })
        .collect())
}

fn ensure_unique_plate(vehicles: &[Vehicle], plate: &str, exclude_id: Option<&str>) -> Result<(), ValidationError> {
    let key = normalize_key(plate);
    let taken = vehicles
        .iter()
        .filter(|v| Some(v.id.as_str()) != exclude_id)
        .any(|v| normalize_key(&v.plate_number) == key);
    if taken {
        Err(ValidationError::DuplicatePlateNumber(plate.trim().to_string()))
    } else {
        Ok(())
    }
}

pub fn add_vehicle(vehicles: &[Vehicle], vehicle: Vehicle) -> Result<Vec<Vehicle>, ValidationError> {
    ensure_unique_plate(vehicles, &vehicle.plate_number, None)?;
    let mut result = vehicles.to_vec();
    result.push(vehicle);
    Ok(result)
}

/// Apply a vehicle-edit form. Maintenance and violation lists are kept.
pub fn update_vehicle_details(
    vehicles: &[Vehicle],
    vehicle_id: &str,
    details: VehicleDetails,
) -> Result<Vec<Vehicle>, ValidationError> {
    ensure_unique_plate(vehicles, &details.plate_number, Some(vehicle_id))?;
    Ok(vehicles
        .iter()
        .map(|v| {
            let mut v = v.clone();
            if v.id == vehicle_id {
                v.plate_number = details.plate_number.clone();
                v.make = details.make.clone();
                v.model = details.model.clone();
                v.year = details.year;
            }
            v
        })
        .collect())
}
