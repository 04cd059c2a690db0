//! Maintenance records
//!
//! Same add/update/delete shape as violations, but records stay with the
//! vehicle they were written on and carry no uniqueness constraint.

use crate::model::{MaintenanceRecord, Vehicle};

fn map_vehicle<F>(vehicles: &[Vehicle], vehicle_id: &str, mut f: F) -> Vec<Vehicle>
where
    F: FnMut(&mut Vehicle),
{
    vehicles
        .iter()
        .map(|v| {
            let mut v = v.clone();
            if v.id == vehicle_id {
                f(&mut v);
            }
            v
        })
        .collect()
}

/// Prepend a record to the vehicle's history
pub fn add_maintenance(vehicles: &[Vehicle], vehicle_id: &str, record: MaintenanceRecord) -> Vec<Vehicle> {
    map_vehicle(vehicles, vehicle_id, |v| {
        v.maintenance_history.insert(0, record.clone())
    })
}

/// Replace the record with the same id, keeping its position
pub fn update_maintenance(vehicles: &[Vehicle], vehicle_id: &str, record: MaintenanceRecord) -> Vec<Vehicle> {
    map_vehicle(vehicles, vehicle_id, |v| {
        for existing in v.maintenance_history.iter_mut().filter(|m| m.id == record.id) {
            *existing = record.clone();
        }
    })
}

pub fn delete_maintenance(vehicles: &[Vehicle], vehicle_id: &str, record_id: &str) -> Vec<Vehicle> {
    map_vehicle(vehicles, vehicle_id, |v| {
        v.maintenance_history.retain(|m| m.id != record_id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, cost: f64) -> MaintenanceRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut r = MaintenanceRecord::new(date, "Oil change", cost);
        r.id = id.to_string();
        r
    }

    fn fleet() -> Vec<Vehicle> {
        let mut v1 = Vehicle::new("AAA 111").with_id("v1");
        v1.maintenance_history = vec![record("m1", 120.0)];
        vec![v1, Vehicle::new("BBB 222").with_id("v2")]
    }

    #[test]
    fn test_add_prepends() {
        let result = add_maintenance(&fleet(), "v1", record("m2", 60.0));
        let ids: Vec<_> = result[0].maintenance_history.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1"]);
        assert!((result[0].maintenance_cost() - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_content_is_allowed() {
        let result = add_maintenance(&fleet(), "v1", record("m2", 120.0));
        assert_eq!(result[0].maintenance_history.len(), 2);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let result = update_maintenance(&fleet(), "v1", record("m1", 99.0));
        assert_eq!(result[0].maintenance_history.len(), 1);
        assert!((result[0].maintenance_history[0].cost - 99.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_and_unknown_vehicle() {
        let result = delete_maintenance(&fleet(), "v1", "m1");
        assert!(result[0].maintenance_history.is_empty());

        assert_eq!(add_maintenance(&fleet(), "ghost", record("m2", 1.0)), fleet());
    }
}
