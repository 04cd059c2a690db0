//! Violation records across the fleet
//!
//! Violations are owned by one vehicle at a time and may be reassigned to
//! another. A non-blank violation number must be unique across the
//! violations of every vehicle, not just the owning one.

use tracing::{debug, warn};
use workforce_types::ValidationError;

use crate::model::{Vehicle, ViolationRecord};

/// Vehicle currently holding `violation_id`
pub fn find_violation_owner<'a>(vehicles: &'a [Vehicle], violation_id: &str) -> Option<&'a Vehicle> {
    vehicles
        .iter()
        .find(|v| v.violations.iter().any(|r| r.id == violation_id))
}

/// Reject `record` if another violation anywhere already carries its number.
fn ensure_unique_number(vehicles: &[Vehicle], record: &ViolationRecord) -> Result<(), ValidationError> {
    let Some(number) = record.business_key() else {
        return Ok(());
    };

    let taken = vehicles
        .iter()
        .flat_map(|v| v.violations.iter())
        .filter(|r| r.id != record.id)
        .any(|r| r.business_key() == Some(number));

    if taken {
        Err(ValidationError::DuplicateViolationNumber(number.to_string()))
    } else {
        Ok(())
    }
}

/// Add, update, or move a violation.
///
/// - `origin_vehicle_id == None`: add to the destination (prepended).
/// - origin equals destination: replace the record in place.
/// - origin differs: remove the record from whichever vehicle holds it and
///   prepend it to the destination in the same returned snapshot. A stale
///   `origin_vehicle_id` never leaves a second copy behind.
///
/// The uniqueness check runs before anything else; on rejection the input is
/// left as it was. A move whose destination does not exist is ignored, so the
/// record is never dropped from its origin without landing somewhere.
pub fn add_or_update_violation(
    vehicles: &[Vehicle],
    record: ViolationRecord,
    origin_vehicle_id: Option<&str>,
    dest_vehicle_id: &str,
) -> Result<Vec<Vehicle>, ValidationError> {
    ensure_unique_number(vehicles, &record)?;

    let result = match origin_vehicle_id {
        None => vehicles
            .iter()
            .map(|v| {
                let mut v = v.clone();
                if v.id == dest_vehicle_id {
                    v.violations.insert(0, record.clone());
                }
                v
            })
            .collect(),

        Some(origin) if origin == dest_vehicle_id => vehicles
            .iter()
            .map(|v| {
                let mut v = v.clone();
                if v.id == dest_vehicle_id {
                    for existing in v.violations.iter_mut().filter(|r| r.id == record.id) {
                        *existing = record.clone();
                    }
                }
                v
            })
            .collect(),

        Some(origin) => {
            if !vehicles.iter().any(|v| v.id == dest_vehicle_id) {
                warn!(
                    "ignoring move of violation {} to unknown vehicle {}",
                    record.id, dest_vehicle_id
                );
                return Ok(vehicles.to_vec());
            }
            let owner = find_violation_owner(vehicles, &record.id).map(|v| v.id.as_str());
            if owner != Some(origin) {
                warn!(
                    "violation {} is held by {:?}, not vehicle {}; moving from its actual holder",
                    record.id, owner, origin
                );
            }
            debug!(
                "moving violation {} from vehicle {} to {}",
                record.id, origin, dest_vehicle_id
            );
            vehicles
                .iter()
                .map(|v| {
                    let mut v = v.clone();
                    v.violations.retain(|r| r.id != record.id);
                    if v.id == dest_vehicle_id {
                        v.violations.insert(0, record.clone());
                    }
                    v
                })
                .collect()
        }
    };

    Ok(result)
}

/// Remove a violation from its owning vehicle
pub fn delete_violation(vehicles: &[Vehicle], vehicle_id: &str, violation_id: &str) -> Vec<Vehicle> {
    vehicles
        .iter()
        .map(|v| {
            let mut v = v.clone();
            if v.id == vehicle_id {
                v.violations.retain(|r| r.id != violation_id);
            }
            v
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn fleet() -> Vec<Vehicle> {
        let mut v1 = Vehicle::new("AAA 111").with_id("v1");
        v1.violations = vec![
            ViolationRecord::new(day(), 300.0).with_id("r1").with_number("T-100"),
            ViolationRecord::new(day(), 150.0).with_id("r2"),
        ];
        let mut v2 = Vehicle::new("BBB 222").with_id("v2");
        v2.violations = vec![ViolationRecord::new(day(), 500.0).with_id("r3").with_number("T-200")];
        vec![v1, v2, Vehicle::new("CCC 333").with_id("v3")]
    }

    fn ids(vehicle: &Vehicle) -> Vec<&str> {
        vehicle.violations.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_add_prepends_to_destination() {
        let record = ViolationRecord::new(day(), 80.0).with_id("r9").with_number("T-900");

        let result = add_or_update_violation(&fleet(), record, None, "v2").unwrap();

        assert_eq!(ids(&result[1]), vec!["r9", "r3"]);
        assert_eq!(result[0], fleet()[0]);
    }

    #[test]
    fn test_add_rejects_number_used_on_another_vehicle() {
        let vehicles = fleet();
        let record = ViolationRecord::new(day(), 80.0).with_id("r9").with_number(" T-200 ");

        let err = add_or_update_violation(&vehicles, record, None, "v1").unwrap_err();

        assert_eq!(err, ValidationError::DuplicateViolationNumber("T-200".to_string()));
        assert_eq!(vehicles, fleet());
    }

    #[test]
    fn test_blank_numbers_never_collide() {
        let record = ViolationRecord::new(day(), 80.0).with_id("r9").with_number("  ");

        let result = add_or_update_violation(&fleet(), record, None, "v1").unwrap();

        assert_eq!(ids(&result[0]), vec!["r9", "r1", "r2"]);
    }

    #[test]
    fn test_update_in_place_keeps_position_and_own_number() {
        let mut record = fleet()[0].violations[1].clone();
        record.amount = 175.0;
        record.violation_number = Some("T-101".to_string());

        let result = add_or_update_violation(&fleet(), record, Some("v1"), "v1").unwrap();

        assert_eq!(ids(&result[0]), vec!["r1", "r2"]);
        assert!((result[0].violations[1].amount - 175.0).abs() < f64::EPSILON);

        // Re-saving r1 with its own number is not a conflict
        let r1 = fleet()[0].violations[0].clone();
        assert!(add_or_update_violation(&fleet(), r1, Some("v1"), "v1").is_ok());
    }

    #[test]
    fn test_update_rejects_number_taken_by_other_record() {
        let mut record = fleet()[0].violations[1].clone();
        record.violation_number = Some("T-100".to_string());

        let result = add_or_update_violation(&fleet(), record, Some("v1"), "v1");

        assert!(matches!(result, Err(ValidationError::DuplicateViolationNumber(_))));
    }

    #[test]
    fn test_move_between_vehicles() {
        let before = fleet();
        let mut record = before[0].violations[0].clone();
        record.paid = true;

        let result = add_or_update_violation(&before, record, Some("v1"), "v2").unwrap();

        assert_eq!(ids(&result[0]), vec!["r2"]);
        assert_eq!(ids(&result[1]), vec!["r1", "r3"]);
        assert!(result[1].violations[0].paid);

        let before_total: usize = before.iter().map(|v| v.violations.len()).sum();
        let after_total: usize = result.iter().map(|v| v.violations.len()).sum();
        assert_eq!(before_total, after_total);

        let holders = result
            .iter()
            .filter(|v| v.violations.iter().any(|r| r.id == "r1"))
            .count();
        assert_eq!(holders, 1);
    }

    #[test]
    fn test_move_with_wrong_origin_keeps_single_holder() {
        let record = fleet()[0].violations[0].clone();

        let result = add_or_update_violation(&fleet(), record, Some("v2"), "v3").unwrap();

        let holders: Vec<&str> = result
            .iter()
            .filter(|v| v.violations.iter().any(|r| r.id == "r1"))
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(holders, vec!["v3"]);
        assert_eq!(ids(&result[0]), vec!["r2"]);
        assert_eq!(ids(&result[1]), vec!["r3"]);
        assert_eq!(result.iter().map(|v| v.violations.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_move_to_unknown_vehicle_is_ignored() {
        let record = fleet()[0].violations[0].clone();

        let result = add_or_update_violation(&fleet(), record, Some("v1"), "ghost").unwrap();

        assert_eq!(result, fleet());
    }

    #[test]
    fn test_move_checks_uniqueness_first() {
        let mut record = fleet()[0].violations[1].clone();
        record.violation_number = Some("T-200".to_string());

        let result = add_or_update_violation(&fleet(), record, Some("v1"), "v3");

        assert!(result.is_err());
    }

    #[test]
    fn test_delete_violation() {
        let result = delete_violation(&fleet(), "v1", "r1");
        assert_eq!(ids(&result[0]), vec!["r2"]);
        assert_eq!(result[1], fleet()[1]);

        // Wrong owner: nothing happens
        assert_eq!(delete_violation(&fleet(), "v2", "r1"), fleet());
    }

    #[test]
    fn test_find_violation_owner() {
        let vehicles = fleet();
        assert_eq!(find_violation_owner(&vehicles, "r3").map(|v| v.id.as_str()), Some("v2"));
        assert!(find_violation_owner(&vehicles, "nope").is_none());
    }
}
