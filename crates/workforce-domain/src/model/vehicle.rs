//! Vehicle and owned record type definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::worker::{Worker, WorkerId};

pub type VehicleId = String;

/// Fleet vehicle; owns its maintenance and violation records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier
    pub id: VehicleId,
    /// License plate, unique across the fleet
    pub plate_number: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceRecord>,
    #[serde(default)]
    pub violations: Vec<ViolationRecord>,
}

/// Fields a generic vehicle-edit form may change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleDetails {
    pub plate_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
}

impl Vehicle {
    pub fn new(plate_number: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            plate_number: plate_number.into(),
            make: None,
            model: None,
            year: None,
            maintenance_history: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Total spent on maintenance
    pub fn maintenance_cost(&self) -> f64 {
        self.maintenance_history.iter().map(|m| m.cost).sum()
    }

    /// Total of unpaid violation fines
    pub fn outstanding_fines(&self) -> f64 {
        self.violations
            .iter()
            .filter(|v| !v.paid)
            .map(|v| v.amount)
            .sum()
    }
}

/// Maintenance entry owned by one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub cost: f64,
    #[serde(default)]
    pub workshop: Option<String>,
}

impl MaintenanceRecord {
    pub fn new(date: NaiveDate, description: impl Into<String>, cost: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            description: description.into(),
            cost,
            workshop: None,
        }
    }
}

/// Traffic violation owned by exactly one vehicle at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub id: String,
    /// Ticket number, unique across every vehicle when non-blank
    #[serde(default)]
    pub violation_number: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub driver_id: Option<WorkerId>,
    /// Driver name captured when the record was written
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub paid: bool,
}

impl ViolationRecord {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            violation_number: None,
            date,
            description: String::new(),
            amount,
            driver_id: None,
            driver_name: None,
            paid: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.violation_number = Some(number.into());
        self
    }

    /// Attach a driver, snapshotting the current name
    pub fn with_driver(mut self, driver: &Worker) -> Self {
        self.driver_id = Some(driver.id.clone());
        self.driver_name = Some(driver.name.clone());
        self
    }

    /// Trimmed violation number, `None` when absent or blank
    pub fn business_key(&self) -> Option<&str> {
        self.violation_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_business_key_trims_and_ignores_blank() {
        let v = ViolationRecord::new(day(), 150.0).with_number("  A-77 ");
        assert_eq!(v.business_key(), Some("A-77"));

        let blank = ViolationRecord::new(day(), 150.0).with_number("   ");
        assert_eq!(blank.business_key(), None);

        assert_eq!(ViolationRecord::new(day(), 1.0).business_key(), None);
    }

    #[test]
    fn test_driver_name_is_a_snapshot() {
        let mut driver = Worker::driver("Omar", None, None, None);
        let v = ViolationRecord::new(day(), 90.0).with_driver(&driver);
        driver.name = "Omar K.".to_string();
        assert_eq!(v.driver_name.as_deref(), Some("Omar"));
    }

    #[test]
    fn test_outstanding_fines_skip_paid() {
        let mut vehicle = Vehicle::new("XYZ 1");
        let mut paid = ViolationRecord::new(day(), 100.0);
        paid.paid = true;
        vehicle.violations = vec![paid, ViolationRecord::new(day(), 40.0)];
        assert!((vehicle.outstanding_fines() - 40.0).abs() < f64::EPSILON);
    }
}
