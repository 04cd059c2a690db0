//! Worker-related type definitions

use serde::{Deserialize, Serialize};

use super::salary::SalaryRecord;
use super::site::SiteId;

pub type WorkerId = String;

/// Labor skill tag
///
/// Serialized as a plain string so tags written by older front ends
/// (or ones this enum does not know) survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Skill {
    Worker,
    Driver,
    Engineer,
    Other(String),
}

impl Skill {
    pub fn as_str(&self) -> &str {
        match self {
            Skill::Worker => "worker",
            Skill::Driver => "driver",
            Skill::Engineer => "engineer",
            Skill::Other(tag) => tag,
        }
    }
}

impl From<String> for Skill {
    fn from(tag: String) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "worker" => Skill::Worker,
            "driver" => Skill::Driver,
            "engineer" => Skill::Engineer,
            _ => Skill::Other(tag),
        }
    }
}

impl From<&str> for Skill {
    fn from(tag: &str) -> Self {
        Skill::from(tag.to_string())
    }
}

impl From<Skill> for String {
    fn from(skill: Skill) -> Self {
        skill.as_str().to_string()
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A worker on the payroll, drivers included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Unique identifier
    pub id: WorkerId,
    /// Display name
    pub name: String,
    /// Skill tag; `Skill::Driver` enables the transport attributes
    pub skill: Skill,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    /// Plate of the car the driver operates (drivers only)
    #[serde(default)]
    pub driver_car_plate: Option<String>,
    /// Car type, e.g. "bus" or "van" (drivers only)
    #[serde(default)]
    pub driver_car_type: Option<String>,
    /// Passenger capacity (drivers only)
    #[serde(default)]
    pub driver_capacity: Option<u32>,
    /// Single-site assignment for non-driver workers
    #[serde(default)]
    pub assigned_site_id: Option<SiteId>,
    /// Payroll ledger
    #[serde(default)]
    pub salary: Option<SalaryRecord>,
}

impl Worker {
    pub fn new(name: impl Into<String>, skill: Skill) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            skill,
            phone: None,
            nationality: None,
            driver_car_plate: None,
            driver_car_type: None,
            driver_capacity: None,
            assigned_site_id: None,
            salary: None,
        }
    }

    pub fn driver(
        name: impl Into<String>,
        car_plate: Option<String>,
        car_type: Option<String>,
        capacity: Option<u32>,
    ) -> Self {
        let mut worker = Self::new(name, Skill::Driver);
        worker.driver_car_plate = car_plate;
        worker.driver_car_type = car_type;
        worker.driver_capacity = capacity;
        worker
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_site(mut self, site_id: impl Into<String>) -> Self {
        self.assigned_site_id = Some(site_id.into());
        self
    }

    pub fn is_driver(&self) -> bool {
        self.skill == Skill::Driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_tag_parsing() {
        assert_eq!(Skill::from("driver"), Skill::Driver);
        assert_eq!(Skill::from(" Engineer "), Skill::Engineer);
        assert_eq!(Skill::from("welder"), Skill::Other("welder".to_string()));
    }

    #[test]
    fn test_unknown_skill_survives_serialization() {
        let worker = Worker::new("Ali", Skill::Other("welder".to_string())).with_id("w1");
        let json = serde_json::to_string(&worker).unwrap();
        assert!(json.contains("\"skill\":\"welder\""));
        let back: Worker = serde_json::from_str(&json).unwrap();
        assert_eq!(back.skill, Skill::Other("welder".to_string()));
    }

    #[test]
    fn test_driver_constructor() {
        let driver = Worker::driver("Omar", Some("ABC 123".to_string()), None, Some(14));
        assert!(driver.is_driver());
        assert_eq!(driver.driver_capacity, Some(14));
        assert!(driver.assigned_site_id.is_none());
    }
}
