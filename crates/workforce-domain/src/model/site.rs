//! Project site type definitions

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::worker::WorkerId;

pub type SiteId = String;

/// One driver's transport assignment to a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverAssignment {
    pub driver_id: WorkerId,
    /// Number of transport runs
    pub count: u32,
}

/// Project site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Unique identifier
    pub id: SiteId,
    /// Site name, unique ignoring case and surrounding whitespace
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Headcount needed per skill tag
    #[serde(default)]
    pub required_skills: BTreeMap<String, u32>,
    /// Authoritative multi-driver assignment list (insertion ordered)
    #[serde(default)]
    pub assigned_drivers: Vec<DriverAssignment>,
    /// Legacy single-driver slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<WorkerId>,
    /// Legacy single-driver transport count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_transport_count: Option<u32>,
}

/// Fields a generic site-edit form may change.
///
/// Carries no assignment state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteDetails {
    pub name: String,
    pub location: Option<String>,
    pub required_skills: BTreeMap<String, u32>,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            location: None,
            required_skills: BTreeMap::new(),
            assigned_drivers: Vec::new(),
            driver_id: None,
            driver_transport_count: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_required_skill(mut self, skill: impl Into<String>, count: u32) -> Self {
        self.required_skills.insert(skill.into(), count);
        self
    }

    /// The assignment entry for `driver_id`, if any
    pub fn assignment_for(&self, driver_id: &str) -> Option<&DriverAssignment> {
        self.assigned_drivers
            .iter()
            .find(|a| a.driver_id == driver_id)
    }

    /// Sum of transport counts across all assigned drivers.
    ///
    /// Widened to `u64`: each count may be as large as `u32::MAX`.
    pub fn total_transport_count(&self) -> u64 {
        self.assigned_drivers.iter().map(|a| u64::from(a.count)).sum()
    }

    /// Checks that driver ids are unique within `assigned_drivers` and that
    /// the legacy slot mirrors one of its entries (or is empty along with it).
    pub fn assignments_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        if !self
            .assigned_drivers
            .iter()
            .all(|a| seen.insert(a.driver_id.as_str()))
        {
            return false;
        }

        if self.assigned_drivers.is_empty() {
            return self.driver_id.is_none() && self.driver_transport_count.is_none();
        }

        match &self.driver_id {
            Some(id) => self
                .assignment_for(id)
                .map(|a| Some(a.count) == self.driver_transport_count)
                .unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(driver_id: &str, count: u32) -> DriverAssignment {
        DriverAssignment {
            driver_id: driver_id.to_string(),
            count,
        }
    }

    #[test]
    fn test_empty_site_is_consistent() {
        assert!(Site::new("North Tower").assignments_consistent());
    }

    #[test]
    fn test_legacy_slot_must_mirror_entry() {
        let mut site = Site::new("North Tower");
        site.assigned_drivers = vec![assignment("d1", 3), assignment("d2", 1)];
        site.driver_id = Some("d2".to_string());
        site.driver_transport_count = Some(1);
        assert!(site.assignments_consistent());

        site.driver_transport_count = Some(3);
        assert!(!site.assignments_consistent());

        site.driver_id = None;
        site.driver_transport_count = None;
        assert!(!site.assignments_consistent());
    }

    #[test]
    fn test_duplicate_driver_entries_are_inconsistent() {
        let mut site = Site::new("North Tower");
        site.assigned_drivers = vec![assignment("d1", 3), assignment("d1", 4)];
        site.driver_id = Some("d1".to_string());
        site.driver_transport_count = Some(3);
        assert!(!site.assignments_consistent());
    }

    #[test]
    fn test_total_transport_count() {
        let mut site = Site::new("Harbor");
        site.assigned_drivers = vec![assignment("d1", 3), assignment("d2", 4)];
        assert_eq!(site.total_transport_count(), 7);
    }

    #[test]
    fn test_total_transport_count_does_not_wrap() {
        let parsed = crate::service::assignment_reconciler::parse_count("3000000000");
        let mut site = Site::new("Harbor");
        site.assigned_drivers = vec![assignment("d1", parsed), assignment("d2", 3_000_000_000)];
        assert_eq!(site.total_transport_count(), 6_000_000_000);

        site.assigned_drivers = vec![assignment("d1", u32::MAX), assignment("d2", u32::MAX)];
        assert_eq!(site.total_transport_count(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_legacy_fields_omitted_when_empty() {
        let site = Site::new("Harbor").with_id("s1");
        let json = serde_json::to_string(&site).unwrap();
        assert!(!json.contains("driverId"));
        assert!(json.contains("\"assignedDrivers\":[]"));
    }
}
