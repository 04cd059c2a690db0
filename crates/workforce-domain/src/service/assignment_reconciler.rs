//! Transport assignment reconciliation
//!
//! A driver's assignments are edited as a batch: the form submits the
//! complete list of `(site, count)` rows the driver should end up with, and
//! every site in the collection is recomputed against it. Each site keeps two
//! views of its transport state: the authoritative `assigned_drivers` list
//! and the legacy single-driver slot (`driver_id` / `driver_transport_count`).
//!
//! Legacy slot precedence: the first driver to occupy a site's slot keeps it.
//! A newly assigned driver only takes the slot if it is empty or already
//! theirs. When the slot holder is removed from a site, the next remaining
//! entry in `assigned_drivers` is promoted into the slot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{DriverAssignment, Site};

/// One row of a driver's assignment form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredAssignment {
    /// Target site; an empty id is a row not yet pointed at a site
    pub site_id: String,
    pub count: u32,
}

impl DesiredAssignment {
    pub fn new(site_id: impl Into<String>, count: u32) -> Self {
        Self {
            site_id: site_id.into(),
            count,
        }
    }

    /// Build a row from raw form input; an unparsable count becomes 0
    pub fn from_form(site_id: impl Into<String>, raw_count: &str) -> Self {
        Self::new(site_id, parse_count(raw_count))
    }
}

/// Lenient count parsing: non-numeric, negative, or fractional-garbage input
/// collapses to 0. Fractions truncate toward zero.
pub fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// First site id named more than once in `desired`, ignoring blank rows.
///
/// The reconciler does not guard against duplicates (each site only sees the
/// first matching row), so callers should reject forms where this is `Some`.
pub fn find_duplicate_site(desired: &[DesiredAssignment]) -> Option<&str> {
    let mut seen = HashSet::new();
    desired
        .iter()
        .filter(|d| !d.site_id.is_empty())
        .find(|d| !seen.insert(d.site_id.as_str()))
        .map(|d| d.site_id.as_str())
}

/// Current assignments of `driver_id`, in site order, as form rows
pub fn driver_assignments(sites: &[Site], driver_id: &str) -> Vec<DesiredAssignment> {
    sites
        .iter()
        .filter_map(|site| {
            site.assignment_for(driver_id)
                .map(|a| DesiredAssignment::new(site.id.clone(), a.count))
        })
        .collect()
}

/// Recompute every site's transport state for one driver.
///
/// Assignments belonging to other drivers pass through untouched, except
/// that a vacated legacy slot may be refilled from them. Applying the same
/// `desired` list twice gives the same result as applying it once.
pub fn reconcile_driver_assignments(
    sites: &[Site],
    driver_id: &str,
    desired: &[DesiredAssignment],
) -> Vec<Site> {
    sites
        .iter()
        .map(|site| reconcile_site(site, driver_id, desired))
        .collect()
}

fn reconcile_site(site: &Site, driver_id: &str, desired: &[DesiredAssignment]) -> Site {
    let mut assigned: Vec<DriverAssignment> = site
        .assigned_drivers
        .iter()
        .filter(|a| a.driver_id != driver_id)
        .cloned()
        .collect();

    let matched = desired
        .iter()
        .find(|d| !d.site_id.is_empty() && d.site_id == site.id);

    if let Some(row) = matched {
        assigned.push(DriverAssignment {
            driver_id: driver_id.to_string(),
            count: row.count,
        });
    }

    let slot_is_ours = site.driver_id.as_deref() == Some(driver_id);
    let (legacy_id, legacy_count) = match matched {
        Some(row) if site.driver_id.is_none() || slot_is_ours => {
            (Some(driver_id.to_string()), Some(row.count))
        }
        Some(_) => (site.driver_id.clone(), site.driver_transport_count),
        None if slot_is_ours => match assigned.first() {
            Some(next) => {
                debug!(
                    "site {}: promoting driver {} into legacy slot vacated by {}",
                    site.id, next.driver_id, driver_id
                );
                (Some(next.driver_id.clone()), Some(next.count))
            }
            None => (None, None),
        },
        None => (site.driver_id.clone(), site.driver_transport_count),
    };

    Site {
        assigned_drivers: assigned,
        driver_id: legacy_id,
        driver_transport_count: legacy_count,
        ..site.clone()
    }
}
