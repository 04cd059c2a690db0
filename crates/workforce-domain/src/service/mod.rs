//! Domain services
//!
//! Pure functions over entity collections. Each returns replacement
//! collections and never mutates its inputs.

pub mod assignment_reconciler;
pub mod cascade_delete;
pub mod maintenance;
pub mod registry;
pub mod salary_calculator;
pub mod violation_migrator;

pub use assignment_reconciler::{
    driver_assignments, find_duplicate_site, reconcile_driver_assignments, DesiredAssignment,
};
pub use cascade_delete::{cascade_delete_worker, delete_vehicle, CascadeOutcome};
pub use maintenance::{add_maintenance, delete_maintenance, update_maintenance};
pub use registry::{
    add_site, add_vehicle, add_worker, set_salary, update_site_details, update_vehicle_details,
    update_worker,
};
pub use salary_calculator::{derive_salary_view, format_money, payroll_summary, PayrollSummary, SalaryView};
pub use violation_migrator::{add_or_update_violation, delete_violation, find_violation_owner};
