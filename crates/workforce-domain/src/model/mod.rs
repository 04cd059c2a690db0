//! Domain model types

pub mod salary;
pub mod site;
pub mod state;
pub mod vehicle;
pub mod worker;

pub use salary::SalaryRecord;
pub use site::{DriverAssignment, Site, SiteDetails, SiteId};
pub use state::EntityState;
pub use vehicle::{
    MaintenanceRecord, Vehicle, VehicleDetails, VehicleId, ViolationRecord,
};
pub use worker::{Skill, Worker, WorkerId};
