//! Use-case services

mod workforce_service;

pub use workforce_service::{SiteTransportSummary, WorkforceService};
