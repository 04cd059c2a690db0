//! Application service layer - config, store wiring, use cases

pub mod app;
pub mod config;
pub mod repository;

pub use app::WorkforceService;
pub use config::Config;
