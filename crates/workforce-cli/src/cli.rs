//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use workforce_domain::service::DesiredAssignment;
use workforce_types::OutputFormat;

#[derive(Parser)]
#[command(name = "workforce")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Workforce ledger: workers, sites, vehicles, and driver transport assignments")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage workers and drivers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Manage project sites
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },

    /// Replace a driver's site assignments (SITE=COUNT, repeatable)
    Assign {
        /// Driver id
        driver: String,

        /// Assignment row, e.g. --site s1=4. Omit all rows to unassign everywhere.
        #[arg(long = "site", value_parser = parse_assignment)]
        sites: Vec<DesiredAssignment>,
    },

    /// Manage vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },

    /// Manage traffic violations
    Violation {
        #[command(subcommand)]
        action: ViolationAction,
    },

    /// Manage maintenance records
    Maintenance {
        #[command(subcommand)]
        action: MaintenanceAction,
    },

    /// Show salary view for one worker, or the whole payroll
    Salary {
        /// Worker id
        worker: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set currency label
        #[arg(long)]
        set_currency: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Register a worker
    Add {
        name: String,

        /// Skill tag (worker, engineer, or any other label)
        #[arg(long, default_value = "worker")]
        skill: String,

        #[arg(long)]
        phone: Option<String>,

        /// Site the worker is assigned to
        #[arg(long)]
        site: Option<String>,
    },

    /// Register a driver
    AddDriver {
        name: String,

        /// Plate of the car the driver operates
        #[arg(long)]
        plate: Option<String>,

        /// Car type (bus, van, ...)
        #[arg(long)]
        car_type: Option<String>,

        /// Passenger capacity
        #[arg(long)]
        capacity: Option<u32>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// List workers
    List {
        /// Only drivers, with their assignments
        #[arg(long)]
        drivers: bool,
    },

    /// Edit a worker's contact details or home site
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        nationality: Option<String>,

        #[arg(long)]
        site: Option<String>,
    },

    /// Delete a worker and its site assignments
    Delete { id: String },

    /// Set a worker's salary ledger
    SetSalary {
        id: String,

        #[command(flatten)]
        ledger: SalaryArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SalaryArgs {
    #[arg(long, default_value_t = 0.0)]
    pub basic: f64,
    #[arg(long, default_value_t = 0.0)]
    pub advance: f64,
    #[arg(long, default_value_t = 0.0)]
    pub advance_repayment: f64,
    #[arg(long, default_value_t = 0.0)]
    pub absence_days: f64,
    #[arg(long, default_value_t = 0.0)]
    pub absence_value: f64,
    #[arg(long, default_value_t = 0.0)]
    pub violation_value: f64,
    #[arg(long, default_value_t = 0.0)]
    pub violation_repayment: f64,
    #[arg(long, default_value_t = 0.0)]
    pub incentives: f64,
}

#[derive(Subcommand)]
pub enum SiteAction {
    /// Create a site
    Add {
        name: String,

        #[arg(long)]
        location: Option<String>,

        /// Required headcount per skill, e.g. --require driver=2
        #[arg(long = "require", value_parser = parse_requirement)]
        requirements: Vec<(String, u32)>,
    },

    /// Edit a site's name, location, or requirements
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        location: Option<String>,

        /// Replaces all requirements when given
        #[arg(long = "require", value_parser = parse_requirement)]
        requirements: Vec<(String, u32)>,
    },

    /// List sites with transport totals
    List,
}

#[derive(Subcommand)]
pub enum VehicleAction {
    /// Register a vehicle
    Add {
        plate: String,

        #[arg(long)]
        make: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        year: Option<u16>,
    },

    /// Change a vehicle's plate or description
    Update {
        id: String,

        #[arg(long)]
        plate: Option<String>,

        #[arg(long)]
        make: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        year: Option<u16>,
    },

    /// List vehicles with record counts
    List,

    /// Delete a vehicle with its records
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ViolationAction {
    /// Record a violation on a vehicle
    Add {
        /// Vehicle id
        vehicle: String,

        /// Ticket number (must be unique across the fleet)
        #[arg(long)]
        number: Option<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        amount: f64,

        #[arg(long)]
        description: Option<String>,

        /// Driver id responsible
        #[arg(long)]
        driver: Option<String>,
    },

    /// Edit a violation, optionally moving it to another vehicle
    Update {
        /// Violation id
        id: String,

        /// Move to this vehicle
        #[arg(long)]
        to_vehicle: Option<String>,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        paid: Option<bool>,
    },

    /// Delete a violation
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum MaintenanceAction {
    /// Record maintenance on a vehicle
    Add {
        /// Vehicle id
        vehicle: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        cost: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        workshop: Option<String>,
    },

    /// Edit a maintenance record
    Update {
        /// Vehicle id
        vehicle: String,

        /// Record id
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        cost: Option<f64>,

        #[arg(long)]
        workshop: Option<String>,
    },

    /// Delete a maintenance record
    Delete {
        /// Vehicle id
        vehicle: String,

        /// Record id
        id: String,
    },
}

/// Parse `SITE=COUNT`; a bad count becomes 0 like the assignment form does
fn parse_assignment(arg: &str) -> Result<DesiredAssignment, String> {
    let (site, count) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SITE=COUNT, got '{}'", arg))?;
    Ok(DesiredAssignment::from_form(site.trim(), count))
}

fn parse_requirement(arg: &str) -> Result<(String, u32), String> {
    let (skill, count) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SKILL=COUNT, got '{}'", arg))?;
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid count '{}': {}", count, e))?;
    Ok((skill.trim().to_string(), count))
}
