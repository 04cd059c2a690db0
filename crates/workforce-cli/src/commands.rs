//! Command handlers

use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::{
    Cli, Commands, MaintenanceAction, SalaryArgs, SiteAction, VehicleAction, ViolationAction,
    WorkerAction,
};
use crate::output::{
    output_drivers, output_payroll, output_salary, output_sites, output_vehicles, output_workers,
    DriverRow,
};
use workforce_app::config::Config;
use workforce_app::repository::{open_snapshot_repo, open_store};
use workforce_app::WorkforceService;
use workforce_domain::service::{driver_assignments, DesiredAssignment};
use workforce_domain::{MaintenanceRecord, SalaryRecord, Site, Skill, Vehicle, ViolationRecord, Worker};
use workforce_types::{Error, OutputFormat, Result};

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    // Apply CLI overrides
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = Some(dir);
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    let data_dir_override = cli.data_dir;

    match cli.command {
        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_currency,
            reset,
        } => cmd_config(
            show,
            set_data_dir,
            set_output,
            set_currency,
            reset,
            data_dir_override,
        ),
        command => {
            let store = open_store(&config)?;
            debug!("store opened at version {}", store.version()?);
            let service = WorkforceService::new(store);
            let ctx = Context {
                service,
                output_format,
                currency: config.currency.clone(),
            };
            ctx.run(command)
        }
    }
}

struct Context {
    service: WorkforceService,
    output_format: OutputFormat,
    currency: String,
}

impl Context {
    fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Worker { action } => self.cmd_worker(action),
            Commands::Site { action } => self.cmd_site(action),
            Commands::Assign { driver, sites } => self.cmd_assign(&driver, &sites),
            Commands::Vehicle { action } => self.cmd_vehicle(action),
            Commands::Violation { action } => self.cmd_violation(action),
            Commands::Maintenance { action } => self.cmd_maintenance(action),
            Commands::Salary { worker } => self.cmd_salary(worker.as_deref()),
            // handled before the store is opened
            Commands::Config { .. } => Ok(()),
        }
    }

    fn cmd_worker(&self, action: WorkerAction) -> Result<()> {
        match action {
            WorkerAction::Add {
                name,
                skill,
                phone,
                site,
            } => {
                let skill = Skill::from(skill);
                if skill == Skill::Driver {
                    return Err(Error::InvalidInput(
                        "use `worker add-driver` to register drivers".to_string(),
                    ));
                }
                let mut worker = Worker::new(name, skill);
                worker.phone = phone;
                if let Some(site_id) = site {
                    worker = worker.with_site(site_id);
                }
                let id = self.service.add_worker(worker)?;
                println!("Added worker {}", id);
            }
            WorkerAction::AddDriver {
                name,
                plate,
                car_type,
                capacity,
                phone,
            } => {
                let mut driver = Worker::driver(name, plate, car_type, capacity);
                driver.phone = phone;
                let id = self.service.add_worker(driver)?;
                println!("Added driver {}", id);
            }
            WorkerAction::List { drivers } => {
                let state = self.service.snapshot()?;
                if drivers {
                    let rows: Vec<DriverRow> = state
                        .drivers()
                        .into_iter()
                        .map(|d| DriverRow {
                            driver: d,
                            assignments: driver_assignments(&state.sites, &d.id),
                        })
                        .collect();
                    output_drivers(self.output_format, &rows)?;
                } else {
                    output_workers(self.output_format, &state.workers)?;
                }
            }
            WorkerAction::Update {
                id,
                name,
                phone,
                nationality,
                site,
            } => {
                self.service.update_worker(&id, |worker| {
                    if let Some(name) = name {
                        worker.name = name;
                    }
                    if phone.is_some() {
                        worker.phone = phone;
                    }
                    if nationality.is_some() {
                        worker.nationality = nationality;
                    }
                    if site.is_some() {
                        worker.assigned_site_id = site;
                    }
                })?;
                println!("Updated worker {}", id);
            }
            WorkerAction::Delete { id } => {
                self.service.delete_worker(&id)?;
                println!("Deleted worker {}", id);
            }
            WorkerAction::SetSalary { id, ledger } => {
                self.service.set_salary(&id, salary_record(&ledger))?;
                let view = self.service.salary_view(&id)?;
                let state = self.service.snapshot()?;
                if let Some(worker) = state.worker(&id) {
                    output_salary(self.output_format, worker, &view, &self.currency)?;
                }
            }
        }
        Ok(())
    }

    fn cmd_site(&self, action: SiteAction) -> Result<()> {
        match action {
            SiteAction::Add {
                name,
                location,
                requirements,
            } => {
                let mut site = Site::new(name);
                site.location = location;
                site.required_skills = requirements.into_iter().collect();
                let id = self.service.add_site(site)?;
                println!("Added site {}", id);
            }
            SiteAction::Update {
                id,
                name,
                location,
                requirements,
            } => {
                self.service.update_site(&id, |details| {
                    if let Some(name) = name {
                        details.name = name;
                    }
                    if location.is_some() {
                        details.location = location;
                    }
                    if !requirements.is_empty() {
                        details.required_skills = requirements.into_iter().collect();
                    }
                })?;
                println!("Updated site {}", id);
            }
            SiteAction::List => {
                let summaries = self.service.site_transport_summaries()?;
                output_sites(self.output_format, &summaries)?;
            }
        }
        Ok(())
    }

    fn cmd_assign(&self, driver_id: &str, desired: &[DesiredAssignment]) -> Result<()> {
        self.service.edit_driver_assignments(driver_id, desired)?;

        if desired.iter().all(|d| d.site_id.is_empty()) {
            println!("Driver {} unassigned from all sites", driver_id);
        } else {
            println!("Assignments for driver {} updated", driver_id);
        }
        let summaries = self.service.site_transport_summaries()?;
        output_sites(self.output_format, &summaries)
    }

    fn cmd_vehicle(&self, action: VehicleAction) -> Result<()> {
        match action {
            VehicleAction::Add {
                plate,
                make,
                model,
                year,
            } => {
                let mut vehicle = Vehicle::new(plate);
                vehicle.make = make;
                vehicle.model = model;
                vehicle.year = year;
                let id = self.service.add_vehicle(vehicle)?;
                println!("Added vehicle {}", id);
            }
            VehicleAction::Update {
                id,
                plate,
                make,
                model,
                year,
            } => {
                self.service.update_vehicle(&id, |details| {
                    if let Some(plate) = plate {
                        details.plate_number = plate;
                    }
                    if make.is_some() {
                        details.make = make;
                    }
                    if model.is_some() {
                        details.model = model;
                    }
                    if year.is_some() {
                        details.year = year;
                    }
                })?;
                println!("Updated vehicle {}", id);
            }
            VehicleAction::List => {
                let state = self.service.snapshot()?;
                output_vehicles(self.output_format, &state.vehicles, &self.currency)?;
            }
            VehicleAction::Delete { id } => {
                self.service.delete_vehicle(&id)?;
                println!("Deleted vehicle {}", id);
            }
        }
        Ok(())
    }

    fn cmd_violation(&self, action: ViolationAction) -> Result<()> {
        match action {
            ViolationAction::Add {
                vehicle,
                number,
                date,
                amount,
                description,
                driver,
            } => {
                let mut record = ViolationRecord::new(date.unwrap_or_else(today), amount);
                record.violation_number = number;
                record.description = description.unwrap_or_default();
                if let Some(driver_id) = driver {
                    let state = self.service.snapshot()?;
                    let worker = state
                        .worker(&driver_id)
                        .ok_or_else(|| Error::NotFound(format!("worker {}", driver_id)))?;
                    record = record.with_driver(worker);
                }
                let id = self.service.add_violation(&vehicle, record)?;
                println!("Added violation {}", id);
            }
            ViolationAction::Update {
                id,
                to_vehicle,
                number,
                amount,
                paid,
            } => {
                self.service.update_violation(&id, to_vehicle.as_deref(), |record| {
                    if let Some(number) = number {
                        record.violation_number = Some(number);
                    }
                    if let Some(amount) = amount {
                        record.amount = amount;
                    }
                    if let Some(paid) = paid {
                        record.paid = paid;
                    }
                })?;
                match to_vehicle {
                    Some(dest) => println!("Moved violation {} to vehicle {}", id, dest),
                    None => println!("Updated violation {}", id),
                }
            }
            ViolationAction::Delete { id } => {
                self.service.delete_violation(&id)?;
                println!("Deleted violation {}", id);
            }
        }
        Ok(())
    }

    fn cmd_maintenance(&self, action: MaintenanceAction) -> Result<()> {
        match action {
            MaintenanceAction::Add {
                vehicle,
                description,
                cost,
                date,
                workshop,
            } => {
                let mut record = MaintenanceRecord::new(date.unwrap_or_else(today), description, cost);
                record.workshop = workshop;
                let id = self.service.add_maintenance(&vehicle, record)?;
                println!("Added maintenance record {}", id);
            }
            MaintenanceAction::Update {
                vehicle,
                id,
                description,
                cost,
                workshop,
            } => {
                self.service.update_maintenance(&vehicle, &id, |record| {
                    if let Some(description) = description {
                        record.description = description;
                    }
                    if let Some(cost) = cost {
                        record.cost = cost;
                    }
                    if workshop.is_some() {
                        record.workshop = workshop;
                    }
                })?;
                println!("Updated maintenance record {}", id);
            }
            MaintenanceAction::Delete { vehicle, id } => {
                self.service.delete_maintenance(&vehicle, &id)?;
                println!("Deleted maintenance record {}", id);
            }
        }
        Ok(())
    }

    fn cmd_salary(&self, worker_id: Option<&str>) -> Result<()> {
        match worker_id {
            Some(id) => {
                let view = self.service.salary_view(id)?;
                let state = self.service.snapshot()?;
                let worker = state
                    .worker(id)
                    .ok_or_else(|| Error::NotFound(format!("worker {}", id)))?;
                output_salary(self.output_format, worker, &view, &self.currency)
            }
            None => {
                let (rows, summary) = self.service.payroll()?;
                output_payroll(self.output_format, &rows, &summary, &self.currency)
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn salary_record(args: &SalaryArgs) -> SalaryRecord {
    SalaryRecord {
        basic_salary: args.basic,
        advance: args.advance,
        advance_repayment: args.advance_repayment,
        absence_days: args.absence_days,
        absence_value: args.absence_value,
        violation_value: args.violation_value,
        violation_repayment: args.violation_repayment,
        incentives: args.incentives,
    }
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_currency: Option<String>,
    reset: bool,
    data_dir_override: Option<PathBuf>,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(currency) = set_currency {
        config.currency = currency;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
        let mut effective = config.clone();
        if data_dir_override.is_some() {
            effective.data_dir = data_dir_override;
        }
        print_snapshot_status(&effective)?;
    }

    Ok(())
}

fn print_snapshot_status(config: &Config) -> Result<()> {
    let repo = open_snapshot_repo(config)?;
    println!("Snapshot file:  {}", repo.store_path().display());
    match repo.saved_at()? {
        Some(saved_at) => println!("Last saved:     {}", saved_at.to_rfc3339()),
        None => println!("Last saved:     never"),
    }
    Ok(())
}
