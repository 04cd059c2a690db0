//! Output formatting module

use serde::Serialize;
use workforce_app::app::SiteTransportSummary;
use workforce_domain::service::{format_money, DesiredAssignment, PayrollSummary, SalaryView};
use workforce_domain::{Vehicle, Worker};
use workforce_types::{OutputFormat, Result};

/// A driver with its current site assignments
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRow<'a> {
    #[serde(flatten)]
    pub driver: &'a Worker,
    pub assignments: Vec<DesiredAssignment>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayrollRow<'a> {
    worker_id: &'a str,
    name: &'a str,
    #[serde(flatten)]
    view: &'a SalaryView,
}

#[derive(Serialize)]
struct Payroll<'a> {
    rows: Vec<PayrollRow<'a>>,
    summary: &'a PayrollSummary,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn money(amount: f64, currency: &str) -> String {
    format!("{} {}", format_money(amount), currency)
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn output_workers(output_format: OutputFormat, workers: &[Worker]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(workers);
    }

    if workers.is_empty() {
        println!("No workers registered.");
        return Ok(());
    }

    println!("{:<38} {:<24} {:<10} {:<16} {:<38}", "ID", "Name", "Skill", "Phone", "Site");
    println!("{}", "-".repeat(130));
    for w in workers {
        println!(
            "{:<38} {:<24} {:<10} {:<16} {:<38}",
            w.id,
            w.name,
            w.skill.as_str(),
            or_dash(w.phone.as_deref()),
            or_dash(w.assigned_site_id.as_deref()),
        );
    }
    println!("\nTotal: {} workers", workers.len());

    Ok(())
}

pub fn output_drivers(output_format: OutputFormat, drivers: &[DriverRow<'_>]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(drivers);
    }

    if drivers.is_empty() {
        println!("No drivers registered.");
        return Ok(());
    }

    for row in drivers {
        let d = row.driver;
        println!("{} ({})", d.name, d.id);
        println!(
            "  Car: {} {}  capacity {}",
            or_dash(d.driver_car_type.as_deref()),
            or_dash(d.driver_car_plate.as_deref()),
            d.driver_capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
        );
        if row.assignments.is_empty() {
            println!("  (no site assignments)");
        }
        for a in &row.assignments {
            println!("  -> {:<38} x{}", a.site_id, a.count);
        }
    }

    Ok(())
}

pub fn output_sites(output_format: OutputFormat, sites: &[SiteTransportSummary]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(sites);
    }

    if sites.is_empty() {
        println!("No sites registered.");
        return Ok(());
    }

    println!("{:<38} {:<24} {:<20} {:>8} {:>10}", "ID", "Name", "Primary driver", "Drivers", "Transport");
    println!("{}", "-".repeat(104));
    for s in sites {
        println!(
            "{:<38} {:<24} {:<20} {:>8} {:>10}",
            s.site_id,
            s.site_name,
            or_dash(s.primary_driver_name.as_deref().or(s.primary_driver_id.as_deref())),
            s.driver_count,
            s.total_transport_count,
        );
    }

    Ok(())
}

pub fn output_vehicles(output_format: OutputFormat, vehicles: &[Vehicle], currency: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles registered.");
        return Ok(());
    }

    println!(
        "{:<38} {:<12} {:<20} {:>6} {:>16} {:>6} {:>16}",
        "ID", "Plate", "Make/Model", "Maint", "Maint cost", "Viol", "Unpaid fines"
    );
    println!("{}", "-".repeat(120));
    for v in vehicles {
        let description = match (v.make.as_deref(), v.model.as_deref()) {
            (Some(make), Some(model)) => format!("{} {}", make, model),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => "-".to_string(),
        };
        println!(
            "{:<38} {:<12} {:<20} {:>6} {:>16} {:>6} {:>16}",
            v.id,
            v.plate_number,
            description,
            v.maintenance_history.len(),
            money(v.maintenance_cost(), currency),
            v.violations.len(),
            money(v.outstanding_fines(), currency),
        );
        for r in &v.violations {
            println!(
                "    violation {} #{} {} {}{}",
                r.id,
                or_dash(r.violation_number.as_deref()),
                r.date,
                money(r.amount, currency),
                if r.paid { " (paid)" } else { "" },
            );
        }
        for m in &v.maintenance_history {
            println!(
                "    maintenance {} {} {} {}",
                m.id,
                m.date,
                m.description,
                money(m.cost, currency),
            );
        }
    }

    Ok(())
}

pub fn output_salary(output_format: OutputFormat, worker: &Worker, view: &SalaryView, currency: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&PayrollRow {
            worker_id: &worker.id,
            name: &worker.name,
            view,
        });
    }

    let r = &view.record;
    println!("\nSalary: {}", worker.name);
    println!("===============");
    println!("Basic salary:        {}", money(r.basic_salary, currency));
    println!("Incentives:          {}", money(r.incentives, currency));
    println!("Advance:             {}", money(r.advance, currency));
    println!("Advance repayment:   {}", money(r.advance_repayment, currency));
    println!("Absence ({} days):   {}", r.absence_days, money(r.absence_value, currency));
    println!("Violations:          {}", money(r.violation_value, currency));
    println!("Violation repayment: {}", money(r.violation_repayment, currency));
    println!("{}", "-".repeat(40));
    println!("Remaining advance:   {}", money(view.remaining_advance, currency));
    println!("Remaining fines:     {}", money(view.remaining_violations, currency));
    println!("Net salary:          {}", money(view.net_salary, currency));

    Ok(())
}

pub fn output_payroll(
    output_format: OutputFormat,
    rows: &[(Worker, SalaryView)],
    summary: &PayrollSummary,
    currency: &str,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&Payroll {
            rows: rows
                .iter()
                .map(|(w, view)| PayrollRow {
                    worker_id: &w.id,
                    name: &w.name,
                    view,
                })
                .collect(),
            summary,
        });
    }

    println!("{:<24} {:>14} {:>14} {:>14} {:>14}", "Name", "Basic", "Adv. left", "Fines left", "Net");
    println!("{}", "-".repeat(84));
    for (w, view) in rows {
        println!(
            "{:<24} {:>14} {:>14} {:>14} {:>14}",
            w.name,
            format_money(view.record.basic_salary),
            format_money(view.remaining_advance),
            format_money(view.remaining_violations),
            format_money(view.net_salary),
        );
    }
    println!("{}", "-".repeat(84));
    println!("Workers:             {}", summary.worker_count);
    println!("Total basic:         {}", money(summary.total_basic, currency));
    println!("Total incentives:    {}", money(summary.total_incentives, currency));
    println!("Total deductions:    {}", money(summary.total_deductions, currency));
    println!("Total net:           {}", money(summary.total_net, currency));
    println!("Outstanding advances:{}", money(summary.outstanding_advances, currency));
    println!("Outstanding fines:   {}", money(summary.outstanding_violations, currency));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }

    #[test]
    fn test_money_appends_currency() {
        assert_eq!(money(2550.0, "SAR"), "2550.00 SAR");
    }

    #[test]
    fn test_driver_row_flattens_worker() {
        let driver = Worker::driver("Omar", Some("ABC 1".to_string()), None, Some(12)).with_id("d1");
        let row = DriverRow {
            driver: &driver,
            assignments: vec![DesiredAssignment::new("s1", 3)],
        };

        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["id"], "d1");
        assert_eq!(json["driverCarPlate"], "ABC 1");
        assert_eq!(json["assignments"][0]["siteId"], "s1");
    }
}
