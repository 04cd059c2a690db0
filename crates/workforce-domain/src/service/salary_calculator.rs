//! Net pay derivation from the raw salary ledger

use serde::{Deserialize, Serialize};

use crate::model::{SalaryRecord, Worker};

/// Raw ledger fields plus derived balances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryView {
    #[serde(flatten)]
    pub record: SalaryRecord,
    pub remaining_advance: f64,
    pub remaining_violations: f64,
    pub net_salary: f64,
}

/// Derive balances and net pay. A missing record counts as all zeros.
///
/// `absence_value` is deducted as entered; it is never recomputed from
/// `absence_days`. Results are clamped at zero but otherwise unrounded.
pub fn derive_salary_view(record: Option<&SalaryRecord>) -> SalaryView {
    let record = record.cloned().unwrap_or_default();

    let remaining_advance = (record.advance - record.advance_repayment).max(0.0);
    let remaining_violations = (record.violation_value - record.violation_repayment).max(0.0);
    let net_salary = (record.basic_salary + record.incentives
        - record.advance_repayment
        - record.absence_value
        - record.violation_repayment)
        .max(0.0);

    SalaryView {
        record,
        remaining_advance,
        remaining_violations,
        net_salary,
    }
}

/// Totals across a payroll
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub worker_count: usize,
    pub total_basic: f64,
    pub total_incentives: f64,
    pub total_deductions: f64,
    pub total_net: f64,
    pub outstanding_advances: f64,
    pub outstanding_violations: f64,
}

pub fn payroll_summary(workers: &[Worker]) -> PayrollSummary {
    workers
        .iter()
        .map(|w| derive_salary_view(w.salary.as_ref()))
        .fold(
            PayrollSummary {
                worker_count: workers.len(),
                ..Default::default()
            },
            |mut acc, view| {
                acc.total_basic += view.record.basic_salary;
                acc.total_incentives += view.record.incentives;
                acc.total_deductions += view.record.advance_repayment
                    + view.record.absence_value
                    + view.record.violation_repayment;
                acc.total_net += view.net_salary;
                acc.outstanding_advances += view.remaining_advance;
                acc.outstanding_violations += view.remaining_violations;
                acc
            },
        )
}

/// Two-decimal display of a money amount
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Skill;

    #[test]
    fn test_missing_record_is_all_zero() {
        let view = derive_salary_view(None);
        assert_eq!(view, SalaryView::default());
        assert_eq!(view.net_salary, 0.0);
    }

    #[test]
    fn test_net_salary_example() {
        let record = SalaryRecord {
            basic_salary: 3000.0,
            incentives: 200.0,
            advance_repayment: 500.0,
            absence_value: 100.0,
            violation_repayment: 50.0,
            ..Default::default()
        };

        let view = derive_salary_view(Some(&record));

        assert!((view.net_salary - 2550.0).abs() < f64::EPSILON);
        assert_eq!(view.remaining_advance, 0.0);
        assert_eq!(view.remaining_violations, 0.0);
    }

    #[test]
    fn test_remaining_balances() {
        let record = SalaryRecord {
            advance: 1000.0,
            advance_repayment: 250.0,
            violation_value: 300.0,
            violation_repayment: 100.0,
            ..Default::default()
        };

        let view = derive_salary_view(Some(&record));

        assert!((view.remaining_advance - 750.0).abs() < f64::EPSILON);
        assert!((view.remaining_violations - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outputs_clamp_at_zero() {
        let record = SalaryRecord {
            basic_salary: 100.0,
            advance: 50.0,
            advance_repayment: 400.0,
            ..Default::default()
        };

        let view = derive_salary_view(Some(&record));

        assert_eq!(view.net_salary, 0.0);
        assert_eq!(view.remaining_advance, 0.0);
    }

    #[test]
    fn test_absence_days_do_not_affect_pay() {
        let record = SalaryRecord {
            basic_salary: 1000.0,
            absence_days: 5.0,
            ..Default::default()
        };
        assert!((derive_salary_view(Some(&record)).net_salary - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_derivation_is_not_pre_rounded() {
        let record = SalaryRecord {
            basic_salary: 0.1,
            incentives: 0.2,
            ..Default::default()
        };
        let view = derive_salary_view(Some(&record));
        assert_eq!(view.net_salary, 0.1 + 0.2);
        assert_eq!(format_money(view.net_salary), "0.30");
    }

    #[test]
    fn test_payroll_summary() {
        let mut a = Worker::new("A", Skill::Worker);
        a.salary = Some(SalaryRecord {
            basic_salary: 2000.0,
            incentives: 100.0,
            absence_value: 50.0,
            ..Default::default()
        });
        let b = Worker::new("B", Skill::Driver);

        let summary = payroll_summary(&[a, b]);

        assert_eq!(summary.worker_count, 2);
        assert!((summary.total_net - 2050.0).abs() < f64::EPSILON);
        assert!((summary.total_deductions - 50.0).abs() < f64::EPSILON);
    }
}
