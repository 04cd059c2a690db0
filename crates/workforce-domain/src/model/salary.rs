//! Payroll ledger type definitions

use serde::{Deserialize, Serialize};

/// Raw salary ledger for one worker.
///
/// All amounts are expected to be non-negative; nothing here enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryRecord {
    pub basic_salary: f64,
    pub advance: f64,
    pub advance_repayment: f64,
    pub absence_days: f64,
    /// Entered directly, not derived from `absence_days`
    pub absence_value: f64,
    pub violation_value: f64,
    pub violation_repayment: f64,
    pub incentives: f64,
}
