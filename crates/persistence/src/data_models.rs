// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to and from domain values.
//!
//! Dates persist canonically as `YYYY-MM-DD` text; the opaque attribute
//! bag and the document slots persist as JSON text columns.

use chrono::NaiveDate;
use diesel::prelude::*;
use roster_audit::{ContractChange, ContractSnapshot, HistoryEntry};
use roster_domain::{DocumentSlots, Employee, Project};

use crate::error::PersistenceError;

/// The canonical stored date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a date into its canonical stored form.
#[must_use]
pub fn store_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a stored date column back into a `NaiveDate`.
///
/// # Errors
///
/// Returns a reconstruction error naming the column when the stored text
/// is not canonical.
pub fn load_date(column: &str, value: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        PersistenceError::ReconstructionError(format!(
            "stored date '{value}' in column '{column}' is not YYYY-MM-DD: {e}"
        ))
    })
}

/// The employee columns loaded for domain reconstruction.
///
/// Bookkeeping columns (`project_id`, timestamps) stay in the database;
/// queries select exactly these fields in this order.
#[derive(Debug, Clone, Queryable)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub name: String,
    pub position: Option<String>,
    pub contract_number: String,
    pub contract_start: String,
    pub contract_end: String,
    pub inactive_reason: Option<String>,
    pub attributes_json: String,
    pub documents_json: String,
}

impl EmployeeRow {
    /// Converts this row into a domain `Employee` scoped to `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored date or JSON column cannot be decoded.
    pub fn into_employee(self, project: &Project) -> Result<Employee, PersistenceError> {
        let contract_start: NaiveDate = load_date("contract_start", &self.contract_start)?;
        let contract_end: NaiveDate = load_date("contract_end", &self.contract_end)?;

        let attributes: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&self.attributes_json)?;
        let documents: DocumentSlots = serde_json::from_str(&self.documents_json)?;

        let mut employee: Employee = Employee::new(
            project.clone(),
            self.name,
            self.contract_number,
            contract_start,
            contract_end,
        );
        employee.employee_id = Some(self.employee_id);
        employee.position = self.position;
        employee.inactive_reason = self.inactive_reason;
        employee.attributes = attributes;
        employee.documents = documents;

        Ok(employee)
    }
}

/// A row from the `contract_history` table.
#[derive(Debug, Clone, Queryable)]
pub struct HistoryRow {
    pub history_id: i64,
    pub employee_id: i64,
    pub old_contract_number: String,
    pub old_contract_start: String,
    pub old_contract_end: String,
    pub new_contract_number: String,
    pub new_contract_start: String,
    pub new_contract_end: String,
    pub modified_by: String,
    pub changed_at: String,
}

impl HistoryRow {
    /// Converts this row into a domain `HistoryEntry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored date column cannot be decoded.
    pub fn into_entry(self) -> Result<HistoryEntry, PersistenceError> {
        let old: ContractSnapshot = ContractSnapshot::new(
            self.old_contract_number,
            load_date("old_contract_start", &self.old_contract_start)?,
            load_date("old_contract_end", &self.old_contract_end)?,
        );
        let new: ContractSnapshot = ContractSnapshot::new(
            self.new_contract_number,
            load_date("new_contract_start", &self.new_contract_start)?,
            load_date("new_contract_end", &self.new_contract_end)?,
        );

        Ok(HistoryEntry {
            history_id: self.history_id,
            employee_id: self.employee_id,
            changed_at: self.changed_at,
            change: ContractChange { old, new },
            modified_by: self.modified_by,
        })
    }
}
