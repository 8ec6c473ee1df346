// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee record queries.
//!
//! The active/inactive partition is evaluated in SQL against the stored
//! canonical `YYYY-MM-DD` date text, which orders lexicographically the
//! same as chronologically.

use chrono::NaiveDate;
use diesel::SqliteConnection;
use diesel::prelude::*;
use roster_domain::{Employee, Project};

use crate::data_models::{EmployeeRow, store_date};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// The column set matching [`EmployeeRow`], in field order.
const EMPLOYEE_COLUMNS: (
    employees::employee_id,
    employees::name,
    employees::position,
    employees::contract_number,
    employees::contract_start,
    employees::contract_end,
    employees::inactive_reason,
    employees::attributes_json,
    employees::documents_json,
) = (
    employees::employee_id,
    employees::name,
    employees::position,
    employees::contract_number,
    employees::contract_start,
    employees::contract_end,
    employees::inactive_reason,
    employees::attributes_json,
    employees::documents_json,
);

/// Retrieves one employee row scoped to a project.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `project` - The owning project (must carry a persisted ID)
/// * `project_id` - The owning project's canonical ID
/// * `employee_id` - The record identifier
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the record does not exist in the project.
pub fn get_employee(
    conn: &mut SqliteConnection,
    project: &Project,
    project_id: i64,
    employee_id: i64,
) -> Result<Employee, PersistenceError> {
    let result = employees::table
        .select(EMPLOYEE_COLUMNS)
        .filter(employees::employee_id.eq(employee_id))
        .filter(employees::project_id.eq(project_id))
        .first::<EmployeeRow>(conn);

    match result {
        Ok(row) => row.into_employee(project),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::EmployeeNotFound {
            project: project.code().to_string(),
            employee_id,
        }),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every employee in a project, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// reconstructed.
pub fn list_employees(
    conn: &mut SqliteConnection,
    project: &Project,
    project_id: i64,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .select(EMPLOYEE_COLUMNS)
        .filter(employees::project_id.eq(project_id))
        .order(employees::employee_id.asc())
        .load::<EmployeeRow>(conn)?;

    rows.into_iter().map(|row| row.into_employee(project)).collect()
}

/// Lists active employees: no inactivation reason and a contract end date
/// no earlier than today.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// reconstructed.
pub fn list_active(
    conn: &mut SqliteConnection,
    project: &Project,
    project_id: i64,
    today: NaiveDate,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .select(EMPLOYEE_COLUMNS)
        .filter(employees::project_id.eq(project_id))
        .filter(employees::inactive_reason.is_null())
        .filter(employees::contract_end.ge(store_date(today)))
        .order(employees::employee_id.asc())
        .load::<EmployeeRow>(conn)?;

    rows.into_iter().map(|row| row.into_employee(project)).collect()
}

/// Lists inactive employees: an inactivation reason is set, or the
/// contract end date is already in the past.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// reconstructed.
pub fn list_inactive(
    conn: &mut SqliteConnection,
    project: &Project,
    project_id: i64,
    today: NaiveDate,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .select(EMPLOYEE_COLUMNS)
        .filter(employees::project_id.eq(project_id))
        .filter(
            employees::inactive_reason
                .is_not_null()
                .or(employees::contract_end.lt(store_date(today))),
        )
        .order(employees::employee_id.asc())
        .load::<EmployeeRow>(conn)?;

    rows.into_iter().map(|row| row.into_employee(project)).collect()
}

/// Counts employees in a project.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_employees(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<usize, PersistenceError> {
    use num_traits::ToPrimitive;

    let count: i64 = employees::table
        .filter(employees::project_id.eq(project_id))
        .count()
        .get_result::<i64>(conn)?;

    count
        .to_usize()
        .ok_or_else(|| PersistenceError::Other("Employee count out of range".to_string()))
}
