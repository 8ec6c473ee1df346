// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee record mutations.
//!
//! Dates are written in their canonical `YYYY-MM-DD` form; the attribute
//! bag and document slots are serialized to JSON text columns.

use diesel::SqliteConnection;
use diesel::prelude::*;
use roster_domain::Employee;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::store_date;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Inserts a new employee record.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `project_id` - The owning project's canonical ID
/// * `employee` - The validated record to store
/// * `now` - The creation timestamp (ISO 8601)
///
/// # Returns
///
/// The `employee_id` assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    project_id: i64,
    employee: &Employee,
    now: &str,
) -> Result<i64, PersistenceError> {
    let attributes_json: String = serde_json::to_string(&employee.attributes)?;
    let documents_json: String = serde_json::to_string(&employee.documents)?;

    diesel::insert_into(employees::table)
        .values((
            employees::project_id.eq(project_id),
            employees::name.eq(&employee.name),
            employees::position.eq(employee.position.as_deref()),
            employees::contract_number.eq(&employee.contract_number),
            employees::contract_start.eq(store_date(employee.contract_start)),
            employees::contract_end.eq(store_date(employee.contract_end)),
            employees::inactive_reason.eq(employee.inactive_reason.as_deref()),
            employees::attributes_json.eq(attributes_json),
            employees::documents_json.eq(documents_json),
            employees::created_at.eq(now),
            employees::updated_at.eq(now),
        ))
        .execute(conn)?;

    let employee_id: i64 = get_last_insert_rowid(conn)?;
    debug!(employee_id, project_id, "Inserted employee record");

    Ok(employee_id)
}

/// Overwrites the mutable fields of a stored employee record.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The record to update
/// * `employee` - The post-transition record computed by the core
/// * `now` - The update timestamp (ISO 8601)
///
/// # Returns
///
/// The number of rows updated (0 when the record does not exist).
///
/// # Errors
///
/// Returns an error if serialization or the update fails.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    employee: &Employee,
    now: &str,
) -> Result<usize, PersistenceError> {
    let attributes_json: String = serde_json::to_string(&employee.attributes)?;
    let documents_json: String = serde_json::to_string(&employee.documents)?;

    let updated: usize = diesel::update(employees::table.find(employee_id))
        .set((
            employees::name.eq(&employee.name),
            employees::position.eq(employee.position.as_deref()),
            employees::contract_number.eq(&employee.contract_number),
            employees::contract_start.eq(store_date(employee.contract_start)),
            employees::contract_end.eq(store_date(employee.contract_end)),
            employees::inactive_reason.eq(employee.inactive_reason.as_deref()),
            employees::attributes_json.eq(attributes_json),
            employees::documents_json.eq(documents_json),
            employees::updated_at.eq(now),
        ))
        .execute(conn)?;

    debug!(employee_id, updated, "Updated employee record");

    Ok(updated)
}

/// Deletes an employee record.
///
/// Contract history rows cascade via the foreign key; foreign key
/// enforcement is verified at connection time.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The record to delete
///
/// # Returns
///
/// The number of rows deleted (0 when the record does not exist).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(employees::table.find(employee_id)).execute(conn)?;
    debug!(employee_id, deleted, "Deleted employee record");
    Ok(deleted)
}
