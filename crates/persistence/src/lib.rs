// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Roster HR system.
//!
//! This crate provides database persistence for employee records, the
//! contract history ledger, and project namespaces. It is built on Diesel
//! over `SQLite`.
//!
//! ## Storage model
//!
//! - `projects` — client-company namespaces; every employee row is scoped
//!   to exactly one project.
//! - `employees` — one row per employee record. Dates persist as canonical
//!   `YYYY-MM-DD` text; the opaque attribute bag and the document slots
//!   persist as JSON text columns.
//! - `contract_history` — the append-only ledger. Rows cascade-delete with
//!   their owning employee and are never updated.
//!
//! ## Concurrency
//!
//! Record updates run read-modify-write inside an immediate transaction so
//! concurrent writers to the same record (e.g. a restore racing the expiry
//! sweep) serialize at the storage layer: last-writer-wins, never a
//! silently corrupted row.
//!
//! ## Testing
//!
//! Unit tests run against unique in-memory databases. Each call to
//! `new_in_memory()` receives a sequential ID from an atomic counter,
//! ensuring deterministic isolation without time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDate;
use diesel::SqliteConnection;
use roster_audit::{ContractChange, HistoryEntry};
use roster_domain::{Employee, Project};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns the current wall-clock timestamp in ISO 8601 form.
fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Persistence adapter for employee records and the contract history ledger.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests
        // are isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_roster_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL gives better read concurrency for file-backed databases.
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Creates a new project namespace.
    ///
    /// The code is normalized to uppercase before storage.
    ///
    /// # Arguments
    ///
    /// * `code` - The project code
    /// * `name` - Optional display name
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., duplicate code).
    pub fn create_project(
        &mut self,
        code: &str,
        name: Option<&str>,
    ) -> Result<Project, PersistenceError> {
        let normalized: Project = Project::new(code);
        let project_id: i64 =
            mutations::projects::insert_project(&mut self.conn, normalized.code(), name)?;

        Ok(Project::with_id(
            project_id,
            normalized.code(),
            name.map(ToString::to_string),
        ))
    }

    /// Retrieves a project by code.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if no project carries the code.
    pub fn get_project(&mut self, code: &str) -> Result<Project, PersistenceError> {
        let normalized: Project = Project::new(code);
        queries::projects::get_project(&mut self.conn, normalized.code())
    }

    /// Lists all projects ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_projects(&mut self) -> Result<Vec<Project>, PersistenceError> {
        queries::projects::list_projects(&mut self.conn)
    }

    /// Resolves the canonical ID for a project, looking it up by code when
    /// the value was not loaded from the database.
    fn resolve_project_id(&mut self, project: &Project) -> Result<i64, PersistenceError> {
        project.project_id().map_or_else(
            || queries::projects::lookup_project_id(&mut self.conn, project.code()),
            Ok,
        )
    }

    // ========================================================================
    // Employee records
    // ========================================================================

    /// Inserts a validated employee record and returns it with its
    /// assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist or the insert fails.
    pub fn insert_employee(&mut self, employee: &Employee) -> Result<Employee, PersistenceError> {
        let project_id: i64 = self.resolve_project_id(&employee.project)?;
        let now: String = now_iso();

        let employee_id: i64 =
            mutations::employees::insert_employee(&mut self.conn, project_id, employee, &now)?;

        let mut stored: Employee = employee.clone();
        stored.employee_id = Some(employee_id);
        Ok(stored)
    }

    /// Retrieves one employee scoped to a project.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if the record does not exist in the
    /// project, or `ProjectNotFound` for an unknown project.
    pub fn get_employee(
        &mut self,
        project: &Project,
        employee_id: i64,
    ) -> Result<Employee, PersistenceError> {
        let project_id: i64 = self.resolve_project_id(project)?;
        queries::employees::get_employee(&mut self.conn, project, project_id, employee_id)
    }

    /// Lists every employee in a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist or the query fails.
    pub fn list_employees(&mut self, project: &Project) -> Result<Vec<Employee>, PersistenceError> {
        let project_id: i64 = self.resolve_project_id(project)?;
        queries::employees::list_employees(&mut self.conn, project, project_id)
    }

    /// Lists active employees: no inactivation reason and `contract_end >=
    /// today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist or the query fails.
    pub fn list_active(
        &mut self,
        project: &Project,
        today: NaiveDate,
    ) -> Result<Vec<Employee>, PersistenceError> {
        let project_id: i64 = self.resolve_project_id(project)?;
        queries::employees::list_active(&mut self.conn, project, project_id, today)
    }

    /// Lists inactive employees: a reason is set or the contract expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist or the query fails.
    pub fn list_inactive(
        &mut self,
        project: &Project,
        today: NaiveDate,
    ) -> Result<Vec<Employee>, PersistenceError> {
        let project_id: i64 = self.resolve_project_id(project)?;
        queries::employees::list_inactive(&mut self.conn, project, project_id, today)
    }

    /// Persists a post-transition employee record.
    ///
    /// The write runs inside an immediate transaction so concurrent
    /// updates to the same record serialize at the storage layer.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if the record does not exist, or an
    /// error if the update fails.
    pub fn update_employee(&mut self, employee: &Employee) -> Result<(), PersistenceError> {
        let Some(employee_id) = employee.employee_id else {
            return Err(PersistenceError::Other(
                "Cannot update an employee without a persisted ID".to_string(),
            ));
        };
        let project_code: String = employee.project.code().to_string();
        let now: String = now_iso();

        let updated: usize = self.conn.immediate_transaction(|conn| {
            mutations::employees::update_employee(conn, employee_id, employee, &now)
        })?;

        if updated == 0 {
            return Err(PersistenceError::EmployeeNotFound {
                project: project_code,
                employee_id,
            });
        }
        Ok(())
    }

    /// Deletes an employee record; history rows cascade.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if the record does not exist in the
    /// project.
    pub fn delete_employee(
        &mut self,
        project: &Project,
        employee_id: i64,
    ) -> Result<(), PersistenceError> {
        // Scope check: the record must belong to the project.
        let _: Employee = self.get_employee(project, employee_id)?;

        let deleted: usize = mutations::employees::delete_employee(&mut self.conn, employee_id)?;
        if deleted == 0 {
            return Err(PersistenceError::EmployeeNotFound {
                project: project.code().to_string(),
                employee_id,
            });
        }
        Ok(())
    }

    /// Counts employees in a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist or the query fails.
    pub fn count_employees(&mut self, project: &Project) -> Result<usize, PersistenceError> {
        let project_id: i64 = self.resolve_project_id(project)?;
        queries::employees::count_employees(&mut self.conn, project_id)
    }

    // ========================================================================
    // Contract history ledger
    // ========================================================================

    /// Appends one ledger entry for a contract change.
    ///
    /// Callers invoke this only after the record update has committed, and
    /// treat failures as non-fatal: log and continue, never roll back the
    /// record write.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The owning employee record
    /// * `change` - The old/new contract snapshot pair
    /// * `modified_by` - The actor recorded for the change
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_history(
        &mut self,
        employee_id: i64,
        change: &ContractChange,
        modified_by: &str,
    ) -> Result<i64, PersistenceError> {
        let changed_at: String = now_iso();
        mutations::history::insert_history(
            &mut self.conn,
            employee_id,
            change,
            modified_by,
            &changed_at,
        )
    }

    /// Lists the ledger entries for an employee, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_history(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::history::list_history(&mut self.conn, employee_id)
    }
}
