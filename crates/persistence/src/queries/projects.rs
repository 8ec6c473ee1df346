// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project namespace lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use roster_domain::Project;

use crate::diesel_schema::projects;
use crate::error::PersistenceError;

/// Looks up the canonical `project_id` from a project code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The project code (already normalized to uppercase)
///
/// # Errors
///
/// Returns `ProjectNotFound` if no project carries the code.
pub fn lookup_project_id(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<i64, PersistenceError> {
    let result = projects::table
        .select(projects::project_id)
        .filter(projects::code.eq(code))
        .first::<i64>(conn);

    match result {
        Ok(id) => Ok(id),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::ProjectNotFound(code.to_string()))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a project by code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The project code (already normalized to uppercase)
///
/// # Errors
///
/// Returns `ProjectNotFound` if no project carries the code.
pub fn get_project(conn: &mut SqliteConnection, code: &str) -> Result<Project, PersistenceError> {
    let result = projects::table
        .select((projects::project_id, projects::code, projects::name))
        .filter(projects::code.eq(code))
        .first::<(i64, String, Option<String>)>(conn);

    match result {
        Ok((project_id, stored_code, name)) => Ok(Project::with_id(project_id, &stored_code, name)),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::ProjectNotFound(code.to_string()))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all projects ordered by code.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_projects(conn: &mut SqliteConnection) -> Result<Vec<Project>, PersistenceError> {
    let rows: Vec<(i64, String, Option<String>)> = projects::table
        .select((projects::project_id, projects::code, projects::name))
        .order(projects::code.asc())
        .load::<(i64, String, Option<String>)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(project_id, code, name)| Project::with_id(project_id, &code, name))
        .collect())
}
