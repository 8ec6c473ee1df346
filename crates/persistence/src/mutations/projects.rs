// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project namespace mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::projects;
use crate::error::PersistenceError;

/// Inserts a new project.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The project code (already normalized to uppercase)
/// * `name` - Optional display name
///
/// # Returns
///
/// The `project_id` assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate code).
pub fn insert_project(
    conn: &mut SqliteConnection,
    code: &str,
    name: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(projects::table)
        .values((projects::code.eq(code), projects::name.eq(name)))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
