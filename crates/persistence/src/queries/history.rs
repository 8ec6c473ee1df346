// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract history ledger queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use roster_audit::HistoryEntry;

use crate::data_models::HistoryRow;
use crate::diesel_schema::contract_history;
use crate::error::PersistenceError;

/// Lists the ledger entries for an employee, newest first.
///
/// Ties on `changed_at` (same-second changes) break on the row ID so the
/// ordering stays deterministic.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The owning employee record
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// reconstructed.
pub fn list_history(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = contract_history::table
        .filter(contract_history::employee_id.eq(employee_id))
        .order((
            contract_history::changed_at.desc(),
            contract_history::history_id.desc(),
        ))
        .load::<HistoryRow>(conn)?;

    rows.into_iter().map(HistoryRow::into_entry).collect()
}
