// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract history ledger inserts.
//!
//! The ledger is append-only. Rows are written only when a real contract
//! change exists ([`roster_audit::ContractChange`] enforces the diff), and
//! a failed insert must never roll back the record update it describes —
//! callers log and continue.

use diesel::SqliteConnection;
use diesel::prelude::*;
use roster_audit::ContractChange;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::store_date;
use crate::diesel_schema::contract_history;
use crate::error::PersistenceError;

/// Appends one ledger entry for a contract change.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The owning employee record
/// * `change` - The old/new contract snapshot pair
/// * `modified_by` - The actor recorded for the change
/// * `changed_at` - The change timestamp (ISO 8601)
///
/// # Returns
///
/// The `history_id` assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_history(
    conn: &mut SqliteConnection,
    employee_id: i64,
    change: &ContractChange,
    modified_by: &str,
    changed_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(contract_history::table)
        .values((
            contract_history::employee_id.eq(employee_id),
            contract_history::old_contract_number.eq(&change.old.contract_number),
            contract_history::old_contract_start.eq(store_date(change.old.contract_start)),
            contract_history::old_contract_end.eq(store_date(change.old.contract_end)),
            contract_history::new_contract_number.eq(&change.new.contract_number),
            contract_history::new_contract_start.eq(store_date(change.new.contract_start)),
            contract_history::new_contract_end.eq(store_date(change.new.contract_end)),
            contract_history::modified_by.eq(modified_by),
            contract_history::changed_at.eq(changed_at),
        ))
        .execute(conn)?;

    let history_id: i64 = get_last_insert_rowid(conn)?;
    debug!(history_id, employee_id, "Appended contract history entry");

    Ok(history_id)
}
