// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use chrono::NaiveDate;
use roster_domain::Employee;
use serde::{Deserialize, Serialize};

/// The actor recorded when no explicit operator is supplied.
pub const SYSTEM_ACTOR: &str = "system";

/// An immutable snapshot of the three contract fields at a point in time.
///
/// Snapshots are compared field-by-field; two snapshots are equal exactly
/// when contract number, start date, and end date all match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_field_names)]
pub struct ContractSnapshot {
    /// The contract number.
    pub contract_number: String,
    /// The contract start date.
    pub contract_start: NaiveDate,
    /// The contract end date.
    pub contract_end: NaiveDate,
}

impl ContractSnapshot {
    /// Creates a new `ContractSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `contract_number` - The contract number
    /// * `contract_start` - The contract start date
    /// * `contract_end` - The contract end date
    #[must_use]
    pub const fn new(
        contract_number: String,
        contract_start: NaiveDate,
        contract_end: NaiveDate,
    ) -> Self {
        Self {
            contract_number,
            contract_start,
            contract_end,
        }
    }

    /// Captures the contract fields of an employee record.
    #[must_use]
    pub fn of(employee: &Employee) -> Self {
        Self {
            contract_number: employee.contract_number.clone(),
            contract_start: employee.contract_start,
            contract_end: employee.contract_end,
        }
    }
}

/// An old/new pair of contract snapshots describing one contract change.
///
/// A `ContractChange` exists only when at least one of the three contract
/// fields actually differs; constructing one through [`ContractChange::diff`]
/// enforces that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractChange {
    /// The contract fields before the change.
    pub old: ContractSnapshot,
    /// The contract fields after the change.
    pub new: ContractSnapshot,
}

impl ContractChange {
    /// Compares two snapshots field-by-field and produces a change record
    /// when any of them differs.
    ///
    /// Returns `None` when the snapshots are identical, so an update that
    /// leaves the contract fields alone yields no ledger entry.
    #[must_use]
    pub fn diff(old: &ContractSnapshot, new: &ContractSnapshot) -> Option<Self> {
        if old == new {
            None
        } else {
            Some(Self {
                old: old.clone(),
                new: new.clone(),
            })
        }
    }
}

/// One append-only entry in the contract history ledger.
///
/// Entries are written exclusively as a side effect of the lifecycle
/// update path, never mutated, and deleted only by cascade when the
/// owning employee record is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The ledger row identifier.
    pub history_id: i64,
    /// The owning employee record.
    pub employee_id: i64,
    /// When the change was recorded (ISO 8601).
    pub changed_at: String,
    /// The old/new contract snapshot pair.
    pub change: ContractChange,
    /// Who made the change; defaults to [`SYSTEM_ACTOR`].
    pub modified_by: String,
}
