// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use roster_audit::ContractChange;
use roster_domain::Employee;

/// The result of a successful lifecycle transition.
///
/// The transition carries the post-transition record plus the history
/// ledger payload, which is present exactly when at least one contract
/// field changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The record after the transition.
    pub employee: Employee,
    /// The old/new contract snapshot pair, when the contract changed.
    pub change: Option<ContractChange>,
}

/// One record selected for automatic inactivation by the expiry sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepAction {
    /// The record's canonical identifier.
    pub employee_id: i64,
    /// The inactivation transition to persist.
    pub transition: Transition,
}

/// The plan produced by an expiry sweep over a record collection.
///
/// Planning is pure; executing the actions against the store is the
/// caller's job, and per-record persistence failures must not abort the
/// remaining actions.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    /// How many records were examined.
    pub checked: usize,
    /// The records to inactivate, in input order.
    pub actions: Vec<SweepAction>,
}
