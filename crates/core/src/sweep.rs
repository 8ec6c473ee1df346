// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Expiry sweep planning.
//!
//! The sweep closes the gap between "no inactivation reason" and "contract
//! already expired": every record in that state is inactivated with the
//! end-of-contract reason. Planning is pure and caller-timed; it is an
//! explicit operation (on demand or scheduled), never a hidden side effect
//! of reads.
//!
//! ## Invariants
//!
//! - Idempotent: a second sweep over the swept state selects nothing.
//! - Records with a reason already set are never touched.
//! - Records whose contract ends today or later are never touched.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{SweepAction, SweepPlan, Transition};
use chrono::NaiveDate;
use roster_domain::Employee;

/// Returns whether a record is due for automatic inactivation.
#[must_use]
pub fn is_expiry_due(employee: &Employee, today: NaiveDate) -> bool {
    employee.inactive_reason.is_none() && employee.contract_end < today
}

/// Plans an expiry sweep over a record collection.
///
/// Records without a persisted `employee_id` are counted but skipped; the
/// sweep only ever operates on stored records.
///
/// # Errors
///
/// Propagates transition errors. In practice the generated inactivation
/// command always carries a non-empty reason, so planning over well-formed
/// records does not fail.
pub fn plan_sweep(records: &[Employee], today: NaiveDate) -> Result<SweepPlan, CoreError> {
    let mut actions: Vec<SweepAction> = Vec::new();

    for employee in records {
        if !is_expiry_due(employee, today) {
            continue;
        }
        let Some(employee_id) = employee.employee_id else {
            continue;
        };

        let transition: Transition = crate::apply(
            employee,
            Command::Inactivate {
                reason: String::from(Employee::EOC_REASON),
            },
        )?;

        actions.push(SweepAction {
            employee_id,
            transition,
        });
    }

    Ok(SweepPlan {
        checked: records.len(),
        actions,
    })
}
