// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, EmployeeChanges};
use crate::error::CoreError;
use crate::state::Transition;
use roster_audit::{ContractChange, ContractSnapshot};
use roster_domain::{
    Employee, validate_contract_dates, validate_employee_name, validate_inactive_reason,
};

/// Applies a `Hire` command, producing a validated new record.
///
/// Hiring has no prior state and produces no history entry; the ledger
/// records changes to existing contracts only.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The contract end date is not strictly after the start date
pub fn apply_hire(command: Command) -> Result<Employee, CoreError> {
    match command {
        Command::Hire {
            project,
            name,
            position,
            contract_number,
            contract_start,
            contract_end,
            attributes,
        } => {
            validate_employee_name(&name)?;
            validate_contract_dates(contract_start, contract_end)?;

            let mut employee: Employee =
                Employee::new(project, name, contract_number, contract_start, contract_end);
            employee.position = position;
            employee.attributes = attributes;

            Ok(employee)
        }
        Command::Amend { .. } | Command::Inactivate { .. } | Command::Restore => {
            // Commands over existing records go through apply() instead.
            unreachable!("apply_hire called with a non-hire command")
        }
    }
}

/// Applies a command to an existing record, producing a transition.
///
/// Every mutation of an existing record funnels through here: single-record
/// edits, bulk-import amendments, manual inactivation, restore, and the
/// expiry sweep's automatic inactivation.
///
/// # Errors
///
/// Returns an error if:
/// - An amended name is empty
/// - The merged contract dates violate `end > start`
/// - An inactivation reason is empty
pub fn apply(current: &Employee, command: Command) -> Result<Transition, CoreError> {
    match command {
        Command::Amend { changes } => apply_amend(current, changes),
        Command::Inactivate { reason } => {
            validate_inactive_reason(&reason)?;

            let mut employee: Employee = current.clone();
            employee.inactive_reason = Some(reason);

            Ok(Transition {
                employee,
                change: None,
            })
        }
        Command::Restore => {
            // Deliberately no contract-date re-validation: restore clears
            // the flag, and the next save of updated contract dates is the
            // event the ledger records as the reactivation.
            let mut employee: Employee = current.clone();
            employee.inactive_reason = None;

            Ok(Transition {
                employee,
                change: None,
            })
        }
        Command::Hire { .. } => {
            // Hire has no prior state and goes through apply_hire() instead.
            unreachable!("apply called with a hire command")
        }
    }
}

/// Merges a change set into the current record and diffs the contract.
fn apply_amend(current: &Employee, changes: EmployeeChanges) -> Result<Transition, CoreError> {
    let before: ContractSnapshot = ContractSnapshot::of(current);

    let mut employee: Employee = current.clone();

    if let Some(name) = changes.name {
        validate_employee_name(&name)?;
        employee.name = name;
    }
    if let Some(position) = changes.position {
        employee.position = position;
    }
    if let Some(number) = changes.contract_number {
        employee.contract_number = number;
    }
    if let Some(start) = changes.contract_start {
        employee.contract_start = start;
    }
    if let Some(end) = changes.contract_end {
        employee.contract_end = end;
    }
    if let Some(reason) = changes.inactive_reason {
        if let Some(r) = &reason {
            validate_inactive_reason(r)?;
        }
        employee.inactive_reason = reason;
    }
    if let Some(attributes) = changes.attributes {
        for (key, value) in attributes {
            employee.attributes.insert(key, value);
        }
    }

    // Re-validate the merged pair whenever either date was present.
    validate_contract_dates(employee.contract_start, employee.contract_end)?;

    let after: ContractSnapshot = ContractSnapshot::of(&employee);
    let change: Option<ContractChange> = ContractChange::diff(&before, &after);

    Ok(Transition { employee, change })
}
