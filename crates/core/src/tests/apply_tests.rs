// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{test_date, test_employee, test_project};
use crate::{Command, EmployeeChanges, apply, apply_hire};
use roster_domain::DomainError;

fn hire_command(start: chrono::NaiveDate, end: chrono::NaiveDate) -> Command {
    Command::Hire {
        project: test_project(),
        name: String::from("Jane Doe"),
        position: None,
        contract_number: String::from("CTR-001"),
        contract_start: start,
        contract_end: end,
        attributes: serde_json::Map::new(),
    }
}

#[test]
fn test_hire_creates_active_record() {
    let employee =
        apply_hire(hire_command(test_date(2026, 1, 1), test_date(2026, 12, 31))).unwrap();

    assert_eq!(employee.employee_id, None);
    assert_eq!(employee.inactive_reason, None);
    assert_eq!(employee.contract_number, "CTR-001");
}

#[test]
fn test_hire_rejects_inverted_dates() {
    let err = apply_hire(hire_command(test_date(2024, 1, 1), test_date(2023, 12, 31)))
        .unwrap_err();
    assert!(err.to_string().contains("contract_end"));
}

#[test]
fn test_hire_rejects_empty_name() {
    let command = Command::Hire {
        project: test_project(),
        name: String::from("  "),
        position: None,
        contract_number: String::from("CTR-001"),
        contract_start: test_date(2026, 1, 1),
        contract_end: test_date(2026, 12, 31),
        attributes: serde_json::Map::new(),
    };
    assert!(apply_hire(command).is_err());
}

#[test]
fn test_amend_contract_number_produces_one_change() {
    let current = test_employee(1, test_date(2026, 1, 1), test_date(2026, 12, 31));

    let transition = apply(
        &current,
        Command::Amend {
            changes: EmployeeChanges {
                contract_number: Some(String::from("NEW-001")),
                ..EmployeeChanges::default()
            },
        },
    )
    .unwrap();

    let change = transition.change.expect("contract changed");
    assert_eq!(change.old.contract_number, "CTR-001");
    assert_eq!(change.new.contract_number, "NEW-001");
    assert_eq!(change.old.contract_start, change.new.contract_start);
    assert_eq!(change.old.contract_end, change.new.contract_end);
}

#[test]
fn test_amend_without_contract_fields_produces_no_change() {
    let current = test_employee(1, test_date(2026, 1, 1), test_date(2026, 12, 31));

    let transition = apply(
        &current,
        Command::Amend {
            changes: EmployeeChanges {
                name: Some(String::from("Jane Q. Doe")),
                position: Some(Some(String::from("Supervisor"))),
                ..EmployeeChanges::default()
            },
        },
    )
    .unwrap();

    assert_eq!(transition.change, None);
    assert_eq!(transition.employee.name, "Jane Q. Doe");
}

#[test]
fn test_amend_revalidates_merged_date_pair() {
    let current = test_employee(1, test_date(2026, 1, 1), test_date(2026, 12, 31));

    // Moving the start past the stored end must fail even though the end
    // itself is untouched.
    let result = apply(
        &current,
        Command::Amend {
            changes: EmployeeChanges {
                contract_start: Some(test_date(2027, 1, 1)),
                ..EmployeeChanges::default()
            },
        },
    );
    assert!(result.is_err());
}

#[test]
fn test_amend_merges_attributes_key_by_key() {
    let mut current = test_employee(1, test_date(2026, 1, 1), test_date(2026, 12, 31));
    current.attributes.insert(
        String::from("bank"),
        serde_json::Value::String(String::from("Old Bank")),
    );
    current.attributes.insert(
        String::from("nik"),
        serde_json::Value::String(String::from("3201")),
    );

    let mut replacement = serde_json::Map::new();
    replacement.insert(
        String::from("bank"),
        serde_json::Value::String(String::from("New Bank")),
    );

    let transition = apply(
        &current,
        Command::Amend {
            changes: EmployeeChanges {
                attributes: Some(replacement),
                ..EmployeeChanges::default()
            },
        },
    )
    .unwrap();

    assert_eq!(
        transition.employee.attributes.get("bank"),
        Some(&serde_json::Value::String(String::from("New Bank")))
    );
    // Untouched keys survive the merge.
    assert_eq!(
        transition.employee.attributes.get("nik"),
        Some(&serde_json::Value::String(String::from("3201")))
    );
}

#[test]
fn test_amend_rejects_empty_reason() {
    let current = test_employee(1, test_date(2026, 1, 1), test_date(2026, 12, 31));

    let result = apply(
        &current,
        Command::Amend {
            changes: EmployeeChanges {
                inactive_reason: Some(Some(String::from("   "))),
                ..EmployeeChanges::default()
            },
        },
    );
    assert_eq!(
        result.unwrap_err(),
        crate::CoreError::DomainViolation(DomainError::EmptyInactiveReason)
    );
}
