// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inactivate, restore, and expiry-sweep behavior through the API boundary.

use super::{
    create_test_admin, create_valid_request, seed_employee, test_persistence_with_project,
    test_today,
};
use crate::error::ApiError;
use crate::handlers::{
    create_employee, get_employee, inactivate_employee, list_employees, restore_employee,
    run_expiry_sweep, update_employee,
};
use crate::request_response::{
    CreateEmployeeRequest, InactivateRequest, ListEmployeesParams, StatusFilter,
    UpdateEmployeeRequest,
};

/// Creates a record whose contract ended five days before `test_today()`.
fn seed_expired_employee(
    persistence: &mut roster_persistence::Persistence,
) -> crate::request_response::EmployeeInfo {
    create_employee(
        persistence,
        "ACME",
        CreateEmployeeRequest {
            name: String::from("Expired Worker"),
            contract_start: String::from("2025-03-01"),
            contract_end: String::from("2026-02-24"),
            ..create_valid_request()
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("employee created")
}

#[test]
fn test_inactivate_sets_reason_and_moves_partition() {
    let mut persistence = test_persistence_with_project();
    let created = seed_employee(&mut persistence);

    let info = inactivate_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        &InactivateRequest {
            reason: String::from("resigned"),
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("inactivated");

    assert_eq!(info.inactive_reason.as_deref(), Some("resigned"));
    assert_eq!(info.status, "inactive");

    let active = list_employees(
        &mut persistence,
        "ACME",
        &ListEmployeesParams {
            status: StatusFilter::Active,
            ..ListEmployeesParams::default()
        },
        test_today(),
    )
    .expect("listed");
    assert!(active.is_empty());
}

#[test]
fn test_inactivate_rejects_empty_reason() {
    let mut persistence = test_persistence_with_project();
    let created = seed_employee(&mut persistence);

    let err = inactivate_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        &InactivateRequest {
            reason: String::from("  "),
        },
        &create_test_admin(),
        test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "reason"));
}

#[test]
fn test_restore_clears_reason_without_touching_contract() {
    let mut persistence = test_persistence_with_project();
    let created = seed_expired_employee(&mut persistence);

    inactivate_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        &InactivateRequest {
            reason: String::from("EOC"),
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("inactivated");

    let restored = restore_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        &create_test_admin(),
        test_today(),
    )
    .expect("restored");

    assert_eq!(restored.inactive_reason, None);
    assert_eq!(restored.contract_end, "2026-02-24");
    // The contract is still expired, so the record surfaces the transient
    // pending state rather than fully active.
    assert_eq!(restored.status, "pending_contract_update");
}

#[test]
fn test_scenario_a_sweep_inactivates_expired_record() {
    let mut persistence = test_persistence_with_project();
    let created = seed_expired_employee(&mut persistence);

    let report = run_expiry_sweep(&mut persistence, "ACME", &create_test_admin(), test_today())
        .expect("swept");

    assert_eq!(report.checked, 1);
    assert_eq!(report.inactivated, vec![created.employee_id]);
    assert!(report.failures.is_empty());

    let info = get_employee(&mut persistence, "ACME", created.employee_id, test_today())
        .expect("loaded");
    assert_eq!(info.inactive_reason.as_deref(), Some("EOC"));

    let active = list_employees(
        &mut persistence,
        "ACME",
        &ListEmployeesParams {
            status: StatusFilter::Active,
            ..ListEmployeesParams::default()
        },
        test_today(),
    )
    .expect("listed");
    assert!(active.is_empty());

    let inactive = list_employees(
        &mut persistence,
        "ACME",
        &ListEmployeesParams {
            status: StatusFilter::Inactive,
            ..ListEmployeesParams::default()
        },
        test_today(),
    )
    .expect("listed");
    assert_eq!(inactive.len(), 1);
}

#[test]
fn test_sweep_twice_is_idempotent() {
    let mut persistence = test_persistence_with_project();
    seed_expired_employee(&mut persistence);

    let first = run_expiry_sweep(&mut persistence, "ACME", &create_test_admin(), test_today())
        .expect("swept");
    assert_eq!(first.inactivated.len(), 1);

    let second = run_expiry_sweep(&mut persistence, "ACME", &create_test_admin(), test_today())
        .expect("swept");
    assert_eq!(second.checked, 1);
    assert!(second.inactivated.is_empty());
    assert!(second.failures.is_empty());
}

#[test]
fn test_sweep_reinactivates_restored_record_until_dates_updated() {
    let mut persistence = test_persistence_with_project();
    let created = seed_expired_employee(&mut persistence);

    run_expiry_sweep(&mut persistence, "ACME", &create_test_admin(), test_today())
        .expect("swept");
    restore_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        &create_test_admin(),
        test_today(),
    )
    .expect("restored");

    // Restored but not updated: the next sweep takes it right back.
    let again = run_expiry_sweep(&mut persistence, "ACME", &create_test_admin(), test_today())
        .expect("swept");
    assert_eq!(again.inactivated, vec![created.employee_id]);

    // The two-step recovery: restore, then amend the contract dates. The
    // amendment is what lands in the ledger as the reactivation event.
    restore_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        &create_test_admin(),
        test_today(),
    )
    .expect("restored");
    update_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        UpdateEmployeeRequest {
            contract_number: Some(String::from("CTR-002")),
            contract_start: Some(String::from("2026-03-01")),
            contract_end: Some(String::from("2027-02-28")),
            ..UpdateEmployeeRequest::default()
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("updated");

    let final_sweep =
        run_expiry_sweep(&mut persistence, "ACME", &create_test_admin(), test_today())
            .expect("swept");
    assert!(final_sweep.inactivated.is_empty());

    let info = get_employee(&mut persistence, "ACME", created.employee_id, test_today())
        .expect("loaded");
    assert_eq!(info.status, "active");
}
