// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_viewer, create_valid_request, seed_employee, test_persistence_with_project,
    test_today,
};
use crate::auth::{Role, authenticate_stub};
use crate::error::ApiError;
use crate::handlers::{
    create_employee, get_employee, inactivate_employee, list_employees, run_expiry_sweep,
};
use crate::request_response::{InactivateRequest, ListEmployeesParams};

#[test]
fn test_authenticate_stub_rejects_empty_actor() {
    let err = authenticate_stub(String::new(), Role::Admin).unwrap_err();
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_authenticate_stub_accepts_well_formed_claim() {
    let actor = authenticate_stub(String::from("ops-1"), Role::Viewer).expect("authenticated");
    assert_eq!(actor.id, "ops-1");
    assert_eq!(actor.role, Role::Viewer);
}

#[test]
fn test_role_parse() {
    assert_eq!(Role::parse("admin").expect("role"), Role::Admin);
    assert_eq!(Role::parse("Viewer").expect("role"), Role::Viewer);
    assert!(Role::parse("root").is_err());
}

#[test]
fn test_viewer_cannot_write() {
    let mut persistence = test_persistence_with_project();
    let viewer = create_test_viewer();

    let err = create_employee(
        &mut persistence,
        "ACME",
        create_valid_request(),
        &viewer,
        test_today(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let err = run_expiry_sweep(&mut persistence, "ACME", &viewer, test_today()).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_viewer_can_read() {
    let mut persistence = test_persistence_with_project();
    let created = seed_employee(&mut persistence);

    // Reads carry no role gate; the viewer sees lists and records.
    let listed = list_employees(
        &mut persistence,
        "ACME",
        &ListEmployeesParams::default(),
        test_today(),
    )
    .expect("listed");
    assert_eq!(listed.len(), 1);

    let info = get_employee(&mut persistence, "ACME", created.employee_id, test_today())
        .expect("loaded");
    assert_eq!(info.name, "Jane Doe");
}

#[test]
fn test_unauthorized_write_leaves_state_untouched() {
    let mut persistence = test_persistence_with_project();
    let created = seed_employee(&mut persistence);

    let err = inactivate_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        &InactivateRequest {
            reason: String::from("resigned"),
        },
        &create_test_viewer(),
        test_today(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let info = get_employee(&mut persistence, "ACME", created.employee_id, test_today())
        .expect("loaded");
    assert_eq!(info.inactive_reason, None);
}
