// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_admin, create_valid_request, seed_employee, test_persistence_with_project,
    test_today,
};
use crate::error::ApiError;
use crate::handlers::{
    aggregate, clear_document, create_employee, get_employee, get_history, list_employees,
    set_document, update_employee,
};
use crate::request_response::{
    CreateEmployeeRequest, ListEmployeesParams, SetDocumentRequest, StatusFilter,
    UpdateEmployeeRequest,
};

#[test]
fn test_create_normalizes_slash_dates() {
    let mut persistence = test_persistence_with_project();

    let info = create_employee(
        &mut persistence,
        "ACME",
        CreateEmployeeRequest {
            contract_start: String::from("01/01/2026"),
            contract_end: String::from("31/12/2026"),
            ..create_valid_request()
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("created");

    assert_eq!(info.contract_start, "2026-01-01");
    assert_eq!(info.contract_end, "2026-12-31");
    assert_eq!(info.status, "active");
}

#[test]
fn test_create_rejects_inverted_dates_naming_contract_end() {
    let mut persistence = test_persistence_with_project();

    let err = create_employee(
        &mut persistence,
        "ACME",
        CreateEmployeeRequest {
            contract_start: String::from("2024-01-01"),
            contract_end: String::from("2023-12-31"),
            ..create_valid_request()
        },
        &create_test_admin(),
        test_today(),
    )
    .unwrap_err();

    match err {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "contract_end"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_create_rejects_malformed_date_strictly() {
    let mut persistence = test_persistence_with_project();

    let err = create_employee(
        &mut persistence,
        "ACME",
        CreateEmployeeRequest {
            contract_end: String::from("12-31-2026"),
            ..create_valid_request()
        },
        &create_test_admin(),
        test_today(),
    )
    .unwrap_err();

    match err {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "contract_end"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_create_rejects_missing_name() {
    let mut persistence = test_persistence_with_project();

    let err = create_employee(
        &mut persistence,
        "ACME",
        CreateEmployeeRequest {
            name: String::from("  "),
            ..create_valid_request()
        },
        &create_test_admin(),
        test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "name"));
}

#[test]
fn test_create_in_unknown_project_is_not_found() {
    let mut persistence = test_persistence_with_project();

    let err = create_employee(
        &mut persistence,
        "GHOST",
        create_valid_request(),
        &create_test_admin(),
        test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_update_contract_number_records_exactly_one_history_entry() {
    let mut persistence = test_persistence_with_project();
    let created = seed_employee(&mut persistence);

    update_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        UpdateEmployeeRequest {
            contract_number: Some(String::from("NEW-001")),
            ..UpdateEmployeeRequest::default()
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("updated");

    let history = get_history(&mut persistence, "ACME", created.employee_id).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].old_contract_number, "CTR-001");
    assert_eq!(history[0].new_contract_number, "NEW-001");
    assert_eq!(history[0].old_contract_start, history[0].new_contract_start);
    assert_eq!(history[0].old_contract_end, history[0].new_contract_end);
    assert_eq!(history[0].modified_by, "admin-123");
}

#[test]
fn test_update_without_contract_change_records_nothing() {
    let mut persistence = test_persistence_with_project();
    let created = seed_employee(&mut persistence);

    update_employee(
        &mut persistence,
        "ACME",
        created.employee_id,
        UpdateEmployeeRequest {
            name: Some(String::from("Jane Q. Doe")),
            ..UpdateEmployeeRequest::default()
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("updated");

    let history = get_history(&mut persistence, "ACME", created.employee_id).expect("history");
    assert!(history.is_empty());
}

#[test]
fn test_update_unknown_employee_is_not_found() {
    let mut persistence = test_persistence_with_project();

    let err = update_employee(
        &mut persistence,
        "ACME",
        999,
        UpdateEmployeeRequest::default(),
        &create_test_admin(),
        test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_list_filters_by_search_term() {
    let mut persistence = test_persistence_with_project();
    seed_employee(&mut persistence);
    create_employee(
        &mut persistence,
        "ACME",
        CreateEmployeeRequest {
            name: String::from("John Smith"),
            ..create_valid_request()
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("created");

    let matched = list_employees(
        &mut persistence,
        "ACME",
        &ListEmployeesParams {
            status: StatusFilter::All,
            bucket: None,
            search: Some(String::from("smith")),
        },
        test_today(),
    )
    .expect("listed");

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "John Smith");
}

#[test]
fn test_list_rejects_unknown_bucket() {
    let mut persistence = test_persistence_with_project();

    let err = list_employees(
        &mut persistence,
        "ACME",
        &ListEmployeesParams {
            status: StatusFilter::All,
            bucket: Some(String::from("purple")),
            search: None,
        },
        test_today(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "bucket"));
}

#[test]
fn test_aggregate_counts_under_contract_thresholds() {
    let mut persistence = test_persistence_with_project();
    // Ends 2026-12-31, 305 days past 2026-03-01: normal.
    seed_employee(&mut persistence);
    // Ends in 10 days: due soon (Scenario B).
    create_employee(
        &mut persistence,
        "ACME",
        CreateEmployeeRequest {
            contract_end: String::from("2026-03-11"),
            ..create_valid_request()
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("created");

    let counts = aggregate(&mut persistence, "ACME", "contract_end", "contract", test_today())
        .expect("aggregated");

    assert_eq!(counts.total, 2);
    assert_eq!(counts.due_soon, 1);
    assert_eq!(counts.normal, 1);
}

#[test]
fn test_aggregate_rejects_unknown_threshold_set() {
    let mut persistence = test_persistence_with_project();

    let err = aggregate(&mut persistence, "ACME", "contract_end", "weekly", test_today())
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "thresholds"));
}

#[test]
fn test_document_slot_set_and_clear() {
    let mut persistence = test_persistence_with_project();
    let created = seed_employee(&mut persistence);

    let info = set_document(
        &mut persistence,
        "ACME",
        created.employee_id,
        "cv",
        SetDocumentRequest {
            filename: String::from("cv.pdf"),
            path: String::from("uploads/1/cv.pdf"),
            mime_type: String::from("application/pdf"),
            size: 2048,
        },
        &create_test_admin(),
        test_today(),
    )
    .expect("document set");
    assert_eq!(info.documents.get("cv").map(|r| r.size), Some(2048));

    let cleared = clear_document(
        &mut persistence,
        "ACME",
        created.employee_id,
        "cv",
        &create_test_admin(),
        test_today(),
    )
    .expect("document cleared");
    assert_eq!(cleared.documents.get("cv"), None);

    // The cleared slot persists as an explicit null, untouched by reloads.
    let reloaded = get_employee(&mut persistence, "ACME", created.employee_id, test_today())
        .expect("reloaded");
    assert_eq!(reloaded.documents.get("cv"), None);

    // Document slot writes never touch the contract ledger.
    let history = get_history(&mut persistence, "ACME", created.employee_id).expect("history");
    assert!(history.is_empty());
}
