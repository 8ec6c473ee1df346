// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{test_date, test_employee};
use crate::types::{DocumentRef, DocumentSlots, Employee, LifecycleStatus, Project};
use std::str::FromStr;

#[test]
fn test_project_codes_normalize_to_uppercase() {
    let project: Project = Project::new("acme ");
    assert_eq!(project.code(), "ACME");
    assert_eq!(project.project_id(), None);
}

#[test]
fn test_projects_equal_by_code_regardless_of_id() {
    let a: Project = Project::new("ACME");
    let b: Project = Project::with_id(7, "acme", None);
    assert_eq!(a, b);
}

#[test]
fn test_status_active_when_no_reason_and_contract_current() {
    let today = test_date(2026, 3, 1);
    let employee = test_employee("Jane", test_date(2026, 1, 1), test_date(2026, 6, 30));
    assert_eq!(employee.status(today), LifecycleStatus::Active);
    assert!(employee.is_active(today));
}

#[test]
fn test_status_inactive_when_reason_set() {
    let today = test_date(2026, 3, 1);
    let mut employee = test_employee("Jane", test_date(2026, 1, 1), test_date(2026, 6, 30));
    employee.inactive_reason = Some(String::from("resigned"));
    assert_eq!(employee.status(today), LifecycleStatus::Inactive);
    assert!(!employee.is_active(today));
}

#[test]
fn test_status_pending_when_restored_but_contract_expired() {
    let today = test_date(2026, 3, 1);
    let employee = test_employee("Jane", test_date(2025, 1, 1), test_date(2026, 2, 1));
    assert_eq!(employee.status(today), LifecycleStatus::PendingContractUpdate);
    assert!(!employee.is_active(today));
}

#[test]
fn test_status_contract_ending_today_still_active() {
    let today = test_date(2026, 3, 1);
    let employee = test_employee("Jane", test_date(2025, 6, 1), today);
    assert_eq!(employee.status(today), LifecycleStatus::Active);
    assert!(employee.is_active(today));
}

#[test]
fn test_status_round_trips_through_strings() {
    for status in [
        LifecycleStatus::Active,
        LifecycleStatus::PendingContractUpdate,
        LifecycleStatus::Inactive,
    ] {
        assert_eq!(
            LifecycleStatus::from_str(status.as_str()).expect("round trip"),
            status
        );
    }
    assert!(LifecycleStatus::from_str("retired").is_err());
}

#[test]
fn test_document_slot_set_and_get() {
    let mut slots: DocumentSlots = DocumentSlots::new();
    slots
        .set(
            "CV",
            DocumentRef {
                filename: String::from("cv.pdf"),
                path: String::from("uploads/1/cv.pdf"),
                mime_type: String::from("application/pdf"),
                size: 12_345,
            },
        )
        .expect("valid slot");

    // Slot names normalize to lowercase.
    assert_eq!(slots.get("cv").map(|r| r.filename.as_str()), Some("cv.pdf"));
}

#[test]
fn test_document_slot_clear_nulls_the_reference() {
    let mut slots: DocumentSlots = DocumentSlots::new();
    slots
        .set(
            "id_card",
            DocumentRef {
                filename: String::from("id.png"),
                path: String::from("uploads/1/id.png"),
                mime_type: String::from("image/png"),
                size: 999,
            },
        )
        .expect("valid slot");
    slots.clear("id_card").expect("valid slot");

    assert_eq!(slots.get("id_card"), None);
    // The cleared slot is still recorded, holding an explicit None.
    let entries: Vec<(&str, Option<&DocumentRef>)> = slots.entries().collect();
    assert_eq!(entries, vec![("id_card", None)]);
}

#[test]
fn test_document_slot_rejects_empty_name() {
    let mut slots: DocumentSlots = DocumentSlots::new();
    assert!(slots.clear("   ").is_err());
}

#[test]
fn test_search_haystack_covers_attributes() {
    let mut employee = test_employee("Jane Doe", test_date(2026, 1, 1), test_date(2026, 6, 30));
    employee.attributes.insert(
        String::from("bank_account"),
        serde_json::Value::String(String::from("1234567890")),
    );
    employee.position = Some(String::from("Site Supervisor"));

    let haystack: String = employee.search_haystack();
    assert!(haystack.contains("jane doe"));
    assert!(haystack.contains("ctr-001"));
    assert!(haystack.contains("1234567890"));
    assert!(haystack.contains("site supervisor"));
    assert!(haystack.contains("2026-06-30"));
}

#[test]
fn test_eoc_reason_constant() {
    assert_eq!(Employee::EOC_REASON, "EOC");
}
