// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{seed_employee, seed_project, test_date, test_persistence};
use crate::PersistenceError;
use roster_domain::{DocumentRef, Employee, Project};

#[test]
fn test_insert_assigns_sequential_ids() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");

    let first = seed_employee(
        &mut persistence,
        &project,
        "First",
        test_date(2026, 1, 1),
        test_date(2026, 12, 31),
    );
    let second = seed_employee(
        &mut persistence,
        &project,
        "Second",
        test_date(2026, 1, 1),
        test_date(2026, 12, 31),
    );

    assert_eq!(first.employee_id, Some(1));
    assert_eq!(second.employee_id, Some(2));
}

#[test]
fn test_get_round_trips_all_fields() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");

    let mut employee: Employee = Employee::new(
        project.clone(),
        String::from("Jane Doe"),
        String::from("CTR-007"),
        test_date(2026, 2, 1),
        test_date(2027, 1, 31),
    );
    employee.position = Some(String::from("Safety Officer"));
    employee.attributes.insert(
        String::from("insurance_number"),
        serde_json::Value::String(String::from("INS-42")),
    );
    employee
        .documents
        .set(
            "cv",
            DocumentRef {
                filename: String::from("cv.pdf"),
                path: String::from("uploads/cv.pdf"),
                mime_type: String::from("application/pdf"),
                size: 1024,
            },
        )
        .expect("valid slot");

    let stored = persistence.insert_employee(&employee).expect("inserted");
    let loaded = persistence
        .get_employee(&project, stored.employee_id.expect("id assigned"))
        .expect("loaded");

    assert_eq!(loaded.name, "Jane Doe");
    assert_eq!(loaded.position.as_deref(), Some("Safety Officer"));
    assert_eq!(loaded.contract_number, "CTR-007");
    assert_eq!(loaded.contract_start, test_date(2026, 2, 1));
    assert_eq!(loaded.contract_end, test_date(2027, 1, 31));
    assert_eq!(loaded.inactive_reason, None);
    assert_eq!(
        loaded.attributes.get("insurance_number"),
        Some(&serde_json::Value::String(String::from("INS-42")))
    );
    assert_eq!(loaded.documents.get("cv").map(|r| r.size), Some(1024));
}

#[test]
fn test_get_unknown_employee_is_not_found() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");

    let err = persistence.get_employee(&project, 999).unwrap_err();
    assert_eq!(
        err,
        PersistenceError::EmployeeNotFound {
            project: String::from("ACME"),
            employee_id: 999,
        }
    );
}

#[test]
fn test_unknown_project_is_not_found() {
    let mut persistence = test_persistence();

    let ghost: Project = Project::new("GHOST");
    let err = persistence.list_employees(&ghost).unwrap_err();
    assert_eq!(err, PersistenceError::ProjectNotFound(String::from("GHOST")));
}

#[test]
fn test_update_persists_changed_fields() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");
    let mut employee = seed_employee(
        &mut persistence,
        &project,
        "Jane",
        test_date(2026, 1, 1),
        test_date(2026, 12, 31),
    );

    employee.contract_number = String::from("CTR-NEW");
    employee.inactive_reason = Some(String::from("resigned"));
    persistence.update_employee(&employee).expect("updated");

    let loaded = persistence
        .get_employee(&project, employee.employee_id.expect("id"))
        .expect("loaded");
    assert_eq!(loaded.contract_number, "CTR-NEW");
    assert_eq!(loaded.inactive_reason.as_deref(), Some("resigned"));
}

#[test]
fn test_update_unknown_employee_is_not_found() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");

    let mut ghost: Employee = Employee::new(
        project,
        String::from("Ghost"),
        String::from("CTR-000"),
        test_date(2026, 1, 1),
        test_date(2026, 12, 31),
    );
    ghost.employee_id = Some(12_345);

    assert!(matches!(
        persistence.update_employee(&ghost).unwrap_err(),
        PersistenceError::EmployeeNotFound { .. }
    ));
}

#[test]
fn test_delete_removes_record() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");
    let employee = seed_employee(
        &mut persistence,
        &project,
        "Jane",
        test_date(2026, 1, 1),
        test_date(2026, 12, 31),
    );
    let id = employee.employee_id.expect("id");

    persistence.delete_employee(&project, id).expect("deleted");
    assert!(matches!(
        persistence.get_employee(&project, id).unwrap_err(),
        PersistenceError::EmployeeNotFound { .. }
    ));
}

#[test]
fn test_project_scoping_isolates_records() {
    let mut persistence = test_persistence();
    let acme = seed_project(&mut persistence, "ACME");
    let globex = seed_project(&mut persistence, "GLOBEX");

    let employee = seed_employee(
        &mut persistence,
        &acme,
        "Jane",
        test_date(2026, 1, 1),
        test_date(2026, 12, 31),
    );
    let id = employee.employee_id.expect("id");

    // Visible under its own project, invisible under the other.
    assert!(persistence.get_employee(&acme, id).is_ok());
    assert!(matches!(
        persistence.get_employee(&globex, id).unwrap_err(),
        PersistenceError::EmployeeNotFound { .. }
    ));
    assert_eq!(persistence.count_employees(&globex).expect("count"), 0);
    assert_eq!(persistence.count_employees(&acme).expect("count"), 1);
}
