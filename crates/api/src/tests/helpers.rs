// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::NaiveDate;
use roster_persistence::Persistence;

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers::{create_employee, create_project};
use crate::request_response::{CreateEmployeeRequest, CreateProjectRequest, EmployeeInfo};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_viewer() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("viewer-456"), Role::Viewer)
}

pub fn test_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// The fixed "today" used across API tests.
pub fn test_today() -> NaiveDate {
    test_date(2026, 3, 1)
}

pub fn test_persistence_with_project() -> Persistence {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    create_project(
        &mut persistence,
        &CreateProjectRequest {
            code: String::from("ACME"),
            name: Some(String::from("Acme Industries")),
        },
        &create_test_admin(),
    )
    .expect("project created");
    persistence
}

pub fn create_valid_request() -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        name: String::from("Jane Doe"),
        position: Some(String::from("Site Supervisor")),
        contract_number: Some(String::from("CTR-001")),
        contract_start: String::from("2026-01-01"),
        contract_end: String::from("2026-12-31"),
        attributes: serde_json::Map::new(),
    }
}

pub fn seed_employee(persistence: &mut Persistence) -> EmployeeInfo {
    create_employee(
        persistence,
        "ACME",
        create_valid_request(),
        &create_test_admin(),
        test_today(),
    )
    .expect("employee created")
}
