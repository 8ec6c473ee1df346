// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod employee_tests;
mod partition_tests;

use crate::Persistence;
use chrono::NaiveDate;
use roster_domain::{Employee, Project};

pub fn test_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn seed_project(persistence: &mut Persistence, code: &str) -> Project {
    persistence
        .create_project(code, Some("Test Client"))
        .expect("project created")
}

pub fn seed_employee(
    persistence: &mut Persistence,
    project: &Project,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Employee {
    let employee: Employee = Employee::new(
        project.clone(),
        String::from(name),
        String::from("CTR-001"),
        start,
        end,
    );
    persistence.insert_employee(&employee).expect("employee inserted")
}
