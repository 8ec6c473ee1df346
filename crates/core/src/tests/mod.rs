// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod apply_tests;

use chrono::NaiveDate;
use roster_domain::{Employee, Project};

pub fn test_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn test_project() -> Project {
    Project::with_id(1, "ACME", None)
}

pub fn test_employee(id: i64, start: NaiveDate, end: NaiveDate) -> Employee {
    let mut employee: Employee = Employee::new(
        test_project(),
        String::from("Jane Doe"),
        String::from("CTR-001"),
        start,
        end,
    );
    employee.employee_id = Some(id);
    employee
}
