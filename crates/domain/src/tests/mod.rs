// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod types;

use crate::types::{Employee, Project};
use chrono::NaiveDate;

pub fn test_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn test_project() -> Project {
    Project::with_id(1, "ACME", Some(String::from("Acme Industries")))
}

pub fn test_employee(name: &str, start: NaiveDate, end: NaiveDate) -> Employee {
    Employee::new(
        test_project(),
        String::from(name),
        String::from("CTR-001"),
        start,
        end,
    )
}
