// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Active/inactive partition queries and their interaction with the
//! expiry sweep.

use super::{seed_employee, seed_project, test_date, test_persistence};
use chrono::Duration;
use roster::plan_sweep;
use roster_domain::Employee;

#[test]
fn test_partition_by_reason_and_contract_end() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");
    let today = test_date(2026, 3, 1);

    // Active: current contract, no reason.
    seed_employee(
        &mut persistence,
        &project,
        "Current",
        today - Duration::days(100),
        today + Duration::days(100),
    );
    // Active edge: contract ends today.
    seed_employee(
        &mut persistence,
        &project,
        "EndsToday",
        today - Duration::days(100),
        today,
    );
    // Inactive by expiry: contract ended, no reason yet.
    seed_employee(
        &mut persistence,
        &project,
        "Expired",
        today - Duration::days(400),
        today - Duration::days(5),
    );
    // Inactive by reason.
    let mut resigned = seed_employee(
        &mut persistence,
        &project,
        "Resigned",
        today - Duration::days(100),
        today + Duration::days(100),
    );
    resigned.inactive_reason = Some(String::from("resigned"));
    persistence.update_employee(&resigned).expect("updated");

    let active = persistence.list_active(&project, today).expect("active");
    let inactive = persistence.list_inactive(&project, today).expect("inactive");

    let active_names: Vec<&str> = active.iter().map(|e| e.name.as_str()).collect();
    let inactive_names: Vec<&str> = inactive.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(active_names, vec!["Current", "EndsToday"]);
    assert_eq!(inactive_names, vec!["Expired", "Resigned"]);
}

#[test]
fn test_sweep_execution_moves_record_between_partitions() {
    let mut persistence = test_persistence();
    let project = seed_project(&mut persistence, "ACME");
    let today = test_date(2026, 3, 1);

    // Scenario: contract ended five days ago, still no reason.
    seed_employee(
        &mut persistence,
        &project,
        "Jane",
        today - Duration::days(370),
        today - Duration::days(5),
    );

    // The record shows up as inactive (expired) but carries no reason yet.
    let all = persistence.list_employees(&project).expect("all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].inactive_reason, None);

    // Execute the sweep plan the way the API layer does.
    let plan = plan_sweep(&all, today).expect("planned");
    assert_eq!(plan.actions.len(), 1);
    for action in &plan.actions {
        persistence
            .update_employee(&action.transition.employee)
            .expect("swept");
    }

    let swept = persistence
        .get_employee(&project, all[0].employee_id.expect("id"))
        .expect("loaded");
    assert_eq!(swept.inactive_reason.as_deref(), Some(Employee::EOC_REASON));

    let active = persistence.list_active(&project, today).expect("active");
    assert!(active.is_empty());
    let inactive = persistence.list_inactive(&project, today).expect("inactive");
    assert_eq!(inactive.len(), 1);

    // Idempotence: a second sweep over the stored state selects nothing.
    let again = persistence.list_employees(&project).expect("all");
    let second = plan_sweep(&again, today).expect("planned");
    assert!(second.actions.is_empty());
}
