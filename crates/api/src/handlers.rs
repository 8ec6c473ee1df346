// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every mutation funnels through the core's command/apply entry point so
//! the lifecycle invariants hold uniformly for single edits, document slot
//! writes, bulk import rows, and the expiry sweep.
//!
//! History-ledger writes happen here, after the record write commits, and
//! are best-effort: a failed ledger insert is logged and swallowed, never
//! propagated to the caller and never undoing the committed update.

use chrono::NaiveDate;
use roster::{Command, EmployeeChanges, Transition, apply, apply_hire, plan_sweep};
use roster_audit::SYSTEM_ACTOR;
use roster_domain::{
    BucketFilter, ClassificationBucket, DateField, DomainError, Employee, Project, ThresholdSet,
    filter_employees, parse_date_strict, sort_by_urgency, tally_employees,
    validate_project_code,
};
use roster_persistence::Persistence;
use std::str::FromStr;
use tracing::{error, info, warn};

use crate::auth::AuthenticatedActor;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AggregateResponse, CreateEmployeeRequest, CreateProjectRequest, EmployeeInfo,
    HistoryEntryInfo, InactivateRequest, ListEmployeesParams, ProjectInfo, SetDocumentRequest,
    StatusFilter, SweepFailure, SweepReport, UpdateEmployeeRequest,
};

/// Rejects empty required string fields before strict parsing.
fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        Err(translate_domain_error(DomainError::MissingField { field }))
    } else {
        Ok(value)
    }
}

/// Resolves a project by code, translating lookup failures.
fn resolve_project(persistence: &mut Persistence, code: &str) -> Result<Project, ApiError> {
    validate_project_code(code).map_err(translate_domain_error)?;
    persistence
        .get_project(code)
        .map_err(translate_persistence_error)
}

/// Loads one employee scoped to a project, translating lookup failures.
fn load_employee(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
) -> Result<Employee, ApiError> {
    let project: Project = resolve_project(persistence, project_code)?;
    persistence
        .get_employee(&project, employee_id)
        .map_err(translate_persistence_error)
}

/// Persists a transition and best-effort records its contract change.
///
/// The ledger write is attempted only after the record write commits.
/// Ledger failures are logged at `warn` and swallowed.
fn persist_transition(
    persistence: &mut Persistence,
    transition: &Transition,
    modified_by: &str,
) -> Result<(), ApiError> {
    persistence
        .update_employee(&transition.employee)
        .map_err(translate_persistence_error)?;

    if let (Some(change), Some(employee_id)) =
        (&transition.change, transition.employee.employee_id)
    {
        if let Err(e) = persistence.record_history(employee_id, change, modified_by) {
            warn!(employee_id, error = %e, "Contract history write failed; record update stands");
        }
    }

    Ok(())
}

// ============================================================================
// Projects
// ============================================================================

/// Creates a project namespace.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the code is empty, or
/// the insert fails.
pub fn create_project(
    persistence: &mut Persistence,
    request: &CreateProjectRequest,
    actor: &AuthenticatedActor,
) -> Result<ProjectInfo, ApiError> {
    actor.require_admin("create_project")?;
    validate_project_code(&request.code).map_err(translate_domain_error)?;

    let project: Project = persistence
        .create_project(&request.code, request.name.as_deref())
        .map_err(translate_persistence_error)?;

    info!(code = project.code(), "Created project");
    Ok(ProjectInfo::from(&project))
}

/// Lists all projects.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_projects(persistence: &mut Persistence) -> Result<Vec<ProjectInfo>, ApiError> {
    let projects: Vec<Project> = persistence
        .list_projects()
        .map_err(translate_persistence_error)?;
    Ok(projects.iter().map(ProjectInfo::from).collect())
}

// ============================================================================
// Employee records
// ============================================================================

/// Creates an employee record via the lifecycle core.
///
/// Dates are accepted in `DD/MM/YYYY` or `YYYY-MM-DD` form and normalized
/// to canonical `YYYY-MM-DD` before persistence.
///
/// # Errors
///
/// Returns a field-identifying validation error on missing fields, bad
/// date formats, or `contract_end <= contract_start`.
pub fn create_employee(
    persistence: &mut Persistence,
    project_code: &str,
    request: CreateEmployeeRequest,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<EmployeeInfo, ApiError> {
    actor.require_admin("create_employee")?;

    let project: Project = resolve_project(persistence, project_code)?;

    required("name", &request.name)?;
    let start_text: &str = required("contract_start", &request.contract_start)?;
    let end_text: &str = required("contract_end", &request.contract_end)?;

    let contract_start: NaiveDate =
        parse_date_strict("contract_start", start_text).map_err(translate_domain_error)?;
    let contract_end: NaiveDate =
        parse_date_strict("contract_end", end_text).map_err(translate_domain_error)?;

    let command: Command = Command::Hire {
        project,
        name: request.name,
        position: request.position,
        contract_number: request.contract_number.unwrap_or_default(),
        contract_start,
        contract_end,
        attributes: request.attributes,
    };

    let employee: Employee = apply_hire(command).map_err(translate_core_error)?;
    let stored: Employee = persistence
        .insert_employee(&employee)
        .map_err(translate_persistence_error)?;

    info!(
        project = project_code,
        employee_id = stored.employee_id,
        "Created employee record"
    );
    Ok(EmployeeInfo::of(&stored, today))
}

/// Retrieves one employee record.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown projects or records.
pub fn get_employee(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
    today: NaiveDate,
) -> Result<EmployeeInfo, ApiError> {
    let employee: Employee = load_employee(persistence, project_code, employee_id)?;
    Ok(EmployeeInfo::of(&employee, today))
}

/// Lists employee records with status, bucket, and search filtering.
///
/// Results are ordered most-urgent-first on the contract end date.
///
/// # Errors
///
/// Returns an error for unknown projects or unrecognized filter values.
pub fn list_employees(
    persistence: &mut Persistence,
    project_code: &str,
    params: &ListEmployeesParams,
    today: NaiveDate,
) -> Result<Vec<EmployeeInfo>, ApiError> {
    let project: Project = resolve_project(persistence, project_code)?;

    let mut records: Vec<Employee> = match params.status {
        StatusFilter::All => persistence.list_employees(&project),
        StatusFilter::Active => persistence.list_active(&project, today),
        StatusFilter::Inactive => persistence.list_inactive(&project, today),
    }
    .map_err(translate_persistence_error)?;

    let bucket_filter: BucketFilter = match params.bucket.as_deref() {
        None | Some("all") => BucketFilter::All,
        Some(name) => BucketFilter::Only(
            ClassificationBucket::from_str(name).map_err(translate_domain_error)?,
        ),
    };
    let search: &str = params.search.as_deref().unwrap_or("");

    sort_by_urgency(
        &mut records,
        DateField::ContractEnd,
        today,
        &ThresholdSet::CONTRACT,
    );
    let filtered: Vec<&Employee> = filter_employees(
        &records,
        DateField::ContractEnd,
        bucket_filter,
        search,
        today,
        &ThresholdSet::CONTRACT,
    );

    Ok(filtered
        .into_iter()
        .map(|employee| EmployeeInfo::of(employee, today))
        .collect())
}

/// Updates an employee record via the lifecycle core.
///
/// When any contract field differs from the stored values, exactly one
/// history ledger entry is recorded with the old/new snapshot pair.
///
/// # Errors
///
/// Returns a field-identifying validation error on bad input, or
/// `ResourceNotFound` for unknown records.
pub fn update_employee(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
    request: UpdateEmployeeRequest,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<EmployeeInfo, ApiError> {
    actor.require_admin("update_employee")?;

    let current: Employee = load_employee(persistence, project_code, employee_id)?;

    let contract_start: Option<NaiveDate> = request
        .contract_start
        .as_deref()
        .map(|v| parse_date_strict("contract_start", v))
        .transpose()
        .map_err(translate_domain_error)?;
    let contract_end: Option<NaiveDate> = request
        .contract_end
        .as_deref()
        .map(|v| parse_date_strict("contract_end", v))
        .transpose()
        .map_err(translate_domain_error)?;

    let changes: EmployeeChanges = EmployeeChanges {
        name: request.name,
        position: request.position.map(Some),
        contract_number: request.contract_number,
        contract_start,
        contract_end,
        inactive_reason: request.inactive_reason.map(Some),
        attributes: request.attributes,
    };

    let transition: Transition =
        apply(&current, Command::Amend { changes }).map_err(translate_core_error)?;
    persist_transition(persistence, &transition, &actor.id)?;

    info!(
        project = project_code,
        employee_id,
        contract_changed = transition.change.is_some(),
        "Updated employee record"
    );
    Ok(EmployeeInfo::of(&transition.employee, today))
}

/// Inactivates an employee record with an operator-supplied reason.
///
/// # Errors
///
/// Returns a validation error for an empty reason, or `ResourceNotFound`
/// for unknown records.
pub fn inactivate_employee(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
    request: &InactivateRequest,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<EmployeeInfo, ApiError> {
    actor.require_admin("inactivate_employee")?;

    let current: Employee = load_employee(persistence, project_code, employee_id)?;
    let transition: Transition = apply(
        &current,
        Command::Inactivate {
            reason: request.reason.clone(),
        },
    )
    .map_err(translate_core_error)?;
    persist_transition(persistence, &transition, &actor.id)?;

    info!(project = project_code, employee_id, "Inactivated employee record");
    Ok(EmployeeInfo::of(&transition.employee, today))
}

/// Restores an inactive employee record.
///
/// Restore clears the inactivation reason without touching or
/// re-validating the contract dates; a record with an expired contract
/// lands in the transient pending state and the next sweep re-inactivates
/// it unless its dates are updated first.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown records.
pub fn restore_employee(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<EmployeeInfo, ApiError> {
    actor.require_admin("restore_employee")?;

    let current: Employee = load_employee(persistence, project_code, employee_id)?;
    let transition: Transition =
        apply(&current, Command::Restore).map_err(translate_core_error)?;
    persist_transition(persistence, &transition, &actor.id)?;

    info!(
        project = project_code,
        employee_id,
        status = %transition.employee.status(today),
        "Restored employee record"
    );
    Ok(EmployeeInfo::of(&transition.employee, today))
}

/// Deletes an employee record; history rows cascade.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown records.
pub fn delete_employee(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    actor.require_admin("delete_employee")?;

    let project: Project = resolve_project(persistence, project_code)?;
    persistence
        .delete_employee(&project, employee_id)
        .map_err(translate_persistence_error)?;

    info!(project = project_code, employee_id, "Deleted employee record");
    Ok(())
}

// ============================================================================
// Expiry sweep
// ============================================================================

/// Runs the expiry sweep over one project.
///
/// Every record with no inactivation reason and an expired contract is
/// inactivated with the end-of-contract reason. Per-record persistence
/// failures are logged and reported; the batch continues.
///
/// # Errors
///
/// Returns an error if the project is unknown or the record listing fails.
/// Per-record persistence failures are reported in the result, not raised.
pub fn run_expiry_sweep(
    persistence: &mut Persistence,
    project_code: &str,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<SweepReport, ApiError> {
    actor.require_admin("run_expiry_sweep")?;

    let project: Project = resolve_project(persistence, project_code)?;
    let records: Vec<Employee> = persistence
        .list_employees(&project)
        .map_err(translate_persistence_error)?;

    let plan = plan_sweep(&records, today).map_err(translate_core_error)?;

    let mut inactivated: Vec<i64> = Vec::new();
    let mut failures: Vec<SweepFailure> = Vec::new();

    for action in &plan.actions {
        match persist_transition(persistence, &action.transition, SYSTEM_ACTOR) {
            Ok(()) => inactivated.push(action.employee_id),
            Err(e) => {
                error!(
                    employee_id = action.employee_id,
                    error = %e,
                    "Expiry sweep failed for record; continuing"
                );
                failures.push(SweepFailure {
                    employee_id: action.employee_id,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        project = project_code,
        checked = plan.checked,
        inactivated = inactivated.len(),
        failed = failures.len(),
        "Expiry sweep finished"
    );

    Ok(SweepReport {
        checked: plan.checked,
        inactivated,
        failures,
    })
}

// ============================================================================
// History and aggregation
// ============================================================================

/// Lists the contract history ledger for one employee, newest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown records.
pub fn get_history(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
) -> Result<Vec<HistoryEntryInfo>, ApiError> {
    // Scope check first so an unknown record 404s instead of listing empty.
    let _: Employee = load_employee(persistence, project_code, employee_id)?;

    let entries = persistence
        .list_history(employee_id)
        .map_err(translate_persistence_error)?;
    Ok(entries.iter().map(HistoryEntryInfo::from).collect())
}

/// Returns bucketed counts for a project on a chosen date field and
/// threshold category.
///
/// # Errors
///
/// Returns an error for unknown projects, fields, or threshold sets.
pub fn aggregate(
    persistence: &mut Persistence,
    project_code: &str,
    field: &str,
    thresholds: &str,
    today: NaiveDate,
) -> Result<AggregateResponse, ApiError> {
    let project: Project = resolve_project(persistence, project_code)?;
    let date_field: DateField = DateField::from_str(field).map_err(translate_domain_error)?;
    let threshold_set: ThresholdSet =
        ThresholdSet::parse(thresholds).map_err(translate_domain_error)?;

    let records: Vec<Employee> = persistence
        .list_employees(&project)
        .map_err(translate_persistence_error)?;

    Ok(AggregateResponse::from(tally_employees(
        &records,
        date_field,
        today,
        &threshold_set,
    )))
}

// ============================================================================
// Document slots
// ============================================================================

/// Stores a document reference in a named slot.
///
/// The core only records the reference; the bytes live with the external
/// file-storage collaborator.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown records or a validation error
/// for an empty slot name.
pub fn set_document(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
    slot: &str,
    request: SetDocumentRequest,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<EmployeeInfo, ApiError> {
    actor.require_admin("set_document")?;

    let mut employee: Employee = load_employee(persistence, project_code, employee_id)?;
    employee
        .documents
        .set(slot, request.into())
        .map_err(translate_domain_error)?;
    persistence
        .update_employee(&employee)
        .map_err(translate_persistence_error)?;

    Ok(EmployeeInfo::of(&employee, today))
}

/// Clears a named document slot, nulling the whole reference.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown records or a validation error
/// for an empty slot name.
pub fn clear_document(
    persistence: &mut Persistence,
    project_code: &str,
    employee_id: i64,
    slot: &str,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<EmployeeInfo, ApiError> {
    actor.require_admin("clear_document")?;

    let mut employee: Employee = load_employee(persistence, project_code, employee_id)?;
    employee
        .documents
        .clear(slot)
        .map_err(translate_domain_error)?;
    persistence
        .update_employee(&employee)
        .map_err(translate_persistence_error)?;

    Ok(EmployeeInfo::of(&employee, today))
}
