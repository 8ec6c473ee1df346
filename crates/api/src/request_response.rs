// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! Dates in requests are strings in `DD/MM/YYYY` or `YYYY-MM-DD` form and
//! are normalized to canonical `YYYY-MM-DD` before persistence; dates in
//! responses are always canonical.

use roster_domain::{DocumentRef, DocumentSlots, Employee, LifecycleStatus, Project};
use serde::{Deserialize, Serialize};

/// API request to create a project namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// The project code (normalized to uppercase).
    pub code: String,
    /// Optional display name for the client company.
    pub name: Option<String>,
}

/// Project information for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// The project code.
    pub code: String,
    /// The display name if set.
    pub name: Option<String>,
}

impl From<&Project> for ProjectInfo {
    fn from(project: &Project) -> Self {
        Self {
            code: project.code().to_string(),
            name: project.name().map(ToString::to_string),
        }
    }
}

/// API request to create an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// The employee's name (required).
    pub name: String,
    /// The employee's position.
    #[serde(default)]
    pub position: Option<String>,
    /// The initial contract number.
    #[serde(default)]
    pub contract_number: Option<String>,
    /// The contract start date (required; `DD/MM/YYYY` or `YYYY-MM-DD`).
    pub contract_start: String,
    /// The contract end date (required; strictly after the start).
    pub contract_end: String,
    /// Opaque additional attributes carried through unchanged.
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// API request to update an employee record.
///
/// Absent fields are left alone. Clearing the inactivation reason is the
/// restore endpoint's job and is not expressible here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// New employee name.
    #[serde(default)]
    pub name: Option<String>,
    /// New position.
    #[serde(default)]
    pub position: Option<String>,
    /// New contract number.
    #[serde(default)]
    pub contract_number: Option<String>,
    /// New contract start date (`DD/MM/YYYY` or `YYYY-MM-DD`).
    #[serde(default)]
    pub contract_start: Option<String>,
    /// New contract end date (`DD/MM/YYYY` or `YYYY-MM-DD`).
    #[serde(default)]
    pub contract_end: Option<String>,
    /// New inactivation reason (non-empty when present).
    #[serde(default)]
    pub inactive_reason: Option<String>,
    /// Attribute values merged key-by-key into the stored bag.
    #[serde(default)]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

/// API request to inactivate an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactivateRequest {
    /// Why the record is being inactivated (must be non-empty).
    pub reason: String,
}

/// API request to store a document slot reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDocumentRequest {
    /// The original file name.
    pub filename: String,
    /// The storage path or key.
    pub path: String,
    /// The MIME type reported at upload time.
    pub mime_type: String,
    /// The file size in bytes.
    pub size: i64,
}

impl From<SetDocumentRequest> for DocumentRef {
    fn from(request: SetDocumentRequest) -> Self {
        Self {
            filename: request.filename,
            path: request.path,
            mime_type: request.mime_type,
            size: request.size,
        }
    }
}

/// Employee information returned by read and write operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// The canonical record identifier.
    pub employee_id: i64,
    /// The owning project code.
    pub project: String,
    /// The employee's name.
    pub name: String,
    /// The employee's position.
    pub position: Option<String>,
    /// The current contract number.
    pub contract_number: String,
    /// The contract start date (canonical `YYYY-MM-DD`).
    pub contract_start: String,
    /// The contract end date (canonical `YYYY-MM-DD`).
    pub contract_end: String,
    /// The inactivation reason, when set.
    pub inactive_reason: Option<String>,
    /// The derived lifecycle status.
    pub status: String,
    /// Whole days until the contract end (negative when past).
    pub days_remaining: Option<i64>,
    /// The severity bucket under the contract threshold set.
    pub bucket: String,
    /// Opaque additional attributes.
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Attached document slot references.
    pub documents: DocumentSlots,
}

impl EmployeeInfo {
    /// Builds the response projection of an employee record.
    ///
    /// # Panics
    ///
    /// Never panics for records loaded from the store; unpersisted records
    /// report ID 0.
    #[must_use]
    pub fn of(employee: &Employee, today: chrono::NaiveDate) -> Self {
        let classification = roster_domain::classify(
            Some(employee.contract_end),
            today,
            &roster_domain::ThresholdSet::CONTRACT,
        );
        let status: LifecycleStatus = employee.status(today);

        Self {
            employee_id: employee.employee_id.unwrap_or(0),
            project: employee.project.code().to_string(),
            name: employee.name.clone(),
            position: employee.position.clone(),
            contract_number: employee.contract_number.clone(),
            contract_start: employee.contract_start.to_string(),
            contract_end: employee.contract_end.to_string(),
            inactive_reason: employee.inactive_reason.clone(),
            status: status.to_string(),
            days_remaining: classification.days_remaining,
            bucket: classification.bucket.to_string(),
            attributes: employee.attributes.clone(),
            documents: employee.documents.clone(),
        }
    }
}

/// One contract history ledger entry in API form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    /// The ledger row identifier.
    pub history_id: i64,
    /// When the change was recorded (ISO 8601).
    pub changed_at: String,
    /// Who made the change.
    pub modified_by: String,
    /// The contract number before the change.
    pub old_contract_number: String,
    /// The contract start before the change (canonical `YYYY-MM-DD`).
    pub old_contract_start: String,
    /// The contract end before the change (canonical `YYYY-MM-DD`).
    pub old_contract_end: String,
    /// The contract number after the change.
    pub new_contract_number: String,
    /// The contract start after the change (canonical `YYYY-MM-DD`).
    pub new_contract_start: String,
    /// The contract end after the change (canonical `YYYY-MM-DD`).
    pub new_contract_end: String,
}

impl From<&roster_audit::HistoryEntry> for HistoryEntryInfo {
    fn from(entry: &roster_audit::HistoryEntry) -> Self {
        Self {
            history_id: entry.history_id,
            changed_at: entry.changed_at.clone(),
            modified_by: entry.modified_by.clone(),
            old_contract_number: entry.change.old.contract_number.clone(),
            old_contract_start: entry.change.old.contract_start.to_string(),
            old_contract_end: entry.change.old.contract_end.to_string(),
            new_contract_number: entry.change.new.contract_number.clone(),
            new_contract_start: entry.change.new.contract_start.to_string(),
            new_contract_end: entry.change.new.contract_end.to_string(),
        }
    }
}

/// A per-record failure inside a sweep report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepFailure {
    /// The record that failed to persist.
    pub employee_id: i64,
    /// The persistence error, stringified.
    pub error: String,
}

/// The report returned by the expiry sweep.
///
/// Per-record failures never abort the batch; they are reported alongside
/// the successes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// How many records were examined.
    pub checked: usize,
    /// The records inactivated by this run.
    pub inactivated: Vec<i64>,
    /// Per-record persistence failures.
    pub failures: Vec<SweepFailure>,
}

/// Bucketed counts returned by the aggregation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResponse {
    /// Total records examined.
    pub total: usize,
    /// Records whose date is in the past.
    pub expired: usize,
    /// Records within the `due_soon` cut point.
    pub due_soon: usize,
    /// Records in the `Reminder2` band.
    pub reminder2: usize,
    /// Records in the `Reminder1` band.
    pub reminder1: usize,
    /// Records beyond the last cut point.
    pub normal: usize,
    /// Records without a usable date.
    pub unknown: usize,
}

impl From<roster_domain::BucketCounts> for AggregateResponse {
    fn from(counts: roster_domain::BucketCounts) -> Self {
        Self {
            total: counts.total,
            expired: counts.expired,
            due_soon: counts.due_soon,
            reminder2: counts.reminder2,
            reminder1: counts.reminder1,
            normal: counts.normal,
            unknown: counts.unknown,
        }
    }
}

/// Status filter for employee list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every record in the project.
    #[default]
    All,
    /// Records with no reason and a current contract.
    Active,
    /// Records with a reason set or an expired contract.
    Inactive,
}

impl StatusFilter {
    /// Parses a status filter from its query-parameter form.
    ///
    /// # Errors
    ///
    /// Returns the unrecognized value for the caller to report.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(other.to_string()),
        }
    }
}

/// Parameters for employee list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEmployeesParams {
    /// The status partition to list.
    pub status: StatusFilter,
    /// Optional bucket name narrowing the list.
    pub bucket: Option<String>,
    /// Optional case-insensitive substring search.
    pub search: Option<String>,
}

/// One failed row in a bulk import report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowFailure {
    /// The row number (1-based, excluding the header).
    pub row_number: usize,
    /// Zero or more validation errors for the row.
    pub errors: Vec<String>,
}

/// The report returned by a CSV bulk import.
///
/// Valid rows commit independently; one row's failure never rolls back
/// rows already persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Total data rows in the file.
    pub total_rows: usize,
    /// The IDs of the records created by this import.
    pub imported: Vec<i64>,
    /// Per-row failures.
    pub failures: Vec<ImportRowFailure>,
}
