// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV bulk import of employee records.
//!
//! Every row funnels through the same create entry point as single-record
//! edits, so the lifecycle invariants hold uniformly. Rows commit
//! independently: one row's validation failure never aborts or rolls back
//! rows already persisted, and the report accumulates successes and
//! errors separately.

use chrono::NaiveDate;
use csv::StringRecord;
use roster_persistence::Persistence;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

use crate::auth::AuthenticatedActor;
use crate::error::ApiError;
use crate::handlers::create_employee;
use crate::request_response::{CreateEmployeeRequest, ImportReport, ImportRowFailure};

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["name", "contract_start", "contract_end"];

/// Optional headers mapped to dedicated record fields; any other column
/// lands in the opaque attribute bag.
const KNOWN_OPTIONAL_HEADERS: &[&str] = &["contract_number", "position"];

/// File-level CSV import errors.
///
/// Row-level problems never surface here; they go into the report.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file's header row is unusable.
    #[error("Invalid CSV format: {reason}")]
    InvalidFormat {
        /// What is wrong with the header row.
        reason: String,
    },
    /// The file could not be read at all.
    #[error("CSV read error: {0}")]
    Read(#[from] csv::Error),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self::InvalidInput {
            field: String::from("csv"),
            message: err.to_string(),
        }
    }
}

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant
/// matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, ImportError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), idx);
    }

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !header_map.contains_key(**required))
        .map(|required| String::from(*required))
        .collect();

    if !missing.is_empty() {
        return Err(ImportError::InvalidFormat {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Builds a create request from one CSV row.
///
/// Returns the accumulated field errors when required columns are empty.
fn parse_csv_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<CreateEmployeeRequest, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let mut require = |name: &'static str| -> String {
        get_field(name).unwrap_or_else(|| {
            errors.push(format!("{name}: required field is missing or empty"));
            String::new()
        })
    };

    let name: String = require("name");
    let contract_start: String = require("contract_start");
    let contract_end: String = require("contract_end");

    if !errors.is_empty() {
        return Err(errors);
    }

    let contract_number: Option<String> = get_field("contract_number");
    let position: Option<String> = get_field("position");

    // Unrecognized columns ride along in the attribute bag.
    let mut attributes = serde_json::Map::new();
    for (header, &idx) in header_map {
        if REQUIRED_HEADERS.contains(&header.as_str())
            || KNOWN_OPTIONAL_HEADERS.contains(&header.as_str())
        {
            continue;
        }
        if let Some(value) = record.get(idx).map(str::trim).filter(|v| !v.is_empty()) {
            attributes.insert(
                header.clone(),
                serde_json::Value::String(value.to_string()),
            );
        }
    }

    Ok(CreateEmployeeRequest {
        name,
        position,
        contract_number,
        contract_start,
        contract_end,
        attributes,
    })
}

/// Imports employee records from CSV data.
///
/// # Arguments
///
/// * `persistence` - The record store
/// * `project_code` - The project to import into
/// * `csv_data` - The raw CSV file contents (header row required)
/// * `actor` - The authenticated operator
/// * `today` - The calendar date for response classification
///
/// # Returns
///
/// A report of per-row successes and failures. Valid rows are persisted
/// even when other rows fail.
///
/// # Errors
///
/// Returns an error only for file-level problems: missing authorization,
/// an unknown project, or an unusable header row.
pub fn import_csv(
    persistence: &mut Persistence,
    project_code: &str,
    csv_data: &str,
    actor: &AuthenticatedActor,
    today: NaiveDate,
) -> Result<ImportReport, ApiError> {
    actor.require_admin("import_csv")?;

    let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
    let header_map: HashMap<String, usize> = reader
        .headers()
        .map_err(ImportError::from)
        .and_then(validate_headers)
        .map_err(ApiError::from)?;

    let mut total_rows: usize = 0;
    let mut imported: Vec<i64> = Vec::new();
    let mut failures: Vec<ImportRowFailure> = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let row_number: usize = index + 1;
        total_rows += 1;

        let record: StringRecord = match record {
            Ok(r) => r,
            Err(e) => {
                failures.push(ImportRowFailure {
                    row_number,
                    errors: vec![format!("unreadable row: {e}")],
                });
                continue;
            }
        };

        let request: CreateEmployeeRequest = match parse_csv_row(&record, &header_map) {
            Ok(request) => request,
            Err(errors) => {
                failures.push(ImportRowFailure { row_number, errors });
                continue;
            }
        };

        match create_employee(persistence, project_code, request, actor, today) {
            Ok(info) => imported.push(info.employee_id),
            Err(e) => failures.push(ImportRowFailure {
                row_number,
                errors: vec![e.to_string()],
            }),
        }
    }

    info!(
        project = project_code,
        total_rows,
        imported = imported.len(),
        failed = failures.len(),
        "CSV import finished"
    );

    Ok(ImportReport {
        total_rows,
        imported,
        failures,
    })
}
