// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or empty.
    MissingField {
        /// The field that is missing.
        field: &'static str,
    },
    /// A date string on the strict write path could not be parsed.
    DateParse {
        /// The field carrying the bad value.
        field: &'static str,
        /// The unparseable value.
        value: String,
    },
    /// The contract end date is not strictly after the start date.
    ContractDateOrder {
        /// The contract start date.
        start: chrono::NaiveDate,
        /// The offending contract end date.
        end: chrono::NaiveDate,
    },
    /// An inactivation was requested without a reason.
    EmptyInactiveReason,
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// Project code is empty or invalid.
    InvalidProjectCode(String),
    /// Project does not exist.
    ProjectNotFound(String),
    /// Employee does not exist in the specified project.
    EmployeeNotFound {
        /// The project code.
        project: String,
        /// The employee identifier.
        employee_id: i64,
    },
    /// Threshold-set category name is not recognized.
    UnknownThresholdSet(String),
    /// Classification bucket name is not recognized.
    UnknownBucket(String),
    /// Date field name is not recognized.
    UnknownDateField(String),
    /// Lifecycle status name is not recognized.
    UnknownStatus(String),
    /// Document slot name is empty or invalid.
    InvalidDocumentSlot(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field '{field}'"),
            Self::DateParse { field, value } => {
                write!(
                    f,
                    "Invalid date '{value}' for field '{field}': expected DD/MM/YYYY or YYYY-MM-DD"
                )
            }
            Self::ContractDateOrder { start, end } => {
                write!(
                    f,
                    "contract_end ({end}) must be strictly after contract_start ({start})"
                )
            }
            Self::EmptyInactiveReason => {
                write!(f, "Inactivation requires a non-empty reason")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidProjectCode(msg) => write!(f, "Invalid project code: {msg}"),
            Self::ProjectNotFound(code) => write!(f, "Project '{code}' not found"),
            Self::EmployeeNotFound {
                project,
                employee_id,
            } => {
                write!(f, "Employee {employee_id} not found in project '{project}'")
            }
            Self::UnknownThresholdSet(name) => {
                write!(
                    f,
                    "Unknown threshold set '{name}': expected contract, notification, or iso"
                )
            }
            Self::UnknownBucket(name) => write!(f, "Unknown classification bucket '{name}'"),
            Self::UnknownDateField(name) => write!(f, "Unknown date field '{name}'"),
            Self::UnknownStatus(name) => write!(f, "Unknown lifecycle status '{name}'"),
            Self::InvalidDocumentSlot(msg) => write!(f, "Invalid document slot: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
