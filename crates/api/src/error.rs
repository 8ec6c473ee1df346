// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use roster::CoreError;
use roster_domain::DomainError;
use roster_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Validation failures are always field-identifying so callers
/// can render them inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("required field is missing or empty"),
        },
        DomainError::DateParse { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("invalid date '{value}': expected DD/MM/YYYY or YYYY-MM-DD"),
        },
        DomainError::ContractDateOrder { start, end } => ApiError::InvalidInput {
            field: String::from("contract_end"),
            message: format!("contract_end ({end}) must be strictly after contract_start ({start})"),
        },
        DomainError::EmptyInactiveReason => ApiError::InvalidInput {
            field: String::from("reason"),
            message: String::from("inactivation requires a non-empty reason"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidProjectCode(msg) => ApiError::InvalidInput {
            field: String::from("project"),
            message: msg,
        },
        DomainError::ProjectNotFound(code) => ApiError::ResourceNotFound {
            resource_type: String::from("Project"),
            message: format!("Project '{code}' does not exist"),
        },
        DomainError::EmployeeNotFound {
            project,
            employee_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist in project '{project}'"),
        },
        DomainError::UnknownThresholdSet(name) => ApiError::InvalidInput {
            field: String::from("thresholds"),
            message: format!("unknown threshold set '{name}'"),
        },
        DomainError::UnknownBucket(name) => ApiError::InvalidInput {
            field: String::from("bucket"),
            message: format!("unknown classification bucket '{name}'"),
        },
        DomainError::UnknownDateField(name) => ApiError::InvalidInput {
            field: String::from("field"),
            message: format!("unknown date field '{name}'"),
        },
        DomainError::UnknownStatus(name) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("unknown lifecycle status '{name}'"),
        },
        DomainError::InvalidDocumentSlot(msg) => ApiError::InvalidInput {
            field: String::from("slot"),
            message: msg,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found conditions surface as `ResourceNotFound`; everything else is
/// internal and logged by the caller.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ProjectNotFound(code) => ApiError::ResourceNotFound {
            resource_type: String::from("Project"),
            message: format!("Project '{code}' does not exist"),
        },
        PersistenceError::EmployeeNotFound {
            project,
            employee_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist in project '{project}'"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
