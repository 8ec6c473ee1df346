// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field validation for the strict write path.
//!
//! Create and update operations validate here before anything is
//! persisted; the lenient read-side parsing in [`crate::classification`]
//! never applies to writes.

use crate::error::DomainError;
use chrono::NaiveDate;

/// Validates that the contract end date is strictly after the start date.
///
/// # Errors
///
/// Returns `DomainError::ContractDateOrder` identifying both dates when
/// `end <= start`.
pub fn validate_contract_dates(start: NaiveDate, end: NaiveDate) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::ContractDateOrder { start, end });
    }
    Ok(())
}

/// Validates an employee name.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_employee_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a project code.
///
/// # Errors
///
/// Returns an error if the code is empty or whitespace-only.
pub fn validate_project_code(code: &str) -> Result<(), DomainError> {
    if code.trim().is_empty() {
        return Err(DomainError::InvalidProjectCode(String::from(
            "project code cannot be empty",
        )));
    }
    Ok(())
}

/// Validates an inactivation reason.
///
/// # Errors
///
/// Returns `DomainError::EmptyInactiveReason` if the reason is empty or
/// whitespace-only.
pub fn validate_inactive_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::EmptyInactiveReason);
    }
    Ok(())
}
