// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod csv_import;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use auth::{AuthenticatedActor, Role, authenticate_stub};
pub use csv_import::{ImportError, import_csv};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    aggregate, clear_document, create_employee, create_project, delete_employee, get_employee,
    get_history, inactivate_employee, list_employees, list_projects, restore_employee,
    run_expiry_sweep, set_document, update_employee,
};
pub use request_response::{
    AggregateResponse, CreateEmployeeRequest, CreateProjectRequest, EmployeeInfo,
    HistoryEntryInfo, ImportReport, ImportRowFailure, InactivateRequest, ListEmployeesParams,
    ProjectInfo, SetDocumentRequest, StatusFilter, SweepFailure, SweepReport,
    UpdateEmployeeRequest,
};
