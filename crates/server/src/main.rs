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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

use roster_api::{
    AggregateResponse, ApiError, AuthenticatedActor, CreateEmployeeRequest, CreateProjectRequest,
    EmployeeInfo, HistoryEntryInfo, ImportReport, InactivateRequest, ListEmployeesParams,
    ProjectInfo, Role, SetDocumentRequest, StatusFilter, SweepReport, UpdateEmployeeRequest,
    authenticate_stub,
};
use roster_persistence::Persistence;

/// Roster Server - HTTP server for the Roster HR system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Run the expiry sweep every N seconds across all projects.
    /// Without this flag the sweep runs only on demand via POST /projects/{code}/sweep.
    #[arg(long)]
    sweep_interval_secs: Option<u64>,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for employee records and the history ledger.
    persistence: Arc<Mutex<Persistence>>,
}

/// Returns the server-side calendar date used for classification and the
/// expiry sweep.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// ============================================================================
// Request DTOs (actor claim + payload)
// ============================================================================

/// API request for creating a project.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateProjectApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The project code.
    code: String,
    /// Optional display name for the client company.
    name: Option<String>,
}

/// API request for creating an employee record.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateEmployeeApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The employee's name.
    name: String,
    /// The employee's position.
    #[serde(default)]
    position: Option<String>,
    /// The initial contract number.
    #[serde(default)]
    contract_number: Option<String>,
    /// The contract start date (`DD/MM/YYYY` or `YYYY-MM-DD`).
    contract_start: String,
    /// The contract end date (`DD/MM/YYYY` or `YYYY-MM-DD`).
    contract_end: String,
    /// Opaque additional attributes.
    #[serde(default)]
    attributes: serde_json::Map<String, serde_json::Value>,
}

/// API request for updating an employee record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct UpdateEmployeeApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// New employee name.
    #[serde(default)]
    name: Option<String>,
    /// New position.
    #[serde(default)]
    position: Option<String>,
    /// New contract number.
    #[serde(default)]
    contract_number: Option<String>,
    /// New contract start date (`DD/MM/YYYY` or `YYYY-MM-DD`).
    #[serde(default)]
    contract_start: Option<String>,
    /// New contract end date (`DD/MM/YYYY` or `YYYY-MM-DD`).
    #[serde(default)]
    contract_end: Option<String>,
    /// New inactivation reason (non-empty when present).
    #[serde(default)]
    inactive_reason: Option<String>,
    /// Attribute values merged into the stored bag.
    #[serde(default)]
    attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

/// API request for inactivating an employee record.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct InactivateApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// Why the record is being inactivated.
    reason: String,
}

/// API request carrying only the actor claim (restore, delete, sweep).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// API request for storing a document slot reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetDocumentApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The original file name.
    filename: String,
    /// The storage path or key.
    path: String,
    /// The MIME type reported at upload time.
    mime_type: String,
    /// The file size in bytes.
    size: i64,
}

/// API request for CSV bulk import.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ImportCsvApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The raw CSV file contents (header row required).
    csv_data: String,
}

/// Query parameters for listing employees.
#[derive(Debug, Deserialize)]
struct ListEmployeesQuery {
    /// Status partition: `all`, `active`, or `inactive`.
    status: Option<String>,
    /// Bucket name narrowing the list.
    bucket: Option<String>,
    /// Case-insensitive substring search.
    search: Option<String>,
}

/// Query parameters for the aggregation endpoint.
#[derive(Debug, Deserialize)]
struct AggregateQuery {
    /// The date field to classify on (default `contract_end`).
    field: Option<String>,
    /// The threshold category (default `contract`).
    thresholds: Option<String>,
}

// ============================================================================
// Error plumbing
// ============================================================================

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "Internal error");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Authenticates the actor claim carried by a write request.
fn authorize(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = Role::parse(actor_role).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })?;
    authenticate_stub(actor_id.to_string(), role).map_err(HttpError::from)
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for POST `/projects`.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProjectApiRequest>,
) -> Result<Json<ProjectInfo>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let info: ProjectInfo = roster_api::create_project(
        &mut persistence,
        &CreateProjectRequest {
            code: req.code,
            name: req.name,
        },
        &actor,
    )?;
    Ok(Json(info))
}

/// Handler for GET `/projects`.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ProjectInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::list_projects(&mut persistence)?))
}

/// Handler for POST `/projects/{code}/employees`.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Json(req): Json<CreateEmployeeApiRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let request: CreateEmployeeRequest = CreateEmployeeRequest {
        name: req.name,
        position: req.position,
        contract_number: req.contract_number,
        contract_start: req.contract_start,
        contract_end: req.contract_end,
        attributes: req.attributes,
    };

    let mut persistence = app_state.persistence.lock().await;
    let info: EmployeeInfo =
        roster_api::create_employee(&mut persistence, &code, request, &actor, today())?;
    Ok(Json(info))
}

/// Handler for GET `/projects/{code}/employees`.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<Vec<EmployeeInfo>>, HttpError> {
    let status: StatusFilter = match query.status.as_deref() {
        None => StatusFilter::All,
        Some(value) => StatusFilter::parse(value).map_err(|v| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid status filter '{v}'. Must be all, active, or inactive"),
        })?,
    };
    let params: ListEmployeesParams = ListEmployeesParams {
        status,
        bucket: query.bucket,
        search: query.search,
    };

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::list_employees(
        &mut persistence,
        &code,
        &params,
        today(),
    )?))
}

/// Handler for GET `/projects/{code}/employees/{id}`.
async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id)): Path<(String, i64)>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::get_employee(
        &mut persistence,
        &code,
        employee_id,
        today(),
    )?))
}

/// Handler for PUT `/projects/{code}/employees/{id}`.
async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id)): Path<(String, i64)>,
    Json(req): Json<UpdateEmployeeApiRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let request: UpdateEmployeeRequest = UpdateEmployeeRequest {
        name: req.name,
        position: req.position,
        contract_number: req.contract_number,
        contract_start: req.contract_start,
        contract_end: req.contract_end,
        inactive_reason: req.inactive_reason,
        attributes: req.attributes,
    };

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::update_employee(
        &mut persistence,
        &code,
        employee_id,
        request,
        &actor,
        today(),
    )?))
}

/// Handler for DELETE `/projects/{code}/employees/{id}`.
async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id)): Path<(String, i64)>,
    Json(req): Json<ActorApiRequest>,
) -> Result<StatusCode, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    roster_api::delete_employee(&mut persistence, &code, employee_id, &actor)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/projects/{code}/employees/{id}/inactivate`.
async fn handle_inactivate_employee(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id)): Path<(String, i64)>,
    Json(req): Json<InactivateApiRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::inactivate_employee(
        &mut persistence,
        &code,
        employee_id,
        &InactivateRequest { reason: req.reason },
        &actor,
        today(),
    )?))
}

/// Handler for POST `/projects/{code}/employees/{id}/restore`.
async fn handle_restore_employee(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id)): Path<(String, i64)>,
    Json(req): Json<ActorApiRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::restore_employee(
        &mut persistence,
        &code,
        employee_id,
        &actor,
        today(),
    )?))
}

/// Handler for POST `/projects/{code}/employees/{id}/documents/{slot}`.
async fn handle_set_document(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id, slot)): Path<(String, i64, String)>,
    Json(req): Json<SetDocumentApiRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let request: SetDocumentRequest = SetDocumentRequest {
        filename: req.filename,
        path: req.path,
        mime_type: req.mime_type,
        size: req.size,
    };

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::set_document(
        &mut persistence,
        &code,
        employee_id,
        &slot,
        request,
        &actor,
        today(),
    )?))
}

/// Handler for DELETE `/projects/{code}/employees/{id}/documents/{slot}`.
async fn handle_clear_document(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id, slot)): Path<(String, i64, String)>,
    Json(req): Json<ActorApiRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::clear_document(
        &mut persistence,
        &code,
        employee_id,
        &slot,
        &actor,
        today(),
    )?))
}

/// Handler for POST `/projects/{code}/sweep`.
async fn handle_sweep(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Json(req): Json<ActorApiRequest>,
) -> Result<Json<SweepReport>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::run_expiry_sweep(
        &mut persistence,
        &code,
        &actor,
        today(),
    )?))
}

/// Handler for GET `/projects/{code}/employees/{id}/history`.
async fn handle_get_history(
    AxumState(app_state): AxumState<AppState>,
    Path((code, employee_id)): Path<(String, i64)>,
) -> Result<Json<Vec<HistoryEntryInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::get_history(
        &mut persistence,
        &code,
        employee_id,
    )?))
}

/// Handler for GET `/projects/{code}/aggregate`.
async fn handle_aggregate(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Query(query): Query<AggregateQuery>,
) -> Result<Json<AggregateResponse>, HttpError> {
    let field: String = query.field.unwrap_or_else(|| String::from("contract_end"));
    let thresholds: String = query.thresholds.unwrap_or_else(|| String::from("contract"));

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::aggregate(
        &mut persistence,
        &code,
        &field,
        &thresholds,
        today(),
    )?))
}

/// Handler for POST `/projects/{code}/employees/import`.
async fn handle_import_csv(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Json(req): Json<ImportCsvApiRequest>,
) -> Result<Json<ImportReport>, HttpError> {
    let actor: AuthenticatedActor = authorize(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(roster_api::import_csv(
        &mut persistence,
        &code,
        &req.csv_data,
        &actor,
        today(),
    )?))
}

// ============================================================================
// Router, scheduler, main
// ============================================================================

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/projects", post(handle_create_project))
        .route("/projects", get(handle_list_projects))
        .route("/projects/{code}/employees", post(handle_create_employee))
        .route("/projects/{code}/employees", get(handle_list_employees))
        .route(
            "/projects/{code}/employees/import",
            post(handle_import_csv),
        )
        .route(
            "/projects/{code}/employees/{id}",
            get(handle_get_employee),
        )
        .route(
            "/projects/{code}/employees/{id}",
            put(handle_update_employee),
        )
        .route(
            "/projects/{code}/employees/{id}",
            delete(handle_delete_employee),
        )
        .route(
            "/projects/{code}/employees/{id}/inactivate",
            post(handle_inactivate_employee),
        )
        .route(
            "/projects/{code}/employees/{id}/restore",
            post(handle_restore_employee),
        )
        .route(
            "/projects/{code}/employees/{id}/documents/{slot}",
            post(handle_set_document),
        )
        .route(
            "/projects/{code}/employees/{id}/documents/{slot}",
            delete(handle_clear_document),
        )
        .route(
            "/projects/{code}/employees/{id}/history",
            get(handle_get_history),
        )
        .route("/projects/{code}/sweep", post(handle_sweep))
        .route("/projects/{code}/aggregate", get(handle_aggregate))
        .with_state(app_state)
}

/// Spawns the periodic expiry sweep across all projects.
///
/// Per-project and per-record failures are logged and never stop the
/// schedule; the next tick retries naturally.
fn spawn_sweep_scheduler(app_state: AppState, interval_secs: u64) {
    tokio::spawn(async move {
        let actor: AuthenticatedActor =
            AuthenticatedActor::new(String::from("scheduler"), Role::Admin);
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; skip it so startup stays quiet.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let mut persistence = app_state.persistence.lock().await;
            let projects: Vec<ProjectInfo> = match roster_api::list_projects(&mut persistence) {
                Ok(projects) => projects,
                Err(e) => {
                    error!(error = %e, "Scheduled sweep could not list projects");
                    continue;
                }
            };

            for project in projects {
                match roster_api::run_expiry_sweep(&mut persistence, &project.code, &actor, today())
                {
                    Ok(report) => {
                        if !report.inactivated.is_empty() || !report.failures.is_empty() {
                            info!(
                                project = %project.code,
                                inactivated = report.inactivated.len(),
                                failed = report.failures.len(),
                                "Scheduled expiry sweep"
                            );
                        }
                    }
                    Err(e) => {
                        error!(project = %project.code, error = %e, "Scheduled sweep failed");
                    }
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Roster Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    if let Some(interval_secs) = args.sweep_interval_secs {
        info!(interval_secs, "Starting scheduled expiry sweep");
        spawn_sweep_scheduler(app_state.clone(), interval_secs);
    }

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
