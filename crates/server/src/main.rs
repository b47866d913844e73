// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the time tracker.
//!
//! Thin axum handlers over the API services: resolve the requesting user,
//! take the persistence lock for as short a span as possible, translate
//! errors to HTTP statuses, and perform any pending worklog push after the
//! lock is released. Transport failures against ticket systems are logged
//! and never fail the request; a lookup-only system answering that a ticket
//! does not exist rejects the save.

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
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use timetracker_api::{
    ApiError, SummaryCache, SyncOperation, SyncTask, TicketLookup, admin, auth, export, reporting,
    request_response::{
        ActivityResponse, ActivitySaveRequest, ActivityTupleResponse, ContractResponse,
        ContractSaveRequest,
        CustomerResponse, CustomerSaveRequest, EntryResponse, EntrySaveRequest,
        HolidayDeleteRequest, HolidayResponse, HolidaySaveRequest, IdRequest, PresetResponse,
        PresetSaveRequest, ProjectResponse, ProjectSaveRequest, TeamResponse, TeamSaveRequest,
        TicketSystemResponse, TicketSystemSaveRequest, UserResponse, UserSaveRequest,
        WrappedEntry, parse_request_date,
    },
    tracking,
};
use timetracker_domain::{Customer, Entry, Project, User, UserType};
use timetracker_integrations::{IntegrationError, OtrsClient, TicketClient, WorklogEntry};
use timetracker_persistence::{
    EntryFilter, EntrySummary, InterpretationRow, Persistence,
    PersistenceError,
};

/// Summary results are reused for this long before being recomputed.
const SUMMARY_CACHE_TTL: Duration = Duration::from_secs(300);

/// Working days shown by `/getData` when no span is given.
const DEFAULT_TRACKING_DAYS: i32 = 3;

/// Timetracker server - HTTP backend for the time-tracking grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8765)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind a single write lock.
    persistence: Arc<Mutex<Persistence>>,
    /// TTL cache for summary aggregates.
    summary_cache: Arc<Mutex<SummaryCache>>,
    /// Shared HTTP client for outbound ticket system calls.
    http: reqwest::Client,
}

impl AppState {
    fn new(persistence: Persistence, http: reqwest::Client) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            summary_cache: Arc::new(Mutex::new(SummaryCache::new(SUMMARY_CACHE_TTL))),
            http,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// JSON success body for delete operations.
#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
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
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// The `user` parameter naming the requesting user.
#[derive(Debug, Deserialize)]
struct UserQuery {
    user: Option<String>,
}

/// Query for `/getAllProjects`.
#[derive(Debug, Deserialize)]
struct ProjectsQuery {
    customer: Option<i64>,
}

/// Query for `/getSummary`.
#[derive(Debug, Deserialize)]
struct SummaryQuery {
    entry: i64,
    user: Option<String>,
}

/// Optional filters for the interpretation endpoints.
#[derive(Debug, Deserialize)]
struct InterpretationQuery {
    user: Option<String>,
    customer: Option<i64>,
    project: Option<i64>,
    activity: Option<i64>,
    team: Option<i64>,
    from: Option<String>,
    to: Option<String>,
    ticket: Option<String>,
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Performs a pending worklog push against the ticket system.
///
/// Failures are logged at warn level and swallowed: tracking data is
/// authoritative locally and must never be lost to a downstream outage.
async fn run_worklog_sync(state: &AppState, task: SyncTask) {
    let client: TicketClient = TicketClient::for_system(state.http.clone(), &task.system);
    let worklog = WorklogEntry {
        day: task.day,
        start: task.start,
        minutes: task.minutes,
        comment: task.comment.clone(),
    };

    let outcome: Result<Option<i64>, IntegrationError> = match task.operation {
        SyncOperation::Create => client.create_worklog(&task.ticket, &worklog).await,
        SyncOperation::Update { worklog_id } => {
            client.update_worklog(&task.ticket, worklog_id, &worklog).await
        }
        SyncOperation::Delete { worklog_id } => client
            .delete_worklog(&task.ticket, worklog_id)
            .await
            .map(|()| None),
    };

    match outcome {
        Ok(worklog_id) => {
            if matches!(task.operation, SyncOperation::Delete { .. }) {
                info!(entry_id = task.entry_id, ticket = %task.ticket, "Worklog removed");
                return;
            }
            let mut persistence = state.persistence.lock().await;
            if let Err(e) = persistence.mark_entry_synced(task.entry_id, worklog_id, true) {
                warn!(entry_id = task.entry_id, error = %e, "Worklog pushed but sync state not recorded");
            } else {
                info!(entry_id = task.entry_id, ticket = %task.ticket, "Worklog pushed");
            }
        }
        Err(e) => {
            warn!(
                entry_id = task.entry_id,
                ticket = %task.ticket,
                error = %e,
                "Worklog sync failed; entry kept unsynced"
            );
        }
    }
}

/// Checks that a referenced ticket exists in a lookup-only system.
///
/// An unknown ticket rejects the save; a transport failure does not, the
/// system may simply be down while the entry still has to be recorded.
async fn verify_ticket_reference(state: &AppState, lookup: &TicketLookup) -> Result<(), HttpError> {
    let client: OtrsClient = OtrsClient::new(
        state.http.clone(),
        &lookup.system.url,
        &lookup.system.login,
        &lookup.system.password,
    );
    match client.ticket_exists(&lookup.ticket).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::DomainRuleViolation {
            rule: String::from("ticket-exists"),
            message: format!(
                "ticket '{}' does not exist in {}",
                lookup.ticket, lookup.system.name
            ),
        }
        .into()),
        Err(e) => {
            warn!(
                ticket = %lookup.ticket,
                error = %e,
                "Ticket lookup failed; saving without verification"
            );
            Ok(())
        }
    }
}

// --- tracking handlers -----------------------------------------------------

async fn handle_get_data(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<WrappedEntry>>, HttpError> {
    get_data_for_days(&app_state, query.user.as_deref(), DEFAULT_TRACKING_DAYS).await
}

async fn handle_get_data_days(
    AxumState(app_state): AxumState<AppState>,
    Path(days): Path<i32>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<WrappedEntry>>, HttpError> {
    get_data_for_days(&app_state, query.user.as_deref(), days).await
}

async fn get_data_for_days(
    app_state: &AppState,
    username: Option<&str>,
    days: i32,
) -> Result<Json<Vec<WrappedEntry>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, username)?;
    let entries: Vec<Entry> = tracking::entries_for_days(&mut persistence, &user, days, today())?;
    drop(persistence);

    let wrapped: Vec<WrappedEntry> = entries
        .iter()
        .map(|entry| WrappedEntry {
            entry: EntryResponse::from_entry(entry),
        })
        .collect();
    Ok(Json(wrapped))
}

async fn handle_tracking_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<EntrySaveRequest>,
) -> Result<Json<EntryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let lookup: Option<TicketLookup> = tracking::ticket_lookup(&mut persistence, &request)?;
    drop(persistence);

    if let Some(ref lookup) = lookup {
        verify_ticket_reference(&app_state, lookup).await?;
    }

    let mut persistence = app_state.persistence.lock().await;
    let mut cache = app_state.summary_cache.lock().await;
    let (entry, task) = tracking::save_entry(&mut persistence, &mut cache, &user, &request)?;
    drop(cache);
    drop(persistence);

    if let Some(task) = task {
        run_worklog_sync(&app_state, task).await;
    }
    Ok(Json(EntryResponse::from_entry(&entry)))
}

async fn handle_tracking_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let mut cache = app_state.summary_cache.lock().await;
    let task: Option<SyncTask> = tracking::delete_entry(&mut persistence, &mut cache, request.id)?;
    drop(cache);
    drop(persistence);

    if let Some(task) = task {
        run_worklog_sync(&app_state, task).await;
    }
    Ok(Json(DeleteResponse { success: true }))
}

// --- reporting handlers ----------------------------------------------------

async fn handle_get_summary(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<EntrySummary>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let mut cache = app_state.summary_cache.lock().await;
    let summary: EntrySummary = reporting::get_summary(
        &mut persistence,
        &mut cache,
        query.entry,
        user.id.unwrap_or_default(),
    )?;
    drop(cache);
    drop(persistence);
    Ok(Json(summary))
}

async fn handle_interpretation(
    AxumState(app_state): AxumState<AppState>,
    Path(group): Path<String>,
    Query(query): Query<InterpretationQuery>,
) -> Result<Json<Vec<InterpretationRow>>, HttpError> {
    let Some(group) = reporting::parse_interpretation_group(&group) else {
        return Err(HttpError {
            status: StatusCode::NOT_FOUND,
            message: format!("unknown interpretation '{group}'"),
        });
    };

    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;

    let date_from: Option<Date> = match query.from.as_deref() {
        Some(value) => Some(parse_request_date("from", value)?),
        None => None,
    };
    let date_to: Option<Date> = match query.to.as_deref() {
        Some(value) => Some(parse_request_date("to", value)?),
        None => None,
    };
    // Developers only see their own numbers; controlling and leads see all.
    let user_scope: Option<i64> = if user.user_type == UserType::Dev {
        user.id
    } else {
        None
    };
    let filter = EntryFilter {
        user_id: user_scope,
        customer_id: query.customer,
        project_id: query.project,
        activity_id: query.activity,
        team_id: query.team,
        date_from,
        date_to,
        ticket: query.ticket.clone(),
        ..EntryFilter::default()
    };
    let rows: Vec<InterpretationRow> = reporting::interpret(&mut persistence, &filter, group)?;
    drop(persistence);
    Ok(Json(rows))
}

async fn handle_export(
    AxumState(app_state): AxumState<AppState>,
    Path(days): Path<i32>,
    Query(query): Query<UserQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let csv: String = export::export_entries_csv(&mut persistence, &user, days, today())?;
    drop(persistence);
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    )
        .into_response())
}

// --- read handlers ---------------------------------------------------------

async fn handle_get_all_customers(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let customers: Vec<Customer> = persistence.list_customers()?;
    drop(persistence);
    Ok(Json(
        customers.iter().map(CustomerResponse::from_customer).collect(),
    ))
}

async fn handle_get_customers(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<CustomerResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let customers: Vec<Customer> = persistence.customers_for_user(user.id.unwrap_or_default())?;
    drop(persistence);
    Ok(Json(
        customers.iter().map(CustomerResponse::from_customer).collect(),
    ))
}

async fn handle_get_all_projects(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> Result<Json<Vec<ProjectResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let projects: Vec<Project> = persistence.list_projects(query.customer)?;
    drop(persistence);
    Ok(Json(
        projects.iter().map(ProjectResponse::from_project).collect(),
    ))
}

async fn handle_get_projects(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<ProjectResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let visible: Vec<Customer> = persistence.customers_for_user(user.id.unwrap_or_default())?;
    let projects: Vec<Project> = persistence.list_projects(None)?;
    drop(persistence);

    let visible_customers: Vec<i64> = visible.iter().filter_map(|c| c.id).collect();
    let scoped: Vec<ProjectResponse> = projects
        .iter()
        .filter(|p| p.global || visible_customers.contains(&p.customer_id))
        .map(ProjectResponse::from_project)
        .collect();
    Ok(Json(scoped))
}

async fn handle_get_activities(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ActivityResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let activities = persistence.list_activities()?;
    drop(persistence);
    Ok(Json(
        activities.iter().map(ActivityResponse::from_activity).collect(),
    ))
}

async fn handle_get_all_users(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<UserResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let users: Vec<User> = persistence.list_users()?;
    drop(persistence);
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

async fn handle_get_users(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<UserResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    // Developers see themselves; controlling and leads see everyone.
    let users: Vec<User> = if user.user_type == UserType::Dev {
        vec![user]
    } else {
        persistence.list_users()?
    };
    drop(persistence);
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

async fn handle_get_all_teams(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<TeamResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let teams = persistence.list_teams()?;
    drop(persistence);
    Ok(Json(teams.iter().map(TeamResponse::from_team).collect()))
}

async fn handle_get_contracts(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<ContractResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    // Developers see their own contracts; controlling and leads see all.
    let scope: Option<i64> = if user.user_type == UserType::Dev {
        user.id
    } else {
        None
    };
    let contracts = persistence.list_contracts(scope)?;
    drop(persistence);
    Ok(Json(
        contracts.iter().map(ContractResponse::from_contract).collect(),
    ))
}

async fn handle_get_all_presets(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<PresetResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let presets = persistence.list_presets()?;
    drop(persistence);
    Ok(Json(presets.iter().map(PresetResponse::from_preset).collect()))
}

async fn handle_get_ticket_systems(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<TicketSystemResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let systems = persistence.list_ticket_systems()?;
    drop(persistence);
    Ok(Json(
        systems
            .iter()
            .map(TicketSystemResponse::from_ticket_system)
            .collect(),
    ))
}

async fn handle_get_holidays(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<HolidayResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let holidays = persistence.list_holidays()?;
    drop(persistence);
    Ok(Json(
        holidays.iter().map(HolidayResponse::from_holiday).collect(),
    ))
}

// --- admin handlers --------------------------------------------------------

async fn handle_customer_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<CustomerSaveRequest>,
) -> Result<Json<CustomerResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let customer: Customer = admin::save_customer(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(CustomerResponse::from_customer(&customer)))
}

async fn handle_customer_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence
        .delete_customer(request.id)
        .map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_project_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<ProjectSaveRequest>,
) -> Result<Json<ProjectResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let project: Project = admin::save_project(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(ProjectResponse::from_project(&project)))
}

async fn handle_project_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence
        .delete_project(request.id)
        .map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_activity_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<ActivitySaveRequest>,
) -> Result<Json<ActivityTupleResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let activity = admin::save_activity(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(ActivityTupleResponse(
        activity.id.unwrap_or_default(),
        activity.name,
        activity.needs_ticket,
        activity.factor,
    )))
}

async fn handle_activity_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence
        .delete_activity(request.id)
        .map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_user_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<UserSaveRequest>,
) -> Result<Json<UserResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let saved: User = admin::save_user(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(UserResponse::from_user(&saved)))
}

async fn handle_user_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence.delete_user(request.id).map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_team_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<TeamSaveRequest>,
) -> Result<Json<TeamResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let team = admin::save_team(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(TeamResponse::from_team(&team)))
}

async fn handle_team_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence.delete_team(request.id).map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_preset_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<PresetSaveRequest>,
) -> Result<Json<PresetResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let preset = admin::save_preset(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(PresetResponse::from_preset(&preset)))
}

async fn handle_preset_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence
        .delete_preset(request.id)
        .map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_ticket_system_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<TicketSystemSaveRequest>,
) -> Result<Json<TicketSystemResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let system = admin::save_ticket_system(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(TicketSystemResponse::from_ticket_system(&system)))
}

async fn handle_ticket_system_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence
        .delete_ticket_system(request.id)
        .map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_contract_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<ContractSaveRequest>,
) -> Result<Json<ContractResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let contract = admin::save_contract(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(ContractResponse::from_contract(&contract)))
}

async fn handle_contract_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<IdRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    persistence
        .delete_contract(request.id)
        .map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

async fn handle_holiday_save(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<HolidaySaveRequest>,
) -> Result<Json<HolidayResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let holiday = admin::save_holiday(&mut persistence, &request)?;
    drop(persistence);
    Ok(Json(HolidayResponse::from_holiday(&holiday)))
}

async fn handle_holiday_delete(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserQuery>,
    Json(request): Json<HolidayDeleteRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let _user: User = auth::resolve_user(&mut persistence, query.user.as_deref())?;
    let day: Date = parse_request_date("day", &request.day)?;
    persistence.delete_holiday(day).map_err(ApiError::from)?;
    drop(persistence);
    Ok(Json(DeleteResponse { success: true }))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/getData", get(handle_get_data))
        .route("/getData/days/{days}", get(handle_get_data_days))
        .route("/getAllCustomers", get(handle_get_all_customers))
        .route("/getCustomers", get(handle_get_customers))
        .route("/getAllProjects", get(handle_get_all_projects))
        .route("/getProjects", get(handle_get_projects))
        .route("/getActivities", get(handle_get_activities))
        .route("/getAllUsers", get(handle_get_all_users))
        .route("/getUsers", get(handle_get_users))
        .route("/getAllTeams", get(handle_get_all_teams))
        .route("/getContracts", get(handle_get_contracts))
        .route("/getAllPresets", get(handle_get_all_presets))
        .route("/getTicketSystems", get(handle_get_ticket_systems))
        .route("/getHolidays", get(handle_get_holidays))
        .route("/getSummary", get(handle_get_summary))
        .route("/interpretation/{group}", get(handle_interpretation))
        .route("/export/{days}", get(handle_export))
        .route("/tracking/save", post(handle_tracking_save))
        .route("/tracking/delete", post(handle_tracking_delete))
        .route("/customer/save", post(handle_customer_save))
        .route("/customer/delete", post(handle_customer_delete))
        .route("/project/save", post(handle_project_save))
        .route("/project/delete", post(handle_project_delete))
        .route("/activity/save", post(handle_activity_save))
        .route("/activity/delete", post(handle_activity_delete))
        .route("/user/save", post(handle_user_save))
        .route("/user/delete", post(handle_user_delete))
        .route("/team/save", post(handle_team_save))
        .route("/team/delete", post(handle_team_delete))
        .route("/preset/save", post(handle_preset_save))
        .route("/preset/delete", post(handle_preset_delete))
        .route("/ticketsystem/save", post(handle_ticket_system_save))
        .route("/ticketsystem/delete", post(handle_ticket_system_delete))
        .route("/contract/save", post(handle_contract_save))
        .route("/contract/delete", post(handle_contract_delete))
        .route("/holiday/save", post(handle_holiday_save))
        .route("/holiday/delete", post(handle_holiday_delete))
        .with_state(app_state)
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

    info!("Initializing timetracker server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let http: reqwest::Client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let app_state: AppState = AppState::new(persistence, http);

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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Creates test state with a seeded in-memory database: user `alice`
    /// (DEV), controller `carol` (CTL), one customer/project/activity pair.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        persistence
            .save_user(&User {
                id: None,
                username: String::from("alice"),
                abbr: String::from("ALC"),
                user_type: UserType::Dev,
                locale: String::from("en"),
                team_ids: vec![],
            })
            .expect("Failed to seed user");
        persistence
            .save_user(&User {
                id: None,
                username: String::from("carol"),
                abbr: String::from("CRL"),
                user_type: UserType::Ctl,
                locale: String::from("en"),
                team_ids: vec![],
            })
            .expect("Failed to seed controller");
        let customer_id: i64 = persistence
            .save_customer(&Customer {
                id: None,
                name: String::from("Acme"),
                active: true,
                global: true,
                team_ids: vec![],
            })
            .expect("Failed to seed customer");
        persistence
            .save_project(&Project {
                id: None,
                customer_id,
                name: String::from("Widget"),
                active: true,
                global: true,
                jira_id: None,
                ticket_system_id: None,
                estimation_minutes: None,
            })
            .expect("Failed to seed project");
        persistence
            .save_activity(&timetracker_domain::Activity {
                id: None,
                name: String::from("Development"),
                needs_ticket: false,
                factor: 1.0,
            })
            .expect("Failed to seed activity");

        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("Failed to build http client");
        AppState::new(persistence, http)
    }

    /// Wires an unreachable JIRA system to the seeded project.
    async fn wire_unreachable_jira(app_state: &AppState) {
        let mut persistence = app_state.persistence.lock().await;
        let ticket_system_id: i64 = persistence
            .save_ticket_system(&timetracker_domain::TicketSystem {
                id: None,
                name: String::from("Company Jira"),
                system_type: timetracker_domain::TicketSystemType::Jira,
                book_time: true,
                // Port 9 (discard) refuses connections immediately.
                url: String::from("http://127.0.0.1:9"),
                login: String::from("bot"),
                password: String::from("secret"),
                ticket_url: String::new(),
            })
            .expect("Failed to seed ticket system");
        let mut project: Project = persistence.get_project(1).expect("Seeded project missing");
        project.ticket_system_id = Some(ticket_system_id);
        persistence
            .save_project(&project)
            .expect("Failed to wire ticket system");
    }

    /// Wires an unreachable OTRS system to the seeded project.
    async fn wire_unreachable_otrs(app_state: &AppState) {
        let mut persistence = app_state.persistence.lock().await;
        let ticket_system_id: i64 = persistence
            .save_ticket_system(&timetracker_domain::TicketSystem {
                id: None,
                name: String::from("Helpdesk"),
                system_type: timetracker_domain::TicketSystemType::Otrs,
                book_time: false,
                // Port 9 (discard) refuses connections immediately.
                url: String::from("http://127.0.0.1:9"),
                login: String::from("bot"),
                password: String::from("secret"),
                ticket_url: String::new(),
            })
            .expect("Failed to seed ticket system");
        let mut project: Project = persistence.get_project(1).expect("Seeded project missing");
        project.ticket_system_id = Some(ticket_system_id);
        persistence
            .save_project(&project)
            .expect("Failed to wire ticket system");
    }

    async fn send_json(
        app: Router,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (HttpStatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body was not JSON")
        };
        (status, value)
    }

    async fn get_json(app: Router, uri: &str) -> (HttpStatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body was not JSON")
        };
        (status, value)
    }

    fn tracking_body(ticket: &str) -> Value {
        json!({
            "date": "2026-01-05",
            "start": "09:00",
            "end": "10:30",
            "customer": 1,
            "project": 1,
            "activity": 1,
            "ticket": ticket,
            "description": "refactoring"
        })
    }

    #[tokio::test]
    async fn test_tracking_save_persists_entry() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());

        let (status, body) = send_json(
            app,
            "POST",
            "/tracking/save?user=alice",
            tracking_body(""),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["duration"], 90);
        assert_eq!(body["date"], "2026-01-05");

        let (status, body) = get_json(
            build_router(app_state),
            "/getData/days/10000?user=alice",
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["entry"]["description"], "refactoring");
    }

    #[tokio::test]
    async fn test_tracking_save_unknown_user_is_unauthorized() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let (status, body) = send_json(
            app,
            "POST",
            "/tracking/save?user=mallory",
            tracking_body(""),
        )
        .await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_tracking_save_survives_unreachable_ticket_system() {
        let app_state: AppState = create_test_app_state();
        wire_unreachable_jira(&app_state).await;
        let app: Router = build_router(app_state.clone());

        // The push fails against 127.0.0.1:9, the request must not.
        let (status, body) = send_json(
            app,
            "POST",
            "/tracking/save?user=alice",
            tracking_body("ABC-1"),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["ticket"], "ABC-1");

        let mut persistence = app_state.persistence.lock().await;
        let entry: Entry = persistence.get_entry(1).expect("Entry missing");
        assert!(!entry.synced_to_ticket_system);
    }

    #[tokio::test]
    async fn test_tracking_save_survives_unreachable_ticket_lookup() {
        let app_state: AppState = create_test_app_state();
        wire_unreachable_otrs(&app_state).await;
        let app: Router = build_router(app_state.clone());

        // The existence check cannot reach 127.0.0.1:9; the entry is still
        // recorded because the system may simply be down.
        let (status, body) = send_json(
            app,
            "POST",
            "/tracking/save?user=alice",
            tracking_body("100042"),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["ticket"], "100042");

        let mut persistence = app_state.persistence.lock().await;
        let entry: Entry = persistence.get_entry(1).expect("Entry missing");
        assert_eq!(entry.ticket, "100042");
    }

    #[tokio::test]
    async fn test_tracking_delete_removes_entry() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let (status, body) = send_json(
            app,
            "POST",
            "/tracking/save?user=alice",
            tracking_body(""),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let entry_id: i64 = body["id"].as_i64().expect("No entry id");

        let (status, body) = send_json(
            build_router(app_state.clone()),
            "POST",
            "/tracking/delete?user=alice",
            json!({ "id": entry_id }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = send_json(
            build_router(app_state),
            "POST",
            "/tracking/delete?user=alice",
            json!({ "id": entry_id }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_activity_save_returns_tuple() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let (status, body) = send_json(
            app,
            "POST",
            "/activity/save?user=alice",
            json!({ "name": "Review", "needsTicket": false, "factor": 1.0 }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let tuple = body.as_array().expect("Expected a JSON array");
        assert_eq!(tuple.len(), 4);
        assert_eq!(tuple[1], "Review");
        assert_eq!(tuple[2], false);
        assert!((tuple[3].as_f64().expect("factor") - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_customer_save_without_name_is_rejected() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let (status, body) = send_json(
            app,
            "POST",
            "/customer/save?user=alice",
            json!({ "active": true, "global": true }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_customer_save_duplicate_name_is_unprocessable() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let (status, _) = send_json(
            app,
            "POST",
            "/customer/save?user=alice",
            json!({ "name": "acme", "global": true }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_summary_reports_scope_totals() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let (status, body) = send_json(
            app,
            "POST",
            "/tracking/save?user=alice",
            tracking_body("ABC-1"),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let entry_id: i64 = body["id"].as_i64().expect("No entry id");

        let (status, body) = get_json(
            build_router(app_state),
            &format!("/getSummary?entry={entry_id}&user=alice"),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["customer"]["name"], "Acme");
        assert_eq!(body["customer"]["total"], 90);
        assert_eq!(body["customer"]["own"], 90);
        assert_eq!(body["ticket"]["name"], "ABC-1");
    }

    #[tokio::test]
    async fn test_interpretation_by_customer() {
        let app_state: AppState = create_test_app_state();
        let (status, _) = send_json(
            build_router(app_state.clone()),
            "POST",
            "/tracking/save?user=alice",
            tracking_body(""),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = get_json(
            build_router(app_state.clone()),
            "/interpretation/customer?user=alice",
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body[0]["name"], "Acme");
        assert_eq!(body[0]["minutes"], 90);
        assert!((body[0]["quota"].as_f64().expect("quota") - 100.0).abs() < f64::EPSILON);

        let (status, _) = get_json(build_router(app_state), "/interpretation/bogus?user=alice").await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_returns_csv() {
        let app_state: AppState = create_test_app_state();
        let (status, _) = send_json(
            build_router(app_state.clone()),
            "POST",
            "/tracking/save?user=alice",
            tracking_body(""),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let response = build_router(app_state)
            .oneshot(
                Request::builder()
                    .uri("/export/10000?user=alice")
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");
        assert_eq!(response.status(), HttpStatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("No content type")
            .to_str()
            .expect("Bad content type");
        assert!(content_type.starts_with("text/csv"));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let text: String = String::from_utf8(bytes.to_vec()).expect("CSV was not UTF-8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("date,start,end,user,customer,project,activity,description,ticket,duration")
        );
        assert_eq!(lines.count(), 1);
    }

    #[tokio::test]
    async fn test_scoped_user_listing() {
        let app_state: AppState = create_test_app_state();

        // A developer only sees themselves.
        let (status, body) = get_json(build_router(app_state.clone()), "/getUsers?user=alice").await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["username"], "alice");

        // Controlling sees everyone.
        let (status, body) = get_json(build_router(app_state), "/getUsers?user=carol").await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_holiday_roundtrip() {
        let app_state: AppState = create_test_app_state();
        let (status, body) = send_json(
            build_router(app_state.clone()),
            "POST",
            "/holiday/save?user=alice",
            json!({ "day": "2026-12-25", "name": "Christmas" }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["day"], "2026-12-25");

        let (status, body) = get_json(build_router(app_state.clone()), "/getHolidays").await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body[0]["name"], "Christmas");

        let (status, body) = send_json(
            build_router(app_state),
            "POST",
            "/holiday/delete?user=alice",
            json!({ "day": "2026-12-25" }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_ticket_system_listing_omits_password() {
        let app_state: AppState = create_test_app_state();
        wire_unreachable_jira(&app_state).await;

        let (status, body) = get_json(build_router(app_state), "/getTicketSystems").await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body[0]["name"], "Company Jira");
        assert!(body[0].get("password").is_none());
    }
}
