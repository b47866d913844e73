// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative CRUD services.
//!
//! Each save validates the domain rules, enforces name uniqueness against
//! the stored rows (case-insensitive, excluding the row being updated) and
//! persists. Deletes pass straight through; missing rows surface as 404.

use std::str::FromStr;

use time::Date;
use timetracker_domain::{
    validate_activity, validate_contract, validate_customer, validate_name_unique,
    validate_project, Activity, Contract, Customer, Holiday, Preset, Project, Team, TicketSystem,
    TicketSystemType, User, UserType,
};
use timetracker_persistence::Persistence;
use tracing::info;

use crate::error::{translate_domain_error, ApiError};
use crate::request_response::{
    parse_request_date, ActivitySaveRequest, ContractSaveRequest, CustomerSaveRequest,
    HolidaySaveRequest, PresetSaveRequest, ProjectSaveRequest, TeamSaveRequest,
    TicketSystemSaveRequest, UserSaveRequest,
};

fn required_name(field: &str, value: Option<&String>) -> Result<String, ApiError> {
    match value {
        Some(name) if !name.trim().is_empty() => Ok(name.clone()),
        _ => Err(ApiError::InvalidInput {
            field: field.to_owned(),
            message: String::from("is required"),
        }),
    }
}

/// Saves a customer, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for a missing name, a rule violation for a
/// duplicate name or teamless non-global customer, or an internal error.
pub fn save_customer(
    persistence: &mut Persistence,
    request: &CustomerSaveRequest,
) -> Result<Customer, ApiError> {
    let name: String = required_name("name", request.name.as_ref())?;
    let mut customer = Customer {
        id: request.id,
        name,
        active: request.active,
        global: request.global,
        team_ids: request.teams.clone(),
    };
    validate_customer(&customer).map_err(|e| translate_domain_error(&e))?;

    let existing: Vec<String> = persistence
        .list_customers()?
        .into_iter()
        .filter(|c| c.id != request.id)
        .map(|c| c.name)
        .collect();
    validate_name_unique("customer", &customer.name, &existing)
        .map_err(|e| translate_domain_error(&e))?;

    let customer_id: i64 = persistence.save_customer(&customer)?;
    customer.id = Some(customer_id);
    info!(customer_id, name = %customer.name, "Customer saved");
    Ok(customer)
}

/// Saves a project, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for a missing name, a rule violation for a name
/// collision within the same customer, or an internal error.
pub fn save_project(
    persistence: &mut Persistence,
    request: &ProjectSaveRequest,
) -> Result<Project, ApiError> {
    let name: String = required_name("name", request.name.as_ref())?;
    let mut project = Project {
        id: request.id,
        customer_id: request.customer,
        name,
        active: request.active,
        global: request.global,
        jira_id: request.jira_id.clone(),
        ticket_system_id: request.ticket_system,
        estimation_minutes: request.estimation,
    };
    validate_project(&project).map_err(|e| translate_domain_error(&e))?;

    // Project names are unique per customer, not globally.
    let existing: Vec<String> = persistence
        .list_projects(Some(request.customer))?
        .into_iter()
        .filter(|p| p.id != request.id)
        .map(|p| p.name)
        .collect();
    validate_name_unique("project", &project.name, &existing)
        .map_err(|e| translate_domain_error(&e))?;

    let project_id: i64 = persistence.save_project(&project)?;
    project.id = Some(project_id);
    info!(project_id, name = %project.name, "Project saved");
    Ok(project)
}

/// Saves an activity, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for a missing name or non-positive factor, a rule
/// violation for a duplicate name, or an internal error.
pub fn save_activity(
    persistence: &mut Persistence,
    request: &ActivitySaveRequest,
) -> Result<Activity, ApiError> {
    let name: String = required_name("name", request.name.as_ref())?;
    let mut activity = Activity {
        id: request.id,
        name,
        needs_ticket: request.needs_ticket,
        factor: request.factor,
    };
    validate_activity(&activity).map_err(|e| translate_domain_error(&e))?;

    let existing: Vec<String> = persistence
        .list_activities()?
        .into_iter()
        .filter(|a| a.id != request.id)
        .map(|a| a.name)
        .collect();
    validate_name_unique("activity", &activity.name, &existing)
        .map_err(|e| translate_domain_error(&e))?;

    let activity_id: i64 = persistence.save_activity(&activity)?;
    activity.id = Some(activity_id);
    info!(activity_id, name = %activity.name, "Activity saved");
    Ok(activity)
}

/// Saves a user, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for a missing username or unknown type, a rule
/// violation for a duplicate username, or an internal error.
pub fn save_user(persistence: &mut Persistence, request: &UserSaveRequest) -> Result<User, ApiError> {
    let username: String = required_name("username", request.username.as_ref())?;
    let user_type: UserType = match request.user_type.as_deref() {
        None => UserType::default(),
        Some(value) => {
            UserType::from_str(value).map_err(|e| translate_domain_error(&e))?
        }
    };
    let mut user = User {
        id: request.id,
        username,
        abbr: request.abbr.clone(),
        user_type,
        locale: request.locale.clone(),
        team_ids: request.teams.clone(),
    };

    let existing: Vec<String> = persistence
        .list_users()?
        .into_iter()
        .filter(|u| u.id != request.id)
        .map(|u| u.username)
        .collect();
    validate_name_unique("user", &user.username, &existing)
        .map_err(|e| translate_domain_error(&e))?;

    let user_id: i64 = persistence.save_user(&user)?;
    user.id = Some(user_id);
    info!(user_id, username = %user.username, "User saved");
    Ok(user)
}

/// Saves a team, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for a missing name, a rule violation for a
/// duplicate name, or an internal error.
pub fn save_team(persistence: &mut Persistence, request: &TeamSaveRequest) -> Result<Team, ApiError> {
    let name: String = required_name("name", request.name.as_ref())?;
    let mut team = Team {
        id: request.id,
        name,
        lead_user_id: request.lead_user,
    };

    let existing: Vec<String> = persistence
        .list_teams()?
        .into_iter()
        .filter(|t| t.id != request.id)
        .map(|t| t.name)
        .collect();
    validate_name_unique("team", &team.name, &existing).map_err(|e| translate_domain_error(&e))?;

    let team_id: i64 = persistence.save_team(&team)?;
    team.id = Some(team_id);
    info!(team_id, name = %team.name, "Team saved");
    Ok(team)
}

/// Saves a ticket system, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for a missing name or unknown system type, a rule
/// violation for a duplicate name, or an internal error.
pub fn save_ticket_system(
    persistence: &mut Persistence,
    request: &TicketSystemSaveRequest,
) -> Result<TicketSystem, ApiError> {
    let name: String = required_name("name", request.name.as_ref())?;
    let system_type: TicketSystemType = match request.system_type.as_deref() {
        None => {
            return Err(ApiError::InvalidInput {
                field: String::from("type"),
                message: String::from("is required"),
            });
        }
        Some(value) => {
            TicketSystemType::from_str(value).map_err(|e| translate_domain_error(&e))?
        }
    };
    let mut system = TicketSystem {
        id: request.id,
        name,
        system_type,
        book_time: request.book_time,
        url: request.url.clone(),
        login: request.login.clone(),
        password: request.password.clone(),
        ticket_url: request.ticket_url.clone(),
    };

    let existing: Vec<String> = persistence
        .list_ticket_systems()?
        .into_iter()
        .filter(|s| s.id != request.id)
        .map(|s| s.name)
        .collect();
    validate_name_unique("ticket system", &system.name, &existing)
        .map_err(|e| translate_domain_error(&e))?;

    let ticket_system_id: i64 = persistence.save_ticket_system(&system)?;
    system.id = Some(ticket_system_id);
    info!(ticket_system_id, name = %system.name, "Ticket system saved");
    Ok(system)
}

/// Saves a preset, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for a missing name or an internal error.
pub fn save_preset(
    persistence: &mut Persistence,
    request: &PresetSaveRequest,
) -> Result<Preset, ApiError> {
    let name: String = required_name("name", request.name.as_ref())?;
    let mut preset = Preset {
        id: request.id,
        name,
        customer_id: request.customer,
        project_id: request.project,
        activity_id: request.activity,
        description: request.description.clone(),
    };
    let preset_id: i64 = persistence.save_preset(&preset)?;
    preset.id = Some(preset_id);
    info!(preset_id, name = %preset.name, "Preset saved");
    Ok(preset)
}

/// Saves a contract, returning the persisted row.
///
/// # Errors
///
/// Returns an input error for malformed dates or out-of-range hours, or an
/// internal error.
pub fn save_contract(
    persistence: &mut Persistence,
    request: &ContractSaveRequest,
) -> Result<Contract, ApiError> {
    let start_date: Date = parse_request_date("start", &request.start)?;
    let end_date: Option<Date> = match request.end.as_deref() {
        Some(value) if !value.is_empty() => Some(parse_request_date("end", value)?),
        _ => None,
    };
    let mut contract = Contract {
        id: request.id,
        user_id: request.user,
        start_date,
        end_date,
        hours_monday: request.monday,
        hours_tuesday: request.tuesday,
        hours_wednesday: request.wednesday,
        hours_thursday: request.thursday,
        hours_friday: request.friday,
        hours_saturday: request.saturday,
        hours_sunday: request.sunday,
    };
    validate_contract(&contract).map_err(|e| translate_domain_error(&e))?;

    let contract_id: i64 = persistence.save_contract(&contract)?;
    contract.id = Some(contract_id);
    info!(contract_id, user_id = contract.user_id, "Contract saved");
    Ok(contract)
}

/// Saves a holiday, returning the persisted row. Saving an existing day
/// replaces its name.
///
/// # Errors
///
/// Returns an input error for a malformed day or missing name, or an
/// internal error.
pub fn save_holiday(
    persistence: &mut Persistence,
    request: &HolidaySaveRequest,
) -> Result<Holiday, ApiError> {
    let day: Date = parse_request_date("day", &request.day)?;
    let name: String = required_name("name", request.name.as_ref())?;
    let holiday = Holiday { day, name };
    persistence.save_holiday(&holiday)?;
    info!(day = %request.day, "Holiday saved");
    Ok(holiday)
}
