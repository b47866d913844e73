// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes for the administrative entities.
//!
//! Save operations are upserts keyed on the optional entity id: `None`
//! inserts a fresh row and returns the assigned id, `Some(id)` updates in
//! place. Many-to-many links (customer/team, user/team) are replaced
//! wholesale on every save. Deletes of missing rows report
//! `PersistenceError::NotFound`.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timetracker_domain::{
    Activity, Contract, Customer, Holiday, Preset, Project, Team, TicketSystem, User,
};

use crate::data_models::format_day;
use crate::diesel_schema::{
    activities, contracts, customers, customers_teams, holidays, presets, projects, teams,
    teams_users, ticket_systems, users,
};
use crate::error::PersistenceError;
use crate::sqlite::last_insert_rowid;

/// Replaces the team links of one customer.
fn replace_customer_teams(
    conn: &mut SqliteConnection,
    customer_id: i64,
    team_ids: &[i64],
) -> Result<(), PersistenceError> {
    diesel::delete(customers_teams::table.filter(customers_teams::customer_id.eq(customer_id)))
        .execute(conn)?;
    for team_id in team_ids {
        diesel::insert_into(customers_teams::table)
            .values((
                customers_teams::customer_id.eq(customer_id),
                customers_teams::team_id.eq(*team_id),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Replaces the team links of one user.
fn replace_user_teams(
    conn: &mut SqliteConnection,
    user_id: i64,
    team_ids: &[i64],
) -> Result<(), PersistenceError> {
    diesel::delete(teams_users::table.filter(teams_users::user_id.eq(user_id))).execute(conn)?;
    for team_id in team_ids {
        diesel::insert_into(teams_users::table)
            .values((
                teams_users::team_id.eq(*team_id),
                teams_users::user_id.eq(user_id),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Saves a customer and its team links, returning the customer id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing customer, or
/// a database error.
pub fn save_customer(
    conn: &mut SqliteConnection,
    customer: &Customer,
) -> Result<i64, PersistenceError> {
    let customer_id: i64 = match customer.id {
        None => {
            diesel::insert_into(customers::table)
                .values((
                    customers::name.eq(customer.name.clone()),
                    customers::active.eq(i32::from(customer.active)),
                    customers::global.eq(i32::from(customer.global)),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)?
        }
        Some(id) => {
            let updated: usize = diesel::update(customers::table.find(id))
                .set((
                    customers::name.eq(customer.name.clone()),
                    customers::active.eq(i32::from(customer.active)),
                    customers::global.eq(i32::from(customer.global)),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            id
        }
    };
    replace_customer_teams(conn, customer_id, &customer.team_ids)?;
    Ok(customer_id)
}

/// Deletes a customer and its team links.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such customer exists.
pub fn delete_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(customers_teams::table.filter(customers_teams::customer_id.eq(customer_id)))
        .execute(conn)?;
    let deleted: usize =
        diesel::delete(customers::table.find(customer_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves a project, returning the project id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing project, or
/// a database error.
pub fn save_project(conn: &mut SqliteConnection, project: &Project) -> Result<i64, PersistenceError> {
    match project.id {
        None => {
            diesel::insert_into(projects::table)
                .values((
                    projects::customer_id.eq(project.customer_id),
                    projects::name.eq(project.name.clone()),
                    projects::active.eq(i32::from(project.active)),
                    projects::global.eq(i32::from(project.global)),
                    projects::jira_id.eq(project.jira_id.clone()),
                    projects::ticket_system_id.eq(project.ticket_system_id),
                    projects::estimation_minutes.eq(project.estimation_minutes),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)
        }
        Some(id) => {
            let updated: usize = diesel::update(projects::table.find(id))
                .set((
                    projects::customer_id.eq(project.customer_id),
                    projects::name.eq(project.name.clone()),
                    projects::active.eq(i32::from(project.active)),
                    projects::global.eq(i32::from(project.global)),
                    projects::jira_id.eq(project.jira_id.clone()),
                    projects::ticket_system_id.eq(project.ticket_system_id),
                    projects::estimation_minutes.eq(project.estimation_minutes),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            Ok(id)
        }
    }
}

/// Deletes a project.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such project exists.
pub fn delete_project(conn: &mut SqliteConnection, project_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(projects::table.find(project_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves an activity, returning the activity id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing activity, or
/// a database error.
pub fn save_activity(
    conn: &mut SqliteConnection,
    activity: &Activity,
) -> Result<i64, PersistenceError> {
    match activity.id {
        None => {
            diesel::insert_into(activities::table)
                .values((
                    activities::name.eq(activity.name.clone()),
                    activities::needs_ticket.eq(i32::from(activity.needs_ticket)),
                    activities::factor.eq(activity.factor),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)
        }
        Some(id) => {
            let updated: usize = diesel::update(activities::table.find(id))
                .set((
                    activities::name.eq(activity.name.clone()),
                    activities::needs_ticket.eq(i32::from(activity.needs_ticket)),
                    activities::factor.eq(activity.factor),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            Ok(id)
        }
    }
}

/// Deletes an activity.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such activity exists.
pub fn delete_activity(
    conn: &mut SqliteConnection,
    activity_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(activities::table.find(activity_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves a user and their team links, returning the user id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing user, or a
/// database error.
pub fn save_user(conn: &mut SqliteConnection, user: &User) -> Result<i64, PersistenceError> {
    let user_id: i64 = match user.id {
        None => {
            diesel::insert_into(users::table)
                .values((
                    users::username.eq(user.username.clone()),
                    users::abbr.eq(user.abbr.clone()),
                    users::user_type.eq(user.user_type.as_str()),
                    users::locale.eq(user.locale.clone()),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)?
        }
        Some(id) => {
            let updated: usize = diesel::update(users::table.find(id))
                .set((
                    users::username.eq(user.username.clone()),
                    users::abbr.eq(user.abbr.clone()),
                    users::user_type.eq(user.user_type.as_str()),
                    users::locale.eq(user.locale.clone()),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            id
        }
    };
    replace_user_teams(conn, user_id, &user.team_ids)?;
    Ok(user_id)
}

/// Deletes a user and their team links.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such user exists.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    diesel::delete(teams_users::table.filter(teams_users::user_id.eq(user_id))).execute(conn)?;
    let deleted: usize = diesel::delete(users::table.find(user_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves a team, returning the team id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing team, or a
/// database error.
pub fn save_team(conn: &mut SqliteConnection, team: &Team) -> Result<i64, PersistenceError> {
    match team.id {
        None => {
            diesel::insert_into(teams::table)
                .values((
                    teams::name.eq(team.name.clone()),
                    teams::lead_user_id.eq(team.lead_user_id),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)
        }
        Some(id) => {
            let updated: usize = diesel::update(teams::table.find(id))
                .set((
                    teams::name.eq(team.name.clone()),
                    teams::lead_user_id.eq(team.lead_user_id),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            Ok(id)
        }
    }
}

/// Deletes a team and its membership links.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such team exists.
pub fn delete_team(conn: &mut SqliteConnection, team_id: i64) -> Result<(), PersistenceError> {
    diesel::delete(teams_users::table.filter(teams_users::team_id.eq(team_id))).execute(conn)?;
    diesel::delete(customers_teams::table.filter(customers_teams::team_id.eq(team_id)))
        .execute(conn)?;
    let deleted: usize = diesel::delete(teams::table.find(team_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves a ticket system, returning the ticket system id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing ticket
/// system, or a database error.
pub fn save_ticket_system(
    conn: &mut SqliteConnection,
    ticket_system: &TicketSystem,
) -> Result<i64, PersistenceError> {
    match ticket_system.id {
        None => {
            diesel::insert_into(ticket_systems::table)
                .values((
                    ticket_systems::name.eq(ticket_system.name.clone()),
                    ticket_systems::system_type.eq(ticket_system.system_type.as_str()),
                    ticket_systems::book_time.eq(i32::from(ticket_system.book_time)),
                    ticket_systems::url.eq(ticket_system.url.clone()),
                    ticket_systems::login.eq(ticket_system.login.clone()),
                    ticket_systems::password.eq(ticket_system.password.clone()),
                    ticket_systems::ticket_url.eq(ticket_system.ticket_url.clone()),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)
        }
        Some(id) => {
            let updated: usize = diesel::update(ticket_systems::table.find(id))
                .set((
                    ticket_systems::name.eq(ticket_system.name.clone()),
                    ticket_systems::system_type.eq(ticket_system.system_type.as_str()),
                    ticket_systems::book_time.eq(i32::from(ticket_system.book_time)),
                    ticket_systems::url.eq(ticket_system.url.clone()),
                    ticket_systems::login.eq(ticket_system.login.clone()),
                    ticket_systems::password.eq(ticket_system.password.clone()),
                    ticket_systems::ticket_url.eq(ticket_system.ticket_url.clone()),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            Ok(id)
        }
    }
}

/// Deletes a ticket system.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such ticket system exists.
pub fn delete_ticket_system(
    conn: &mut SqliteConnection,
    ticket_system_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(ticket_systems::table.find(ticket_system_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves a preset, returning the preset id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing preset, or a
/// database error.
pub fn save_preset(conn: &mut SqliteConnection, preset: &Preset) -> Result<i64, PersistenceError> {
    match preset.id {
        None => {
            diesel::insert_into(presets::table)
                .values((
                    presets::name.eq(preset.name.clone()),
                    presets::customer_id.eq(preset.customer_id),
                    presets::project_id.eq(preset.project_id),
                    presets::activity_id.eq(preset.activity_id),
                    presets::description.eq(preset.description.clone()),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)
        }
        Some(id) => {
            let updated: usize = diesel::update(presets::table.find(id))
                .set((
                    presets::name.eq(preset.name.clone()),
                    presets::customer_id.eq(preset.customer_id),
                    presets::project_id.eq(preset.project_id),
                    presets::activity_id.eq(preset.activity_id),
                    presets::description.eq(preset.description.clone()),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            Ok(id)
        }
    }
}

/// Deletes a preset.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such preset exists.
pub fn delete_preset(conn: &mut SqliteConnection, preset_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(presets::table.find(preset_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves a contract, returning the contract id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when updating a missing contract, or
/// a database error.
pub fn save_contract(
    conn: &mut SqliteConnection,
    contract: &Contract,
) -> Result<i64, PersistenceError> {
    let end_date: Option<String> = contract.end_date.map(format_day);
    match contract.id {
        None => {
            diesel::insert_into(contracts::table)
                .values((
                    contracts::user_id.eq(contract.user_id),
                    contracts::start_date.eq(format_day(contract.start_date)),
                    contracts::end_date.eq(end_date),
                    contracts::hours_monday.eq(contract.hours_monday),
                    contracts::hours_tuesday.eq(contract.hours_tuesday),
                    contracts::hours_wednesday.eq(contract.hours_wednesday),
                    contracts::hours_thursday.eq(contract.hours_thursday),
                    contracts::hours_friday.eq(contract.hours_friday),
                    contracts::hours_saturday.eq(contract.hours_saturday),
                    contracts::hours_sunday.eq(contract.hours_sunday),
                ))
                .execute(conn)?;
            last_insert_rowid(conn)
        }
        Some(id) => {
            let updated: usize = diesel::update(contracts::table.find(id))
                .set((
                    contracts::user_id.eq(contract.user_id),
                    contracts::start_date.eq(format_day(contract.start_date)),
                    contracts::end_date.eq(end_date),
                    contracts::hours_monday.eq(contract.hours_monday),
                    contracts::hours_tuesday.eq(contract.hours_tuesday),
                    contracts::hours_wednesday.eq(contract.hours_wednesday),
                    contracts::hours_thursday.eq(contract.hours_thursday),
                    contracts::hours_friday.eq(contract.hours_friday),
                    contracts::hours_saturday.eq(contract.hours_saturday),
                    contracts::hours_sunday.eq(contract.hours_sunday),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::NotFound);
            }
            Ok(id)
        }
    }
}

/// Deletes a contract.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such contract exists.
pub fn delete_contract(
    conn: &mut SqliteConnection,
    contract_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(contracts::table.find(contract_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}

/// Saves a holiday. The day is the primary key, so saving twice on the same
/// day replaces the name.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_holiday(conn: &mut SqliteConnection, holiday: &Holiday) -> Result<(), PersistenceError> {
    let day: String = format_day(holiday.day);
    diesel::insert_into(holidays::table)
        .values((
            holidays::day.eq(day.clone()),
            holidays::name.eq(holiday.name.clone()),
        ))
        .on_conflict(holidays::day)
        .do_update()
        .set(holidays::name.eq(holiday.name.clone()))
        .execute(conn)?;
    Ok(())
}

/// Deletes a holiday by day.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no holiday exists on that day.
pub fn delete_holiday(
    conn: &mut SqliteConnection,
    day: time::Date,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(holidays::table.filter(holidays::day.eq(format_day(day)))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound);
    }
    Ok(())
}
