// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read queries for the administrative entities: customers, projects,
//! activities, ticket systems, presets and holidays.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use timetracker_domain::{Activity, Customer, Holiday, Preset, Project, TicketSystem};

use crate::data_models::{
    ActivityRow, CustomerRow, HolidayRow, PresetRow, ProjectRow, TicketSystemRow,
};
use crate::diesel_schema::{
    activities, customers, customers_teams, holidays, presets, projects, teams_users,
    ticket_systems,
};
use crate::error::PersistenceError;

/// Loads the team links of all customers, keyed by customer id.
fn load_customer_team_links(
    conn: &mut SqliteConnection,
) -> Result<HashMap<i64, Vec<i64>>, PersistenceError> {
    let links: Vec<(i64, i64)> = customers_teams::table
        .select((customers_teams::customer_id, customers_teams::team_id))
        .order(customers_teams::id.asc())
        .load::<(i64, i64)>(conn)?;
    let mut by_customer: HashMap<i64, Vec<i64>> = HashMap::new();
    for (customer_id, team_id) in links {
        by_customer.entry(customer_id).or_default().push(team_id);
    }
    Ok(by_customer)
}

/// Retrieves all customers with their team assignments.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_customers(conn: &mut SqliteConnection) -> Result<Vec<Customer>, PersistenceError> {
    let mut team_links: HashMap<i64, Vec<i64>> = load_customer_team_links(conn)?;
    let rows: Vec<CustomerRow> = customers::table
        .select(CustomerRow::as_select())
        .order(customers::name.asc())
        .load::<CustomerRow>(conn)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let team_ids: Vec<i64> = team_links.remove(&row.customer_id).unwrap_or_default();
            row.into_domain(team_ids)
        })
        .collect())
}

/// Retrieves the customers visible to one user: every global customer plus
/// every customer sharing a team with the user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn customers_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Customer>, PersistenceError> {
    let user_teams: Vec<i64> = teams_users::table
        .filter(teams_users::user_id.eq(user_id))
        .select(teams_users::team_id)
        .load::<i64>(conn)?;

    let all: Vec<Customer> = list_customers(conn)?;
    Ok(all
        .into_iter()
        .filter(|customer| {
            customer.global
                || customer
                    .team_ids
                    .iter()
                    .any(|team_id| user_teams.contains(team_id))
        })
        .collect())
}

/// Retrieves all projects, optionally restricted to one customer.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_projects(
    conn: &mut SqliteConnection,
    customer_id: Option<i64>,
) -> Result<Vec<Project>, PersistenceError> {
    let mut query = projects::table
        .select(ProjectRow::as_select())
        .order(projects::name.asc())
        .into_boxed();
    if let Some(customer_id) = customer_id {
        query = query.filter(projects::customer_id.eq(customer_id));
    }
    let rows: Vec<ProjectRow> = query.load::<ProjectRow>(conn)?;
    Ok(rows.into_iter().map(ProjectRow::into_domain).collect())
}

/// Retrieves a single project by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such project exists.
pub fn get_project(conn: &mut SqliteConnection, project_id: i64) -> Result<Project, PersistenceError> {
    let row: ProjectRow = projects::table
        .find(project_id)
        .select(ProjectRow::as_select())
        .first::<ProjectRow>(conn)?;
    Ok(row.into_domain())
}

/// Retrieves all activities.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_activities(conn: &mut SqliteConnection) -> Result<Vec<Activity>, PersistenceError> {
    let rows: Vec<ActivityRow> = activities::table
        .select(ActivityRow::as_select())
        .order(activities::name.asc())
        .load::<ActivityRow>(conn)?;
    Ok(rows.into_iter().map(ActivityRow::into_domain).collect())
}

/// Retrieves a single activity by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such activity exists.
pub fn get_activity(
    conn: &mut SqliteConnection,
    activity_id: i64,
) -> Result<Activity, PersistenceError> {
    let row: ActivityRow = activities::table
        .find(activity_id)
        .select(ActivityRow::as_select())
        .first::<ActivityRow>(conn)?;
    Ok(row.into_domain())
}

/// Retrieves all configured ticket systems.
///
/// # Errors
///
/// Returns an error if the query fails or a stored type is unknown.
pub fn list_ticket_systems(
    conn: &mut SqliteConnection,
) -> Result<Vec<TicketSystem>, PersistenceError> {
    let rows: Vec<TicketSystemRow> = ticket_systems::table
        .select(TicketSystemRow::as_select())
        .order(ticket_systems::name.asc())
        .load::<TicketSystemRow>(conn)?;
    rows.into_iter().map(TicketSystemRow::into_domain).collect()
}

/// Retrieves a single ticket system by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such ticket system exists.
pub fn get_ticket_system(
    conn: &mut SqliteConnection,
    ticket_system_id: i64,
) -> Result<TicketSystem, PersistenceError> {
    let row: TicketSystemRow = ticket_systems::table
        .find(ticket_system_id)
        .select(TicketSystemRow::as_select())
        .first::<TicketSystemRow>(conn)?;
    row.into_domain()
}

/// Retrieves all presets.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_presets(conn: &mut SqliteConnection) -> Result<Vec<Preset>, PersistenceError> {
    let rows: Vec<PresetRow> = presets::table
        .select(PresetRow::as_select())
        .order(presets::name.asc())
        .load::<PresetRow>(conn)?;
    Ok(rows.into_iter().map(PresetRow::into_domain).collect())
}

/// Retrieves all holidays ordered by day.
///
/// # Errors
///
/// Returns an error if the query fails or a stored day is invalid.
pub fn list_holidays(conn: &mut SqliteConnection) -> Result<Vec<Holiday>, PersistenceError> {
    let rows: Vec<HolidayRow> = holidays::table
        .select(HolidayRow::as_select())
        .order(holidays::day.asc())
        .load::<HolidayRow>(conn)?;
    rows.into_iter().map(HolidayRow::into_domain).collect()
}
