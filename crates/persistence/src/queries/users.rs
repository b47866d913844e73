// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read queries for users, teams and contracts.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use timetracker_domain::{Contract, Team, User};

use crate::data_models::{ContractRow, TeamRow, UserRow};
use crate::diesel_schema::{contracts, teams, teams_users, users};
use crate::error::PersistenceError;

/// Loads the team links of all users, keyed by user id.
fn load_user_team_links(
    conn: &mut SqliteConnection,
) -> Result<HashMap<i64, Vec<i64>>, PersistenceError> {
    let links: Vec<(i64, i64)> = teams_users::table
        .select((teams_users::user_id, teams_users::team_id))
        .order(teams_users::id.asc())
        .load::<(i64, i64)>(conn)?;
    let mut by_user: HashMap<i64, Vec<i64>> = HashMap::new();
    for (user_id, team_id) in links {
        by_user.entry(user_id).or_default().push(team_id);
    }
    Ok(by_user)
}

/// Loads the team links of one user.
fn team_ids_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(teams_users::table
        .filter(teams_users::user_id.eq(user_id))
        .order(teams_users::id.asc())
        .select(teams_users::team_id)
        .load::<i64>(conn)?)
}

/// Retrieves a single user by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such user exists.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<User, PersistenceError> {
    let row: UserRow = users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first::<UserRow>(conn)?;
    let team_ids: Vec<i64> = team_ids_for_user(conn, user_id)?;
    row.into_domain(team_ids)
}

/// Retrieves a single user by username.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such user exists.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<User, PersistenceError> {
    let row: UserRow = users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)?;
    let user_id: i64 = row.user_id;
    let team_ids: Vec<i64> = team_ids_for_user(conn, user_id)?;
    row.into_domain(team_ids)
}

/// Retrieves all users with their team assignments.
///
/// # Errors
///
/// Returns an error if the query fails or a stored user type is unknown.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let mut team_links: HashMap<i64, Vec<i64>> = load_user_team_links(conn)?;
    let rows: Vec<UserRow> = users::table
        .select(UserRow::as_select())
        .order(users::username.asc())
        .load::<UserRow>(conn)?;
    rows.into_iter()
        .map(|row| {
            let team_ids: Vec<i64> = team_links.remove(&row.user_id).unwrap_or_default();
            row.into_domain(team_ids)
        })
        .collect()
}

/// Retrieves all teams.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_teams(conn: &mut SqliteConnection) -> Result<Vec<Team>, PersistenceError> {
    let rows: Vec<TeamRow> = teams::table
        .select(TeamRow::as_select())
        .order(teams::name.asc())
        .load::<TeamRow>(conn)?;
    Ok(rows.into_iter().map(TeamRow::into_domain).collect())
}

/// Retrieves all contracts, optionally restricted to one user.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn list_contracts(
    conn: &mut SqliteConnection,
    user_id: Option<i64>,
) -> Result<Vec<Contract>, PersistenceError> {
    let mut query = contracts::table
        .select(ContractRow::as_select())
        .order(contracts::start_date.asc())
        .into_boxed();
    if let Some(user_id) = user_id {
        query = query.filter(contracts::user_id.eq(user_id));
    }
    let rows: Vec<ContractRow> = query.load::<ContractRow>(conn)?;
    rows.into_iter().map(ContractRow::into_domain).collect()
}
