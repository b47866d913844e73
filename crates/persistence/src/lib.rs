// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite`-backed persistence for the time tracker.
//!
//! The [`Persistence`] struct owns one Diesel connection and exposes the
//! complete read and write surface: the filtered entry query, summary and
//! interpretation aggregations, and CRUD for every administrative entity.
//! Row mapping lives in `data_models`, schema DDL in embedded migrations.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions, clippy::missing_errors_doc)]

use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use time::Date;
use timetracker_domain::{
    Activity, Contract, Customer, Entry, Holiday, Preset, Project, Team, TicketSystem, User,
};

pub mod cache;
pub mod data_models;
pub mod diesel_schema;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use cache::TtlCache;
pub use error::PersistenceError;
pub use queries::entries::EntryFilter;
pub use queries::interpretation::{InterpretationGroup, InterpretationRow};
pub use queries::summary::{EntrySummary, ScopeSummary};

/// Counter producing unique names for shared in-memory test databases.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A live `SQLite`-backed store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Opens a fresh in-memory database with the schema applied.
    ///
    /// Each call gets its own uniquely named shared-memory database, so
    /// concurrently running tests never see each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if connection or migration fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:memdb_timetracker_{id}?mode=memory&cache=shared");
        let conn: SqliteConnection = sqlite::open(&url)?;
        Ok(Self { conn })
    }

    /// Opens (creating if necessary) a file-backed database with the schema
    /// applied, WAL journaling and foreign keys verified.
    ///
    /// # Errors
    ///
    /// Returns an error if connection, migration or PRAGMA setup fails.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = sqlite::open(path)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    // --- entries -----------------------------------------------------------

    pub fn get_entry(&mut self, entry_id: i64) -> Result<Entry, PersistenceError> {
        queries::entries::get_entry(&mut self.conn, entry_id)
    }

    pub fn find_entries(&mut self, filter: &EntryFilter) -> Result<Vec<Entry>, PersistenceError> {
        queries::entries::find_by_filter(&mut self.conn, filter)
    }

    pub fn count_entries(&mut self, filter: &EntryFilter) -> Result<i64, PersistenceError> {
        queries::entries::count_by_filter(&mut self.conn, filter)
    }

    pub fn insert_entry(&mut self, entry: &Entry) -> Result<i64, PersistenceError> {
        mutations::entries::insert_entry(&mut self.conn, entry)
    }

    pub fn update_entry(&mut self, entry_id: i64, entry: &Entry) -> Result<(), PersistenceError> {
        mutations::entries::update_entry(&mut self.conn, entry_id, entry)
    }

    pub fn delete_entry(&mut self, entry_id: i64) -> Result<(), PersistenceError> {
        mutations::entries::delete_entry(&mut self.conn, entry_id)
    }

    pub fn mark_entry_synced(
        &mut self,
        entry_id: i64,
        worklog_id: Option<i64>,
        synced: bool,
    ) -> Result<(), PersistenceError> {
        mutations::entries::mark_synced(&mut self.conn, entry_id, worklog_id, synced)
    }

    // --- aggregations ------------------------------------------------------

    pub fn entry_summary(
        &mut self,
        entry_id: i64,
        requesting_user_id: i64,
    ) -> Result<EntrySummary, PersistenceError> {
        queries::summary::get_summary(&mut self.conn, entry_id, requesting_user_id)
    }

    pub fn entry_summary_legacy(
        &mut self,
        entry_id: i64,
        requesting_user_id: i64,
    ) -> Result<EntrySummary, PersistenceError> {
        queries::summary::get_summary_legacy(&mut self.conn, entry_id, requesting_user_id)
    }

    pub fn interpret_entries(
        &mut self,
        filter: &EntryFilter,
        group: InterpretationGroup,
    ) -> Result<Vec<InterpretationRow>, PersistenceError> {
        queries::interpretation::interpret(&mut self.conn, filter, group)
    }

    // --- customers ---------------------------------------------------------

    pub fn list_customers(&mut self) -> Result<Vec<Customer>, PersistenceError> {
        queries::admin::list_customers(&mut self.conn)
    }

    pub fn customers_for_user(&mut self, user_id: i64) -> Result<Vec<Customer>, PersistenceError> {
        queries::admin::customers_for_user(&mut self.conn, user_id)
    }

    pub fn save_customer(&mut self, customer: &Customer) -> Result<i64, PersistenceError> {
        mutations::admin::save_customer(&mut self.conn, customer)
    }

    pub fn delete_customer(&mut self, customer_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_customer(&mut self.conn, customer_id)
    }

    // --- projects ----------------------------------------------------------

    pub fn list_projects(
        &mut self,
        customer_id: Option<i64>,
    ) -> Result<Vec<Project>, PersistenceError> {
        queries::admin::list_projects(&mut self.conn, customer_id)
    }

    pub fn get_project(&mut self, project_id: i64) -> Result<Project, PersistenceError> {
        queries::admin::get_project(&mut self.conn, project_id)
    }

    pub fn save_project(&mut self, project: &Project) -> Result<i64, PersistenceError> {
        mutations::admin::save_project(&mut self.conn, project)
    }

    pub fn delete_project(&mut self, project_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_project(&mut self.conn, project_id)
    }

    // --- activities --------------------------------------------------------

    pub fn list_activities(&mut self) -> Result<Vec<Activity>, PersistenceError> {
        queries::admin::list_activities(&mut self.conn)
    }

    pub fn get_activity(&mut self, activity_id: i64) -> Result<Activity, PersistenceError> {
        queries::admin::get_activity(&mut self.conn, activity_id)
    }

    pub fn save_activity(&mut self, activity: &Activity) -> Result<i64, PersistenceError> {
        mutations::admin::save_activity(&mut self.conn, activity)
    }

    pub fn delete_activity(&mut self, activity_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_activity(&mut self.conn, activity_id)
    }

    // --- users and teams ---------------------------------------------------

    pub fn get_user(&mut self, user_id: i64) -> Result<User, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    pub fn get_user_by_username(&mut self, username: &str) -> Result<User, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    pub fn save_user(&mut self, user: &User) -> Result<i64, PersistenceError> {
        mutations::admin::save_user(&mut self.conn, user)
    }

    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_user(&mut self.conn, user_id)
    }

    pub fn list_teams(&mut self) -> Result<Vec<Team>, PersistenceError> {
        queries::users::list_teams(&mut self.conn)
    }

    pub fn save_team(&mut self, team: &Team) -> Result<i64, PersistenceError> {
        mutations::admin::save_team(&mut self.conn, team)
    }

    pub fn delete_team(&mut self, team_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_team(&mut self.conn, team_id)
    }

    // --- contracts ---------------------------------------------------------

    pub fn list_contracts(
        &mut self,
        user_id: Option<i64>,
    ) -> Result<Vec<Contract>, PersistenceError> {
        queries::users::list_contracts(&mut self.conn, user_id)
    }

    pub fn save_contract(&mut self, contract: &Contract) -> Result<i64, PersistenceError> {
        mutations::admin::save_contract(&mut self.conn, contract)
    }

    pub fn delete_contract(&mut self, contract_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_contract(&mut self.conn, contract_id)
    }

    // --- ticket systems ----------------------------------------------------

    pub fn list_ticket_systems(&mut self) -> Result<Vec<TicketSystem>, PersistenceError> {
        queries::admin::list_ticket_systems(&mut self.conn)
    }

    pub fn get_ticket_system(
        &mut self,
        ticket_system_id: i64,
    ) -> Result<TicketSystem, PersistenceError> {
        queries::admin::get_ticket_system(&mut self.conn, ticket_system_id)
    }

    pub fn save_ticket_system(
        &mut self,
        ticket_system: &TicketSystem,
    ) -> Result<i64, PersistenceError> {
        mutations::admin::save_ticket_system(&mut self.conn, ticket_system)
    }

    pub fn delete_ticket_system(&mut self, ticket_system_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_ticket_system(&mut self.conn, ticket_system_id)
    }

    // --- presets -----------------------------------------------------------

    pub fn list_presets(&mut self) -> Result<Vec<Preset>, PersistenceError> {
        queries::admin::list_presets(&mut self.conn)
    }

    pub fn save_preset(&mut self, preset: &Preset) -> Result<i64, PersistenceError> {
        mutations::admin::save_preset(&mut self.conn, preset)
    }

    pub fn delete_preset(&mut self, preset_id: i64) -> Result<(), PersistenceError> {
        mutations::admin::delete_preset(&mut self.conn, preset_id)
    }

    // --- holidays ----------------------------------------------------------

    pub fn list_holidays(&mut self) -> Result<Vec<Holiday>, PersistenceError> {
        queries::admin::list_holidays(&mut self.conn)
    }

    pub fn save_holiday(&mut self, holiday: &Holiday) -> Result<(), PersistenceError> {
        mutations::admin::save_holiday(&mut self.conn, holiday)
    }

    pub fn delete_holiday(&mut self, day: Date) -> Result<(), PersistenceError> {
        mutations::admin::delete_holiday(&mut self.conn, day)
    }
}
