// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and their conversions into domain values.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text, times as `HH:MM:SS` text.
//! Conversion failures surface as `PersistenceError::InvalidStoredData`
//! rather than panicking.

use diesel::prelude::*;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};
use timetracker_domain::{
    Activity, Contract, Customer, Entry, Holiday, Preset, Project, Team, TicketSystem,
    TicketSystemType, User, UserType,
};

use crate::diesel_schema::{
    activities, contracts, customers, entries, holidays, presets, projects, teams, ticket_systems,
    users,
};
use crate::error::PersistenceError;

const DAY_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");

/// Formats a date as ISO `YYYY-MM-DD` text for storage.
pub fn format_day(day: Date) -> String {
    day.format(DAY_FORMAT)
        .unwrap_or_else(|_| String::from("0000-00-00"))
}

/// Parses a stored ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `PersistenceError::InvalidStoredData` if the text is not a valid
/// date.
pub fn parse_day(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DAY_FORMAT)
        .map_err(|e| PersistenceError::InvalidStoredData(format!("bad day '{value}': {e}")))
}

/// Formats a time as `HH:MM:SS` text for storage.
pub fn format_time(value: Time) -> String {
    value
        .format(TIME_FORMAT)
        .unwrap_or_else(|_| String::from("00:00:00"))
}

/// Parses a stored `HH:MM:SS` time.
///
/// # Errors
///
/// Returns `PersistenceError::InvalidStoredData` if the text is not a valid
/// time.
pub fn parse_time(value: &str) -> Result<Time, PersistenceError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidStoredData(format!("bad time '{value}': {e}")))
}

/// Diesel Queryable struct for entry rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = entries)]
pub struct EntryRow {
    pub entry_id: i64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub user_id: i64,
    pub customer_id: i64,
    pub project_id: i64,
    pub activity_id: i64,
    pub ticket: String,
    pub description: String,
    pub synced_to_ticket_system: i32,
    pub worklog_id: Option<i64>,
}

impl EntryRow {
    /// Converts this row into a domain entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored day or time text cannot be parsed.
    pub fn into_domain(self) -> Result<Entry, PersistenceError> {
        Ok(Entry {
            id: Some(self.entry_id),
            day: parse_day(&self.day)?,
            start: parse_time(&self.start_time)?,
            end: parse_time(&self.end_time)?,
            user_id: self.user_id,
            customer_id: self.customer_id,
            project_id: self.project_id,
            activity_id: self.activity_id,
            ticket: self.ticket,
            description: self.description,
            synced_to_ticket_system: self.synced_to_ticket_system != 0,
            worklog_id: self.worklog_id,
        })
    }
}

/// Diesel Queryable struct for customer rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = customers)]
pub struct CustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub active: i32,
    pub global: i32,
}

impl CustomerRow {
    /// Converts this row into a domain customer with the given team links.
    #[must_use]
    pub fn into_domain(self, team_ids: Vec<i64>) -> Customer {
        Customer {
            id: Some(self.customer_id),
            name: self.name,
            active: self.active != 0,
            global: self.global != 0,
            team_ids,
        }
    }
}

/// Diesel Queryable struct for project rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = projects)]
pub struct ProjectRow {
    pub project_id: i64,
    pub customer_id: i64,
    pub name: String,
    pub active: i32,
    pub global: i32,
    pub jira_id: Option<String>,
    pub ticket_system_id: Option<i64>,
    pub estimation_minutes: Option<i64>,
}

impl ProjectRow {
    /// Converts this row into a domain project.
    #[must_use]
    pub fn into_domain(self) -> Project {
        Project {
            id: Some(self.project_id),
            customer_id: self.customer_id,
            name: self.name,
            active: self.active != 0,
            global: self.global != 0,
            jira_id: self.jira_id,
            ticket_system_id: self.ticket_system_id,
            estimation_minutes: self.estimation_minutes,
        }
    }
}

/// Diesel Queryable struct for user rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub abbr: String,
    pub user_type: String,
    pub locale: String,
}

impl UserRow {
    /// Converts this row into a domain user with the given team links.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored user type is unknown.
    pub fn into_domain(self, team_ids: Vec<i64>) -> Result<User, PersistenceError> {
        let user_type: UserType = UserType::from_str(&self.user_type)
            .map_err(|e| PersistenceError::InvalidStoredData(e.to_string()))?;
        Ok(User {
            id: Some(self.user_id),
            username: self.username,
            abbr: self.abbr,
            user_type,
            locale: self.locale,
            team_ids,
        })
    }
}

/// Diesel Queryable struct for team rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = teams)]
pub struct TeamRow {
    pub team_id: i64,
    pub name: String,
    pub lead_user_id: Option<i64>,
}

impl TeamRow {
    /// Converts this row into a domain team.
    #[must_use]
    pub fn into_domain(self) -> Team {
        Team {
            id: Some(self.team_id),
            name: self.name,
            lead_user_id: self.lead_user_id,
        }
    }
}

/// Diesel Queryable struct for activity rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = activities)]
pub struct ActivityRow {
    pub activity_id: i64,
    pub name: String,
    pub needs_ticket: i32,
    pub factor: f64,
}

impl ActivityRow {
    /// Converts this row into a domain activity.
    #[must_use]
    pub fn into_domain(self) -> Activity {
        Activity {
            id: Some(self.activity_id),
            name: self.name,
            needs_ticket: self.needs_ticket != 0,
            factor: self.factor,
        }
    }
}

/// Diesel Queryable struct for ticket system rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = ticket_systems)]
pub struct TicketSystemRow {
    pub ticket_system_id: i64,
    pub name: String,
    pub system_type: String,
    pub book_time: i32,
    pub url: String,
    pub login: String,
    pub password: String,
    pub ticket_url: String,
}

impl TicketSystemRow {
    /// Converts this row into a domain ticket system.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored system type is unknown.
    pub fn into_domain(self) -> Result<TicketSystem, PersistenceError> {
        let system_type: TicketSystemType = TicketSystemType::from_str(&self.system_type)
            .map_err(|e| PersistenceError::InvalidStoredData(e.to_string()))?;
        Ok(TicketSystem {
            id: Some(self.ticket_system_id),
            name: self.name,
            system_type,
            book_time: self.book_time != 0,
            url: self.url,
            login: self.login,
            password: self.password,
            ticket_url: self.ticket_url,
        })
    }
}

/// Diesel Queryable struct for preset rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = presets)]
pub struct PresetRow {
    pub preset_id: i64,
    pub name: String,
    pub customer_id: i64,
    pub project_id: i64,
    pub activity_id: i64,
    pub description: String,
}

impl PresetRow {
    /// Converts this row into a domain preset.
    #[must_use]
    pub fn into_domain(self) -> Preset {
        Preset {
            id: Some(self.preset_id),
            name: self.name,
            customer_id: self.customer_id,
            project_id: self.project_id,
            activity_id: self.activity_id,
            description: self.description,
        }
    }
}

/// Diesel Queryable struct for contract rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = contracts)]
pub struct ContractRow {
    pub contract_id: i64,
    pub user_id: i64,
    pub start_date: String,
    pub end_date: Option<String>,
    pub hours_monday: f64,
    pub hours_tuesday: f64,
    pub hours_wednesday: f64,
    pub hours_thursday: f64,
    pub hours_friday: f64,
    pub hours_saturday: f64,
    pub hours_sunday: f64,
}

impl ContractRow {
    /// Converts this row into a domain contract.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored date cannot be parsed.
    pub fn into_domain(self) -> Result<Contract, PersistenceError> {
        let end_date: Option<Date> = match self.end_date {
            Some(ref value) => Some(parse_day(value)?),
            None => None,
        };
        Ok(Contract {
            id: Some(self.contract_id),
            user_id: self.user_id,
            start_date: parse_day(&self.start_date)?,
            end_date,
            hours_monday: self.hours_monday,
            hours_tuesday: self.hours_tuesday,
            hours_wednesday: self.hours_wednesday,
            hours_thursday: self.hours_thursday,
            hours_friday: self.hours_friday,
            hours_saturday: self.hours_saturday,
            hours_sunday: self.hours_sunday,
        })
    }
}

/// Diesel Queryable struct for holiday rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = holidays)]
pub struct HolidayRow {
    pub day: String,
    pub name: String,
}

impl HolidayRow {
    /// Converts this row into a domain holiday.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored day cannot be parsed.
    pub fn into_domain(self) -> Result<Holiday, PersistenceError> {
        Ok(Holiday {
            day: parse_day(&self.day)?,
            name: self.name,
        })
    }
}
