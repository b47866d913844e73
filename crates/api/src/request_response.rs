// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! The wire shapes follow the grid frontend's conventions: camelCase fields,
//! ids under the related entity's name (`customer`, `project`, ...), dates
//! as `YYYY-MM-DD` and times as `HH:MM` or `HH:MM:SS` strings. Save
//! requests carry an optional `id`; absence means create.

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};
use timetracker_domain::{
    Activity, Contract, Customer, Entry, Holiday, Preset, Project, Team, TicketSystem, User,
};

use crate::error::ApiError;

const DAY_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT_SHORT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");
const TIME_FORMAT_LONG: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]:[second]");

/// Parses a `YYYY-MM-DD` request date.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming the field on parse failure.
pub fn parse_request_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value, DAY_FORMAT).map_err(|_| ApiError::InvalidInput {
        field: field.to_owned(),
        message: format!("'{value}' is not a valid YYYY-MM-DD date"),
    })
}

/// Parses a request time, accepting `HH:MM` and `HH:MM:SS`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming the field on parse failure.
pub fn parse_request_time(field: &str, value: &str) -> Result<Time, ApiError> {
    Time::parse(value, TIME_FORMAT_LONG)
        .or_else(|_| Time::parse(value, TIME_FORMAT_SHORT))
        .map_err(|_| ApiError::InvalidInput {
            field: field.to_owned(),
            message: format!("'{value}' is not a valid HH:MM[:SS] time"),
        })
}

fn format_date(value: Date) -> String {
    value.format(DAY_FORMAT).unwrap_or_default()
}

fn format_time(value: Time) -> String {
    value.format(TIME_FORMAT_LONG).unwrap_or_default()
}

// --- tracking --------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: String,
    pub start: String,
    pub end: String,
    pub customer: i64,
    pub project: i64,
    pub activity: i64,
    #[serde(default)]
    pub ticket: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdRequest {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: i64,
    pub date: String,
    pub start: String,
    pub end: String,
    pub user: i64,
    pub customer: i64,
    pub project: i64,
    pub activity: i64,
    pub duration: i64,
    pub ticket: String,
    pub description: String,
}

impl EntryResponse {
    /// Builds the wire shape of a persisted entry.
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.unwrap_or_default(),
            date: format_date(entry.day),
            start: format_time(entry.start),
            end: format_time(entry.end),
            user: entry.user_id,
            customer: entry.customer_id,
            project: entry.project_id,
            activity: entry.activity_id,
            duration: entry.duration_minutes(),
            ticket: entry.ticket.clone(),
            description: entry.description.clone(),
        }
    }
}

/// The `[{"entry": {...}}, ...]` wrapper the tracking grid consumes.
#[derive(Debug, Clone, Serialize)]
pub struct WrappedEntry {
    pub entry: EntryResponse,
}

// --- administration --------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub teams: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub global: bool,
    pub teams: Vec<i64>,
}

impl CustomerResponse {
    #[must_use]
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: customer.id.unwrap_or_default(),
            name: customer.name.clone(),
            active: customer.active,
            global: customer.global,
            teams: customer.team_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    pub customer: i64,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub jira_id: Option<String>,
    #[serde(default)]
    pub ticket_system: Option<i64>,
    #[serde(default)]
    pub estimation: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i64,
    pub customer: i64,
    pub name: String,
    pub active: bool,
    pub global: bool,
    pub jira_id: Option<String>,
    pub ticket_system: Option<i64>,
    pub estimation: Option<i64>,
}

impl ProjectResponse {
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.unwrap_or_default(),
            customer: project.customer_id,
            name: project.name.clone(),
            active: project.active,
            global: project.global,
            jira_id: project.jira_id.clone(),
            ticket_system: project.ticket_system_id,
            estimation: project.estimation_minutes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub needs_ticket: bool,
    #[serde(default = "default_factor")]
    pub factor: f64,
}

/// The grid expects `/activity/save` to answer with a positional tuple:
/// `[id, name, needsTicket, factor]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityTupleResponse(pub i64, pub String, pub bool, pub f64);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: i64,
    pub name: String,
    pub needs_ticket: bool,
    pub factor: f64,
}

impl ActivityResponse {
    #[must_use]
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            id: activity.id.unwrap_or_default(),
            name: activity.name.clone(),
            needs_ticket: activity.needs_ticket,
            factor: activity.factor,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub abbr: String,
    #[serde(default, rename = "type")]
    pub user_type: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub teams: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub abbr: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub locale: String,
    pub teams: Vec<i64>,
}

impl UserResponse {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username.clone(),
            abbr: user.abbr.clone(),
            user_type: user.user_type.as_str().to_owned(),
            locale: user.locale.clone(),
            teams: user.team_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lead_user: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub lead_user: Option<i64>,
}

impl TeamResponse {
    #[must_use]
    pub fn from_team(team: &Team) -> Self {
        Self {
            id: team.id.unwrap_or_default(),
            name: team.name.clone(),
            lead_user: team.lead_user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSystemSaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub system_type: Option<String>,
    #[serde(default)]
    pub book_time: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub ticket_url: String,
}

/// The wire shape of a ticket system. Credentials never leave the server;
/// the password is omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSystemResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub system_type: String,
    pub book_time: bool,
    pub url: String,
    pub login: String,
    pub ticket_url: String,
}

impl TicketSystemResponse {
    #[must_use]
    pub fn from_ticket_system(system: &TicketSystem) -> Self {
        Self {
            id: system.id.unwrap_or_default(),
            name: system.name.clone(),
            system_type: system.system_type.as_str().to_owned(),
            book_time: system.book_time,
            url: system.url.clone(),
            login: system.login.clone(),
            ticket_url: system.ticket_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    pub customer: i64,
    pub project: i64,
    pub activity: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetResponse {
    pub id: i64,
    pub name: String,
    pub customer: i64,
    pub project: i64,
    pub activity: i64,
    pub description: String,
}

impl PresetResponse {
    #[must_use]
    pub fn from_preset(preset: &Preset) -> Self {
        Self {
            id: preset.id.unwrap_or_default(),
            name: preset.name.clone(),
            customer: preset.customer_id,
            project: preset.project_id,
            activity: preset.activity_id,
            description: preset.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub user: i64,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub monday: f64,
    #[serde(default)]
    pub tuesday: f64,
    #[serde(default)]
    pub wednesday: f64,
    #[serde(default)]
    pub thursday: f64,
    #[serde(default)]
    pub friday: f64,
    #[serde(default)]
    pub saturday: f64,
    #[serde(default)]
    pub sunday: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractResponse {
    pub id: i64,
    pub user: i64,
    pub start: String,
    pub end: Option<String>,
    pub monday: f64,
    pub tuesday: f64,
    pub wednesday: f64,
    pub thursday: f64,
    pub friday: f64,
    pub saturday: f64,
    pub sunday: f64,
}

impl ContractResponse {
    #[must_use]
    pub fn from_contract(contract: &Contract) -> Self {
        Self {
            id: contract.id.unwrap_or_default(),
            user: contract.user_id,
            start: format_date(contract.start_date),
            end: contract.end_date.map(format_date),
            monday: contract.hours_monday,
            tuesday: contract.hours_tuesday,
            wednesday: contract.hours_wednesday,
            thursday: contract.hours_thursday,
            friday: contract.hours_friday,
            saturday: contract.hours_saturday,
            sunday: contract.hours_sunday,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaySaveRequest {
    pub day: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayDeleteRequest {
    pub day: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayResponse {
    pub day: String,
    pub name: String,
}

impl HolidayResponse {
    #[must_use]
    pub fn from_holiday(holiday: &Holiday) -> Self {
        Self {
            day: format_date(holiday.day),
            name: holiday.name.clone(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_factor() -> f64 {
    1.0
}

fn default_locale() -> String {
    String::from("en")
}
