// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{TicketSystemType, UserType};
use serde::{Deserialize, Serialize};
use time::{Date, Time, Weekday};

/// A customer that work can be booked against.
///
/// A customer is either global (visible to every team) or assigned to at
/// least one team. `id` is `None` until the row has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    /// Inactive customers are hidden from the tracking grid but keep their
    /// historical entries.
    pub active: bool,
    pub global: bool,
    /// Teams this customer is visible to. Ignored when `global` is set.
    pub team_ids: Vec<i64>,
}

/// A project belonging to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<i64>,
    pub customer_id: i64,
    pub name: String,
    pub active: bool,
    pub global: bool,
    /// JIRA project key prefix (e.g. `TT` for tickets `TT-123`).
    pub jira_id: Option<String>,
    /// External ticket system entries of this project can sync to.
    pub ticket_system_id: Option<i64>,
    /// Estimated total effort in minutes, used for the summary quota.
    pub estimation_minutes: Option<i64>,
}

/// A time-tracking user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    /// Short handle shown in reporting grids.
    pub abbr: String,
    pub user_type: UserType,
    pub locale: String,
    pub team_ids: Vec<i64>,
}

/// A team grouping users and scoping customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Option<i64>,
    pub name: String,
    pub lead_user_id: Option<i64>,
}

/// An activity classifying what kind of work an entry is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Option<i64>,
    pub name: String,
    /// Whether entries with this activity must reference a ticket.
    pub needs_ticket: bool,
    /// Booking factor applied when syncing worklogs (e.g. 2.0 for paired
    /// work).
    pub factor: f64,
}

/// A single time-tracking record.
///
/// The duration is always derived from `start` and `end`; the persisted
/// duration column is a denormalization for aggregation and is recomputed on
/// every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<i64>,
    pub day: Date,
    pub start: Time,
    pub end: Time,
    pub user_id: i64,
    pub customer_id: i64,
    pub project_id: i64,
    pub activity_id: i64,
    /// External ticket reference. Empty string and `"0"` mean "no ticket".
    pub ticket: String,
    pub description: String,
    /// Set once a worklog for this entry exists in the ticket system.
    pub synced_to_ticket_system: bool,
    /// Remote worklog id assigned by the ticket system, if synced.
    pub worklog_id: Option<i64>,
}

impl Entry {
    /// Returns the entry duration in minutes, derived from start and end.
    ///
    /// Callers must have validated the time range first; an inverted range
    /// yields a negative value here rather than a panic.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).whole_minutes()
    }

    /// Whether this entry carries a real ticket reference.
    ///
    /// The ExtJS frontend historically submitted `"0"` for "no ticket", so
    /// both the empty string and `"0"` count as absent.
    #[must_use]
    pub fn has_ticket(&self) -> bool {
        !self.ticket.is_empty() && self.ticket != "0"
    }
}

/// A work contract defining per-weekday target hours for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Option<i64>,
    pub user_id: i64,
    pub start_date: Date,
    /// Open-ended contracts have no end date.
    pub end_date: Option<Date>,
    pub hours_monday: f64,
    pub hours_tuesday: f64,
    pub hours_wednesday: f64,
    pub hours_thursday: f64,
    pub hours_friday: f64,
    pub hours_saturday: f64,
    pub hours_sunday: f64,
}

impl Contract {
    /// Returns the contracted hours for a given weekday.
    #[must_use]
    pub const fn hours_for(&self, weekday: Weekday) -> f64 {
        match weekday {
            Weekday::Monday => self.hours_monday,
            Weekday::Tuesday => self.hours_tuesday,
            Weekday::Wednesday => self.hours_wednesday,
            Weekday::Thursday => self.hours_thursday,
            Weekday::Friday => self.hours_friday,
            Weekday::Saturday => self.hours_saturday,
            Weekday::Sunday => self.hours_sunday,
        }
    }
}

/// An external ticket system (JIRA, OTRS or Freshdesk instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSystem {
    pub id: Option<i64>,
    pub name: String,
    pub system_type: TicketSystemType,
    /// Whether entry save/delete should book worklogs on this system.
    pub book_time: bool,
    /// Base URL of the system's API.
    pub url: String,
    pub login: String,
    pub password: String,
    /// Template for linking tickets in the frontend, `%s` is the ticket key.
    pub ticket_url: String,
}

/// A saved customer/project/activity template for bulk entry creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: Option<i64>,
    pub name: String,
    pub customer_id: i64,
    pub project_id: i64,
    pub activity_id: i64,
    pub description: String,
}

/// A public holiday. Holidays do not count as working days in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub day: Date,
    pub name: String,
}
