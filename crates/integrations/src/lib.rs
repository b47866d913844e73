// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound ticket system clients.
//!
//! Each configured ticket system row maps to one concrete client. The
//! [`TicketClient`] enum dispatches over the supported system types so
//! callers hold a single value regardless of which vendor backs a project.
//! Only JIRA supports the full worklog lifecycle; the other clients cover
//! what their APIs offer.

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
#![allow(clippy::multiple_crate_versions)]

use time::{Date, Time};
use timetracker_domain::{TicketSystem, TicketSystemType};

pub mod error;
pub mod freshdesk;
pub mod jira;
pub mod otrs;

pub use error::IntegrationError;
pub use freshdesk::FreshdeskClient;
pub use jira::JiraClient;
pub use otrs::OtrsClient;

/// The time booked against a ticket, ready for an outbound push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorklogEntry {
    pub day: Date,
    pub start: Time,
    pub minutes: i64,
    pub comment: String,
}

/// A client for one configured ticket system, dispatching by system type.
#[derive(Debug, Clone)]
pub enum TicketClient {
    Jira(JiraClient),
    Otrs(OtrsClient),
    Freshdesk(FreshdeskClient),
}

impl TicketClient {
    /// Builds the matching client for a ticket system configuration.
    #[must_use]
    pub fn for_system(http: reqwest::Client, system: &TicketSystem) -> Self {
        match system.system_type {
            TicketSystemType::Jira => Self::Jira(JiraClient::new(
                http,
                &system.url,
                &system.login,
                &system.password,
            )),
            TicketSystemType::Otrs => Self::Otrs(OtrsClient::new(
                http,
                &system.url,
                &system.login,
                &system.password,
            )),
            TicketSystemType::Freshdesk => Self::Freshdesk(FreshdeskClient::new(
                http,
                &system.url,
                &system.login,
                &system.password,
            )),
        }
    }

    /// Pushes a worklog for the ticket, returning the remote worklog id when
    /// the system issues one.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::Unsupported` for systems without time
    /// booking, or the client's transport/status error.
    pub async fn create_worklog(
        &self,
        ticket: &str,
        worklog: &WorklogEntry,
    ) -> Result<Option<i64>, IntegrationError> {
        match self {
            Self::Jira(client) => Ok(Some(client.create_worklog(ticket, worklog).await?)),
            Self::Freshdesk(client) => Ok(Some(client.create_time_entry(ticket, worklog).await?)),
            Self::Otrs(_) => Err(IntegrationError::Unsupported("create worklog")),
        }
    }

    /// Replaces a previously pushed worklog.
    ///
    /// JIRA updates in place; Freshdesk has no worklog update, so the old
    /// time entry is deleted and a fresh one booked.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::Unsupported` for systems without time
    /// booking, or the client's transport/status error.
    pub async fn update_worklog(
        &self,
        ticket: &str,
        worklog_id: i64,
        worklog: &WorklogEntry,
    ) -> Result<Option<i64>, IntegrationError> {
        match self {
            Self::Jira(client) => Ok(Some(
                client.update_worklog(ticket, worklog_id, worklog).await?,
            )),
            Self::Freshdesk(client) => {
                client.delete_time_entry(worklog_id).await?;
                Ok(Some(client.create_time_entry(ticket, worklog).await?))
            }
            Self::Otrs(_) => Err(IntegrationError::Unsupported("update worklog")),
        }
    }

    /// Removes a previously pushed worklog.
    ///
    /// # Errors
    ///
    /// Returns `IntegrationError::Unsupported` for systems without time
    /// booking, or the client's transport/status error.
    pub async fn delete_worklog(
        &self,
        ticket: &str,
        worklog_id: i64,
    ) -> Result<(), IntegrationError> {
        match self {
            Self::Jira(client) => client.delete_worklog(ticket, worklog_id).await,
            Self::Freshdesk(client) => client.delete_time_entry(worklog_id).await,
            Self::Otrs(_) => Err(IntegrationError::Unsupported("delete worklog")),
        }
    }
}
