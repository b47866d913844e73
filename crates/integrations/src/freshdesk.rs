// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Freshdesk time-entry client.
//!
//! Freshdesk books time through `POST /api/v2/tickets/{id}/time_entries`
//! with an `HH:MM` duration and API-key basic auth (the key is the login,
//! the password is ignored by Freshdesk but sent as configured).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IntegrationError;
use crate::WorklogEntry;

#[derive(Debug, Serialize)]
struct TimeEntryRequest {
    time_spent: String,
    note: String,
}

#[derive(Debug, Deserialize)]
struct TimeEntryResponse {
    id: i64,
}

/// A client bound to one configured Freshdesk instance.
#[derive(Debug, Clone)]
pub struct FreshdeskClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    password: String,
}

impl FreshdeskClient {
    /// Creates a client for the given instance.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str, password: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            password: password.to_owned(),
        }
    }

    fn time_entries_url(&self, ticket: &str) -> String {
        format!("{}/api/v2/tickets/{ticket}/time_entries", self.base_url)
    }

    /// Formats minutes as the `HH:MM` duration Freshdesk expects.
    fn format_time_spent(minutes: i64) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    /// Books a time entry on the ticket and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn create_time_entry(
        &self,
        ticket: &str,
        worklog: &WorklogEntry,
    ) -> Result<i64, IntegrationError> {
        debug!("Creating Freshdesk time entry on {}", ticket);
        let body = TimeEntryRequest {
            time_spent: Self::format_time_spent(worklog.minutes),
            note: worklog.comment.clone(),
        };
        let response = self
            .http
            .post(self.time_entries_url(ticket))
            .basic_auth(&self.api_key, Some(&self.password))
            .json(&body)
            .send()
            .await?;
        let status: u16 = response.status().as_u16();
        if !response.status().is_success() {
            return Err(IntegrationError::UnexpectedStatus {
                operation: "create time entry",
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        let parsed: TimeEntryResponse = response.json::<TimeEntryResponse>().await?;
        Ok(parsed.id)
    }

    /// Deletes a time entry. As with JIRA worklogs, a 404 counts as success.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any other non-success
    /// status.
    pub async fn delete_time_entry(&self, time_entry_id: i64) -> Result<(), IntegrationError> {
        debug!("Deleting Freshdesk time entry {}", time_entry_id);
        let url: String = format!("{}/api/v2/time_entries/{time_entry_id}", self.base_url);
        let response = self
            .http
            .delete(url)
            .basic_auth(&self.api_key, Some(&self.password))
            .send()
            .await?;
        let status: u16 = response.status().as_u16();
        if !response.status().is_success() && status != 404 {
            return Err(IntegrationError::UnexpectedStatus {
                operation: "delete time entry",
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}
