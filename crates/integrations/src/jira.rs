// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JIRA REST API v2 worklog client.
//!
//! Worklogs live under `/rest/api/2/issue/{ticket}/worklog`; JIRA returns
//! their ids as strings, which we parse into the numeric ids the entry table
//! stores.

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::debug;

use crate::error::IntegrationError;
use crate::WorklogEntry;

/// JIRA's worklog `started` timestamp format. The zone offset is fixed to
/// UTC; JIRA normalizes it server-side anyway.
const STARTED_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].000+0000");

#[derive(Debug, Serialize)]
struct WorklogRequest {
    comment: String,
    started: String,
    #[serde(rename = "timeSpentSeconds")]
    time_spent_seconds: i64,
}

#[derive(Debug, Deserialize)]
struct WorklogResponse {
    id: String,
}

/// A client bound to one configured JIRA instance.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    login: String,
    password: String,
}

impl JiraClient {
    /// Creates a client for the given instance. Trailing slashes on the base
    /// URL are tolerated.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, login: &str, password: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            login: login.to_owned(),
            password: password.to_owned(),
        }
    }

    fn worklog_url(&self, ticket: &str) -> String {
        format!("{}/rest/api/2/issue/{ticket}/worklog", self.base_url)
    }

    fn request_body(worklog: &WorklogEntry) -> WorklogRequest {
        let started: String = worklog
            .day
            .with_time(worklog.start)
            .format(STARTED_FORMAT)
            .unwrap_or_default();
        WorklogRequest {
            comment: worklog.comment.clone(),
            started,
            time_spent_seconds: worklog.minutes * 60,
        }
    }

    fn parse_worklog_id(response: &WorklogResponse) -> Result<i64, IntegrationError> {
        response
            .id
            .parse::<i64>()
            .map_err(|_| IntegrationError::InvalidWorklogId(response.id.clone()))
    }

    /// Creates a worklog on the ticket and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn create_worklog(
        &self,
        ticket: &str,
        worklog: &WorklogEntry,
    ) -> Result<i64, IntegrationError> {
        debug!("Creating JIRA worklog on {}", ticket);
        let response = self
            .http
            .post(self.worklog_url(ticket))
            .basic_auth(&self.login, Some(&self.password))
            .json(&Self::request_body(worklog))
            .send()
            .await?;
        let status: u16 = response.status().as_u16();
        if !response.status().is_success() {
            return Err(IntegrationError::UnexpectedStatus {
                operation: "create worklog",
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        let parsed: WorklogResponse = response.json::<WorklogResponse>().await?;
        Self::parse_worklog_id(&parsed)
    }

    /// Updates an existing worklog in place and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn update_worklog(
        &self,
        ticket: &str,
        worklog_id: i64,
        worklog: &WorklogEntry,
    ) -> Result<i64, IntegrationError> {
        debug!("Updating JIRA worklog {} on {}", worklog_id, ticket);
        let url: String = format!("{}/{worklog_id}", self.worklog_url(ticket));
        let response = self
            .http
            .put(url)
            .basic_auth(&self.login, Some(&self.password))
            .json(&Self::request_body(worklog))
            .send()
            .await?;
        let status: u16 = response.status().as_u16();
        if !response.status().is_success() {
            return Err(IntegrationError::UnexpectedStatus {
                operation: "update worklog",
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        let parsed: WorklogResponse = response.json::<WorklogResponse>().await?;
        Self::parse_worklog_id(&parsed)
    }

    /// Deletes a worklog. A missing worklog (404) is treated as success,
    /// since the goal state (no worklog) already holds.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any other non-success
    /// status.
    pub async fn delete_worklog(
        &self,
        ticket: &str,
        worklog_id: i64,
    ) -> Result<(), IntegrationError> {
        debug!("Deleting JIRA worklog {} on {}", worklog_id, ticket);
        let url: String = format!("{}/{worklog_id}", self.worklog_url(ticket));
        let response = self
            .http
            .delete(url)
            .basic_auth(&self.login, Some(&self.password))
            .send()
            .await?;
        let status: u16 = response.status().as_u16();
        if !response.status().is_success() && status != 404 {
            return Err(IntegrationError::UnexpectedStatus {
                operation: "delete worklog",
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};

    use super::{JiraClient, WorklogRequest};
    use crate::WorklogEntry;

    #[test]
    fn test_worklog_url_tolerates_trailing_slash() {
        let client: JiraClient = JiraClient::new(
            reqwest::Client::new(),
            "https://jira.example.com/",
            "bot",
            "secret",
        );
        assert_eq!(
            client.worklog_url("ABC-1"),
            "https://jira.example.com/rest/api/2/issue/ABC-1/worklog"
        );
    }

    #[test]
    fn test_request_body_converts_minutes_and_timestamp() {
        let worklog = WorklogEntry {
            day: date!(2026 - 01 - 05),
            start: time!(09:30),
            minutes: 90,
            comment: String::from("pairing"),
        };
        let body: WorklogRequest = JiraClient::request_body(&worklog);
        assert_eq!(body.time_spent_seconds, 5400);
        assert_eq!(body.started, "2026-01-05T09:30:00.000+0000");
        assert_eq!(body.comment, "pairing");
    }
}
