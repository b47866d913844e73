// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! OTRS generic-interface client.
//!
//! OTRS installations expose tickets through the generic ticket connector;
//! we only use it to check that a referenced ticket exists. OTRS has no
//! worklog concept, so time booking is not offered here.

use tracing::debug;

use crate::error::IntegrationError;

/// A client bound to one configured OTRS instance.
#[derive(Debug, Clone)]
pub struct OtrsClient {
    http: reqwest::Client,
    base_url: String,
    login: String,
    password: String,
}

impl OtrsClient {
    /// Creates a client for the given instance.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, login: &str, password: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            login: login.to_owned(),
            password: password.to_owned(),
        }
    }

    fn ticket_url(&self, ticket: &str) -> String {
        format!(
            "{}/nph-genericinterface.pl/Webservice/GenericTicketConnectorREST/Ticket/{ticket}",
            self.base_url
        )
    }

    /// Checks whether the referenced ticket exists.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unexpected status. A 404
    /// maps to `Ok(false)`.
    pub async fn ticket_exists(&self, ticket: &str) -> Result<bool, IntegrationError> {
        debug!("Looking up OTRS ticket {}", ticket);
        let response = self
            .http
            .get(self.ticket_url(ticket))
            .query(&[
                ("UserLogin", self.login.as_str()),
                ("Password", self.password.as_str()),
            ])
            .send()
            .await?;
        let status: u16 = response.status().as_u16();
        if response.status().is_success() {
            return Ok(true);
        }
        if status == 404 {
            return Ok(false);
        }
        Err(IntegrationError::UnexpectedStatus {
            operation: "ticket lookup",
            status,
            body: response.text().await.unwrap_or_default(),
        })
    }
}
