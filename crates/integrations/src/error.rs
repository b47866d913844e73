// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Errors raised by the outbound ticket system clients.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    /// Transport-level failure: DNS, TLS, connect or read errors.
    #[error("ticket system request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The ticket system answered with a non-success status.
    #[error("ticket system returned {status} for {operation}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The response was syntactically valid but lacked an expected field.
    #[error("ticket system response missing field '{0}'")]
    MissingField(&'static str),

    /// The worklog id returned by the ticket system was not numeric.
    #[error("ticket system returned non-numeric worklog id '{0}'")]
    InvalidWorklogId(String),

    /// The configured system type does not support this operation.
    #[error("operation '{0}' not supported by this ticket system")]
    Unsupported(&'static str),
}
