// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application services for the time tracker.
//!
//! This crate sits between the HTTP layer and persistence: it owns the wire
//! DTOs, the API error taxonomy, requesting-user resolution, the tracking
//! services with their worklog sync decision, summary/interpretation
//! services, admin CRUD and CSV export. It performs no I/O beyond the
//! persistence handle it is given; outbound ticket system calls are decided
//! here but executed by the server.

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

pub mod admin;
pub mod auth;
pub mod error;
pub mod export;
pub mod reporting;
pub mod request_response;
pub mod tracking;

#[cfg(test)]
mod tests;

pub use error::{translate_domain_error, ApiError};
pub use tracking::{should_sync, SummaryCache, SyncOperation, SyncTask, TicketLookup};
