// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod calendar;
mod entities;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{calendar_days_back, is_work_day};
pub use entities::{
    Activity, Contract, Customer, Entry, Holiday, Preset, Project, Team, TicketSystem, User,
};
pub use error::DomainError;
pub use types::{TicketSystemType, UserType};
pub use validation::{
    validate_activity, validate_contract, validate_customer, validate_entry_times,
    validate_name_unique, validate_project,
};
