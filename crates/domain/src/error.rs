// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Time};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A required name field is empty or invalid.
    InvalidName {
        /// The entity kind the name belongs to.
        entity: &'static str,
        /// A human-readable description of the problem.
        message: String,
    },
    /// A name collides with an existing row of the same kind.
    DuplicateName {
        /// The entity kind the name belongs to.
        entity: &'static str,
        /// The duplicated name.
        name: String,
    },
    /// A non-global customer has no team assignment.
    CustomerWithoutTeam {
        /// The customer name.
        customer: String,
    },
    /// An entry's end time is not after its start time.
    InvalidTimeRange {
        /// The start time.
        start: Time,
        /// The end time.
        end: Time,
    },
    /// An activity factor is zero or negative.
    InvalidFactor {
        /// The rejected factor.
        factor: f64,
    },
    /// A contract's end date precedes its start date.
    InvalidContractPeriod {
        /// The contract start date.
        start: Date,
        /// The contract end date.
        end: Date,
    },
    /// A contract's weekday hours are outside 0..=24.
    InvalidWeekdayHours {
        /// The weekday name.
        weekday: &'static str,
        /// The rejected hours value.
        hours: f64,
    },
    /// A user type string could not be parsed.
    InvalidUserType(String),
    /// A ticket system type string could not be parsed.
    InvalidTicketSystemType(String),
    /// An activity requires a ticket but the entry has none.
    TicketRequired {
        /// The activity name.
        activity: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { entity, message } => {
                write!(f, "Invalid {entity} name: {message}")
            }
            Self::DuplicateName { entity, name } => {
                write!(f, "A {entity} named '{name}' already exists")
            }
            Self::CustomerWithoutTeam { customer } => {
                write!(f, "Customer '{customer}' must be global or have a team")
            }
            Self::InvalidTimeRange { start, end } => {
                write!(f, "End time {end} must be after start time {start}")
            }
            Self::InvalidFactor { factor } => {
                write!(f, "Activity factor must be positive, got {factor}")
            }
            Self::InvalidContractPeriod { start, end } => {
                write!(f, "Contract end {end} precedes start {start}")
            }
            Self::InvalidWeekdayHours { weekday, hours } => {
                write!(f, "Hours for {weekday} must be within 0..=24, got {hours}")
            }
            Self::InvalidUserType(s) => write!(f, "Invalid user type: '{s}'"),
            Self::InvalidTicketSystemType(s) => {
                write!(f, "Invalid ticket system type: '{s}'")
            }
            Self::TicketRequired { activity } => {
                write!(f, "Activity '{activity}' requires a ticket reference")
            }
        }
    }
}

impl std::error::Error for DomainError {}
