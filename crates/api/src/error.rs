// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use timetracker_domain::DomainError;
use timetracker_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract: the server maps each variant to exactly one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The requesting user could not be resolved.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A request field was missing or malformed.
    InvalidInput {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },
    /// A domain rule rejected the request (duplicate name, teamless
    /// customer, ticket required, ...).
    DomainRuleViolation {
        /// The rule that fired.
        rule: String,
        /// Human-readable description.
        message: String,
    },
    /// The addressed resource does not exist.
    ResourceNotFound {
        /// What was looked up.
        resource: String,
    },
    /// An unexpected persistence or internal failure.
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Rule '{rule}' violated: {message}")
            }
            Self::ResourceNotFound { resource } => {
                write!(f, "Not found: {resource}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain validation error into its API counterpart.
///
/// Time-range and name-format failures are input errors; the relational
/// rules (teamless customer, duplicate names, required tickets) are rule
/// violations.
#[must_use]
pub fn translate_domain_error(error: &DomainError) -> ApiError {
    match error {
        DomainError::InvalidName { entity, message } => ApiError::InvalidInput {
            field: format!("{entity}.name"),
            message: message.clone(),
        },
        DomainError::InvalidTimeRange { start, end } => ApiError::InvalidInput {
            field: String::from("start/end"),
            message: format!("end '{end}' must be after start '{start}'"),
        },
        DomainError::DuplicateName { entity, name } => ApiError::DomainRuleViolation {
            rule: String::from("unique-name"),
            message: format!("{entity} '{name}' already exists"),
        },
        DomainError::CustomerWithoutTeam { customer } => ApiError::DomainRuleViolation {
            rule: String::from("customer-team"),
            message: format!("customer '{customer}' must be global or assigned to a team"),
        },
        DomainError::TicketRequired { activity } => ApiError::DomainRuleViolation {
            rule: String::from("ticket-required"),
            message: format!("activity '{activity}' requires a ticket reference"),
        },
        DomainError::InvalidFactor { factor } => ApiError::InvalidInput {
            field: String::from("factor"),
            message: format!("the activity factor must be positive, got {factor}"),
        },
        DomainError::InvalidContractPeriod { start, end } => ApiError::InvalidInput {
            field: String::from("start/end"),
            message: format!("contract end {end} precedes start {start}"),
        },
        DomainError::InvalidWeekdayHours { weekday, hours } => ApiError::InvalidInput {
            field: String::from("hours"),
            message: format!("hours for {weekday} must lie within 0..=24, got {hours}"),
        },
        DomainError::InvalidUserType(value) => ApiError::InvalidInput {
            field: String::from("type"),
            message: format!("unknown user type '{value}'"),
        },
        DomainError::InvalidTicketSystemType(value) => ApiError::InvalidInput {
            field: String::from("type"),
            message: format!("unknown ticket system type '{value}'"),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::EntryNotFound(entry_id) => Self::ResourceNotFound {
                resource: format!("entry {entry_id}"),
            },
            PersistenceError::NotFound => Self::ResourceNotFound {
                resource: String::from("record"),
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
