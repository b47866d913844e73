// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entities::{Activity, Contract, Customer, Project};
use crate::error::DomainError;
use time::Time;

/// Validates an entry's time range.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeRange` if `end` is not strictly after
/// `start`.
pub fn validate_entry_times(start: Time, end: Time) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::InvalidTimeRange { start, end });
    }
    Ok(())
}

/// Validates a customer's fields.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The customer is neither global nor assigned to any team
pub fn validate_customer(customer: &Customer) -> Result<(), DomainError> {
    if customer.name.trim().is_empty() {
        return Err(DomainError::InvalidName {
            entity: "customer",
            message: String::from("Name cannot be empty"),
        });
    }

    // Rule: a customer must be global or have a team
    if !customer.global && customer.team_ids.is_empty() {
        return Err(DomainError::CustomerWithoutTeam {
            customer: customer.name.clone(),
        });
    }

    Ok(())
}

/// Validates a project's fields.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty.
pub fn validate_project(project: &Project) -> Result<(), DomainError> {
    if project.name.trim().is_empty() {
        return Err(DomainError::InvalidName {
            entity: "project",
            message: String::from("Name cannot be empty"),
        });
    }
    Ok(())
}

/// Validates an activity's fields.
///
/// # Errors
///
/// Returns an error if the name is empty or the booking factor is not
/// positive.
pub fn validate_activity(activity: &Activity) -> Result<(), DomainError> {
    if activity.name.trim().is_empty() {
        return Err(DomainError::InvalidName {
            entity: "activity",
            message: String::from("Name cannot be empty"),
        });
    }

    if activity.factor <= 0.0 {
        return Err(DomainError::InvalidFactor {
            factor: activity.factor,
        });
    }

    Ok(())
}

/// Validates a contract's period and per-weekday hours.
///
/// # Errors
///
/// Returns an error if the end date precedes the start date or any weekday's
/// hours fall outside 0..=24.
pub fn validate_contract(contract: &Contract) -> Result<(), DomainError> {
    if let Some(end) = contract.end_date
        && end < contract.start_date
    {
        return Err(DomainError::InvalidContractPeriod {
            start: contract.start_date,
            end,
        });
    }

    let weekday_hours: [(&'static str, f64); 7] = [
        ("monday", contract.hours_monday),
        ("tuesday", contract.hours_tuesday),
        ("wednesday", contract.hours_wednesday),
        ("thursday", contract.hours_thursday),
        ("friday", contract.hours_friday),
        ("saturday", contract.hours_saturday),
        ("sunday", contract.hours_sunday),
    ];
    for (weekday, hours) in weekday_hours {
        if !(0.0..=24.0).contains(&hours) {
            return Err(DomainError::InvalidWeekdayHours { weekday, hours });
        }
    }

    Ok(())
}

/// Validates that a name is unique among existing names of the same entity
/// kind.
///
/// Comparison is case-insensitive; admin panels treat `ACME` and `acme` as
/// the same customer.
///
/// # Errors
///
/// Returns `DomainError::DuplicateName` on collision.
pub fn validate_name_unique(
    entity: &'static str,
    name: &str,
    existing: &[String],
) -> Result<(), DomainError> {
    let lowered: String = name.to_lowercase();
    if existing.iter().any(|n| n.to_lowercase() == lowered) {
        return Err(DomainError::DuplicateName {
            entity,
            name: name.to_string(),
        });
    }
    Ok(())
}
