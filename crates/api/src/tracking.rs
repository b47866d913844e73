// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entry tracking: save, delete, and the worklog sync decision.
//!
//! Saving derives the duration, enforces the activity's ticket requirement,
//! invalidates the summary cache and hands back a [`SyncTask`] when the
//! entry must be pushed to a ticket system. The push itself happens in the
//! server after the database lock is released; this module only decides.
//! The same split applies to the pre-save [`TicketLookup`] against
//! lookup-only systems.

use time::{Date, Duration, Time};
use timetracker_domain::{
    calendar_days_back, validate_entry_times, Activity, Entry, Project, TicketSystem,
    TicketSystemType, User,
};
use timetracker_persistence::{EntryFilter, EntrySummary, Persistence, TtlCache};
use tracing::info;

use crate::error::{translate_domain_error, ApiError};
use crate::request_response::{parse_request_date, parse_request_time, EntrySaveRequest};

/// Cache of summary results keyed by `(entry_id, user_id)`.
pub type SummaryCache = TtlCache<(i64, i64), EntrySummary>;

/// What the server must do against the ticket system after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOperation {
    /// Push a fresh worklog.
    Create,
    /// Replace the previously pushed worklog.
    Update {
        worklog_id: i64,
    },
    /// Remove the previously pushed worklog.
    Delete {
        worklog_id: i64,
    },
}

/// An outbound worklog push, decided during a tracking mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncTask {
    pub entry_id: i64,
    pub ticket: String,
    pub system: TicketSystem,
    pub operation: SyncOperation,
    pub day: Date,
    pub start: Time,
    pub minutes: i64,
    pub comment: String,
}

/// Decides whether a mutation must be pushed to a ticket system.
///
/// All four conditions must hold: the project has a ticket system, its type
/// is JIRA, time booking is enabled on it, and the entry carries a real
/// ticket reference (`""` and `"0"` do not count).
#[must_use]
pub fn should_sync(system: Option<&TicketSystem>, ticket: &str) -> bool {
    let Some(system) = system else {
        return false;
    };
    system.system_type == TicketSystemType::Jira
        && system.book_time
        && !ticket.is_empty()
        && ticket != "0"
}

/// A pre-save existence check against a lookup-only ticket system.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketLookup {
    pub ticket: String,
    pub system: TicketSystem,
}

/// Decides whether the entry's ticket must be looked up before saving.
///
/// OTRS has no worklog API, so its wiring is lookup-only: when the project's
/// ticket system is OTRS and the request carries a real ticket reference,
/// the server verifies that the ticket exists before the entry is persisted.
///
/// # Errors
///
/// Returns an error when the referenced project or its ticket system cannot
/// be loaded.
pub fn ticket_lookup(
    persistence: &mut Persistence,
    request: &EntrySaveRequest,
) -> Result<Option<TicketLookup>, ApiError> {
    let ticket: &str = request.ticket.trim();
    if ticket.is_empty() || ticket == "0" {
        return Ok(None);
    }
    let project: Project = persistence.get_project(request.project)?;
    let system: Option<TicketSystem> = project_ticket_system(persistence, &project)?;
    Ok(system
        .filter(|system| system.system_type == TicketSystemType::Otrs)
        .map(|system| TicketLookup {
            ticket: ticket.to_owned(),
            system,
        }))
}

/// Loads the ticket system wired to a project, if any.
fn project_ticket_system(
    persistence: &mut Persistence,
    project: &Project,
) -> Result<Option<TicketSystem>, ApiError> {
    match project.ticket_system_id {
        Some(ticket_system_id) => Ok(Some(persistence.get_ticket_system(ticket_system_id)?)),
        None => Ok(None),
    }
}

fn worklog_comment(activity: &Activity, description: &str) -> String {
    if description.is_empty() {
        activity.name.clone()
    } else {
        format!("{}: {}", activity.name, description)
    }
}

/// Creates or updates a tracking entry.
///
/// Returns the persisted entry and, when the sync conditions hold, the
/// worklog push the server must perform.
///
/// # Errors
///
/// Returns an error on malformed dates or times, a violated ticket
/// requirement, or a persistence failure.
pub fn save_entry(
    persistence: &mut Persistence,
    cache: &mut SummaryCache,
    user: &User,
    request: &EntrySaveRequest,
) -> Result<(Entry, Option<SyncTask>), ApiError> {
    let day: Date = parse_request_date("date", &request.date)?;
    let start: Time = parse_request_time("start", &request.start)?;
    let end: Time = parse_request_time("end", &request.end)?;
    validate_entry_times(start, end).map_err(|e| translate_domain_error(&e))?;

    let activity: Activity = persistence.get_activity(request.activity)?;

    let mut entry = Entry {
        id: request.id,
        day,
        start,
        end,
        user_id: user.id.unwrap_or_default(),
        customer_id: request.customer,
        project_id: request.project,
        activity_id: request.activity,
        ticket: request.ticket.trim().to_owned(),
        description: request.description.clone(),
        synced_to_ticket_system: false,
        worklog_id: None,
    };

    if activity.needs_ticket && !entry.has_ticket() {
        return Err(translate_domain_error(
            &timetracker_domain::DomainError::TicketRequired {
                activity: activity.name.clone(),
            },
        ));
    }

    let entry_id: i64 = match request.id {
        None => persistence.insert_entry(&entry)?,
        Some(id) => {
            // Keep the sync bookkeeping of the stored row; the push below
            // replaces the worklog rather than duplicating it.
            let existing: Entry = persistence.get_entry(id)?;
            entry.synced_to_ticket_system = existing.synced_to_ticket_system;
            entry.worklog_id = existing.worklog_id;
            persistence.update_entry(id, &entry)?;
            id
        }
    };
    entry.id = Some(entry_id);

    // Aggregates are stale the moment a mutation lands.
    cache.clear();

    let project: Project = persistence.get_project(request.project)?;
    let system: Option<TicketSystem> = project_ticket_system(persistence, &project)?;
    let task: Option<SyncTask> = match system {
        Some(system) if should_sync(Some(&system), &entry.ticket) => {
            let operation: SyncOperation = match entry.worklog_id {
                Some(worklog_id) => SyncOperation::Update { worklog_id },
                None => SyncOperation::Create,
            };
            info!(
                entry_id,
                ticket = %entry.ticket,
                "Entry saved, worklog push pending"
            );
            Some(SyncTask {
                entry_id,
                ticket: entry.ticket.clone(),
                system,
                operation,
                day,
                start,
                minutes: entry.duration_minutes(),
                comment: worklog_comment(&activity, &entry.description),
            })
        }
        _ => {
            info!(entry_id, "Entry saved");
            None
        }
    };

    Ok((entry, task))
}

/// Deletes a tracking entry.
///
/// Returns the worklog removal the server must perform when the entry had
/// been pushed to a ticket system.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for a missing entry or an internal
/// error on persistence failure.
pub fn delete_entry(
    persistence: &mut Persistence,
    cache: &mut SummaryCache,
    entry_id: i64,
) -> Result<Option<SyncTask>, ApiError> {
    let entry: Entry = persistence.get_entry(entry_id)?;
    let activity: Activity = persistence.get_activity(entry.activity_id)?;
    let project: Project = persistence.get_project(entry.project_id)?;
    let system: Option<TicketSystem> = project_ticket_system(persistence, &project)?;

    persistence.delete_entry(entry_id)?;
    cache.clear();
    info!(entry_id, "Entry deleted");

    if let (Some(worklog_id), Some(system)) = (entry.worklog_id, system) {
        if entry.synced_to_ticket_system && should_sync(Some(&system), &entry.ticket) {
            return Ok(Some(SyncTask {
                entry_id,
                ticket: entry.ticket.clone(),
                system,
                operation: SyncOperation::Delete { worklog_id },
                day: entry.day,
                start: entry.start,
                minutes: entry.duration_minutes(),
                comment: worklog_comment(&activity, &entry.description),
            }));
        }
    }
    Ok(None)
}

/// Lists the user's entries covering the last `working_days` working days.
///
/// The working-day span is converted into calendar days by walking the
/// calendar backward from today; weekends extend the window so a request
/// for five working days on a Monday reaches back across the full week.
/// The window is closed at `today`, so pre-booked future entries stay out.
///
/// # Errors
///
/// Returns an internal error on persistence failure.
pub fn entries_for_days(
    persistence: &mut Persistence,
    user: &User,
    working_days: i32,
    today: Date,
) -> Result<Vec<Entry>, ApiError> {
    let span: u32 = calendar_days_back(working_days, today);
    let date_from: Date = today
        .checked_sub(Duration::days(i64::from(span)))
        .unwrap_or(today);
    let filter = EntryFilter {
        user_id: user.id,
        date_from: Some(date_from),
        date_to: Some(today),
        ..EntryFilter::default()
    };
    Ok(persistence.find_entries(&filter)?)
}
