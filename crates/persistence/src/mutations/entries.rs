// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entry writes: insert, update, delete and sync-state bookkeeping.
//!
//! `duration_minutes` is denormalized for aggregation speed; every insert and
//! update recomputes it from the start and end times so it can never drift
//! from the source columns.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timetracker_domain::Entry;

use crate::data_models::{format_day, format_time};
use crate::diesel_schema::entries;
use crate::error::PersistenceError;
use crate::sqlite::last_insert_rowid;

/// Inserts a new entry and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails, for example on a dangling foreign
/// key reference.
pub fn insert_entry(conn: &mut SqliteConnection, entry: &Entry) -> Result<i64, PersistenceError> {
    diesel::insert_into(entries::table)
        .values((
            entries::day.eq(format_day(entry.day)),
            entries::start_time.eq(format_time(entry.start)),
            entries::end_time.eq(format_time(entry.end)),
            entries::duration_minutes.eq(entry.duration_minutes()),
            entries::user_id.eq(entry.user_id),
            entries::customer_id.eq(entry.customer_id),
            entries::project_id.eq(entry.project_id),
            entries::activity_id.eq(entry.activity_id),
            entries::ticket.eq(entry.ticket.clone()),
            entries::description.eq(entry.description.clone()),
            entries::synced_to_ticket_system.eq(i32::from(entry.synced_to_ticket_system)),
            entries::worklog_id.eq(entry.worklog_id),
        ))
        .execute(conn)?;
    last_insert_rowid(conn)
}

/// Updates an existing entry in place.
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if no row with the given id
/// exists.
pub fn update_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &Entry,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(entries::table.find(entry_id))
        .set((
            entries::day.eq(format_day(entry.day)),
            entries::start_time.eq(format_time(entry.start)),
            entries::end_time.eq(format_time(entry.end)),
            entries::duration_minutes.eq(entry.duration_minutes()),
            entries::user_id.eq(entry.user_id),
            entries::customer_id.eq(entry.customer_id),
            entries::project_id.eq(entry.project_id),
            entries::activity_id.eq(entry.activity_id),
            entries::ticket.eq(entry.ticket.clone()),
            entries::description.eq(entry.description.clone()),
            entries::synced_to_ticket_system.eq(i32::from(entry.synced_to_ticket_system)),
            entries::worklog_id.eq(entry.worklog_id),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::EntryNotFound(entry_id));
    }
    Ok(())
}

/// Deletes an entry by id.
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if no row with the given id
/// exists.
pub fn delete_entry(conn: &mut SqliteConnection, entry_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(entries::table.find(entry_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::EntryNotFound(entry_id));
    }
    Ok(())
}

/// Records the outcome of a worklog push for an entry.
///
/// Called after the ticket system round trip, outside the request
/// transaction; a vanished entry is not an error here.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_synced(
    conn: &mut SqliteConnection,
    entry_id: i64,
    worklog_id: Option<i64>,
    synced: bool,
) -> Result<(), PersistenceError> {
    diesel::update(entries::table.find(entry_id))
        .set((
            entries::synced_to_ticket_system.eq(i32::from(synced)),
            entries::worklog_id.eq(worklog_id),
        ))
        .execute(conn)?;
    Ok(())
}
