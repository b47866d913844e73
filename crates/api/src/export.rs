// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of a user's tracking entries.

use std::collections::HashMap;

use time::Date;
use timetracker_domain::{Entry, User};
use timetracker_persistence::Persistence;

use crate::error::ApiError;
use crate::tracking::entries_for_days;

/// Renders the user's entries of the last `working_days` working days as
/// CSV, newest first, with entity names resolved.
///
/// # Errors
///
/// Returns an internal error on persistence failure or if CSV serialization
/// fails.
pub fn export_entries_csv(
    persistence: &mut Persistence,
    user: &User,
    working_days: i32,
    today: Date,
) -> Result<String, ApiError> {
    let entries: Vec<Entry> = entries_for_days(persistence, user, working_days, today)?;

    let customer_names: HashMap<i64, String> = persistence
        .list_customers()?
        .into_iter()
        .filter_map(|c| c.id.map(|id| (id, c.name)))
        .collect();
    let project_names: HashMap<i64, String> = persistence
        .list_projects(None)?
        .into_iter()
        .filter_map(|p| p.id.map(|id| (id, p.name)))
        .collect();
    let activity_names: HashMap<i64, String> = persistence
        .list_activities()?
        .into_iter()
        .filter_map(|a| a.id.map(|id| (id, a.name)))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "date",
            "start",
            "end",
            "user",
            "customer",
            "project",
            "activity",
            "description",
            "ticket",
            "duration",
        ])
        .map_err(|e| ApiError::Internal {
            message: format!("csv write failed: {e}"),
        })?;

    for entry in &entries {
        let response = crate::request_response::EntryResponse::from_entry(entry);
        writer
            .write_record([
                response.date.as_str(),
                response.start.as_str(),
                response.end.as_str(),
                user.username.as_str(),
                customer_names
                    .get(&entry.customer_id)
                    .map_or("", String::as_str),
                project_names
                    .get(&entry.project_id)
                    .map_or("", String::as_str),
                activity_names
                    .get(&entry.activity_id)
                    .map_or("", String::as_str),
                entry.description.as_str(),
                entry.ticket.as_str(),
                &entry.duration_minutes().to_string(),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("csv write failed: {e}"),
            })?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("csv flush failed: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("csv output was not UTF-8: {e}"),
    })
}
