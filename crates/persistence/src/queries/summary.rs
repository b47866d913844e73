// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Summary aggregation for a single entry's scopes.
//!
//! Given an anchor entry, the summary reports total and per-user ("own")
//! durations for each of the four scopes the entry touches: its customer,
//! project, activity and ticket. Two implementations exist with identical
//! semantics:
//!
//! - [`get_summary_legacy`] issues four independent aggregate queries, one
//!   per scope (the shape of the original UNION approach).
//! - [`get_summary`] issues one single-pass conditional-aggregation
//!   statement and is the variant the API layer uses.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel::SqliteConnection;
use serde::Serialize;
use timetracker_domain::Entry;

use crate::data_models::EntryRow;
use crate::diesel_schema::{activities, customers, entries, projects};
use crate::error::PersistenceError;

/// Aggregated durations for one scope of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ScopeSummary {
    /// Display name of the scope (customer/project/activity name or the
    /// ticket reference).
    pub name: String,
    /// Number of entries in this scope.
    pub entries: i64,
    /// Sum of all durations in this scope, in minutes.
    pub total: i64,
    /// Sum of the requesting user's durations in this scope, in minutes.
    pub own: i64,
    /// Estimated effort in minutes (projects only, 0 elsewhere).
    pub estimation: i64,
    /// Share of the estimation already booked, as a percentage rounded to
    /// two decimals (projects with an estimation only, 0 elsewhere).
    pub quota: f64,
}

/// The per-scope summary for an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct EntrySummary {
    pub customer: ScopeSummary,
    pub project: ScopeSummary,
    pub activity: ScopeSummary,
    pub ticket: ScopeSummary,
}

/// Row struct for the single-pass conditional aggregation.
#[derive(QueryableByName)]
struct ConditionalSumRow {
    #[diesel(sql_type = BigInt)]
    customer_entries: i64,
    #[diesel(sql_type = BigInt)]
    customer_total: i64,
    #[diesel(sql_type = BigInt)]
    customer_own: i64,
    #[diesel(sql_type = BigInt)]
    project_entries: i64,
    #[diesel(sql_type = BigInt)]
    project_total: i64,
    #[diesel(sql_type = BigInt)]
    project_own: i64,
    #[diesel(sql_type = BigInt)]
    activity_entries: i64,
    #[diesel(sql_type = BigInt)]
    activity_total: i64,
    #[diesel(sql_type = BigInt)]
    activity_own: i64,
    #[diesel(sql_type = BigInt)]
    ticket_entries: i64,
    #[diesel(sql_type = BigInt)]
    ticket_total: i64,
    #[diesel(sql_type = BigInt)]
    ticket_own: i64,
}

/// Share of the estimation already booked, as a percentage with two
/// decimals.
fn estimation_quota(total: i64, estimation: i64) -> f64 {
    if estimation <= 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw: f64 = total as f64 * 100.0 / estimation as f64;
    (raw * 100.0).round() / 100.0
}

/// Loads the anchor entry for a summary.
fn load_anchor(conn: &mut SqliteConnection, entry_id: i64) -> Result<Entry, PersistenceError> {
    let row: EntryRow = entries::table
        .find(entry_id)
        .select(EntryRow::as_select())
        .first::<EntryRow>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => PersistenceError::EntryNotFound(entry_id),
            other => PersistenceError::from(other),
        })?;
    row.into_domain()
}

/// Loads display names and project estimation for the anchor's scopes.
fn load_scope_names(
    conn: &mut SqliteConnection,
    anchor: &Entry,
) -> Result<(String, String, i64, String), PersistenceError> {
    let customer_name: String = customers::table
        .find(anchor.customer_id)
        .select(customers::name)
        .first::<String>(conn)?;
    let (project_name, estimation): (String, Option<i64>) = projects::table
        .find(anchor.project_id)
        .select((projects::name, projects::estimation_minutes))
        .first::<(String, Option<i64>)>(conn)?;
    let activity_name: String = activities::table
        .find(anchor.activity_id)
        .select(activities::name)
        .first::<String>(conn)?;
    Ok((
        customer_name,
        project_name,
        estimation.unwrap_or(0),
        activity_name,
    ))
}

/// Computes the summary with one single-pass conditional-aggregation query.
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if the anchor entry does not
/// exist, or a database error.
pub fn get_summary(
    conn: &mut SqliteConnection,
    entry_id: i64,
    requesting_user_id: i64,
) -> Result<EntrySummary, PersistenceError> {
    let anchor: Entry = load_anchor(conn, entry_id)?;
    let (customer_name, project_name, estimation, activity_name) =
        load_scope_names(conn, &anchor)?;

    // An absent ticket must not aggregate the "no ticket" rows; binding the
    // empty string keeps the ticket scope empty because of the `ticket <> ''`
    // guard.
    let ticket: String = if anchor.has_ticket() {
        anchor.ticket.clone()
    } else {
        String::new()
    };

    let row: ConditionalSumRow = diesel::sql_query(
        "SELECT \
            COUNT(CASE WHEN customer_id = ? THEN 1 END) AS customer_entries, \
            COALESCE(SUM(CASE WHEN customer_id = ? THEN duration_minutes END), 0) AS customer_total, \
            COALESCE(SUM(CASE WHEN customer_id = ? AND user_id = ? THEN duration_minutes END), 0) AS customer_own, \
            COUNT(CASE WHEN project_id = ? THEN 1 END) AS project_entries, \
            COALESCE(SUM(CASE WHEN project_id = ? THEN duration_minutes END), 0) AS project_total, \
            COALESCE(SUM(CASE WHEN project_id = ? AND user_id = ? THEN duration_minutes END), 0) AS project_own, \
            COUNT(CASE WHEN activity_id = ? THEN 1 END) AS activity_entries, \
            COALESCE(SUM(CASE WHEN activity_id = ? THEN duration_minutes END), 0) AS activity_total, \
            COALESCE(SUM(CASE WHEN activity_id = ? AND user_id = ? THEN duration_minutes END), 0) AS activity_own, \
            COUNT(CASE WHEN ticket <> '' AND ticket = ? THEN 1 END) AS ticket_entries, \
            COALESCE(SUM(CASE WHEN ticket <> '' AND ticket = ? THEN duration_minutes END), 0) AS ticket_total, \
            COALESCE(SUM(CASE WHEN ticket <> '' AND ticket = ? AND user_id = ? THEN duration_minutes END), 0) AS ticket_own \
         FROM entries",
    )
    .bind::<BigInt, _>(anchor.customer_id)
    .bind::<BigInt, _>(anchor.customer_id)
    .bind::<BigInt, _>(anchor.customer_id)
    .bind::<BigInt, _>(requesting_user_id)
    .bind::<BigInt, _>(anchor.project_id)
    .bind::<BigInt, _>(anchor.project_id)
    .bind::<BigInt, _>(anchor.project_id)
    .bind::<BigInt, _>(requesting_user_id)
    .bind::<BigInt, _>(anchor.activity_id)
    .bind::<BigInt, _>(anchor.activity_id)
    .bind::<BigInt, _>(anchor.activity_id)
    .bind::<BigInt, _>(requesting_user_id)
    .bind::<Text, _>(ticket.clone())
    .bind::<Text, _>(ticket.clone())
    .bind::<Text, _>(ticket.clone())
    .bind::<BigInt, _>(requesting_user_id)
    .get_result::<ConditionalSumRow>(conn)?;

    Ok(EntrySummary {
        customer: ScopeSummary {
            name: customer_name,
            entries: row.customer_entries,
            total: row.customer_total,
            own: row.customer_own,
            ..ScopeSummary::default()
        },
        project: ScopeSummary {
            name: project_name,
            entries: row.project_entries,
            total: row.project_total,
            own: row.project_own,
            estimation,
            quota: estimation_quota(row.project_total, estimation),
        },
        activity: ScopeSummary {
            name: activity_name,
            entries: row.activity_entries,
            total: row.activity_total,
            own: row.activity_own,
            ..ScopeSummary::default()
        },
        ticket: ScopeSummary {
            name: ticket,
            entries: row.ticket_entries,
            total: row.ticket_total,
            own: row.ticket_own,
            ..ScopeSummary::default()
        },
    })
}

/// Computes the summary with four independent aggregate queries.
///
/// Kept as the reference implementation; `get_summary` must agree with it on
/// every input (pinned by `tests::summary_tests`).
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if the anchor entry does not
/// exist, or a database error.
pub fn get_summary_legacy(
    conn: &mut SqliteConnection,
    entry_id: i64,
    requesting_user_id: i64,
) -> Result<EntrySummary, PersistenceError> {
    let anchor: Entry = load_anchor(conn, entry_id)?;
    let (customer_name, project_name, estimation, activity_name) =
        load_scope_names(conn, &anchor)?;

    let (customer_entries, customer_total): (i64, Option<i64>) = entries::table
        .filter(entries::customer_id.eq(anchor.customer_id))
        .select((
            diesel::dsl::count_star(),
            sql::<Nullable<BigInt>>("SUM(duration_minutes)"),
        ))
        .first(conn)?;
    let customer_own: Option<i64> = entries::table
        .filter(entries::customer_id.eq(anchor.customer_id))
        .filter(entries::user_id.eq(requesting_user_id))
        .select(sql::<Nullable<BigInt>>("SUM(duration_minutes)"))
        .first(conn)?;

    let (project_entries, project_total): (i64, Option<i64>) = entries::table
        .filter(entries::project_id.eq(anchor.project_id))
        .select((
            diesel::dsl::count_star(),
            sql::<Nullable<BigInt>>("SUM(duration_minutes)"),
        ))
        .first(conn)?;
    let project_own: Option<i64> = entries::table
        .filter(entries::project_id.eq(anchor.project_id))
        .filter(entries::user_id.eq(requesting_user_id))
        .select(sql::<Nullable<BigInt>>("SUM(duration_minutes)"))
        .first(conn)?;

    let (activity_entries, activity_total): (i64, Option<i64>) = entries::table
        .filter(entries::activity_id.eq(anchor.activity_id))
        .select((
            diesel::dsl::count_star(),
            sql::<Nullable<BigInt>>("SUM(duration_minutes)"),
        ))
        .first(conn)?;
    let activity_own: Option<i64> = entries::table
        .filter(entries::activity_id.eq(anchor.activity_id))
        .filter(entries::user_id.eq(requesting_user_id))
        .select(sql::<Nullable<BigInt>>("SUM(duration_minutes)"))
        .first(conn)?;

    let (ticket, ticket_entries, ticket_total, ticket_own): (String, i64, Option<i64>, Option<i64>) =
        if anchor.has_ticket() {
            let (entry_count, total): (i64, Option<i64>) = entries::table
                .filter(entries::ticket.eq(anchor.ticket.clone()))
                .select((
                    diesel::dsl::count_star(),
                    sql::<Nullable<BigInt>>("SUM(duration_minutes)"),
                ))
                .first(conn)?;
            let own: Option<i64> = entries::table
                .filter(entries::ticket.eq(anchor.ticket.clone()))
                .filter(entries::user_id.eq(requesting_user_id))
                .select(sql::<Nullable<BigInt>>("SUM(duration_minutes)"))
                .first(conn)?;
            (anchor.ticket.clone(), entry_count, total, own)
        } else {
            (String::new(), 0, None, None)
        };

    Ok(EntrySummary {
        customer: ScopeSummary {
            name: customer_name,
            entries: customer_entries,
            total: customer_total.unwrap_or(0),
            own: customer_own.unwrap_or(0),
            ..ScopeSummary::default()
        },
        project: ScopeSummary {
            name: project_name,
            entries: project_entries,
            total: project_total.unwrap_or(0),
            own: project_own.unwrap_or(0),
            estimation,
            quota: estimation_quota(project_total.unwrap_or(0), estimation),
        },
        activity: ScopeSummary {
            name: activity_name,
            entries: activity_entries,
            total: activity_total.unwrap_or(0),
            own: activity_own.unwrap_or(0),
            ..ScopeSummary::default()
        },
        ticket: ScopeSummary {
            name: ticket,
            entries: ticket_entries,
            total: ticket_total.unwrap_or(0),
            own: ticket_own.unwrap_or(0),
            ..ScopeSummary::default()
        },
    })
}
