// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The filtered entry query.
//!
//! All tracking and reporting reads funnel through [`find_by_filter`]: a
//! conjunctive query assembled from an optional filter set, ordered by
//! `day DESC, start DESC, id DESC`, with optional offset and cap.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use timetracker_domain::Entry;

use crate::data_models::{EntryRow, format_day};
use crate::diesel_schema::{customers_teams, entries};
use crate::error::PersistenceError;

/// Filter set for entry queries. All fields are conjunctive; `None` means
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub user_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub project_id: Option<i64>,
    pub activity_id: Option<i64>,
    /// Matches entries whose customer is visible to this team.
    pub team_id: Option<i64>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
    /// Substring match on the ticket reference.
    pub ticket: Option<String>,
    /// Substring match on the description.
    pub description: Option<String>,
    /// Explicit row offset. Takes precedence over `page`/`page_size`.
    pub start: Option<i64>,
    /// Zero-based page index, only effective together with `page_size` and
    /// only when `start` is absent.
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Hard cap on the number of returned rows.
    pub max_results: Option<i64>,
}

impl EntryFilter {
    /// Resolves the effective row offset.
    ///
    /// An explicit `start` always wins; the page-based offset applies only
    /// when `start` is absent. Older code paths conflated the two, which
    /// broke pagination for grid states that sent both - the regression test
    /// in `tests::entry_filter_tests` pins the corrected rule.
    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.start {
            Some(start) => start.max(0),
            None => match (self.page, self.page_size) {
                (Some(page), Some(size)) => (page * size).max(0),
                _ => 0,
            },
        }
    }

    /// Resolves the effective row cap, if any.
    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        self.max_results.or(self.page_size)
    }
}

/// Retrieves a single entry by id.
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if no such row exists.
pub fn get_entry(conn: &mut SqliteConnection, entry_id: i64) -> Result<Entry, PersistenceError> {
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

/// Retrieves entries matching the given filter.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be converted.
pub fn find_by_filter(
    conn: &mut SqliteConnection,
    filter: &EntryFilter,
) -> Result<Vec<Entry>, PersistenceError> {
    let mut query = entries::table
        .select(EntryRow::as_select())
        .into_boxed();

    if let Some(user_id) = filter.user_id {
        query = query.filter(entries::user_id.eq(user_id));
    }
    if let Some(customer_id) = filter.customer_id {
        query = query.filter(entries::customer_id.eq(customer_id));
    }
    if let Some(project_id) = filter.project_id {
        query = query.filter(entries::project_id.eq(project_id));
    }
    if let Some(activity_id) = filter.activity_id {
        query = query.filter(entries::activity_id.eq(activity_id));
    }
    if let Some(team_id) = filter.team_id {
        // Entries whose customer is assigned to the team.
        let team_customers = customers_teams::table
            .filter(customers_teams::team_id.eq(team_id))
            .select(customers_teams::customer_id);
        query = query.filter(entries::customer_id.eq_any(team_customers));
    }
    if let Some(date_from) = filter.date_from {
        query = query.filter(entries::day.ge(format_day(date_from)));
    }
    if let Some(date_to) = filter.date_to {
        query = query.filter(entries::day.le(format_day(date_to)));
    }
    if let Some(ref ticket) = filter.ticket {
        query = query.filter(entries::ticket.like(format!("%{ticket}%")));
    }
    if let Some(ref description) = filter.description {
        query = query.filter(entries::description.like(format!("%{description}%")));
    }

    query = query.order((
        entries::day.desc(),
        entries::start_time.desc(),
        entries::entry_id.desc(),
    ));

    let offset: i64 = filter.offset();
    match filter.limit() {
        Some(limit) => {
            query = query.limit(limit).offset(offset);
        }
        None if offset > 0 => {
            // SQLite requires a LIMIT clause for OFFSET to apply.
            query = query.limit(i64::MAX).offset(offset);
        }
        None => {}
    }

    let rows: Vec<EntryRow> = query.load::<EntryRow>(conn)?;
    rows.into_iter().map(EntryRow::into_domain).collect()
}

/// Counts all entries matching the filter, ignoring pagination.
///
/// The tracking grid uses this for its paging header.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_by_filter(
    conn: &mut SqliteConnection,
    filter: &EntryFilter,
) -> Result<i64, PersistenceError> {
    let mut unpaged: EntryFilter = filter.clone();
    unpaged.start = None;
    unpaged.page = None;
    unpaged.page_size = None;
    unpaged.max_results = None;

    let mut query = entries::table.count().into_boxed();

    if let Some(user_id) = unpaged.user_id {
        query = query.filter(entries::user_id.eq(user_id));
    }
    if let Some(customer_id) = unpaged.customer_id {
        query = query.filter(entries::customer_id.eq(customer_id));
    }
    if let Some(project_id) = unpaged.project_id {
        query = query.filter(entries::project_id.eq(project_id));
    }
    if let Some(activity_id) = unpaged.activity_id {
        query = query.filter(entries::activity_id.eq(activity_id));
    }
    if let Some(team_id) = unpaged.team_id {
        let team_customers = customers_teams::table
            .filter(customers_teams::team_id.eq(team_id))
            .select(customers_teams::customer_id);
        query = query.filter(entries::customer_id.eq_any(team_customers));
    }
    if let Some(date_from) = unpaged.date_from {
        query = query.filter(entries::day.ge(format_day(date_from)));
    }
    if let Some(date_to) = unpaged.date_to {
        query = query.filter(entries::day.le(format_day(date_to)));
    }
    if let Some(ref ticket) = unpaged.ticket {
        query = query.filter(entries::ticket.like(format!("%{ticket}%")));
    }
    if let Some(ref description) = unpaged.description {
        query = query.filter(entries::description.like(format!("%{description}%")));
    }

    let count: i64 = query.get_result(conn)?;
    Ok(count)
}
