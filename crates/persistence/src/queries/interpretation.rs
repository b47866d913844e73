// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grouped duration breakdowns over a filtered entry set.
//!
//! The interpretation endpoints answer "where did the time go" questions:
//! the filtered entries are grouped by one dimension (customer, project,
//! activity, ticket, user or day) and each group reports its total minutes
//! and its share of the overall sum as a percentage quota.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use serde::Serialize;
use timetracker_domain::Entry;

use crate::data_models::format_day;
use crate::diesel_schema::{activities, customers, projects, users};
use crate::error::PersistenceError;
use crate::queries::entries::{find_by_filter, EntryFilter};

/// The dimension an interpretation groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationGroup {
    Customer,
    Project,
    Activity,
    Ticket,
    User,
    Day,
}

/// One group row of an interpretation breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretationRow {
    /// Group key id; 0 for text-keyed groups (ticket, day).
    pub id: i64,
    /// Display name of the group (entity name, ticket reference or ISO day).
    pub name: String,
    /// Total minutes booked in this group.
    pub minutes: i64,
    /// Share of the overall total, as a percentage rounded to two decimals.
    pub quota: f64,
}

/// Rounds a percentage to two decimal places.
fn round_quota(minutes: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw: f64 = minutes as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}

/// Computes a grouped breakdown of the filtered entries.
///
/// Groups are sorted by minutes descending, except the `Day` grouping which
/// sorts by day ascending. Percentages are relative to the sum over the
/// filtered set, not over all entries.
///
/// # Errors
///
/// Returns an error if the underlying entry query or a name lookup fails.
pub fn interpret(
    conn: &mut SqliteConnection,
    filter: &EntryFilter,
    group: InterpretationGroup,
) -> Result<Vec<InterpretationRow>, PersistenceError> {
    let matched: Vec<Entry> = find_by_filter(conn, filter)?;

    // (id, text key) -> minutes; text key doubles as the name for
    // ticket/day groups.
    let mut minutes_by_key: HashMap<(i64, String), i64> = HashMap::new();
    let mut total: i64 = 0;
    for entry in &matched {
        let minutes: i64 = entry.duration_minutes();
        total += minutes;
        let key: (i64, String) = match group {
            InterpretationGroup::Customer => (entry.customer_id, String::new()),
            InterpretationGroup::Project => (entry.project_id, String::new()),
            InterpretationGroup::Activity => (entry.activity_id, String::new()),
            InterpretationGroup::User => (entry.user_id, String::new()),
            InterpretationGroup::Ticket => (0, entry.ticket.clone()),
            InterpretationGroup::Day => (0, format_day(entry.day)),
        };
        *minutes_by_key.entry(key).or_insert(0) += minutes;
    }

    let names: HashMap<i64, String> = match group {
        InterpretationGroup::Customer => customers::table
            .select((customers::customer_id, customers::name))
            .load::<(i64, String)>(conn)?
            .into_iter()
            .collect(),
        InterpretationGroup::Project => projects::table
            .select((projects::project_id, projects::name))
            .load::<(i64, String)>(conn)?
            .into_iter()
            .collect(),
        InterpretationGroup::Activity => activities::table
            .select((activities::activity_id, activities::name))
            .load::<(i64, String)>(conn)?
            .into_iter()
            .collect(),
        InterpretationGroup::User => users::table
            .select((users::user_id, users::username))
            .load::<(i64, String)>(conn)?
            .into_iter()
            .collect(),
        InterpretationGroup::Ticket | InterpretationGroup::Day => HashMap::new(),
    };

    let mut rows: Vec<InterpretationRow> = minutes_by_key
        .into_iter()
        .map(|((id, text_key), minutes)| {
            let name: String = if text_key.is_empty() {
                names.get(&id).cloned().unwrap_or_default()
            } else {
                text_key
            };
            InterpretationRow {
                id,
                name,
                minutes,
                quota: round_quota(minutes, total),
            }
        })
        .collect();

    if group == InterpretationGroup::Day {
        rows.sort_by(|a, b| a.name.cmp(&b.name));
    } else {
        rows.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.name.cmp(&b.name)));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::round_quota;

    #[test]
    fn test_round_quota_zero_total() {
        assert!((round_quota(10, 0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_quota_two_decimals() {
        // 1/3 of the total rounds to 33.33.
        assert!((round_quota(100, 300) - 33.33).abs() < f64::EPSILON);
    }
}
