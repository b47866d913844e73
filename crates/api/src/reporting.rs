// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Summary and interpretation services.

use timetracker_persistence::{
    EntryFilter, EntrySummary, InterpretationGroup, InterpretationRow, Persistence,
};
use tracing::debug;

use crate::error::ApiError;
use crate::tracking::SummaryCache;

/// Returns the summary for an entry as seen by the requesting user, served
/// from the cache when a fresh enough result exists.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for a missing entry or an internal
/// error on persistence failure.
pub fn get_summary(
    persistence: &mut Persistence,
    cache: &mut SummaryCache,
    entry_id: i64,
    user_id: i64,
) -> Result<EntrySummary, ApiError> {
    let key: (i64, i64) = (entry_id, user_id);
    if let Some(cached) = cache.get(&key) {
        debug!(entry_id, user_id, "Summary served from cache");
        return Ok(cached);
    }
    let summary: EntrySummary = persistence.entry_summary(entry_id, user_id)?;
    cache.insert(key, summary.clone());
    Ok(summary)
}

/// Maps an interpretation path segment to its grouping dimension. The
/// per-day series goes by "time" on the wire.
#[must_use]
pub fn parse_interpretation_group(segment: &str) -> Option<InterpretationGroup> {
    match segment {
        "customer" => Some(InterpretationGroup::Customer),
        "project" => Some(InterpretationGroup::Project),
        "activity" => Some(InterpretationGroup::Activity),
        "ticket" => Some(InterpretationGroup::Ticket),
        "user" => Some(InterpretationGroup::User),
        "time" => Some(InterpretationGroup::Day),
        _ => None,
    }
}

/// Computes a grouped breakdown of the filtered entries.
///
/// # Errors
///
/// Returns an internal error on persistence failure.
pub fn interpret(
    persistence: &mut Persistence,
    filter: &EntryFilter,
    group: InterpretationGroup,
) -> Result<Vec<InterpretationRow>, ApiError> {
    Ok(persistence.interpret_entries(filter, group)?)
}
