// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the per-entry summary aggregation.

use time::macros::{date, time};
use timetracker_domain::Entry;

use crate::error::PersistenceError;
use crate::tests::{make_entry, seed_base_data, test_persistence};
use crate::{EntrySummary, Persistence};

#[test]
fn test_summary_missing_entry_reports_not_found() {
    let mut persistence: Persistence = test_persistence();
    let result = persistence.entry_summary(99, 1);
    assert!(matches!(result, Err(PersistenceError::EntryNotFound(99))));
}

#[test]
fn test_summary_totals_and_own_share() {
    let mut persistence: Persistence = test_persistence();
    let (_, user_a, user_b, customer_id, project_id, activity_id) =
        seed_base_data(&mut persistence);

    // Alice: 60 min with ticket, Bob: 90 min on the same ticket plus 30 min
    // without.
    let anchor_id: i64 = persistence
        .insert_entry(&make_entry(
            date!(2026 - 01 - 05),
            time!(09:00),
            time!(10:00),
            user_a,
            customer_id,
            project_id,
            activity_id,
            "ABC-1",
        ))
        .unwrap();
    persistence
        .insert_entry(&make_entry(
            date!(2026 - 01 - 05),
            time!(10:00),
            time!(11:30),
            user_b,
            customer_id,
            project_id,
            activity_id,
            "ABC-1",
        ))
        .unwrap();
    persistence
        .insert_entry(&make_entry(
            date!(2026 - 01 - 06),
            time!(09:00),
            time!(09:30),
            user_b,
            customer_id,
            project_id,
            activity_id,
            "",
        ))
        .unwrap();

    let summary: EntrySummary = persistence.entry_summary(anchor_id, user_a).unwrap();

    assert_eq!(summary.customer.name, "Acme");
    assert_eq!(summary.customer.entries, 3);
    assert_eq!(summary.customer.total, 180);
    assert_eq!(summary.customer.own, 60);
    assert_eq!(summary.customer.estimation, 0);

    assert_eq!(summary.project.name, "Widget");
    assert_eq!(summary.project.total, 180);
    assert_eq!(summary.project.estimation, 6000);
    // 180 of 6000 estimated minutes booked.
    assert!((summary.project.quota - 3.0).abs() < f64::EPSILON);

    assert_eq!(summary.activity.name, "Development");
    assert_eq!(summary.activity.total, 180);

    // The ticket scope excludes Bob's ticketless half hour.
    assert_eq!(summary.ticket.name, "ABC-1");
    assert_eq!(summary.ticket.entries, 2);
    assert_eq!(summary.ticket.total, 150);
    assert_eq!(summary.ticket.own, 60);
}

#[test]
fn test_summary_without_ticket_leaves_ticket_scope_empty() {
    let mut persistence: Persistence = test_persistence();
    let (_, user_a, _, customer_id, project_id, activity_id) = seed_base_data(&mut persistence);

    let anchor_id: i64 = persistence
        .insert_entry(&make_entry(
            date!(2026 - 01 - 05),
            time!(09:00),
            time!(10:00),
            user_a,
            customer_id,
            project_id,
            activity_id,
            "",
        ))
        .unwrap();
    // Another ticketless entry that must not leak into the ticket scope.
    persistence
        .insert_entry(&make_entry(
            date!(2026 - 01 - 06),
            time!(09:00),
            time!(10:00),
            user_a,
            customer_id,
            project_id,
            activity_id,
            "",
        ))
        .unwrap();

    let summary: EntrySummary = persistence.entry_summary(anchor_id, user_a).unwrap();
    assert_eq!(summary.ticket.name, "");
    assert_eq!(summary.ticket.entries, 0);
    assert_eq!(summary.ticket.total, 0);
    assert_eq!(summary.ticket.own, 0);
    assert_eq!(summary.customer.entries, 2);
}

#[test]
fn test_summary_agrees_with_legacy_aggregation() {
    let mut persistence: Persistence = test_persistence();
    let (_, user_a, user_b, customer_id, project_id, activity_id) =
        seed_base_data(&mut persistence);

    let mut anchor_id: i64 = 0;
    for (user_id, ticket) in [
        (user_a, "ABC-1"),
        (user_a, ""),
        (user_b, "ABC-1"),
        (user_b, "ABC-2"),
        (user_b, ""),
    ] {
        let id: i64 = persistence
            .insert_entry(&make_entry(
                date!(2026 - 02 - 02),
                time!(09:00),
                time!(10:15),
                user_id,
                customer_id,
                project_id,
                activity_id,
                ticket,
            ))
            .unwrap();
        if anchor_id == 0 {
            anchor_id = id;
        }
    }

    let optimized: EntrySummary = persistence.entry_summary(anchor_id, user_b).unwrap();
    let legacy: EntrySummary = persistence.entry_summary_legacy(anchor_id, user_b).unwrap();
    assert_eq!(optimized, legacy);
}
