// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the grouped interpretation breakdowns.

use time::macros::{date, time};

use crate::tests::{make_entry, seed_base_data, test_persistence};
use crate::{EntryFilter, InterpretationGroup, InterpretationRow, Persistence};

#[test]
fn test_interpret_empty_set_is_empty() {
    let mut persistence: Persistence = test_persistence();
    let rows: Vec<InterpretationRow> = persistence
        .interpret_entries(&EntryFilter::default(), InterpretationGroup::Customer)
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_interpret_by_user_sorts_by_minutes_descending() {
    let mut persistence: Persistence = test_persistence();
    let (_, user_a, user_b, customer_id, project_id, activity_id) =
        seed_base_data(&mut persistence);

    // Alice 60 min, Bob 180 min.
    persistence
        .insert_entry(&make_entry(
            date!(2026 - 03 - 02),
            time!(09:00),
            time!(10:00),
            user_a,
            customer_id,
            project_id,
            activity_id,
            "",
        ))
        .unwrap();
    persistence
        .insert_entry(&make_entry(
            date!(2026 - 03 - 02),
            time!(10:00),
            time!(13:00),
            user_b,
            customer_id,
            project_id,
            activity_id,
            "",
        ))
        .unwrap();

    let rows: Vec<InterpretationRow> = persistence
        .interpret_entries(&EntryFilter::default(), InterpretationGroup::User)
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "bob");
    assert_eq!(rows[0].minutes, 180);
    assert!((rows[0].quota - 75.0).abs() < f64::EPSILON);
    assert_eq!(rows[1].name, "alice");
    assert_eq!(rows[1].minutes, 60);
    assert!((rows[1].quota - 25.0).abs() < f64::EPSILON);
}

#[test]
fn test_interpret_by_day_sorts_ascending() {
    let mut persistence: Persistence = test_persistence();
    let (_, user_a, _, customer_id, project_id, activity_id) = seed_base_data(&mut persistence);

    for day in [date!(2026 - 03 - 04), date!(2026 - 03 - 02), date!(2026 - 03 - 03)] {
        persistence
            .insert_entry(&make_entry(
                day,
                time!(09:00),
                time!(10:00),
                user_a,
                customer_id,
                project_id,
                activity_id,
                "",
            ))
            .unwrap();
    }

    let rows: Vec<InterpretationRow> = persistence
        .interpret_entries(&EntryFilter::default(), InterpretationGroup::Day)
        .unwrap();
    let days: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(days, vec!["2026-03-02", "2026-03-03", "2026-03-04"]);
}

#[test]
fn test_interpret_by_ticket_respects_filter() {
    let mut persistence: Persistence = test_persistence();
    let (_, user_a, user_b, customer_id, project_id, activity_id) =
        seed_base_data(&mut persistence);

    persistence
        .insert_entry(&make_entry(
            date!(2026 - 03 - 02),
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
            date!(2026 - 03 - 02),
            time!(10:00),
            time!(12:00),
            user_b,
            customer_id,
            project_id,
            activity_id,
            "ABC-2",
        ))
        .unwrap();

    // Restricted to Alice, only her ticket shows up and owns the full quota.
    let filter = EntryFilter {
        user_id: Some(user_a),
        ..EntryFilter::default()
    };
    let rows: Vec<InterpretationRow> = persistence
        .interpret_entries(&filter, InterpretationGroup::Ticket)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "ABC-1");
    assert_eq!(rows[0].minutes, 60);
    assert!((rows[0].quota - 100.0).abs() < f64::EPSILON);
}
