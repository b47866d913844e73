// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures and the persistence test suite.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod interpretation_tests;
mod summary_tests;

use time::{Date, Time};
use timetracker_domain::{Activity, Customer, Entry, Project, Team, User, UserType};

use crate::Persistence;

/// A freshly migrated in-memory store.
pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// Seeds one team, two users, one customer, one project and one activity.
/// Returns (team, user_a, user_b, customer, project, activity) ids.
pub fn seed_base_data(persistence: &mut Persistence) -> (i64, i64, i64, i64, i64, i64) {
    let team_id: i64 = persistence
        .save_team(&Team {
            id: None,
            name: String::from("backend"),
            lead_user_id: None,
        })
        .unwrap();
    let user_a: i64 = persistence
        .save_user(&User {
            id: None,
            username: String::from("alice"),
            abbr: String::from("ALC"),
            user_type: UserType::Dev,
            locale: String::from("en"),
            team_ids: vec![team_id],
        })
        .unwrap();
    let user_b: i64 = persistence
        .save_user(&User {
            id: None,
            username: String::from("bob"),
            abbr: String::from("BOB"),
            user_type: UserType::Dev,
            locale: String::from("en"),
            team_ids: vec![team_id],
        })
        .unwrap();
    let customer_id: i64 = persistence
        .save_customer(&Customer {
            id: None,
            name: String::from("Acme"),
            active: true,
            global: false,
            team_ids: vec![team_id],
        })
        .unwrap();
    let project_id: i64 = persistence
        .save_project(&Project {
            id: None,
            customer_id,
            name: String::from("Widget"),
            active: true,
            global: false,
            jira_id: None,
            ticket_system_id: None,
            estimation_minutes: Some(6000),
        })
        .unwrap();
    let activity_id: i64 = persistence
        .save_activity(&Activity {
            id: None,
            name: String::from("Development"),
            needs_ticket: false,
            factor: 1.0,
        })
        .unwrap();
    (team_id, user_a, user_b, customer_id, project_id, activity_id)
}

/// Builds an unsaved entry with the given coordinates.
#[allow(clippy::too_many_arguments)]
pub fn make_entry(
    day: Date,
    start: Time,
    end: Time,
    user_id: i64,
    customer_id: i64,
    project_id: i64,
    activity_id: i64,
    ticket: &str,
) -> Entry {
    Entry {
        id: None,
        day,
        start,
        end,
        user_id,
        customer_id,
        project_id,
        activity_id,
        ticket: String::from(ticket),
        description: String::from("work"),
        synced_to_ticket_system: false,
        worklog_id: None,
    }
}
