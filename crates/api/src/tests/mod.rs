// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures and the API service test suite.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod admin_service_tests;
mod tracking_tests;

use std::time::Duration;

use timetracker_domain::{
    Activity, Customer, Project, Team, TicketSystem, TicketSystemType, User, UserType,
};
use timetracker_persistence::Persistence;

use crate::tracking::SummaryCache;

pub struct Fixture {
    pub persistence: Persistence,
    pub cache: SummaryCache,
    pub user: User,
    pub customer_id: i64,
    pub project_id: i64,
    pub activity_id: i64,
    pub ticket_activity_id: i64,
}

/// Seeds a store with one user, one customer/project/activity pair and one
/// activity that requires a ticket. The project starts without a ticket
/// system; tests wire one in as needed.
pub fn fixture() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let team_id: i64 = persistence
        .save_team(&Team {
            id: None,
            name: String::from("tracking"),
            lead_user_id: None,
        })
        .unwrap();
    let user_id: i64 = persistence
        .save_user(&User {
            id: None,
            username: String::from("alice"),
            abbr: String::from("ALC"),
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
            global: true,
            team_ids: vec![],
        })
        .unwrap();
    let project_id: i64 = persistence
        .save_project(&Project {
            id: None,
            customer_id,
            name: String::from("Widget"),
            active: true,
            global: true,
            jira_id: None,
            ticket_system_id: None,
            estimation_minutes: None,
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
    let ticket_activity_id: i64 = persistence
        .save_activity(&Activity {
            id: None,
            name: String::from("Support"),
            needs_ticket: true,
            factor: 1.0,
        })
        .unwrap();
    let user: User = persistence.get_user(user_id).unwrap();
    Fixture {
        persistence,
        cache: SummaryCache::new(Duration::from_secs(300)),
        user,
        customer_id,
        project_id,
        activity_id,
        ticket_activity_id,
    }
}

/// Creates a JIRA ticket system and wires it to the fixture project.
pub fn wire_jira(fixture: &mut Fixture, book_time: bool) -> i64 {
    let ticket_system_id: i64 = fixture
        .persistence
        .save_ticket_system(&TicketSystem {
            id: None,
            name: String::from("Company Jira"),
            system_type: TicketSystemType::Jira,
            book_time,
            url: String::from("https://jira.example.invalid"),
            login: String::from("bot"),
            password: String::from("secret"),
            ticket_url: String::from("https://jira.example.invalid/browse/%s"),
        })
        .unwrap();
    let mut project: Project = fixture.persistence.get_project(fixture.project_id).unwrap();
    project.ticket_system_id = Some(ticket_system_id);
    fixture.persistence.save_project(&project).unwrap();
    ticket_system_id
}

/// Creates an OTRS ticket system and wires it to the fixture project.
pub fn wire_otrs(fixture: &mut Fixture) -> i64 {
    let ticket_system_id: i64 = fixture
        .persistence
        .save_ticket_system(&TicketSystem {
            id: None,
            name: String::from("Helpdesk"),
            system_type: TicketSystemType::Otrs,
            book_time: false,
            url: String::from("https://otrs.example.invalid"),
            login: String::from("bot"),
            password: String::from("secret"),
            ticket_url: String::new(),
        })
        .unwrap();
    let mut project: Project = fixture.persistence.get_project(fixture.project_id).unwrap();
    project.ticket_system_id = Some(ticket_system_id);
    fixture.persistence.save_project(&project).unwrap();
    ticket_system_id
}
