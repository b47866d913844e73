// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the tracking save/delete services.

use time::macros::date;
use timetracker_domain::Entry;

use crate::error::ApiError;
use crate::request_response::EntrySaveRequest;
use crate::tests::{fixture, wire_jira, wire_otrs, Fixture};
use crate::tracking::{
    delete_entry, entries_for_days, save_entry, ticket_lookup, SyncOperation, SyncTask,
    TicketLookup,
};

fn save_request(fixture: &Fixture, ticket: &str) -> EntrySaveRequest {
    EntrySaveRequest {
        id: None,
        date: String::from("2026-01-05"),
        start: String::from("09:00"),
        end: String::from("10:30"),
        customer: fixture.customer_id,
        project: fixture.project_id,
        activity: fixture.activity_id,
        ticket: String::from(ticket),
        description: String::from("refactoring"),
    }
}

#[test]
fn test_save_derives_duration_and_persists() {
    let mut fx: Fixture = fixture();
    let request: EntrySaveRequest = save_request(&fx, "");
    let (entry, task) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    assert_eq!(entry.duration_minutes(), 90);
    assert!(task.is_none());

    let stored: Entry = fx.persistence.get_entry(entry.id.unwrap()).unwrap();
    assert_eq!(stored.day, date!(2026 - 01 - 05));
    assert_eq!(stored.description, "refactoring");
}

#[test]
fn test_save_rejects_inverted_times() {
    let mut fx: Fixture = fixture();
    let mut request: EntrySaveRequest = save_request(&fx, "");
    request.end = String::from("08:00");
    let result = save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_save_rejects_malformed_date() {
    let mut fx: Fixture = fixture();
    let mut request: EntrySaveRequest = save_request(&fx, "");
    request.date = String::from("05.01.2026");
    let result = save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "date"));
}

#[test]
fn test_save_enforces_activity_ticket_requirement() {
    let mut fx: Fixture = fixture();
    let mut request: EntrySaveRequest = save_request(&fx, "");
    request.activity = fx.ticket_activity_id;
    let result = save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request);
    assert!(matches!(result, Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "ticket-required"));

    // A "0" ticket counts as no ticket.
    request.ticket = String::from("0");
    let result = save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request);
    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));

    request.ticket = String::from("ABC-7");
    let (entry, _) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    assert_eq!(entry.ticket, "ABC-7");
}

#[test]
fn test_save_returns_create_task_for_booked_jira() {
    let mut fx: Fixture = fixture();
    wire_jira(&mut fx, true);
    let request: EntrySaveRequest = save_request(&fx, "ABC-1");
    let (entry, task) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    let task: SyncTask = task.unwrap();
    assert_eq!(task.entry_id, entry.id.unwrap());
    assert_eq!(task.operation, SyncOperation::Create);
    assert_eq!(task.minutes, 90);
    assert_eq!(task.comment, "Development: refactoring");
}

#[test]
fn test_save_returns_no_task_when_booking_disabled() {
    let mut fx: Fixture = fixture();
    wire_jira(&mut fx, false);
    let request: EntrySaveRequest = save_request(&fx, "ABC-1");
    let (_, task) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    assert!(task.is_none());
}

#[test]
fn test_update_reuses_worklog_id() {
    let mut fx: Fixture = fixture();
    wire_jira(&mut fx, true);
    let request: EntrySaveRequest = save_request(&fx, "ABC-1");
    let (entry, _) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    let entry_id: i64 = entry.id.unwrap();
    fx.persistence
        .mark_entry_synced(entry_id, Some(777), true)
        .unwrap();

    let mut update: EntrySaveRequest = save_request(&fx, "ABC-1");
    update.id = Some(entry_id);
    update.end = String::from("11:00");
    let (updated, task) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &update).unwrap();
    assert_eq!(updated.duration_minutes(), 120);
    assert_eq!(
        task.unwrap().operation,
        SyncOperation::Update { worklog_id: 777 }
    );
}

#[test]
fn test_delete_returns_task_only_for_synced_entries() {
    let mut fx: Fixture = fixture();
    wire_jira(&mut fx, true);
    let request: EntrySaveRequest = save_request(&fx, "ABC-1");
    let (entry, _) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    let entry_id: i64 = entry.id.unwrap();

    // Not yet synced: nothing to remove remotely.
    let task = delete_entry(&mut fx.persistence, &mut fx.cache, entry_id).unwrap();
    assert!(task.is_none());

    // Synced entry: the push is undone on delete.
    let (entry, _) =
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    let entry_id: i64 = entry.id.unwrap();
    fx.persistence
        .mark_entry_synced(entry_id, Some(888), true)
        .unwrap();
    let task: SyncTask = delete_entry(&mut fx.persistence, &mut fx.cache, entry_id)
        .unwrap()
        .unwrap();
    assert_eq!(task.operation, SyncOperation::Delete { worklog_id: 888 });
}

#[test]
fn test_delete_missing_entry_is_not_found() {
    let mut fx: Fixture = fixture();
    let result = delete_entry(&mut fx.persistence, &mut fx.cache, 404);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_ticket_lookup_fires_only_for_otrs_with_ticket() {
    let mut fx: Fixture = fixture();

    // No ticket system wired.
    let request: EntrySaveRequest = save_request(&fx, "100042");
    assert!(ticket_lookup(&mut fx.persistence, &request)
        .unwrap()
        .is_none());

    // JIRA handles its own validation during the worklog push.
    wire_jira(&mut fx, true);
    assert!(ticket_lookup(&mut fx.persistence, &request)
        .unwrap()
        .is_none());

    wire_otrs(&mut fx);
    let lookup: TicketLookup = ticket_lookup(&mut fx.persistence, &request)
        .unwrap()
        .unwrap();
    assert_eq!(lookup.ticket, "100042");
    assert_eq!(lookup.system.name, "Helpdesk");

    // Empty and "0" references never trigger a lookup.
    for ticket in ["", "0", "  "] {
        let request: EntrySaveRequest = save_request(&fx, ticket);
        assert!(ticket_lookup(&mut fx.persistence, &request)
            .unwrap()
            .is_none());
    }
}

#[test]
fn test_entries_for_days_spans_weekends() {
    let mut fx: Fixture = fixture();
    // Friday 2026-01-09 and the Monday after.
    for (date, start, end) in [
        ("2026-01-09", "09:00", "10:00"),
        ("2026-01-12", "09:00", "10:00"),
    ] {
        let request = EntrySaveRequest {
            id: None,
            date: String::from(date),
            start: String::from(start),
            end: String::from(end),
            customer: fx.customer_id,
            project: fx.project_id,
            activity: fx.activity_id,
            ticket: String::new(),
            description: String::new(),
        };
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    }

    // Two working days back from Tuesday 2026-01-13 reaches the Friday.
    let user = fx.user.clone();
    let entries: Vec<Entry> =
        entries_for_days(&mut fx.persistence, &user, 2, date!(2026 - 01 - 13)).unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_entries_for_days_excludes_future_entries() {
    let mut fx: Fixture = fixture();
    for date in ["2026-01-12", "2026-01-14"] {
        let request = EntrySaveRequest {
            id: None,
            date: String::from(date),
            start: String::from("09:00"),
            end: String::from("10:00"),
            customer: fx.customer_id,
            project: fx.project_id,
            activity: fx.activity_id,
            ticket: String::new(),
            description: String::new(),
        };
        save_entry(&mut fx.persistence, &mut fx.cache, &fx.user.clone(), &request).unwrap();
    }

    // Seen from the 13th, the pre-booked entry on the 14th stays out.
    let user = fx.user.clone();
    let entries: Vec<Entry> =
        entries_for_days(&mut fx.persistence, &user, 2, date!(2026 - 01 - 13)).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].day, date!(2026 - 01 - 12));
}
