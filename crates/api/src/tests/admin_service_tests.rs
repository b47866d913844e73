// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the administrative CRUD services.

use timetracker_domain::Customer;

use crate::admin::{save_activity, save_customer, save_ticket_system, save_user};
use crate::auth::resolve_user;
use crate::error::ApiError;
use crate::request_response::{
    ActivitySaveRequest, CustomerSaveRequest, TicketSystemSaveRequest, UserSaveRequest,
};
use crate::tests::fixture;

#[test]
fn test_save_customer_requires_name() {
    let mut fx = fixture();
    let request = CustomerSaveRequest {
        id: None,
        name: None,
        active: true,
        global: true,
        teams: vec![],
    };
    let result = save_customer(&mut fx.persistence, &request);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "name"));
}

#[test]
fn test_save_customer_rejects_duplicate_name_case_insensitive() {
    let mut fx = fixture();
    let request = CustomerSaveRequest {
        id: None,
        name: Some(String::from("ACME")),
        active: true,
        global: true,
        teams: vec![],
    };
    let result = save_customer(&mut fx.persistence, &request);
    assert!(
        matches!(result, Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique-name")
    );
}

#[test]
fn test_save_customer_update_keeps_own_name() {
    let mut fx = fixture();
    // Re-saving the existing customer under its own name is not a collision.
    let request = CustomerSaveRequest {
        id: Some(fx.customer_id),
        name: Some(String::from("Acme")),
        active: false,
        global: true,
        teams: vec![],
    };
    let saved: Customer = save_customer(&mut fx.persistence, &request).unwrap();
    assert_eq!(saved.id, Some(fx.customer_id));
    assert!(!saved.active);
}

#[test]
fn test_save_customer_requires_team_or_global() {
    let mut fx = fixture();
    let request = CustomerSaveRequest {
        id: None,
        name: Some(String::from("Orphan")),
        active: true,
        global: false,
        teams: vec![],
    };
    let result = save_customer(&mut fx.persistence, &request);
    assert!(
        matches!(result, Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "customer-team")
    );
}

#[test]
fn test_save_activity_rejects_non_positive_factor() {
    let mut fx = fixture();
    let request = ActivitySaveRequest {
        id: None,
        name: Some(String::from("Review")),
        needs_ticket: false,
        factor: 0.0,
    };
    let result = save_activity(&mut fx.persistence, &request);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "factor"));
}

#[test]
fn test_save_user_rejects_unknown_type() {
    let mut fx = fixture();
    let request = UserSaveRequest {
        id: None,
        username: Some(String::from("dave")),
        abbr: String::from("DAV"),
        user_type: Some(String::from("ADMIN")),
        locale: String::from("en"),
        teams: vec![],
    };
    let result = save_user(&mut fx.persistence, &request);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "type"));
}

#[test]
fn test_save_ticket_system_requires_type() {
    let mut fx = fixture();
    let request = TicketSystemSaveRequest {
        id: None,
        name: Some(String::from("Helpdesk")),
        system_type: None,
        book_time: false,
        url: String::new(),
        login: String::new(),
        password: String::new(),
        ticket_url: String::new(),
    };
    let result = save_ticket_system(&mut fx.persistence, &request);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "type"));
}

#[test]
fn test_resolve_user_known_and_unknown() {
    let mut fx = fixture();
    let user = resolve_user(&mut fx.persistence, Some("alice")).unwrap();
    assert_eq!(user.username, "alice");

    let unknown = resolve_user(&mut fx.persistence, Some("mallory"));
    assert!(matches!(
        unknown,
        Err(ApiError::AuthenticationFailed { .. })
    ));

    let missing = resolve_user(&mut fx.persistence, None);
    assert!(matches!(
        missing,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}
