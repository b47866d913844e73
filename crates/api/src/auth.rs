// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requesting-user resolution.
//!
//! The caller names itself through a `user` parameter which is resolved
//! against the users table. This is deliberately the whole authentication
//! surface: directory binds and token schemes sit outside this codebase, and
//! the seam here is where they would plug in.

use timetracker_domain::User;
use timetracker_persistence::{Persistence, PersistenceError};

use crate::error::ApiError;

/// Resolves the requesting user from the `user` parameter.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` when the parameter is absent or
/// names no known user.
pub fn resolve_user(
    persistence: &mut Persistence,
    username: Option<&str>,
) -> Result<User, ApiError> {
    let Some(username) = username else {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("no user supplied"),
        });
    };
    match persistence.get_user_by_username(username) {
        Ok(user) => Ok(user),
        Err(PersistenceError::NotFound) => Err(ApiError::AuthenticationFailed {
            reason: format!("unknown user '{username}'"),
        }),
        Err(other) => Err(ApiError::from(other)),
    }
}
