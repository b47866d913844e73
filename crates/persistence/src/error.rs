// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors surfaced by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database rejected a statement.
    Database(String),
    /// Opening the database connection failed.
    ConnectionFailed(String),
    /// Applying schema migrations failed.
    MigrationFailed(String),
    /// No entry row exists under this id.
    EntryNotFound(i64),
    /// A non-entry row was looked up or mutated but does not exist.
    NotFound,
    /// A stored row could not be converted back into a domain value.
    InvalidStoredData(String),
    /// The connection came up without `PRAGMA foreign_keys` active.
    ForeignKeysDisabled,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(msg) => write!(f, "database error: {msg}"),
            Self::ConnectionFailed(msg) => write!(f, "connection failed: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "migration failed: {msg}"),
            Self::EntryNotFound(id) => write!(f, "entry {id} not found"),
            Self::NotFound => write!(f, "record not found"),
            Self::InvalidStoredData(msg) => write!(f, "invalid stored data: {msg}"),
            Self::ForeignKeysDisabled => write!(f, "foreign key enforcement is disabled"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::ConnectionFailed(err.to_string())
    }
}
