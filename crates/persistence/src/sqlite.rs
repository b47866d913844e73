// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup for the `SQLite` database.
//!
//! Everything here is connection plumbing: opening, PRAGMA configuration,
//! migrations and the `last_insert_rowid()` workaround. Domain queries and
//! mutations live in the `queries` and `mutations` modules.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Embedded schema migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row shape of `PRAGMA foreign_keys`. PRAGMAs have no Diesel DSL, so this
/// is read through `sql_query`.
#[derive(QueryableByName)]
struct ForeignKeyPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection, turns on foreign key enforcement and brings the
/// schema up to date.
///
/// # Errors
///
/// Returns an error when the connection cannot be established or a
/// migration fails.
pub fn open(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Opening SQLite database at {database_url}");
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    Ok(conn)
}

/// Switches a file-backed database to WAL mode, giving the reporting
/// endpoints better read concurrency while tracking writes are in flight.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::sql_query("PRAGMA journal_mode = WAL").execute(conn)?;
    Ok(())
}

/// Confirms that foreign key enforcement survived connection setup. The
/// schema relies on referential integrity between entries and their
/// customer/project/activity/user rows.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeysDisabled` when the PRAGMA reports
/// enforcement off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeyPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeysDisabled);
    }
    Ok(())
}

/// Returns the row id assigned by the most recent insert. `SQLite` does not
/// support `RETURNING` clauses in all contexts, so the id is read back
/// through `last_insert_rowid()`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
