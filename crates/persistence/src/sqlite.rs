// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening `SQLite` connections.
//!
//! Entity reads and writes live in `queries/` and `mutations/`.

use diesel::expression::functions::declare_sql_function;
use diesel::sql_types::{Nullable, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[declare_sql_function]
extern "SQL" {
    /// Unicode lowercase. Built-in `lower()` and `LIKE` only fold ASCII.
    fn fold_case(value: Nullable<Text>) -> Nullable<Text>;
}

/// How the database is backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// A shared-cache in-memory database.
    Memory,
    /// A file on disk, journaled in WAL mode.
    File,
}

impl Backing {
    const fn pragmas(self) -> &'static [&'static str] {
        match self {
            Self::Memory => &["PRAGMA busy_timeout = 5000"],
            Self::File => &["PRAGMA busy_timeout = 5000", "PRAGMA journal_mode = WAL"],
        }
    }
}

/// Opens the database at `database_url`, applies connection settings,
/// registers [`fold_case`] and runs pending migrations.
///
/// # Arguments
///
/// * `database_url` - A file path or `SQLite` URI
/// * `backing` - Selects the connection settings
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA or a migration fails.
pub fn open(database_url: &str, backing: Backing) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?backing, "Opening SQLite database");
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    for pragma in backing.pragmas() {
        // Diesel has no PRAGMA DSL.
        diesel::sql_query(*pragma).execute(&mut conn)?;
        debug!(pragma, "Applied");
    }

    fold_case_utils::register_impl(&mut conn, |value: Option<String>| {
        value.map(|v| v.to_lowercase())
    })?;

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::Migration(e.to_string()))?
        .len();
    info!(applied, "Migrations up to date");

    Ok(conn)
}
