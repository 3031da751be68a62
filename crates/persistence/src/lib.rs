// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the HMHY backend.
//!
//! Provides the [`Store`] capability consumed by the generic repository
//! facade and its Diesel implementation over `SQLite`.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.
//!
//! ## Migrations
//!
//! `migrations/` is embedded at compile time and applied on every open.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use hmhy_domain::{Admin, Patch, Role, Student, Teacher};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::{FindMany, FindOne, Store};

use mutations::PatchPlan;
use sqlite::Backing;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Outcome of [`Persistence::seed_superadmin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// A superadmin was inserted.
    Created,
    /// A superadmin already existed; nothing was written.
    AlreadyPresent,
}

/// Diesel-backed store for admins, teachers and students.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::open(&shared_memory_url, Backing::Memory)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or(PersistenceError::InvalidPath)?;
        let conn: SqliteConnection = sqlite::open(path_str, Backing::File)?;
        Ok(Self { conn })
    }

    /// Retrieves a live admin by username, for sign-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_admin_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<Admin>, PersistenceError> {
        queries::admins::find_admin_by_username(&mut self.conn, username)
    }

    /// Inserts `admin` unless some superadmin already exists.
    ///
    /// # Arguments
    ///
    /// * `admin` - A fully built admin whose role is [`Role::SuperAdmin`]
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or insert fails.
    pub fn seed_superadmin(&mut self, admin: &Admin) -> Result<SeedOutcome, PersistenceError> {
        if queries::admins::role_exists(&mut self.conn, Role::SuperAdmin)? {
            info!("Superadmin already present, skipping seed");
            return Ok(SeedOutcome::AlreadyPresent);
        }

        mutations::admins::insert_admin(&mut self.conn, admin)?;
        info!(username = %admin.username, "Seeded superadmin");
        Ok(SeedOutcome::Created)
    }
}

fn affected_rows(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

impl Store<Admin> for Persistence {
    fn insert(&mut self, entity: &Admin) -> Result<(), PersistenceError> {
        mutations::admins::insert_admin(&mut self.conn, entity)
    }

    fn find_one(&mut self, query: &FindOne) -> Result<Option<Admin>, PersistenceError> {
        queries::admins::find_admin(&mut self.conn, query)
    }

    fn find_many(&mut self, query: &FindMany) -> Result<(Vec<Admin>, u64), PersistenceError> {
        queries::admins::find_admins(&mut self.conn, query)
    }

    fn update_by_id(
        &mut self,
        id: &str,
        patch: &Patch<hmhy_domain::AdminChanges>,
    ) -> Result<u64, PersistenceError> {
        let affected: usize = match mutations::plan(patch)? {
            PatchPlan::Fields(changes) => {
                mutations::admins::update_admin_fields(&mut self.conn, id, changes)?
            }
            PatchPlan::Lifecycle(change) => {
                mutations::admins::set_admin_lifecycle(&mut self.conn, id, change)?
            }
        };
        Ok(affected_rows(affected))
    }

    fn delete_by_id(&mut self, id: &str) -> Result<u64, PersistenceError> {
        mutations::admins::delete_admin(&mut self.conn, id).map(affected_rows)
    }
}

impl Store<Teacher> for Persistence {
    fn insert(&mut self, entity: &Teacher) -> Result<(), PersistenceError> {
        mutations::teachers::insert_teacher(&mut self.conn, entity)
    }

    fn find_one(&mut self, query: &FindOne) -> Result<Option<Teacher>, PersistenceError> {
        queries::teachers::find_teacher(&mut self.conn, query)
    }

    fn find_many(&mut self, query: &FindMany) -> Result<(Vec<Teacher>, u64), PersistenceError> {
        queries::teachers::find_teachers(&mut self.conn, query)
    }

    fn update_by_id(
        &mut self,
        id: &str,
        patch: &Patch<hmhy_domain::TeacherChanges>,
    ) -> Result<u64, PersistenceError> {
        let affected: usize = match mutations::plan(patch)? {
            PatchPlan::Fields(changes) => {
                mutations::teachers::update_teacher_fields(&mut self.conn, id, changes)?
            }
            PatchPlan::Lifecycle(change) => {
                mutations::teachers::set_teacher_lifecycle(&mut self.conn, id, change)?
            }
        };
        Ok(affected_rows(affected))
    }

    fn delete_by_id(&mut self, id: &str) -> Result<u64, PersistenceError> {
        mutations::teachers::delete_teacher(&mut self.conn, id).map(affected_rows)
    }
}

impl Store<Student> for Persistence {
    fn insert(&mut self, entity: &Student) -> Result<(), PersistenceError> {
        mutations::students::insert_student(&mut self.conn, entity)
    }

    fn find_one(&mut self, query: &FindOne) -> Result<Option<Student>, PersistenceError> {
        queries::students::find_student(&mut self.conn, query)
    }

    fn find_many(&mut self, query: &FindMany) -> Result<(Vec<Student>, u64), PersistenceError> {
        queries::students::find_students(&mut self.conn, query)
    }

    fn update_by_id(
        &mut self,
        id: &str,
        patch: &Patch<hmhy_domain::StudentChanges>,
    ) -> Result<u64, PersistenceError> {
        let affected: usize = match mutations::plan(patch)? {
            PatchPlan::Fields(changes) => {
                mutations::students::update_student_fields(&mut self.conn, id, changes)?
            }
            PatchPlan::Lifecycle(change) => {
                mutations::students::set_student_lifecycle(&mut self.conn, id, change)?
            }
        };
        Ok(affected_rows(affected))
    }

    fn delete_by_id(&mut self, id: &str) -> Result<u64, PersistenceError> {
        mutations::students::delete_student(&mut self.conn, id).map(affected_rows)
    }
}
