// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hmhy_domain::{Student, StudentChanges};
use tracing::{debug, info};

use super::lifecycle_fn;
use crate::diesel_schema::students;
use crate::error::PersistenceError;
use crate::queries::{format_timestamp, now_timestamp, to_flag};

#[derive(AsChangeset)]
#[diesel(table_name = students)]
struct StudentChangeset<'a> {
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    phone_number: Option<&'a str>,
    email: Option<&'a str>,
    updated_at: String,
}

/// Inserts a new student.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if the phone number is
/// taken, or another error if the write fails.
pub fn insert_student(
    conn: &mut SqliteConnection,
    student: &Student,
) -> Result<(), PersistenceError> {
    info!(id = %student.id, "Inserting student");

    diesel::insert_into(students::table)
        .values((
            students::id.eq(&student.id),
            students::first_name.eq(&student.first_name),
            students::last_name.eq(&student.last_name),
            students::phone_number.eq(&student.phone_number),
            students::email.eq(student.email.as_deref()),
            students::is_active.eq(to_flag(student.state.is_active)),
            students::is_deleted.eq(to_flag(student.state.is_deleted)),
            students::deletion_reason.eq(student.state.deletion_reason.as_deref()),
            students::deleted_by.eq(student.state.deleted_by.as_deref()),
            students::created_at.eq(format_timestamp(student.created_at)?),
            students::updated_at.eq(format_timestamp(student.updated_at)?),
        ))
        .execute(conn)?;

    Ok(())
}

/// Applies field changes to a student.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if a new phone number
/// is taken, or another error if the write fails.
pub fn update_student_fields(
    conn: &mut SqliteConnection,
    id: &str,
    changes: &StudentChanges,
) -> Result<usize, PersistenceError> {
    debug!(id, "Updating student fields");

    let changeset: StudentChangeset<'_> = StudentChangeset {
        first_name: changes.first_name.as_deref(),
        last_name: changes.last_name.as_deref(),
        phone_number: changes.phone_number.as_deref(),
        email: changes.email.as_deref(),
        updated_at: now_timestamp()?,
    };

    Ok(diesel::update(students::table.filter(students::id.eq(id)))
        .set(&changeset)
        .execute(conn)?)
}

/// Permanently removes a student.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_student(conn: &mut SqliteConnection, id: &str) -> Result<usize, PersistenceError> {
    info!(id, "Deleting student");
    Ok(diesel::delete(students::table.filter(students::id.eq(id))).execute(conn)?)
}

lifecycle_fn! {
    /// Applies a soft-delete, restore or activation change to a student.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_student_lifecycle for students
}
