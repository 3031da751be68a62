// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hmhy_domain::{Teacher, TeacherChanges};
use tracing::{debug, info};

use super::lifecycle_fn;
use crate::diesel_schema::teachers;
use crate::error::PersistenceError;
use crate::queries::{format_timestamp, now_timestamp, to_flag};

#[derive(AsChangeset)]
#[diesel(table_name = teachers)]
struct TeacherChangeset<'a> {
    full_name: Option<&'a str>,
    email: Option<&'a str>,
    phone_number: Option<&'a str>,
    specification: Option<&'static str>,
    level: Option<&'a str>,
    description: Option<&'a str>,
    hourly_price: Option<i64>,
    image_url: Option<&'a str>,
    updated_at: String,
}

/// Inserts a new teacher.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if the email or phone
/// number is taken, or another error if the write fails.
pub fn insert_teacher(
    conn: &mut SqliteConnection,
    teacher: &Teacher,
) -> Result<(), PersistenceError> {
    info!(id = %teacher.id, specification = %teacher.specification, "Inserting teacher");

    diesel::insert_into(teachers::table)
        .values((
            teachers::id.eq(&teacher.id),
            teachers::full_name.eq(&teacher.full_name),
            teachers::email.eq(&teacher.email),
            teachers::phone_number.eq(&teacher.phone_number),
            teachers::specification.eq(teacher.specification.as_str()),
            teachers::level.eq(&teacher.level),
            teachers::description.eq(teacher.description.as_deref()),
            teachers::hourly_price.eq(teacher.hourly_price),
            teachers::image_url.eq(teacher.image_url.as_deref()),
            teachers::is_active.eq(to_flag(teacher.state.is_active)),
            teachers::is_deleted.eq(to_flag(teacher.state.is_deleted)),
            teachers::deletion_reason.eq(teacher.state.deletion_reason.as_deref()),
            teachers::deleted_by.eq(teacher.state.deleted_by.as_deref()),
            teachers::created_at.eq(format_timestamp(teacher.created_at)?),
            teachers::updated_at.eq(format_timestamp(teacher.updated_at)?),
        ))
        .execute(conn)?;

    Ok(())
}

/// Applies field changes to a teacher.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if a new email or
/// phone number is taken, or another error if the write fails.
pub fn update_teacher_fields(
    conn: &mut SqliteConnection,
    id: &str,
    changes: &TeacherChanges,
) -> Result<usize, PersistenceError> {
    debug!(id, "Updating teacher fields");

    let changeset: TeacherChangeset<'_> = TeacherChangeset {
        full_name: changes.full_name.as_deref(),
        email: changes.email.as_deref(),
        phone_number: changes.phone_number.as_deref(),
        specification: changes.specification.map(|s| s.as_str()),
        level: changes.level.as_deref(),
        description: changes.description.as_deref(),
        hourly_price: changes.hourly_price,
        image_url: changes.image_url.as_deref(),
        updated_at: now_timestamp()?,
    };

    Ok(diesel::update(teachers::table.filter(teachers::id.eq(id)))
        .set(&changeset)
        .execute(conn)?)
}

/// Permanently removes a teacher.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_teacher(conn: &mut SqliteConnection, id: &str) -> Result<usize, PersistenceError> {
    info!(id, "Deleting teacher");
    Ok(diesel::delete(teachers::table.filter(teachers::id.eq(id))).execute(conn)?)
}

lifecycle_fn! {
    /// Applies a soft-delete, restore or activation change to a teacher.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_teacher_lifecycle for teachers
}
