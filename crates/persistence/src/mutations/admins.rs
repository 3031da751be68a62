// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hmhy_domain::{Admin, AdminChanges};
use tracing::{debug, info};

use super::lifecycle_fn;
use crate::diesel_schema::admins;
use crate::error::PersistenceError;
use crate::queries::{format_timestamp, now_timestamp, to_flag};

#[derive(AsChangeset)]
#[diesel(table_name = admins)]
struct AdminChangeset<'a> {
    username: Option<&'a str>,
    phone_number: Option<&'a str>,
    password_hash: Option<&'a str>,
    updated_at: String,
}

/// Inserts a new admin.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if the username or
/// phone number is taken, or another error if the write fails.
pub fn insert_admin(conn: &mut SqliteConnection, admin: &Admin) -> Result<(), PersistenceError> {
    info!(id = %admin.id, username = %admin.username, role = %admin.role, "Inserting admin");

    diesel::insert_into(admins::table)
        .values((
            admins::id.eq(&admin.id),
            admins::username.eq(&admin.username),
            admins::phone_number.eq(&admin.phone_number),
            admins::password_hash.eq(&admin.password_hash),
            admins::role.eq(admin.role.as_str()),
            admins::is_active.eq(to_flag(admin.state.is_active)),
            admins::is_deleted.eq(to_flag(admin.state.is_deleted)),
            admins::deletion_reason.eq(admin.state.deletion_reason.as_deref()),
            admins::deleted_by.eq(admin.state.deleted_by.as_deref()),
            admins::created_at.eq(format_timestamp(admin.created_at)?),
            admins::updated_at.eq(format_timestamp(admin.updated_at)?),
        ))
        .execute(conn)?;

    Ok(())
}

/// Applies field changes to an admin.
///
/// # Errors
///
/// Returns [`PersistenceError::ConstraintViolation`] if a new username or
/// phone number is taken, or another error if the write fails.
pub fn update_admin_fields(
    conn: &mut SqliteConnection,
    id: &str,
    changes: &AdminChanges,
) -> Result<usize, PersistenceError> {
    debug!(id, "Updating admin fields");

    let changeset: AdminChangeset<'_> = AdminChangeset {
        username: changes.username.as_deref(),
        phone_number: changes.phone_number.as_deref(),
        password_hash: changes.password_hash.as_deref(),
        updated_at: now_timestamp()?,
    };

    Ok(diesel::update(admins::table.filter(admins::id.eq(id)))
        .set(&changeset)
        .execute(conn)?)
}

/// Permanently removes an admin.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_admin(conn: &mut SqliteConnection, id: &str) -> Result<usize, PersistenceError> {
    info!(id, "Deleting admin");
    Ok(diesel::delete(admins::table.filter(admins::id.eq(id))).execute(conn)?)
}

lifecycle_fn! {
    /// Applies a soft-delete, restore or activation change to an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_admin_lifecycle for admins
}
