// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use hmhy_domain::{Admin, Role};
use std::str::FromStr;
use tracing::debug;

use super::{Condition, any_of, parse_timestamp, soft_state, to_flag};
use crate::diesel_schema::admins;
use crate::error::PersistenceError;
use crate::sqlite::fold_case;
use crate::store::{FindMany, FindOne};

#[derive(Queryable, Selectable)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(Sqlite))]
struct AdminRow {
    id: String,
    username: String,
    phone_number: String,
    password_hash: String,
    role: String,
    is_active: i32,
    is_deleted: i32,
    deletion_reason: Option<String>,
    deleted_by: Option<String>,
    created_at: String,
    updated_at: String,
}

impl AdminRow {
    fn into_admin(self) -> Result<Admin, PersistenceError> {
        let role: Role = Role::from_str(&self.role)
            .map_err(|e| PersistenceError::CorruptRow(e.to_string()))?;

        Ok(Admin {
            id: self.id,
            username: self.username,
            phone_number: self.phone_number,
            password_hash: self.password_hash,
            role,
            state: soft_state(
                self.is_active,
                self.is_deleted,
                self.deletion_reason,
                self.deleted_by,
            ),
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

fn search_column(field: &str, pattern: &str) -> Result<Condition<admins::table>, PersistenceError> {
    let pattern: String = pattern.to_string();
    let condition: Condition<admins::table> = match field {
        "username" => Box::new(
            fold_case(admins::username.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        "phoneNumber" => Box::new(
            fold_case(admins::phone_number.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        other => return Err(PersistenceError::UnknownField(other.to_string())),
    };
    Ok(condition)
}

fn filtered(query: &FindMany) -> Result<admins::BoxedQuery<'static, Sqlite>, PersistenceError> {
    let mut statement: admins::BoxedQuery<'static, Sqlite> = admins::table.into_boxed();

    if !query.include_deleted {
        statement = statement.filter(admins::is_deleted.eq(0));
    }
    if let Some(active) = query.is_active {
        statement = statement.filter(admins::is_active.eq(to_flag(active)));
    }
    if let Some((field, _)) = query.attributes.first() {
        return Err(PersistenceError::UnknownField((*field).to_string()));
    }
    if let Some(pattern) = query.like_pattern() {
        let columns: Vec<Condition<admins::table>> = query
            .search_fields
            .iter()
            .map(|field| search_column(field, &pattern))
            .collect::<Result<_, _>>()?;
        if let Some(condition) = any_of(columns) {
            statement = statement.filter(condition);
        }
    }

    Ok(statement)
}

/// Retrieves an admin by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if no matching admin exists.
pub fn find_admin(
    conn: &mut SqliteConnection,
    query: &FindOne,
) -> Result<Option<Admin>, PersistenceError> {
    debug!(id = %query.id, include_deleted = query.include_deleted, "Looking up admin");

    let mut statement: admins::BoxedQuery<'_, Sqlite> =
        admins::table.filter(admins::id.eq(&query.id)).into_boxed();
    if !query.include_deleted {
        statement = statement.filter(admins::is_deleted.eq(0));
    }

    statement
        .select(AdminRow::as_select())
        .first(conn)
        .optional()?
        .map(AdminRow::into_admin)
        .transpose()
}

/// Retrieves a live admin by username.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if no matching admin exists.
pub fn find_admin_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<Admin>, PersistenceError> {
    debug!(username, "Looking up admin by username");

    admins::table
        .filter(admins::username.eq(username))
        .filter(admins::is_deleted.eq(0))
        .select(AdminRow::as_select())
        .first(conn)
        .optional()?
        .map(AdminRow::into_admin)
        .transpose()
}

/// Returns true if any admin, deleted or not, holds the given role.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn role_exists(conn: &mut SqliteConnection, role: Role) -> Result<bool, PersistenceError> {
    let count: i64 = admins::table
        .filter(admins::role.eq(role.as_str()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists one window of admins with the total match count.
///
/// Newest admins come first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn find_admins(
    conn: &mut SqliteConnection,
    query: &FindMany,
) -> Result<(Vec<Admin>, u64), PersistenceError> {
    let total: i64 = filtered(query)?.count().get_result(conn)?;

    let rows: Vec<AdminRow> = filtered(query)?
        .order((admins::created_at.desc(), admins::id.asc()))
        .offset(query.offset())
        .limit(query.limit())
        .select(AdminRow::as_select())
        .load(conn)?;

    let items: Vec<Admin> = rows
        .into_iter()
        .map(AdminRow::into_admin)
        .collect::<Result<Vec<Admin>, PersistenceError>>()?;

    debug!(total, returned = items.len(), "Listed admins");
    Ok((items, u64::try_from(total).unwrap_or_default()))
}
