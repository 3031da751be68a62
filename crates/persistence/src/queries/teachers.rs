// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use hmhy_domain::{Specification, Teacher};
use std::str::FromStr;
use tracing::debug;

use super::{Condition, any_of, parse_timestamp, soft_state, to_flag};
use crate::diesel_schema::teachers;
use crate::error::PersistenceError;
use crate::sqlite::fold_case;
use crate::store::{FindMany, FindOne};

#[derive(Queryable, Selectable)]
#[diesel(table_name = teachers)]
#[diesel(check_for_backend(Sqlite))]
struct TeacherRow {
    id: String,
    full_name: String,
    email: String,
    phone_number: String,
    specification: String,
    level: String,
    description: Option<String>,
    hourly_price: i64,
    image_url: Option<String>,
    is_active: i32,
    is_deleted: i32,
    deletion_reason: Option<String>,
    deleted_by: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TeacherRow {
    fn into_teacher(self) -> Result<Teacher, PersistenceError> {
        let specification: Specification = Specification::from_str(&self.specification)
            .map_err(|e| PersistenceError::CorruptRow(e.to_string()))?;

        Ok(Teacher {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            specification,
            level: self.level,
            description: self.description,
            hourly_price: self.hourly_price,
            image_url: self.image_url,
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

fn search_column(field: &str, pattern: &str) -> Result<Condition<teachers::table>, PersistenceError> {
    let pattern: String = pattern.to_string();
    let condition: Condition<teachers::table> = match field {
        "fullName" => Box::new(
            fold_case(teachers::full_name.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        "email" => Box::new(fold_case(teachers::email.nullable()).like(pattern).escape('\\')),
        "phoneNumber" => Box::new(
            fold_case(teachers::phone_number.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        "specification" => Box::new(
            fold_case(teachers::specification.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        "description" => Box::new(fold_case(teachers::description).like(pattern).escape('\\')),
        other => return Err(PersistenceError::UnknownField(other.to_string())),
    };
    Ok(condition)
}

fn attribute_column(field: &str, value: &str) -> Result<Condition<teachers::table>, PersistenceError> {
    let value: String = value.to_lowercase();
    let condition: Condition<teachers::table> = match field {
        "level" => Box::new(fold_case(teachers::level.nullable()).eq(value)),
        "specification" => Box::new(fold_case(teachers::specification.nullable()).eq(value)),
        other => return Err(PersistenceError::UnknownField(other.to_string())),
    };
    Ok(condition)
}

fn filtered(query: &FindMany) -> Result<teachers::BoxedQuery<'static, Sqlite>, PersistenceError> {
    let mut statement: teachers::BoxedQuery<'static, Sqlite> = teachers::table.into_boxed();

    if !query.include_deleted {
        statement = statement.filter(teachers::is_deleted.eq(0));
    }
    if let Some(active) = query.is_active {
        statement = statement.filter(teachers::is_active.eq(to_flag(active)));
    }
    for (field, value) in &query.attributes {
        statement = statement.filter(attribute_column(field, value)?);
    }
    if let Some(pattern) = query.like_pattern() {
        let columns: Vec<Condition<teachers::table>> = query
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

/// Retrieves a teacher by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if no matching teacher exists.
pub fn find_teacher(
    conn: &mut SqliteConnection,
    query: &FindOne,
) -> Result<Option<Teacher>, PersistenceError> {
    debug!(id = %query.id, include_deleted = query.include_deleted, "Looking up teacher");

    let mut statement: teachers::BoxedQuery<'_, Sqlite> =
        teachers::table.filter(teachers::id.eq(&query.id)).into_boxed();
    if !query.include_deleted {
        statement = statement.filter(teachers::is_deleted.eq(0));
    }

    statement
        .select(TeacherRow::as_select())
        .first(conn)
        .optional()?
        .map(TeacherRow::into_teacher)
        .transpose()
}

/// Lists one window of teachers with the total match count.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn find_teachers(
    conn: &mut SqliteConnection,
    query: &FindMany,
) -> Result<(Vec<Teacher>, u64), PersistenceError> {
    let total: i64 = filtered(query)?.count().get_result(conn)?;

    let rows: Vec<TeacherRow> = filtered(query)?
        .order((teachers::created_at.desc(), teachers::id.asc()))
        .offset(query.offset())
        .limit(query.limit())
        .select(TeacherRow::as_select())
        .load(conn)?;

    let items: Vec<Teacher> = rows
        .into_iter()
        .map(TeacherRow::into_teacher)
        .collect::<Result<Vec<Teacher>, PersistenceError>>()?;

    debug!(total, returned = items.len(), "Listed teachers");
    Ok((items, u64::try_from(total).unwrap_or_default()))
}
