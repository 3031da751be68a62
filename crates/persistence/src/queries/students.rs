// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use hmhy_domain::Student;
use tracing::debug;

use super::{Condition, any_of, parse_timestamp, soft_state, to_flag};
use crate::diesel_schema::students;
use crate::error::PersistenceError;
use crate::sqlite::fold_case;
use crate::store::{FindMany, FindOne};

#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(Sqlite))]
struct StudentRow {
    id: String,
    first_name: String,
    last_name: String,
    phone_number: String,
    email: Option<String>,
    is_active: i32,
    is_deleted: i32,
    deletion_reason: Option<String>,
    deleted_by: Option<String>,
    created_at: String,
    updated_at: String,
}

impl StudentRow {
    fn into_student(self) -> Result<Student, PersistenceError> {
        Ok(Student {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
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

fn search_column(field: &str, pattern: &str) -> Result<Condition<students::table>, PersistenceError> {
    let pattern: String = pattern.to_string();
    let condition: Condition<students::table> = match field {
        "firstName" => Box::new(
            fold_case(students::first_name.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        "lastName" => Box::new(
            fold_case(students::last_name.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        "phoneNumber" => Box::new(
            fold_case(students::phone_number.nullable())
                .like(pattern)
                .escape('\\'),
        ),
        other => return Err(PersistenceError::UnknownField(other.to_string())),
    };
    Ok(condition)
}

fn filtered(query: &FindMany) -> Result<students::BoxedQuery<'static, Sqlite>, PersistenceError> {
    let mut statement: students::BoxedQuery<'static, Sqlite> = students::table.into_boxed();

    if !query.include_deleted {
        statement = statement.filter(students::is_deleted.eq(0));
    }
    if let Some(active) = query.is_active {
        statement = statement.filter(students::is_active.eq(to_flag(active)));
    }
    if let Some((field, _)) = query.attributes.first() {
        return Err(PersistenceError::UnknownField((*field).to_string()));
    }
    if let Some(pattern) = query.like_pattern() {
        let columns: Vec<Condition<students::table>> = query
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

/// Retrieves a student by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
/// Returns `Ok(None)` if no matching student exists.
pub fn find_student(
    conn: &mut SqliteConnection,
    query: &FindOne,
) -> Result<Option<Student>, PersistenceError> {
    debug!(id = %query.id, include_deleted = query.include_deleted, "Looking up student");

    let mut statement: students::BoxedQuery<'_, Sqlite> =
        students::table.filter(students::id.eq(&query.id)).into_boxed();
    if !query.include_deleted {
        statement = statement.filter(students::is_deleted.eq(0));
    }

    statement
        .select(StudentRow::as_select())
        .first(conn)
        .optional()?
        .map(StudentRow::into_student)
        .transpose()
}

/// Lists one window of students with the total match count.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn find_students(
    conn: &mut SqliteConnection,
    query: &FindMany,
) -> Result<(Vec<Student>, u64), PersistenceError> {
    let total: i64 = filtered(query)?.count().get_result(conn)?;

    let rows: Vec<StudentRow> = filtered(query)?
        .order((students::created_at.desc(), students::id.asc()))
        .offset(query.offset())
        .limit(query.limit())
        .select(StudentRow::as_select())
        .load(conn)?;

    let items: Vec<Student> = rows
        .into_iter()
        .map(StudentRow::into_student)
        .collect::<Result<Vec<Student>, PersistenceError>>()?;

    debug!(total, returned = items.len(), "Listed students");
    Ok((items, u64::try_from(total).unwrap_or_default()))
}
