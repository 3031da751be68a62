// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity reads.
//!
//! Each submodule owns the row struct of its table and converts rows into
//! domain records. Timestamps are stored as fixed-width UTC text so that
//! lexical order equals chronological order.

pub mod admins;
pub mod students;
pub mod teachers;

use diesel::BoxableExpression;
use diesel::expression_methods::BoolExpressionMethods;
use diesel::sql_types::{Bool, Nullable};
use diesel::sqlite::Sqlite;
use hmhy_domain::SoftState;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::PersistenceError;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

/// A boxed `WHERE` condition on table `T`.
pub type Condition<T> = Box<dyn BoxableExpression<T, Sqlite, SqlType = Nullable<Bool>>>;

/// Joins conditions with `OR`; `None` when there are none.
pub fn any_of<T: 'static>(conditions: Vec<Condition<T>>) -> Option<Condition<T>> {
    conditions
        .into_iter()
        .reduce(|acc, next| Box::new(acc.or::<_, Nullable<Bool>>(next)))
}

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(value.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT)?)
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the text is not in the storage format.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)?.assume_utc())
}

/// Current time in storage format.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}

pub fn to_flag(value: bool) -> i32 {
    i32::from(value)
}

pub const fn from_flag(value: i32) -> bool {
    value != 0
}

pub const fn soft_state(
    is_active: i32,
    is_deleted: i32,
    deletion_reason: Option<String>,
    deleted_by: Option<String>,
) -> SoftState {
    SoftState {
        is_active: from_flag(is_active),
        is_deleted: from_flag(is_deleted),
        deletion_reason,
        deleted_by,
    }
}
