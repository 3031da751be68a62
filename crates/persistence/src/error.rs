// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Store failures.
///
/// Only [`PersistenceError::ConstraintViolation`] is meaningful to callers;
/// everything else is an internal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database could not be opened.
    Connection(String),
    /// Embedded migrations could not be applied.
    Migration(String),
    /// A statement failed for a reason other than a constraint.
    Query(String),
    /// A uniqueness or check constraint rejected the write.
    ConstraintViolation(String),
    /// A stored column could not be decoded into its domain type.
    CorruptRow(String),
    /// The database path is not valid UTF-8.
    InvalidPath,
    /// A flag patch names a column the table does not have.
    UnknownField(String),
}

impl PersistenceError {
    /// Returns true if the error signals a constraint violation.
    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "Cannot open database: {msg}"),
            Self::Migration(msg) => write!(f, "Migration failed: {msg}"),
            Self::Query(msg) => write!(f, "Query failed: {msg}"),
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::CorruptRow(msg) => write!(f, "Unreadable row: {msg}"),
            Self::InvalidPath => write!(f, "Database path is not valid UTF-8"),
            Self::UnknownField(field) => write!(f, "Unknown field: {field}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::Connection(err.to_string())
    }
}

impl From<time::error::Parse> for PersistenceError {
    fn from(err: time::error::Parse) -> Self {
        Self::CorruptRow(err.to_string())
    }
}

impl From<time::error::Format> for PersistenceError {
    fn from(err: time::error::Format) -> Self {
        Self::CorruptRow(err.to_string())
    }
}
