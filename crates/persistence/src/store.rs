// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage capability consumed by the repository facade.

use hmhy_domain::{Entity, Patch};

use crate::error::PersistenceError;

/// Lookup of a single entity by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOne {
    pub id: String,
    /// When false, soft-deleted rows are treated as absent.
    pub include_deleted: bool,
}

impl FindOne {
    /// Looks up `id` among live rows only.
    #[must_use]
    pub fn live(id: &str) -> Self {
        Self {
            id: id.to_string(),
            include_deleted: false,
        }
    }

    /// Looks up `id` regardless of its deletion state.
    #[must_use]
    pub fn any(id: &str) -> Self {
        Self {
            id: id.to_string(),
            include_deleted: true,
        }
    }
}

/// A filtered, windowed list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindMany {
    /// Case-insensitive substring matched against `search_fields`.
    pub search: Option<String>,
    /// Wire names of the fields the search term is matched against. A row
    /// matches if any of them does. With no fields the term is ignored.
    pub search_fields: Vec<&'static str>,
    /// Case-insensitive equality filters as `(wire name, value)` pairs, all
    /// of which must hold.
    pub attributes: Vec<(&'static str, String)>,
    /// Restricts results to the given activity state.
    pub is_active: Option<bool>,
    /// When false, soft-deleted rows are excluded.
    pub include_deleted: bool,
    /// Rows to skip.
    pub skip: u64,
    /// Maximum rows to return.
    pub take: u64,
}

impl FindMany {
    /// Returns the lowercased `LIKE` pattern for the search term, or `None`
    /// when there is no non-blank term or nothing to search.
    ///
    /// `%`, `_` and `\` in the term are escaped with `\`.
    #[must_use]
    pub fn like_pattern(&self) -> Option<String> {
        if self.search_fields.is_empty() {
            return None;
        }
        let term: &str = self.search.as_deref()?.trim();
        if term.is_empty() {
            return None;
        }

        let mut pattern: String = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.to_lowercase().chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }

    /// `skip` as a SQL offset.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// `take` as a SQL limit.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::try_from(self.take).unwrap_or(i64::MAX)
    }
}

/// Storage for one entity type.
///
/// Implementations never interpret business rules; the facade decides what
/// to read and write. Uniqueness failures surface as
/// [`PersistenceError::ConstraintViolation`].
pub trait Store<E: Entity> {
    /// Persists a new entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or violates a constraint.
    fn insert(&mut self, entity: &E) -> Result<(), PersistenceError>;

    /// Reads one entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails. A missing row is `Ok(None)`.
    fn find_one(&mut self, query: &FindOne) -> Result<Option<E>, PersistenceError>;

    /// Reads one window of entities together with the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find_many(&mut self, query: &FindMany) -> Result<(Vec<E>, u64), PersistenceError>;

    /// Applies a patch and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or violates a constraint.
    fn update_by_id(&mut self, id: &str, patch: &Patch<E::Changes>)
    -> Result<u64, PersistenceError>;

    /// Removes an entity permanently and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_by_id(&mut self, id: &str) -> Result<u64, PersistenceError>;
}

impl<E: Entity, S: Store<E> + ?Sized> Store<E> for &mut S {
    fn insert(&mut self, entity: &E) -> Result<(), PersistenceError> {
        (**self).insert(entity)
    }

    fn find_one(&mut self, query: &FindOne) -> Result<Option<E>, PersistenceError> {
        (**self).find_one(query)
    }

    fn find_many(&mut self, query: &FindMany) -> Result<(Vec<E>, u64), PersistenceError> {
        (**self).find_many(query)
    }

    fn update_by_id(
        &mut self,
        id: &str,
        patch: &Patch<E::Changes>,
    ) -> Result<u64, PersistenceError> {
        (**self).update_by_id(id, patch)
    }

    fn delete_by_id(&mut self, id: &str) -> Result<u64, PersistenceError> {
        (**self).delete_by_id(id)
    }
}
