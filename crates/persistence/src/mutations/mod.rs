// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity writes.
//!
//! Field changes are entity-specific changesets. Lifecycle changes (soft
//! delete, restore, activation) touch the same columns on every table and
//! are generated per table by [`lifecycle_fn!`].

use hmhy_domain::{ACTIVE_FLAG, Patch};

use crate::error::PersistenceError;

/// A change to the soft-state columns shared by every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleChange<'a> {
    SoftDelete {
        reason: Option<&'a str>,
        deleted_by: &'a str,
    },
    Restore,
    Activate(bool),
}

/// How a patch maps onto columns.
pub enum PatchPlan<'a, C> {
    Fields(&'a C),
    Lifecycle(LifecycleChange<'a>),
}

/// Resolves a patch into either entity fields or a lifecycle change.
///
/// # Errors
///
/// Returns [`PersistenceError::UnknownField`] if a flag patch names a flag
/// no table carries.
pub fn plan<C>(patch: &Patch<C>) -> Result<PatchPlan<'_, C>, PersistenceError> {
    match patch {
        Patch::Changes(changes) => Ok(PatchPlan::Fields(changes)),
        Patch::SoftDelete { reason, deleted_by } => {
            Ok(PatchPlan::Lifecycle(LifecycleChange::SoftDelete {
                reason: reason.as_deref(),
                deleted_by,
            }))
        }
        Patch::Restore => Ok(PatchPlan::Lifecycle(LifecycleChange::Restore)),
        Patch::SetFlag { field, value } => {
            if field == ACTIVE_FLAG {
                Ok(PatchPlan::Lifecycle(LifecycleChange::Activate(*value)))
            } else {
                Err(PersistenceError::UnknownField(field.clone()))
            }
        }
    }
}

/// Generates a function applying a [`LifecycleChange`] to one table.
///
/// The macro only substitutes the table module; the body is identical for
/// every table.
macro_rules! lifecycle_fn {
    ($(#[$meta:meta])* $vis:vis fn $name:ident for $table:ident) => {
        $(#[$meta])*
        $vis fn $name(
            conn: &mut diesel::SqliteConnection,
            id: &str,
            change: crate::mutations::LifecycleChange<'_>,
        ) -> Result<usize, crate::error::PersistenceError> {
            use crate::diesel_schema::$table;
            use crate::mutations::LifecycleChange;
            use diesel::prelude::*;

            let now: String = crate::queries::now_timestamp()?;
            let target = $table::table.filter($table::id.eq(id));

            let affected: usize = match change {
                LifecycleChange::SoftDelete { reason, deleted_by } => diesel::update(target)
                    .set((
                        $table::is_deleted.eq(1),
                        $table::deletion_reason.eq(reason),
                        $table::deleted_by.eq(Some(deleted_by)),
                        $table::updated_at.eq(&now),
                    ))
                    .execute(conn)?,
                LifecycleChange::Restore => diesel::update(target)
                    .set((
                        $table::is_deleted.eq(0),
                        $table::deletion_reason.eq(None::<&str>),
                        $table::deleted_by.eq(None::<&str>),
                        $table::updated_at.eq(&now),
                    ))
                    .execute(conn)?,
                LifecycleChange::Activate(value) => diesel::update(target)
                    .set((
                        $table::is_active.eq(crate::queries::to_flag(value)),
                        $table::updated_at.eq(&now),
                    ))
                    .execute(conn)?,
            };

            tracing::debug!(id, ?change, affected, table = stringify!($table), "Applied lifecycle change");
            Ok(affected)
        }
    };
}

pub(crate) use lifecycle_fn;

pub mod admins;
pub mod students;
pub mod teachers;
