// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capabilities shared by every stored entity.
//!
//! The generic repository facade and the store are written against the
//! [`Entity`] trait; concrete records live in [`crate::types`].

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::DomainError;

/// Wire name of the default toggleable flag.
pub const ACTIVE_FLAG: &str = "isActive";

/// Lifecycle flags carried by every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftState {
    /// Whether the entity is enabled.
    pub is_active: bool,
    /// Whether the entity has been soft-deleted.
    pub is_deleted: bool,
    /// Free-text reason given at soft deletion.
    pub deletion_reason: Option<String>,
    /// Id of the admin who soft-deleted the entity.
    pub deleted_by: Option<String>,
}

impl Default for SoftState {
    fn default() -> Self {
        Self {
            is_active: true,
            is_deleted: false,
            deletion_reason: None,
            deleted_by: None,
        }
    }
}

/// A change applied to a single stored entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<C> {
    /// Entity-specific field changes. `None` fields are left untouched.
    Changes(C),
    /// Marks the entity deleted, recording why and by whom.
    SoftDelete {
        /// Free-text reason.
        reason: Option<String>,
        /// Id of the acting admin.
        deleted_by: String,
    },
    /// Clears the deleted flag together with its reason and actor.
    Restore,
    /// Sets a boolean flag identified by its wire name.
    SetFlag {
        /// Wire name of the flag, one of [`Entity::STATUS_FIELDS`].
        field: String,
        /// The new value.
        value: bool,
    },
}

/// A record managed through the generic repository facade.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Singular resource name used in logs and messages.
    const RESOURCE: &'static str;

    /// Wire names of the text fields searched by list queries. A query may
    /// narrow the search to one of them.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Wire names of the attributes list queries may filter on by equality.
    const FILTER_FIELDS: &'static [&'static str] = &[];

    /// Wire names of the boolean fields that may be toggled.
    const STATUS_FIELDS: &'static [&'static str] = &[ACTIVE_FLAG];

    /// Input accepted on creation.
    type Create: Send;

    /// Partial update input.
    type Changes: Send + Sync;

    /// Builds a new entity from validated input.
    ///
    /// # Arguments
    ///
    /// * `id` - The freshly generated identifier
    /// * `input` - The creation input
    /// * `now` - Creation timestamp, used for both `created_at` and `updated_at`
    fn from_create(id: String, input: Self::Create, now: OffsetDateTime) -> Self;

    /// The entity identifier.
    fn id(&self) -> &str;

    /// The lifecycle flags.
    fn soft_state(&self) -> &SoftState;

    /// Brings a filter value for one of [`Entity::FILTER_FIELDS`] into its
    /// stored form.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be stored in that field.
    fn normalize_filter(_field: &str, value: &str) -> Result<String, DomainError> {
        Ok(value.trim().to_string())
    }

    /// Reads a toggleable boolean flag by wire name.
    ///
    /// Returns `None` if the entity has no such flag.
    fn status_flag(&self, field: &str) -> Option<bool> {
        match field {
            ACTIVE_FLAG if Self::STATUS_FIELDS.contains(&ACTIVE_FLAG) => {
                Some(self.soft_state().is_active)
            }
            _ => None,
        }
    }
}
