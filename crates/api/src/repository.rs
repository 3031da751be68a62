// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The generic repository facade.
//!
//! [`BaseService`] implements create, list, get, update, soft delete,
//! restore, status toggle and hard delete once for every [`Entity`], on top
//! of any [`Store`]. It holds no state of its own: every mutating call reads
//! the row first, so `NotFound` is reported before anything is written.
//!
//! Read-then-write sequences are not transactional. A row removed between
//! the existence check and the write makes the write a silent no-op, and two
//! concurrent toggles may both observe the same flag value.

use hmhy_domain::{ACTIVE_FLAG, Entity, PageRequest, PageResult, Patch, ValidationErrors};
use hmhy_persistence::{FindMany, FindOne, Store};
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::envelope::{PaginatedEnvelope, SuccessEnvelope, created, ok, paginated};
use crate::error::ApiError;

/// Filters applied by [`BaseService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Case-insensitive substring matched against the entity's search fields.
    pub search: Option<String>,
    /// Narrows the search to one of [`Entity::SEARCH_FIELDS`].
    pub search_field: Option<String>,
    /// Equality filters on [`Entity::FILTER_FIELDS`], as `(wire name, value)`.
    pub attributes: Vec<(String, String)>,
    pub is_active: Option<bool>,
    pub include_deleted: bool,
}

/// Resolves the wire names of a list filter against the entity's field lists.
fn resolve_fields<E: Entity>(
    search_field: Option<&str>,
    attributes: Vec<(String, String)>,
) -> Result<(Vec<&'static str>, Vec<(&'static str, String)>), ApiError> {
    let mut errors: ValidationErrors = ValidationErrors::new();

    let search_fields: Vec<&'static str> = match search_field.map(str::trim) {
        None | Some("") => E::SEARCH_FIELDS.to_vec(),
        Some(wanted) => {
            let found: Option<&'static str> =
                E::SEARCH_FIELDS.iter().copied().find(|f| *f == wanted);
            if found.is_none() {
                errors.push(format!(
                    "searchField must be one of: {}",
                    E::SEARCH_FIELDS.join(", ")
                ));
            }
            found.into_iter().collect()
        }
    };

    let mut resolved: Vec<(&'static str, String)> = Vec::with_capacity(attributes.len());
    for (field, value) in attributes {
        let Some(name) = E::FILTER_FIELDS.iter().copied().find(|f| *f == field) else {
            errors.push(format!("Cannot filter {}s by {field}", E::RESOURCE));
            continue;
        };
        match E::normalize_filter(name, &value) {
            Ok(value) => resolved.push((name, value)),
            Err(e) => errors.push(e.to_string()),
        }
    }

    errors.into_result()?;
    Ok((search_fields, resolved))
}

/// Options for [`BaseService::get_by_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Wire names of the fields to return. `id` is always returned.
    pub fields: Option<Vec<String>>,
    pub include_deleted: bool,
}

impl GetOptions {
    /// Parses a comma-separated field list. Blank entries are ignored and a
    /// list with no entries selects every field.
    #[must_use]
    pub fn with_field_list(fields: Option<&str>, include_deleted: bool) -> Self {
        let fields: Option<Vec<String>> = fields
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect::<Vec<String>>()
            })
            .filter(|list| !list.is_empty());

        Self {
            fields,
            include_deleted,
        }
    }
}

/// Rows affected by a lifecycle write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub affected: u64,
}

/// Generic CRUD facade over a [`Store`].
pub struct BaseService<E, S> {
    store: S,
    entity: PhantomData<fn() -> E>,
}

fn not_found(resource: &str) -> ApiError {
    let mut chars = resource.chars();
    let name: String = chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect::<String>()
    });
    ApiError::NotFound {
        message: format!("{name} not found"),
    }
}

/// Truncates to the microsecond precision the store keeps.
fn storage_now() -> OffsetDateTime {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    now.replace_microsecond(now.microsecond()).unwrap_or(now)
}

impl<E: Entity, S: Store<E>> BaseService<E, S> {
    /// Creates a facade over `store`.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            entity: PhantomData,
        }
    }

    /// Reads an entity for a mutation, including soft-deleted rows.
    fn existing(&mut self, id: &str) -> Result<E, ApiError> {
        self.store
            .find_one(&FindOne::any(id))?
            .ok_or_else(|| not_found(E::RESOURCE))
    }

    /// Creates an entity from validated input.
    ///
    /// Uniqueness is left to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] if the insert fails, including on a
    /// constraint violation.
    pub fn create(&mut self, input: E::Create) -> Result<SuccessEnvelope<E>, ApiError> {
        let id: String = Uuid::new_v4().to_string();
        let entity: E = E::from_create(id, input, storage_now());

        self.store.insert(&entity)?;
        info!(resource = E::RESOURCE, id = %entity.id(), "Created");
        Ok(created(entity))
    }

    /// Lists one page of entities, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the filter names a field the
    /// entity cannot be searched or filtered by, or [`ApiError::Store`] if the
    /// read fails.
    pub fn list(
        &mut self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<PaginatedEnvelope<E>, ApiError> {
        let (skip, take): (u64, u64) = request.window();
        let (search_fields, attributes): (Vec<&'static str>, Vec<(&'static str, String)>) =
            resolve_fields::<E>(filter.search_field.as_deref(), filter.attributes)?;
        let query: FindMany = FindMany {
            search: filter.search,
            search_fields,
            attributes,
            is_active: filter.is_active,
            include_deleted: filter.include_deleted,
            skip,
            take,
        };

        let (items, total): (Vec<E>, u64) = self.store.find_many(&query)?;
        debug!(
            resource = E::RESOURCE,
            total,
            page = request.page(),
            page_size = request.page_size(),
            "Listed"
        );
        Ok(paginated(PageResult::new(items, total, request)))
    }

    /// Reads one entity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no row matches, or
    /// [`ApiError::Store`] if the read fails.
    pub fn find(&mut self, id: &str, include_deleted: bool) -> Result<E, ApiError> {
        let query: FindOne = FindOne {
            id: id.to_string(),
            include_deleted,
        };
        self.store
            .find_one(&query)?
            .ok_or_else(|| not_found(E::RESOURCE))
    }

    /// Reads one entity, optionally restricted to a set of fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no row matches, or
    /// [`ApiError::Store`] if the read fails.
    pub fn get_by_id(
        &mut self,
        id: &str,
        options: &GetOptions,
    ) -> Result<SuccessEnvelope<Value>, ApiError> {
        let entity: E = self.find(id, options.include_deleted)?;
        let mut value: Value = serde_json::to_value(&entity).map_err(|e| ApiError::Internal {
            message: format!("Failed to serialize {}: {e}", E::RESOURCE),
        })?;

        if let (Some(fields), Value::Object(object)) = (&options.fields, &mut value) {
            object.retain(|key, _| key == "id" || fields.iter().any(|f| f == key));
        }

        Ok(ok(value))
    }

    /// Applies field changes and returns the re-read entity.
    ///
    /// `data` is `None` when the row vanished between write and re-read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no row matches, or
    /// [`ApiError::Store`] if a read or write fails.
    pub fn update(
        &mut self,
        id: &str,
        changes: E::Changes,
    ) -> Result<SuccessEnvelope<Option<E>>, ApiError> {
        self.existing(id)?;
        let affected: u64 = self.store.update_by_id(id, &Patch::Changes(changes))?;
        info!(resource = E::RESOURCE, %id, affected, "Updated");

        let refreshed: Option<E> = self.store.find_one(&FindOne::any(id))?;
        Ok(ok(refreshed))
    }

    /// Marks an entity deleted, recording the reason and the acting admin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no row matches, or
    /// [`ApiError::Store`] if a read or write fails.
    pub fn soft_delete(
        &mut self,
        id: &str,
        reason: Option<String>,
        acting_admin_id: &str,
    ) -> Result<SuccessEnvelope<UpdateOutcome>, ApiError> {
        self.existing(id)?;
        let patch: Patch<E::Changes> = Patch::SoftDelete {
            reason,
            deleted_by: acting_admin_id.to_string(),
        };
        let affected: u64 = self.store.update_by_id(id, &patch)?;
        info!(resource = E::RESOURCE, %id, deleted_by = %acting_admin_id, "Soft deleted");
        Ok(ok(UpdateOutcome { affected }))
    }

    /// Clears the deleted flag. Restoring a live entity is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no row matches, or
    /// [`ApiError::Store`] if a read or write fails.
    pub fn restore(&mut self, id: &str) -> Result<SuccessEnvelope<UpdateOutcome>, ApiError> {
        self.existing(id)?;
        let affected: u64 = self.store.update_by_id(id, &Patch::Restore)?;
        info!(resource = E::RESOURCE, %id, "Restored");
        Ok(ok(UpdateOutcome { affected }))
    }

    /// Negates a boolean flag and returns `{id, <field>: new_value}`.
    ///
    /// # Arguments
    ///
    /// * `id` - The entity id
    /// * `field` - Wire name of the flag; defaults to `isActive`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no row matches,
    /// [`ApiError::ValidationFailed`] if the entity has no such flag, or
    /// [`ApiError::Store`] if a read or write fails.
    pub fn toggle_status(
        &mut self,
        id: &str,
        field: Option<&str>,
    ) -> Result<SuccessEnvelope<Value>, ApiError> {
        let field: &str = field.unwrap_or(ACTIVE_FLAG);
        let entity: E = self.existing(id)?;
        let current: bool = entity.status_flag(field).ok_or_else(|| {
            ApiError::ValidationFailed(vec![format!(
                "{field} is not a status field of {}",
                E::RESOURCE
            )])
        })?;

        let value: bool = !current;
        let patch: Patch<E::Changes> = Patch::SetFlag {
            field: field.to_string(),
            value,
        };
        self.store.update_by_id(id, &patch)?;
        info!(resource = E::RESOURCE, %id, field, value, "Toggled status");

        let mut data: Map<String, Value> = Map::new();
        data.insert(String::from("id"), Value::String(id.to_string()));
        data.insert(field.to_string(), Value::Bool(value));
        Ok(ok(Value::Object(data)))
    }

    /// Removes an entity permanently.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no row matches, or
    /// [`ApiError::Store`] if a read or write fails.
    pub fn delete(&mut self, id: &str) -> Result<SuccessEnvelope<Map<String, Value>>, ApiError> {
        self.existing(id)?;
        self.store.delete_by_id(id)?;
        info!(resource = E::RESOURCE, %id, "Deleted");
        Ok(ok(Map::new()))
    }
}
