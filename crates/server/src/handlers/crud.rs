// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handlers shared by every resource.
//!
//! Each is instantiated per entity when the router is built, e.g.
//! `crud::list::<Teacher>`.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use hmhy_api::{ApiError, BaseService, PaginatedEnvelope, SuccessEnvelope, UpdateOutcome};
use hmhy_domain::Entity;
use hmhy_persistence::{Persistence, Store};
use serde_json::{Map, Value};
use tokio::sync::MutexGuard;

use super::{GetQuery, ListQuery, SoftDeleteBody, StatusQuery};
use crate::extract::QueryParams;
use crate::http_error::HttpError;
use crate::router::AppState;
use crate::session::CurrentActor;

/// Handler for GET `/{resource}`.
pub async fn list<E>(
    State(app_state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<PaginatedEnvelope<E>>, HttpError>
where
    E: Entity,
    Persistence: Store<E>,
{
    let request = query.page_request();
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<E, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.list(query.into_filter(), request)?))
}

/// Handler for GET `/{resource}/{id}`.
pub async fn get_by_id<E>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<GetQuery>,
) -> Result<Json<SuccessEnvelope<Value>>, HttpError>
where
    E: Entity,
    Persistence: Store<E>,
{
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<E, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.get_by_id(&id, &query.options())?))
}

/// Handler for PATCH `/{resource}/{id}/soft-delete`.
///
/// The body `{"reason": ...}` may be omitted.
pub async fn soft_delete<E>(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SuccessEnvelope<UpdateOutcome>>, HttpError>
where
    E: Entity,
    Persistence: Store<E>,
{
    let reason: Option<String> = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<SoftDeleteBody>(&body)
            .map_err(|e| ApiError::ValidationFailed(vec![e.to_string()]))?
            .reason
    };

    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<E, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.soft_delete(&id, reason, &actor.id)?))
}

/// Handler for PATCH `/{resource}/{id}/restore`.
pub async fn restore<E>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessEnvelope<UpdateOutcome>>, HttpError>
where
    E: Entity,
    Persistence: Store<E>,
{
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<E, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.restore(&id)?))
}

/// Handler for PATCH `/{resource}/{id}/status`.
pub async fn toggle_status<E>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<StatusQuery>,
) -> Result<Json<SuccessEnvelope<Value>>, HttpError>
where
    E: Entity,
    Persistence: Store<E>,
{
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<E, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.toggle_status(&id, query.field.as_deref())?))
}

/// Handler for DELETE `/{resource}/{id}`.
pub async fn delete<E>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessEnvelope<Map<String, Value>>>, HttpError>
where
    E: Entity,
    Persistence: Store<E>,
{
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<E, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.delete(&id)?))
}
