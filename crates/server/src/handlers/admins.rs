// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin account handlers.
//!
//! Listing, reads, toggles and deletion go through the shared handlers in
//! [`super::crud`]; creation and updates hash passwords first.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use hmhy_api::{BaseService, SuccessEnvelope, prepare_admin_changes, prepare_new_admin};
use hmhy_domain::{Admin, AdminChanges, CreateAdminRequest, NewAdmin, UpdateAdminRequest};
use hmhy_persistence::Persistence;
use tokio::sync::MutexGuard;

use super::respond;
use crate::extract::JsonBody;
use crate::http_error::HttpError;
use crate::router::AppState;

/// Handler for POST `/admins`.
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(request): JsonBody<CreateAdminRequest>,
) -> Result<(StatusCode, Json<SuccessEnvelope<Admin>>), HttpError> {
    let new_admin: NewAdmin = prepare_new_admin(request)?;

    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<Admin, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(respond(service.create(new_admin)?))
}

/// Handler for PATCH `/admins/{id}`.
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateAdminRequest>,
) -> Result<Json<SuccessEnvelope<Option<Admin>>>, HttpError> {
    let changes: AdminChanges = prepare_admin_changes(request)?;

    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<Admin, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.update(&id, changes)?))
}
