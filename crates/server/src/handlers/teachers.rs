// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use hmhy_api::{ApiError, BaseService, SuccessEnvelope};
use hmhy_domain::{
    CreateTeacher, Teacher, TeacherChanges, validate_create_teacher, validate_teacher_changes,
};
use hmhy_persistence::Persistence;
use tokio::sync::MutexGuard;

use super::respond;
use crate::extract::JsonBody;
use crate::http_error::HttpError;
use crate::router::AppState;

/// Splits a full name into a first name and the rest.
fn split_name(full_name: &str) -> (&str, &str) {
    let trimmed: &str = full_name.trim();
    trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(first, rest)| (first, rest.trim()))
}

/// Handler for POST `/teachers`.
///
/// The welcome mail is sent after the insert. A mail failure fails the
/// request but leaves the teacher in place.
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(input): JsonBody<CreateTeacher>,
) -> Result<(StatusCode, Json<SuccessEnvelope<Teacher>>), HttpError> {
    validate_create_teacher(&input)?;

    let envelope: SuccessEnvelope<Teacher> = {
        let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
        let mut service: BaseService<Teacher, &mut Persistence> =
            BaseService::new(&mut *persistence);
        service.create(input)?
    };

    let (first_name, last_name) = split_name(&envelope.data.full_name);
    app_state
        .mail
        .send_welcome(&envelope.data.email, first_name, last_name)
        .map_err(|e| ApiError::Internal {
            message: format!("Welcome email failed: {e}"),
        })?;

    Ok(respond(envelope))
}

/// Handler for PATCH `/teachers/{id}`.
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(changes): JsonBody<TeacherChanges>,
) -> Result<Json<SuccessEnvelope<Option<Teacher>>>, HttpError> {
    validate_teacher_changes(&changes)?;

    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<Teacher, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.update(&id, changes)?))
}
