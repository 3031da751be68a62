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
    CreateStudent, Student, StudentChanges, validate_create_student, validate_student_changes,
};
use hmhy_persistence::Persistence;
use tokio::sync::MutexGuard;

use super::respond;
use crate::extract::JsonBody;
use crate::http_error::HttpError;
use crate::router::AppState;

/// Handler for POST `/students`.
///
/// Students registered with an email address receive a welcome mail.
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(input): JsonBody<CreateStudent>,
) -> Result<(StatusCode, Json<SuccessEnvelope<Student>>), HttpError> {
    validate_create_student(&input)?;

    let envelope: SuccessEnvelope<Student> = {
        let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
        let mut service: BaseService<Student, &mut Persistence> =
            BaseService::new(&mut *persistence);
        service.create(input)?
    };

    let student: &Student = &envelope.data;
    if let Some(email) = student.email.as_deref().filter(|email| !email.trim().is_empty()) {
        app_state
            .mail
            .send_welcome(email, &student.first_name, &student.last_name)
            .map_err(|e| ApiError::Internal {
                message: format!("Welcome email failed: {e}"),
            })?;
    }

    Ok(respond(envelope))
}

/// Handler for PATCH `/students/{id}`.
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(changes): JsonBody<StudentChanges>,
) -> Result<Json<SuccessEnvelope<Option<Student>>>, HttpError> {
    validate_student_changes(&changes)?;

    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<Student, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(service.update(&id, changes)?))
}
