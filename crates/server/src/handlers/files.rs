// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
};
use hmhy_api::{ApiError, SuccessEnvelope, created, ok, translate_domain_error};
use hmhy_domain::{FileCategory, validate_upload};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::respond;
use crate::extract::JsonBody;
use crate::http_error::HttpError;
use crate::router::AppState;

const OCTET_STREAM: &str = "application/octet-stream";

/// One stored upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub url: String,
    pub category: &'static str,
    pub size: u64,
}

/// Body of DELETE `/files`.
#[derive(Debug, Deserialize)]
pub struct DeleteFileRequest {
    pub url: String,
}

/// Handler for POST `/files`.
///
/// Every multipart field carrying a file name is checked against the upload
/// policy and stored. Fields without a file name are ignored.
pub async fn upload(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SuccessEnvelope<Vec<StoredFile>>>), HttpError> {
    let mut stored: Vec<StoredFile> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(String::from) else {
            debug!(name = ?field.name(), "Skipping non-file field");
            continue;
        };
        let mime: String = field.content_type().unwrap_or(OCTET_STREAM).to_string();
        let bytes: Bytes = field.bytes().await?;
        let size: u64 = u64::try_from(bytes.len()).unwrap_or(u64::MAX);

        let category: FileCategory =
            validate_upload(&mime, size).map_err(|e| translate_domain_error(&e))?;
        let url: String = app_state.files.write(&bytes, &file_name).await?;

        stored.push(StoredFile {
            url,
            category: category.label(),
            size,
        });
    }

    if stored.is_empty() {
        return Err(ApiError::ValidationFailed(vec![String::from("File is required")]).into());
    }

    Ok(respond(created(stored)))
}

/// Handler for DELETE `/files`.
pub async fn delete(
    State(app_state): State<AppState>,
    JsonBody(request): JsonBody<DeleteFileRequest>,
) -> Result<Json<SuccessEnvelope<Map<String, Value>>>, HttpError> {
    app_state.files.delete(&request.url).await?;
    Ok(Json(ok(Map::new())))
}
