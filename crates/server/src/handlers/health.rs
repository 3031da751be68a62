// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::Json;
use hmhy_api::{SuccessEnvelope, ok};
use serde_json::{Value, json};

/// Handler for GET `/health`.
#[allow(clippy::unused_async)]
pub async fn health() -> Json<SuccessEnvelope<Value>> {
    Json(ok(json!({ "status": "ok" })))
}
