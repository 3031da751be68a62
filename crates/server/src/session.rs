// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication middleware and the current-actor extractor.
//!
//! Every non-public route is wrapped in [`require_access`] with the tags
//! the access table declares for it. The middleware verifies the bearer
//! token, evaluates the tags against the `id` path parameter and stores the
//! [`Actor`] in the request extensions, where [`CurrentActor`] finds it.

use axum::{
    extract::{FromRequestParts, Path, Request, State},
    extract::rejection::PathRejection,
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use hmhy_api::{AccessTag, Actor, ApiError, AuthError, AuthGate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::http_error::HttpError;

/// State of one route's gate layer.
#[derive(Clone)]
pub struct GateLayer {
    pub gate: Arc<AuthGate>,
    pub tags: &'static [AccessTag],
}

/// Rejects requests whose bearer token or role does not satisfy the route.
pub async fn require_access(
    State(layer): State<GateLayer>,
    path_params: Result<Path<HashMap<String, String>>, PathRejection>,
    mut request: Request,
    next: Next,
) -> Response {
    let authorization: Option<&str> = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    // Percent-decoded, so it compares equal to the id the handler sees.
    let path_id: Option<String> = path_params
        .ok()
        .and_then(|Path(mut params)| params.remove("id"));

    match layer.gate.check(authorization, layer.tags, path_id.as_deref()) {
        Ok(actor) => {
            debug!(id = %actor.id, role = %actor.role, "Request authorized");
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

/// Extractor for the actor authorized by [`require_access`].
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(CurrentActor(actor): CurrentActor) -> Result<Json<..>, HttpError> {
///     // actor.id, actor.role
/// }
/// ```
pub struct CurrentActor(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .map(Self)
            .ok_or_else(|| HttpError(ApiError::from(AuthError::MissingCredentials)))
    }
}
