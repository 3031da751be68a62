// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin session handlers.

use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use hmhy_api::{
    AuthenticationService, BaseService, REFRESH_COOKIE, SignIn, SuccessEnvelope, ok,
};
use hmhy_domain::Admin;
use hmhy_persistence::Persistence;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::MutexGuard;

use crate::cookies::JarSink;
use crate::extract::JsonBody;
use crate::http_error::HttpError;
use crate::router::AppState;
use crate::session::CurrentActor;

/// Credentials posted to `/auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful sign-in. The refresh token travels in a cookie only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
    pub admin: Admin,
}

/// A freshly minted access token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Handler for POST `/auth/signin`.
pub async fn sign_in(
    State(app_state): State<AppState>,
    jar: CookieJar,
    JsonBody(request): JsonBody<SignInRequest>,
) -> Result<(CookieJar, Json<SuccessEnvelope<SignInResponse>>), HttpError> {
    let service: AuthenticationService<'_> =
        AuthenticationService::new(&app_state.tokens, app_state.production);
    let mut sink: JarSink = JarSink::new(jar);

    let signed_in: SignIn = {
        let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
        service.sign_in(
            &mut *persistence,
            &mut sink,
            request.username.trim(),
            &request.password,
        )?
    };

    Ok((
        sink.into_jar(),
        Json(ok(SignInResponse {
            access_token: signed_in.access_token,
            admin: signed_in.admin,
        })),
    ))
}

/// Handler for POST `/auth/refresh`.
#[allow(clippy::unused_async)]
pub async fn refresh(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<SuccessEnvelope<AccessTokenResponse>>, HttpError> {
    let service: AuthenticationService<'_> =
        AuthenticationService::new(&app_state.tokens, app_state.production);
    let access_token: String =
        service.refresh(jar.get(REFRESH_COOKIE).map(Cookie::value))?;

    Ok(Json(ok(AccessTokenResponse { access_token })))
}

/// Handler for POST `/auth/signout`.
#[allow(clippy::unused_async)]
pub async fn sign_out(
    CurrentActor(actor): CurrentActor,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessEnvelope<Map<String, Value>>>) {
    let mut sink: JarSink = JarSink::new(jar);
    AuthenticationService::sign_out(&actor, &mut sink);
    (sink.into_jar(), Json(ok(Map::new())))
}

/// Handler for GET `/auth/me`.
pub async fn me(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<SuccessEnvelope<Admin>>, HttpError> {
    let mut persistence: MutexGuard<'_, Persistence> = app_state.persistence.lock().await;
    let mut service: BaseService<Admin, &mut Persistence> = BaseService::new(&mut *persistence);

    Ok(Json(ok(service.find(&actor.id, false)?)))
}
