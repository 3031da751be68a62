// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mapping of API errors onto HTTP responses.
//!
//! Handlers and middleware return [`HttpError`], which only sets the status
//! and stashes the error in the response extensions. [`render_errors`] runs
//! outermost, where the request path and method are still known, and turns
//! the stashed error into an [`ErrorEnvelope`] body.

use axum::{
    Json,
    extract::{ConnectInfo, Request},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::multipart::MultipartError;
use hmhy_api::{ApiError, AuthError, ErrorEnvelope};
use hmhy_domain::ValidationErrors;
use hmhy_persistence::PersistenceError;
use std::net::SocketAddr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, warn};

const UNKNOWN_COUNTRY: &str = "Unknown/Local";
const UNKNOWN: &str = "unknown";

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError(pub ApiError);

/// The error carried from a handler to [`render_errors`].
#[derive(Debug, Clone)]
struct ErrorReport(ApiError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status: StatusCode = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response: Response = status.into_response();
        response.extensions_mut().insert(ErrorReport(self.0));
        response
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        Self(ApiError::from(err))
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        Self(ApiError::from(err))
    }
}

impl From<ValidationErrors> for HttpError {
    fn from(err: ValidationErrors) -> Self {
        Self(ApiError::from(err))
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ApiError::ValidationFailed(vec![rejection.body_text()]))
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ApiError::ValidationFailed(vec![rejection.body_text()]))
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        Self(ApiError::ValidationFailed(vec![err.body_text()]))
    }
}

/// Client details recorded when an error is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip: String,
    pub country: String,
    pub user_agent: String,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl ClientMeta {
    /// Collects client details from proxy headers, falling back to the
    /// socket address.
    ///
    /// The IP is the first `X-Forwarded-For` entry, else `X-Real-IP`, else
    /// the peer address. The country comes from `CF-IPCountry`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let forwarded: Option<&str> = header(headers, "x-forwarded-for")
            .and_then(|list| list.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        let ip: String = forwarded
            .or_else(|| header(headers, "x-real-ip"))
            .map(String::from)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| String::from(UNKNOWN));

        Self {
            ip,
            country: header(headers, "cf-ipcountry").unwrap_or(UNKNOWN_COUNTRY).to_string(),
            user_agent: header(headers, "user-agent").unwrap_or(UNKNOWN).to_string(),
        }
    }
}

/// Middleware that renders stashed [`HttpError`]s as error envelopes.
///
/// 5xx errors are logged at ERROR and 429 at WARN, with client details.
/// Other errors are returned without logging.
pub async fn render_errors(request: Request, next: Next) -> Response {
    let method: String = request.method().to_string();
    let path: String = request.uri().path().to_string();
    let peer: Option<SocketAddr> = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let client: ClientMeta = ClientMeta::from_headers(request.headers(), peer);

    let mut response: Response = next.run(request).await;
    let Some(ErrorReport(err)) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    let timestamp: String = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    if err.is_logged() {
        if matches!(err, ApiError::RateLimited) {
            warn!(
                %method, %path, ip = %client.ip, country = %client.country,
                user_agent = %client.user_agent, %timestamp, error = %err,
                "Request throttled"
            );
        } else {
            error!(
                %method, %path, ip = %client.ip, country = %client.country,
                user_agent = %client.user_agent, %timestamp, error = %err,
                "Request failed"
            );
        }
    }

    let envelope: ErrorEnvelope = ErrorEnvelope {
        status_code: err.status_code(),
        message: err.public_message(),
        timestamp,
        path,
        method,
    };
    (response.status(), Json(envelope)).into_response()
}
