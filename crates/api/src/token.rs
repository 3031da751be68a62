// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access and refresh token issuance and verification.
//!
//! Tokens are HS256 JWTs. Access and refresh tokens are signed with
//! different secrets, so a token of one kind never verifies as the other.
//! A token is valid while `now < iat + lifetime`; the expiry check uses the
//! injected [`Clock`] rather than the signature library's wall clock.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use crate::error::TokenError;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

const SECONDS_PER_DAY: i64 = 86_400;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A manually driven clock, with second resolution.
#[derive(Debug)]
pub struct FixedClock {
    unix_seconds: AtomicI64,
}

impl FixedClock {
    /// Creates a clock frozen at `at`.
    #[must_use]
    pub const fn new(at: OffsetDateTime) -> Self {
        Self {
            unix_seconds: AtomicI64::new(at.unix_timestamp()),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.unix_seconds
            .fetch_add(by.whole_seconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.unix_seconds.load(Ordering::SeqCst))
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

/// The two token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Secrets and lifetimes for both token kinds.
#[derive(Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub access_lifetime_days: i64,
    pub refresh_secret: String,
    pub refresh_lifetime_days: i64,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("access_secret", &"<redacted>")
            .field("access_lifetime_days", &self.access_lifetime_days)
            .field("refresh_secret", &"<redacted>")
            .field("refresh_lifetime_days", &self.refresh_lifetime_days)
            .finish()
    }
}

impl TokenSettings {
    /// Checks that the settings can produce verifiable, distinct tokens.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found: an empty secret,
    /// identical secrets, or a non-positive lifetime.
    pub fn validate(&self) -> Result<(), String> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(String::from("Token secrets must not be empty"));
        }
        if self.access_secret == self.refresh_secret {
            return Err(String::from(
                "Access and refresh token secrets must differ",
            ));
        }
        if self.access_lifetime_days <= 0 || self.refresh_lifetime_days <= 0 {
            return Err(String::from("Token lifetimes must be positive"));
        }
        Ok(())
    }

    const fn secret_and_lifetime(&self, kind: TokenKind) -> (&String, i64) {
        match kind {
            TokenKind::Access => (&self.access_secret, self.access_lifetime_days),
            TokenKind::Refresh => (&self.refresh_secret, self.refresh_lifetime_days),
        }
    }
}

/// What a token asserts about its bearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Actor id.
    pub id: String,
    /// Role tag.
    pub role: String,
    /// Additional claims carried verbatim.
    pub extra: Map<String, Value>,
}

impl TokenPayload {
    /// A payload without extra claims.
    #[must_use]
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            extra: Map::new(),
        }
    }
}

/// Wire claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
    iat: i64,
    exp: i64,
}

/// Converts a `jsonwebtoken` error into a [`TokenError`].
fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::InvalidSignature => {
            TokenError::InvalidToken(String::from("signature verification failed"))
        }
        ErrorKind::InvalidToken => TokenError::InvalidToken(String::from("malformed token")),
        ErrorKind::Base64(err) => TokenError::InvalidToken(format!("invalid base64: {err}")),
        ErrorKind::Json(err) => TokenError::InvalidToken(format!("invalid claims: {err}")),
        _ => TokenError::InvalidToken(e.to_string()),
    }
}

/// Issues and verifies tokens.
#[derive(Clone)]
pub struct TokenService {
    settings: TokenSettings,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a token service.
    ///
    /// # Arguments
    ///
    /// * `settings` - Secrets and lifetimes, already validated
    /// * `clock` - Source of issuance and verification time
    #[must_use]
    pub fn new(settings: TokenSettings, clock: Arc<dyn Clock>) -> Self {
        Self { settings, clock }
    }

    /// The configured settings.
    #[must_use]
    pub const fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Lifetime of a token kind in days.
    #[must_use]
    pub const fn lifetime_days(&self, kind: TokenKind) -> i64 {
        self.settings.secret_and_lifetime(kind).1
    }

    /// Issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the token cannot be encoded.
    pub fn issue_access(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        self.issue(payload, TokenKind::Access)
    }

    /// Issues a refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the token cannot be encoded.
    pub fn issue_refresh(&self, payload: &TokenPayload) -> Result<String, TokenError> {
        self.issue(payload, TokenKind::Refresh)
    }

    fn issue(&self, payload: &TokenPayload, kind: TokenKind) -> Result<String, TokenError> {
        let (secret, lifetime_days): (&String, i64) = self.settings.secret_and_lifetime(kind);
        let iat: i64 = self.clock.now().unix_timestamp();
        let claims: Claims = Claims {
            sub: payload.id.clone(),
            role: payload.role.clone(),
            extra: payload.extra.clone(),
            iat,
            exp: iat.saturating_add(lifetime_days.saturating_mul(SECONDS_PER_DAY)),
        };

        debug!(sub = %claims.sub, ?kind, "Issuing token");
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies a token of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] if the signature does not verify
    /// with the secret of `kind`, or [`TokenError::Expired`] if the lifetime
    /// of `kind` has elapsed.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenPayload, TokenError> {
        let (secret, lifetime_days): (&String, i64) = self.settings.secret_and_lifetime(kind);
        let claims: Claims = Self::decode_claims(token, secret)?;
        let expires_at: i64 = claims
            .iat
            .saturating_add(lifetime_days.saturating_mul(SECONDS_PER_DAY));
        self.check_expiry(claims, expires_at)
    }

    /// Verifies a token against an explicit secret, using its `exp` claim.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] if the signature does not verify,
    /// or [`TokenError::Expired`] if `exp` has passed.
    pub fn verify_with_secret(&self, token: &str, secret: &str) -> Result<TokenPayload, TokenError> {
        let claims: Claims = Self::decode_claims(token, secret)?;
        let expires_at: i64 = claims.exp;
        self.check_expiry(claims, expires_at)
    }

    fn decode_claims(token: &str, secret: &str) -> Result<Claims, TokenError> {
        let mut validation: Validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock.
        validation.validate_exp = false;

        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let err: TokenError = convert_jwt_error(&e);
                debug!(error = %err, "Token rejected");
                err
            })
    }

    fn check_expiry(&self, claims: Claims, expires_at: i64) -> Result<TokenPayload, TokenError> {
        let now: i64 = self.clock.now().unix_timestamp();
        if now >= expires_at {
            warn!(sub = %claims.sub, "Expired token presented");
            return Err(TokenError::Expired);
        }

        Ok(TokenPayload {
            id: claims.sub,
            role: claims.role,
            extra: claims.extra,
        })
    }
}

/// `SameSite` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    None,
}

/// A cookie to be set on the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSpec {
    pub name: String,
    pub value: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: &'static str,
    pub max_age_seconds: i64,
}

/// Response-side cookie storage.
pub trait CookieSink {
    /// Sets a cookie.
    fn set_cookie(&mut self, cookie: CookieSpec);
    /// Removes the cookie `name` at `path`.
    fn remove_cookie(&mut self, name: &str, path: &'static str);
}

/// Sets an HTTP-only cookie living for `lifetime_days`.
///
/// In production the cookie is `Secure` with `SameSite=None`; otherwise it is
/// not secure and `SameSite=Lax`.
pub fn attach_cookie(
    sink: &mut dyn CookieSink,
    name: &str,
    value: &str,
    lifetime_days: i64,
    production: bool,
) {
    let same_site: SameSite = if production {
        SameSite::None
    } else {
        SameSite::Lax
    };

    sink.set_cookie(CookieSpec {
        name: name.to_string(),
        value: value.to_string(),
        http_only: true,
        secure: production,
        same_site,
        path: "/",
        max_age_seconds: lifetime_days.saturating_mul(SECONDS_PER_DAY),
    });
}

/// Removes the cookie `name` at path `/`.
pub fn clear_cookie(sink: &mut dyn CookieSink, name: &str) {
    sink.remove_cookie(name, "/");
}
