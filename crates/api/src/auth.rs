// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use hmhy_domain::{Admin, Role};
use hmhy_persistence::Persistence;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError};
use crate::token::{
    CookieSink, REFRESH_COOKIE, TokenKind, TokenPayload, TokenService, attach_cookie, clear_cookie,
};

/// bcrypt work factor for stored passwords.
pub const PASSWORD_HASH_COST: u32 = 7;

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller, as asserted by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: String,
    pub role: String,
    /// Claims beyond id and role, carried through unchanged.
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl Actor {
    /// Returns true if the actor holds `role`, compared case-insensitively.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role.eq_ignore_ascii_case(role.as_str())
    }
}

impl From<TokenPayload> for Actor {
    fn from(payload: TokenPayload) -> Self {
        Self {
            id: payload.id,
            role: payload.role,
            claims: payload.extra,
        }
    }
}

/// One entry of an authorization requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTag {
    /// Grants access to holders of the role.
    Role(Role),
    /// Grants access when the actor id equals the `id` path parameter.
    Owner,
}

impl std::fmt::Display for AccessTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Role(role) => write!(f, "{role}"),
            Self::Owner => write!(f, "ID"),
        }
    }
}

/// Who may invoke an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token required.
    Public,
    /// A valid access token is required. An empty tag list admits every
    /// authenticated actor; otherwise one tag must match.
    Authenticated(&'static [AccessTag]),
}

/// Verifies bearer tokens and evaluates access requirements.
///
/// Stateless: every request is evaluated from its own headers and path.
#[derive(Debug, Clone)]
pub struct AuthGate {
    tokens: TokenService,
}

impl AuthGate {
    #[must_use]
    pub const fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    /// Extracts and verifies the bearer token of an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] if the header is absent or
    /// not of the form `Bearer <token>`, or [`AuthError::Token`] if the token
    /// does not verify with the access secret or has expired.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Actor, AuthError> {
        let token: &str = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let payload: TokenPayload = self.tokens.verify(token, TokenKind::Access)?;
        Ok(Actor::from(payload))
    }

    /// Decides whether `actor` satisfies `tags`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated caller
    /// * `tags` - The requirement; empty admits everyone
    /// * `path_id` - The `id` path parameter, if the route has one
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] if no tag matches.
    pub fn authorize(
        actor: &Actor,
        tags: &[AccessTag],
        path_id: Option<&str>,
    ) -> Result<(), AuthError> {
        if tags.is_empty() {
            return Ok(());
        }

        let has_role: bool = tags.iter().any(|tag| match tag {
            AccessTag::Role(role) => actor.has_role(*role),
            AccessTag::Owner => false,
        });
        let is_owner: bool =
            tags.contains(&AccessTag::Owner) && path_id.is_some_and(|id| id == actor.id);

        if has_role || is_owner {
            return Ok(());
        }

        let required: String = tags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(", ");
        debug!(actor = %actor.id, role = %actor.role, %required, "Access denied");
        Err(AuthError::Forbidden { required })
    }

    /// Authenticates and then authorizes.
    ///
    /// # Errors
    ///
    /// See [`AuthGate::authenticate`] and [`AuthGate::authorize`].
    pub fn check(
        &self,
        authorization: Option<&str>,
        tags: &[AccessTag],
        path_id: Option<&str>,
    ) -> Result<Actor, AuthError> {
        let actor: Actor = self.authenticate(authorization)?;
        Self::authorize(&actor, tags, path_id)?;
        Ok(actor)
    }
}

/// Hashes a password for storage.
///
/// # Errors
///
/// Returns an internal error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, PASSWORD_HASH_COST).map_err(|e| ApiError::Internal {
        message: format!("Failed to hash password: {e}"),
    })
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub admin: Admin,
    pub access_token: String,
}

/// Admin sign-in, token refresh and sign-out.
pub struct AuthenticationService<'a> {
    tokens: &'a TokenService,
    production: bool,
}

impl<'a> AuthenticationService<'a> {
    /// # Arguments
    ///
    /// * `tokens` - Issues and verifies tokens
    /// * `production` - Selects the production cookie attributes
    #[must_use]
    pub const fn new(tokens: &'a TokenService, production: bool) -> Self {
        Self { tokens, production }
    }

    /// Authenticates an admin by username and password.
    ///
    /// The access token is returned; the refresh token is placed only in the
    /// cookie sink.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the username is unknown or
    /// the password does not match, and [`AuthError::AccountDisabled`] if the
    /// admin is inactive.
    pub fn sign_in(
        &self,
        persistence: &mut Persistence,
        cookies: &mut dyn CookieSink,
        username: &str,
        password: &str,
    ) -> Result<SignIn, ApiError> {
        let admin: Admin = persistence
            .find_admin_by_username(username)?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches: bool = bcrypt::verify(password, &admin.password_hash).map_err(|e| {
            warn!(username, error = %e, "Stored password hash is unreadable");
            AuthError::InvalidCredentials
        })?;
        if !matches {
            info!(username, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
        if !admin.state.is_active {
            info!(username, "Sign-in rejected for inactive admin");
            return Err(AuthError::AccountDisabled.into());
        }

        let payload: TokenPayload = TokenPayload::new(admin.id.clone(), admin.role.as_str());
        let access_token: String = self.tokens.issue_access(&payload).map_err(AuthError::from)?;
        let refresh_token: String = self
            .tokens
            .issue_refresh(&payload)
            .map_err(AuthError::from)?;

        attach_cookie(
            cookies,
            REFRESH_COOKIE,
            &refresh_token,
            self.tokens.lifetime_days(TokenKind::Refresh),
            self.production,
        );

        info!(id = %admin.id, role = %admin.role, "Admin signed in");
        Ok(SignIn {
            admin,
            access_token,
        })
    }

    /// Mints a new access token from a refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] if no refresh token is
    /// present, or [`AuthError::Token`] if it does not verify with the
    /// refresh secret or has expired.
    pub fn refresh(&self, refresh_token: Option<&str>) -> Result<String, AuthError> {
        let token: &str = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let payload: TokenPayload = self.tokens.verify(token, TokenKind::Refresh)?;
        debug!(id = %payload.id, "Refreshing access token");
        Ok(self.tokens.issue_access(&payload)?)
    }

    /// Clears the refresh cookie.
    pub fn sign_out(actor: &Actor, cookies: &mut dyn CookieSink) {
        clear_cookie(cookies, REFRESH_COOKIE);
        info!(id = %actor.id, "Signed out");
    }
}
