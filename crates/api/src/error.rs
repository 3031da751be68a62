// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hmhy_domain::{DomainError, ValidationErrors};
use hmhy_persistence::PersistenceError;
use thiserror::Error;

use crate::envelope::ErrorMessage;

/// Public message for conflicts caused by uniqueness constraints.
pub const DUPLICATE_ENTRY: &str = "Duplicate entry";
/// Public message for unexpected failures.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
/// Public message for throttled requests.
pub const RATE_LIMIT_EXCEEDED: &str = "Rate limit exceeded";

/// Token verification and signing errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is malformed or its signature does not verify.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The token verified but its lifetime has elapsed.
    #[error("Token expired")]
    Expired,

    /// The token could not be produced.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Authentication and authorization errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No usable credentials were presented.
    #[error("Authorization token is missing")]
    MissingCredentials,

    /// Username or password did not match.
    #[error("Username or password is incorrect")]
    InvalidCredentials,

    /// The account exists but may not sign in.
    #[error("Account is disabled")]
    AccountDisabled,

    /// A presented token was rejected.
    #[error("{}", token_message(.0))]
    Token(#[from] TokenError),

    /// The actor is authenticated but lacks permission.
    #[error("Forbidden: requires one of {required}")]
    Forbidden {
        /// The tags that would have granted access.
        required: String,
    },
}

/// Clients learn whether a token expired, never why it failed to verify.
const fn token_message(err: &TokenError) -> &'static str {
    match err {
        TokenError::Expired => "Token expired",
        TokenError::InvalidToken(_) | TokenError::Signing(_) => "Token is invalid",
    }
}

/// API-level errors.
///
/// Each variant maps to exactly one HTTP status; see [`ApiError::status_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The addressed entity does not exist.
    NotFound {
        /// Human-readable description of what was not found.
        message: String,
    },
    /// Input failed structural validation. One message per violation.
    ValidationFailed(Vec<String>),
    /// The request is not authenticated.
    Unauthorized {
        /// The reason authentication failed.
        reason: String,
    },
    /// The request is authenticated but not permitted.
    Forbidden {
        /// The reason authorization failed.
        reason: String,
    },
    /// The request conflicts with existing data.
    Conflict {
        /// Human-readable description of the conflict.
        message: String,
    },
    /// The client is being throttled.
    RateLimited,
    /// An unexpected failure.
    Internal {
        /// Description for logs. Never sent to clients.
        message: String,
    },
    /// A store failure, passed through unmodified until the HTTP boundary.
    Store(PersistenceError),
}

impl ApiError {
    /// The HTTP status code of this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::ValidationFailed(_) => 422,
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::Conflict { .. } => 409,
            Self::RateLimited => 429,
            Self::Internal { .. } => 500,
            Self::Store(err) => {
                if err.is_constraint_violation() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// The message sent to clients.
    ///
    /// Internal details, including raw store errors, are never exposed.
    #[must_use]
    pub fn public_message(&self) -> ErrorMessage {
        match self {
            Self::NotFound { message } | Self::Conflict { message } => {
                ErrorMessage::Text(message.clone())
            }
            Self::ValidationFailed(messages) => ErrorMessage::List(messages.clone()),
            Self::Unauthorized { reason } | Self::Forbidden { reason } => {
                ErrorMessage::Text(reason.clone())
            }
            Self::RateLimited => ErrorMessage::Text(String::from(RATE_LIMIT_EXCEEDED)),
            Self::Internal { .. } => ErrorMessage::Text(String::from(INTERNAL_SERVER_ERROR)),
            Self::Store(err) => {
                if err.is_constraint_violation() {
                    ErrorMessage::Text(String::from(DUPLICATE_ENTRY))
                } else {
                    ErrorMessage::Text(String::from(INTERNAL_SERVER_ERROR))
                }
            }
        }
    }

    /// Returns true for errors the HTTP boundary must log.
    #[must_use]
    pub const fn is_logged(&self) -> bool {
        let status: u16 = self.status_code();
        status >= 500 || status == 429
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { message } => write!(f, "Not found: {message}"),
            Self::ValidationFailed(messages) => {
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            Self::Unauthorized { reason } => write!(f, "Unauthorized: {reason}"),
            Self::Forbidden { reason } => write!(f, "Forbidden: {reason}"),
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::RateLimited => write!(f, "{RATE_LIMIT_EXCEEDED}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden { .. } => Self::Forbidden {
                reason: err.to_string(),
            },
            AuthError::MissingCredentials
            | AuthError::InvalidCredentials
            | AuthError::AccountDisabled
            | AuthError::Token(_) => Self::Unauthorized {
                reason: err.to_string(),
            },
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::ValidationFailed(err.into_messages())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Store(err)
    }
}

/// Translates a domain error into an API error.
///
/// Every domain error describes bad client input.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    ApiError::ValidationFailed(vec![err.to_string()])
}
