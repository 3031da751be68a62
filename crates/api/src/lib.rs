// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Framework-agnostic API layer for the HMHY backend.
//!
//! Request flow: [`AuthGate`] authenticates and authorizes the caller
//! against the [`access`] table, [`BaseService`] performs the operation on a
//! [`hmhy_persistence::Store`], and the result is wrapped in an [`envelope`].
//! Errors are [`ApiError`] values; the HTTP mapping lives in the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod access;
mod accounts;
mod auth;
pub mod envelope;
mod error;
pub mod mail;
mod repository;
pub mod token;

#[cfg(test)]
mod tests;

pub use access::{Method, Operation, requirement};
pub use accounts::{prepare_admin_changes, prepare_new_admin};
pub use auth::{
    Access, AccessTag, Actor, AuthGate, AuthenticationService, PASSWORD_HASH_COST, SignIn,
    hash_password,
};
pub use envelope::{
    ErrorEnvelope, ErrorMessage, Message, PaginatedEnvelope, SuccessEnvelope, created, ok,
    paginated, success,
};
pub use error::{
    ApiError, AuthError, DUPLICATE_ENTRY, INTERNAL_SERVER_ERROR, RATE_LIMIT_EXCEEDED, TokenError,
    translate_domain_error,
};
pub use mail::{EmailService, LessonReminder, LogMailer, MailError, MailMessage, Mailer};
pub use repository::{BaseService, GetOptions, ListFilter, UpdateOutcome};
pub use token::{
    Clock, CookieSink, CookieSpec, FixedClock, REFRESH_COOKIE, SameSite, SystemClock, TokenKind,
    TokenPayload, TokenService, TokenSettings, attach_cookie, clear_cookie,
};
