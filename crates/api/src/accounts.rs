// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin account input preparation.
//!
//! Wire requests carry plaintext passwords; the store only ever sees
//! bcrypt hashes.

use hmhy_domain::{
    AdminChanges, CreateAdminRequest, NewAdmin, Role, UpdateAdminRequest, validate_create_admin,
    validate_update_admin,
};

use crate::auth::hash_password;
use crate::error::ApiError;

/// Validates an admin creation request and hashes its password.
///
/// The role defaults to [`Role::Admin`].
///
/// # Errors
///
/// Returns [`ApiError::ValidationFailed`] listing every violation, or an
/// internal error if hashing fails.
pub fn prepare_new_admin(request: CreateAdminRequest) -> Result<NewAdmin, ApiError> {
    validate_create_admin(&request)?;

    Ok(NewAdmin {
        password_hash: hash_password(&request.password)?,
        username: request.username.trim().to_string(),
        phone_number: request.phone_number,
        role: request.role.unwrap_or(Role::Admin),
    })
}

/// Validates an admin update request and hashes a new password if present.
///
/// # Errors
///
/// Returns [`ApiError::ValidationFailed`] listing every violation, or an
/// internal error if hashing fails.
pub fn prepare_admin_changes(request: UpdateAdminRequest) -> Result<AdminChanges, ApiError> {
    validate_update_admin(&request)?;

    let password_hash: Option<String> = request
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    Ok(AdminChanges {
        username: request.username.map(|u| u.trim().to_string()),
        phone_number: request.phone_number,
        password_hash,
    })
}
