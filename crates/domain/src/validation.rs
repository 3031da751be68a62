// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural input checks.
//!
//! Each function records every violated rule rather than stopping at the
//! first one. Uniqueness is not checked here; the store reports it.

use crate::error::ValidationErrors;
use crate::types::{
    CreateAdminRequest, CreateStudent, CreateTeacher, StudentChanges, TeacherChanges,
    UpdateAdminRequest,
};

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

/// Returns true if `value` is `+` followed by 9 to 15 ASCII digits.
#[must_use]
pub fn is_valid_phone_number(value: &str) -> bool {
    value.strip_prefix('+').is_some_and(|digits| {
        (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Returns true if `value` has a non-empty local part and domain around `@`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

fn check_required(errors: &mut ValidationErrors, value: &str, field: &str) {
    errors.check(!value.trim().is_empty(), format!("{field} must not be empty"));
}

fn check_optional(errors: &mut ValidationErrors, value: Option<&String>, field: &str) {
    if let Some(value) = value {
        check_required(errors, value, field);
    }
}

fn check_phone(errors: &mut ValidationErrors, value: &str) {
    errors.check(
        is_valid_phone_number(value),
        "phoneNumber must be '+' followed by 9 to 15 digits",
    );
}

fn check_email(errors: &mut ValidationErrors, value: &str) {
    errors.check(is_valid_email(value), "email must be a valid email address");
}

fn check_password(errors: &mut ValidationErrors, value: &str) {
    errors.check(
        value.chars().count() >= MIN_PASSWORD_LENGTH,
        format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
    );
}

fn check_price(errors: &mut ValidationErrors, value: i64) {
    errors.check(value >= 0, "hourlyPrice must not be negative");
}

/// Validates an admin creation request.
///
/// # Errors
///
/// Returns every violated rule.
pub fn validate_create_admin(input: &CreateAdminRequest) -> Result<(), ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();
    check_required(&mut errors, &input.username, "username");
    check_phone(&mut errors, &input.phone_number);
    check_password(&mut errors, &input.password);
    if let Some(role) = input.role {
        errors.check(
            role.is_staff(),
            format!("role must be SUPERADMIN or ADMIN, got {role}"),
        );
    }
    errors.into_result()
}

/// Validates an admin update request.
///
/// # Errors
///
/// Returns every violated rule.
pub fn validate_update_admin(input: &UpdateAdminRequest) -> Result<(), ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();
    check_optional(&mut errors, input.username.as_ref(), "username");
    if let Some(phone) = &input.phone_number {
        check_phone(&mut errors, phone);
    }
    if let Some(password) = &input.password {
        check_password(&mut errors, password);
    }
    errors.into_result()
}

/// Validates a teacher creation input.
///
/// # Errors
///
/// Returns every violated rule.
pub fn validate_create_teacher(input: &CreateTeacher) -> Result<(), ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();
    check_required(&mut errors, &input.full_name, "fullName");
    check_email(&mut errors, &input.email);
    check_phone(&mut errors, &input.phone_number);
    check_required(&mut errors, &input.level, "level");
    check_price(&mut errors, input.hourly_price);
    errors.into_result()
}

/// Validates a partial teacher update.
///
/// # Errors
///
/// Returns every violated rule.
pub fn validate_teacher_changes(input: &TeacherChanges) -> Result<(), ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();
    check_optional(&mut errors, input.full_name.as_ref(), "fullName");
    if let Some(email) = &input.email {
        check_email(&mut errors, email);
    }
    if let Some(phone) = &input.phone_number {
        check_phone(&mut errors, phone);
    }
    check_optional(&mut errors, input.level.as_ref(), "level");
    if let Some(price) = input.hourly_price {
        check_price(&mut errors, price);
    }
    errors.into_result()
}

/// Validates a student creation input.
///
/// # Errors
///
/// Returns every violated rule.
pub fn validate_create_student(input: &CreateStudent) -> Result<(), ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();
    check_required(&mut errors, &input.first_name, "firstName");
    check_required(&mut errors, &input.last_name, "lastName");
    check_phone(&mut errors, &input.phone_number);
    if let Some(email) = &input.email {
        check_email(&mut errors, email);
    }
    errors.into_result()
}

/// Validates a partial student update.
///
/// # Errors
///
/// Returns every violated rule.
pub fn validate_student_changes(input: &StudentChanges) -> Result<(), ValidationErrors> {
    let mut errors: ValidationErrors = ValidationErrors::new();
    check_optional(&mut errors, input.first_name.as_ref(), "firstName");
    check_optional(&mut errors, input.last_name.as_ref(), "lastName");
    if let Some(phone) = &input.phone_number {
        check_phone(&mut errors, phone);
    }
    if let Some(email) = &input.email {
        check_email(&mut errors, email);
    }
    errors.into_result()
}
