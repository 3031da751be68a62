// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod entity;
mod error;
mod paging;
mod role;
mod types;
mod upload_policy;
mod validation;

#[cfg(test)]
mod tests;

pub use entity::{ACTIVE_FLAG, Entity, Patch, SoftState};
pub use error::{DomainError, ValidationErrors};
pub use paging::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageBounds, PageRequest, PageResult, compute_page,
};
pub use role::{Role, Specification};
pub use types::{
    Admin, AdminChanges, CreateAdminRequest, CreateStudent, CreateTeacher, NewAdmin, Student,
    StudentChanges, Teacher, TeacherChanges, UpdateAdminRequest,
};
pub use upload_policy::{
    DOCUMENT_LIMIT, FileCategory, IMAGE_LIMIT, VIDEO_LIMIT, classify, validate_upload,
};
pub use validation::{
    MIN_PASSWORD_LENGTH, is_valid_email, is_valid_phone_number, validate_create_admin,
    validate_create_student, validate_create_teacher, validate_student_changes,
    validate_teacher_changes, validate_update_admin,
};
