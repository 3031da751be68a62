// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The route table: every HTTP operation and who may invoke it.
//!
//! The server registers routes by iterating [`Operation::ALL`], so the
//! requirements below are the only place authorization is declared.

use hmhy_domain::Role;

use crate::auth::{Access, AccessTag};

const SUPERADMIN: AccessTag = AccessTag::Role(Role::SuperAdmin);
const ADMIN: AccessTag = AccessTag::Role(Role::Admin);
const OWNER: AccessTag = AccessTag::Owner;

const ANY_ROLE: &[AccessTag] = &[];
const SUPERADMIN_ONLY: &[AccessTag] = &[SUPERADMIN];
const SUPERADMIN_OR_SELF: &[AccessTag] = &[SUPERADMIN, OWNER];
const STAFF: &[AccessTag] = &[SUPERADMIN, ADMIN];
const STAFF_OR_SELF: &[AccessTag] = &[SUPERADMIN, ADMIN, OWNER];

/// HTTP methods used by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Every operation exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SignIn,
    Refresh,
    SignOut,
    Me,

    CreateAdmin,
    ListAdmins,
    GetAdmin,
    UpdateAdmin,
    ToggleAdminStatus,
    DeleteAdmin,

    CreateTeacher,
    ListTeachers,
    GetTeacher,
    UpdateTeacher,
    SoftDeleteTeacher,
    RestoreTeacher,
    ToggleTeacherStatus,
    DeleteTeacher,

    CreateStudent,
    ListStudents,
    GetStudent,
    UpdateStudent,
    SoftDeleteStudent,
    RestoreStudent,
    ToggleStudentStatus,
    DeleteStudent,

    UploadFile,
    DeleteFile,

    Health,
}

impl Operation {
    /// All operations, in registration order.
    pub const ALL: [Self; 29] = [
        Self::SignIn,
        Self::Refresh,
        Self::SignOut,
        Self::Me,
        Self::CreateAdmin,
        Self::ListAdmins,
        Self::GetAdmin,
        Self::UpdateAdmin,
        Self::ToggleAdminStatus,
        Self::DeleteAdmin,
        Self::CreateTeacher,
        Self::ListTeachers,
        Self::GetTeacher,
        Self::UpdateTeacher,
        Self::SoftDeleteTeacher,
        Self::RestoreTeacher,
        Self::ToggleTeacherStatus,
        Self::DeleteTeacher,
        Self::CreateStudent,
        Self::ListStudents,
        Self::GetStudent,
        Self::UpdateStudent,
        Self::SoftDeleteStudent,
        Self::RestoreStudent,
        Self::ToggleStudentStatus,
        Self::DeleteStudent,
        Self::UploadFile,
        Self::DeleteFile,
        Self::Health,
    ];

    /// Method and path, relative to the API prefix.
    ///
    /// Paths use axum's `{param}` syntax.
    #[must_use]
    pub const fn route(self) -> (Method, &'static str) {
        match self {
            Self::SignIn => (Method::Post, "/auth/signin"),
            Self::Refresh => (Method::Post, "/auth/refresh"),
            Self::SignOut => (Method::Post, "/auth/signout"),
            Self::Me => (Method::Get, "/auth/me"),

            Self::CreateAdmin => (Method::Post, "/admins"),
            Self::ListAdmins => (Method::Get, "/admins"),
            Self::GetAdmin => (Method::Get, "/admins/{id}"),
            Self::UpdateAdmin => (Method::Patch, "/admins/{id}"),
            Self::ToggleAdminStatus => (Method::Patch, "/admins/{id}/status"),
            Self::DeleteAdmin => (Method::Delete, "/admins/{id}"),

            Self::CreateTeacher => (Method::Post, "/teachers"),
            Self::ListTeachers => (Method::Get, "/teachers"),
            Self::GetTeacher => (Method::Get, "/teachers/{id}"),
            Self::UpdateTeacher => (Method::Patch, "/teachers/{id}"),
            Self::SoftDeleteTeacher => (Method::Patch, "/teachers/{id}/soft-delete"),
            Self::RestoreTeacher => (Method::Patch, "/teachers/{id}/restore"),
            Self::ToggleTeacherStatus => (Method::Patch, "/teachers/{id}/status"),
            Self::DeleteTeacher => (Method::Delete, "/teachers/{id}"),

            Self::CreateStudent => (Method::Post, "/students"),
            Self::ListStudents => (Method::Get, "/students"),
            Self::GetStudent => (Method::Get, "/students/{id}"),
            Self::UpdateStudent => (Method::Patch, "/students/{id}"),
            Self::SoftDeleteStudent => (Method::Patch, "/students/{id}/soft-delete"),
            Self::RestoreStudent => (Method::Patch, "/students/{id}/restore"),
            Self::ToggleStudentStatus => (Method::Patch, "/students/{id}/status"),
            Self::DeleteStudent => (Method::Delete, "/students/{id}"),

            Self::UploadFile => (Method::Post, "/files"),
            Self::DeleteFile => (Method::Delete, "/files"),

            Self::Health => (Method::Get, "/health"),
        }
    }
}

/// Who may invoke `op`.
#[must_use]
pub const fn requirement(op: Operation) -> Access {
    match op {
        Operation::SignIn | Operation::Refresh | Operation::Health => Access::Public,

        Operation::SignOut
        | Operation::Me
        | Operation::ListTeachers
        | Operation::ListStudents
        | Operation::UploadFile => Access::Authenticated(ANY_ROLE),

        Operation::CreateAdmin
        | Operation::ListAdmins
        | Operation::ToggleAdminStatus
        | Operation::DeleteAdmin
        | Operation::DeleteTeacher
        | Operation::DeleteStudent => Access::Authenticated(SUPERADMIN_ONLY),

        Operation::GetAdmin | Operation::UpdateAdmin => Access::Authenticated(SUPERADMIN_OR_SELF),

        Operation::CreateTeacher
        | Operation::SoftDeleteTeacher
        | Operation::RestoreTeacher
        | Operation::ToggleTeacherStatus
        | Operation::CreateStudent
        | Operation::SoftDeleteStudent
        | Operation::RestoreStudent
        | Operation::ToggleStudentStatus
        | Operation::DeleteFile => Access::Authenticated(STAFF),

        Operation::GetTeacher
        | Operation::UpdateTeacher
        | Operation::GetStudent
        | Operation::UpdateStudent => Access::Authenticated(STAFF_OR_SELF),
    }
}
