// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entity::{Entity, SoftState};
use crate::error::DomainError;
use crate::role::{Role, Specification};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// A back-office account.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(flatten)]
    pub state: SoftState,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Wire input for creating an admin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub username: String,
    pub phone_number: String,
    pub password: String,
    /// Defaults to [`Role::Admin`].
    #[serde(default)]
    pub role: Option<Role>,
}

/// Wire input for updating an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Admin creation input once the password has been hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub username: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: Role,
}

/// Admin changes once the password, if any, has been hashed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminChanges {
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
}

impl Entity for Admin {
    const RESOURCE: &'static str = "admin";
    const SEARCH_FIELDS: &'static [&'static str] = &["username", "phoneNumber"];

    type Create = NewAdmin;
    type Changes = AdminChanges;

    fn from_create(id: String, input: NewAdmin, now: OffsetDateTime) -> Self {
        Self {
            id,
            username: input.username,
            phone_number: input.phone_number,
            password_hash: input.password_hash,
            role: input.role,
            state: SoftState::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn soft_state(&self) -> &SoftState {
        &self.state
    }
}

/// A tutor offering lessons in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub specification: Specification,
    pub level: String,
    pub description: Option<String>,
    pub hourly_price: i64,
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub state: SoftState,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Input for creating a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacher {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub specification: Specification,
    pub level: String,
    #[serde(default)]
    pub description: Option<String>,
    pub hourly_price: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial teacher update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherChanges {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub specification: Option<Specification>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hourly_price: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Entity for Teacher {
    const RESOURCE: &'static str = "teacher";
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "fullName",
        "email",
        "phoneNumber",
        "specification",
        "description",
    ];
    const FILTER_FIELDS: &'static [&'static str] = &["level", "specification"];

    type Create = CreateTeacher;
    type Changes = TeacherChanges;

    fn normalize_filter(field: &str, value: &str) -> Result<String, DomainError> {
        match field {
            "specification" => Ok(Specification::from_str(value)?.as_str().to_string()),
            _ => Ok(value.trim().to_string()),
        }
    }

    fn from_create(id: String, input: CreateTeacher, now: OffsetDateTime) -> Self {
        Self {
            id,
            full_name: input.full_name,
            email: input.email,
            phone_number: input.phone_number,
            specification: input.specification,
            level: input.level,
            description: input.description,
            hourly_price: input.hourly_price,
            image_url: input.image_url,
            state: SoftState::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn soft_state(&self) -> &SoftState {
        &self.state
    }
}

/// A learner booking lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    #[serde(flatten)]
    pub state: SoftState,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Student {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a student.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudent {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Partial student update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentChanges {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Entity for Student {
    const RESOURCE: &'static str = "student";
    const SEARCH_FIELDS: &'static [&'static str] = &["firstName", "lastName", "phoneNumber"];

    type Create = CreateStudent;
    type Changes = StudentChanges;

    fn from_create(id: String, input: CreateStudent, now: OffsetDateTime) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            phone_number: input.phone_number,
            email: input.email,
            state: SoftState::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn soft_state(&self) -> &SoftState {
        &self.state
    }
}
