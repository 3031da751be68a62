// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Platform roles.
///
/// The role travels inside access tokens as its upper-case tag and is
/// compared case-insensitively when authorizing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Seeded at startup; manages admins.
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
    /// Manages teachers and students.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Gives lessons.
    #[serde(rename = "TEACHER")]
    Teacher,
    /// Books lessons.
    #[serde(rename = "STUDENT")]
    Student,
}

impl Role {
    /// The canonical upper-case tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPERADMIN",
            Self::Admin => "ADMIN",
            Self::Teacher => "TEACHER",
            Self::Student => "STUDENT",
        }
    }

    /// Whether this role may be assigned to an admin account.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SUPERADMIN" => Ok(Self::SuperAdmin),
            "ADMIN" => Ok(Self::Admin),
            "TEACHER" => Ok(Self::Teacher),
            "STUDENT" => Ok(Self::Student),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Languages a teacher may teach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Specification {
    English,
    Russian,
    Deutsch,
    Spanish,
    French,
    Italian,
    Japanese,
    Chinese,
    Arabic,
    Korean,
}

impl Specification {
    /// The canonical upper-case tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::English => "ENGLISH",
            Self::Russian => "RUSSIAN",
            Self::Deutsch => "DEUTSCH",
            Self::Spanish => "SPANISH",
            Self::French => "FRENCH",
            Self::Italian => "ITALIAN",
            Self::Japanese => "JAPANESE",
            Self::Chinese => "CHINESE",
            Self::Arabic => "ARABIC",
            Self::Korean => "KOREAN",
        }
    }
}

impl FromStr for Specification {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ENGLISH" => Ok(Self::English),
            "RUSSIAN" => Ok(Self::Russian),
            "DEUTSCH" => Ok(Self::Deutsch),
            "SPANISH" => Ok(Self::Spanish),
            "FRENCH" => Ok(Self::French),
            "ITALIAN" => Ok(Self::Italian),
            "JAPANESE" => Ok(Self::Japanese),
            "CHINESE" => Ok(Self::Chinese),
            "ARABIC" => Ok(Self::Arabic),
            "KOREAN" => Ok(Self::Korean),
            _ => Err(DomainError::InvalidSpecification(s.to_string())),
        }
    }
}

impl std::fmt::Display for Specification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
