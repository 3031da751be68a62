// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::upload_policy::FileCategory;

/// Errors that can occur while interpreting domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The role tag is not one of the known roles.
    InvalidRole(String),
    /// The teacher specification is not one of the supported languages.
    InvalidSpecification(String),
    /// The uploaded file has no content.
    EmptyFile,
    /// The MIME type is not on any category allow-list.
    UnsupportedMimeType(String),
    /// The file exceeds the size limit of its category.
    FileTooLarge {
        /// The category the MIME type belongs to.
        category: FileCategory,
        /// The category limit in bytes.
        limit: u64,
        /// The actual file size in bytes.
        size: u64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidSpecification(spec) => write!(f, "Invalid specification: {spec}"),
            Self::EmptyFile => write!(f, "File is required"),
            Self::UnsupportedMimeType(mime) => write!(f, "Unsupported file format: {mime}"),
            Self::FileTooLarge {
                category,
                limit,
                size,
            } => write!(
                f,
                "{} size must not exceed {}MB (got {size} bytes)",
                category.label(),
                limit / (1024 * 1024)
            ),
        }
    }
}

impl std::error::Error for DomainError {}

/// A collection of per-field validation messages.
///
/// Validation collects every violation instead of stopping at the first one
/// so the client can fix all fields in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Records a violation.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Records a violation when `condition` is false.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.push(message);
        }
    }

    /// Returns true if no violation was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The recorded messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes the collection, returning the messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// Converts the collection into a result.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` if any violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
