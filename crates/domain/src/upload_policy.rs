// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload acceptance rules.
//!
//! Every accepted file belongs to exactly one category, determined by its
//! MIME type. Each category has its own size ceiling.

use crate::error::DomainError;
use serde::Serialize;

const MEGABYTE: u64 = 1024 * 1024;

/// Size ceiling for images.
pub const IMAGE_LIMIT: u64 = 5 * MEGABYTE;
/// Size ceiling for documents.
pub const DOCUMENT_LIMIT: u64 = 5 * MEGABYTE;
/// Size ceiling for videos.
pub const VIDEO_LIMIT: u64 = 50 * MEGABYTE;

const IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/jpg",
    "image/webp",
    "image/svg+xml",
];

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const VIDEO_TYPES: &[&str] = &["video/mp4", "video/quicktime", "video/x-msvideo"];

/// The kind of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileCategory {
    Image,
    Document,
    Video,
}

impl FileCategory {
    /// Human-readable label used in error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Document => "Document",
            Self::Video => "Video",
        }
    }

    /// Maximum accepted size in bytes.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        match self {
            Self::Image => IMAGE_LIMIT,
            Self::Document => DOCUMENT_LIMIT,
            Self::Video => VIDEO_LIMIT,
        }
    }

    const fn mime_types(self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_TYPES,
            Self::Document => DOCUMENT_TYPES,
            Self::Video => VIDEO_TYPES,
        }
    }
}

/// Returns the category of a MIME type, or `None` if it is not accepted.
///
/// Parameters after `;` (e.g. `charset`) are ignored and matching is
/// case-insensitive.
#[must_use]
pub fn classify(mime: &str) -> Option<FileCategory> {
    let essence: String = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    [
        FileCategory::Image,
        FileCategory::Document,
        FileCategory::Video,
    ]
    .into_iter()
    .find(|category| category.mime_types().contains(&essence.as_str()))
}

/// Checks an upload against the policy.
///
/// # Arguments
///
/// * `mime` - The declared content type
/// * `size` - The payload size in bytes
///
/// # Errors
///
/// Returns an error if the file is empty, its MIME type is not accepted, or
/// it exceeds the ceiling of its category.
pub fn validate_upload(mime: &str, size: u64) -> Result<FileCategory, DomainError> {
    if size == 0 {
        return Err(DomainError::EmptyFile);
    }

    let category: FileCategory =
        classify(mime).ok_or_else(|| DomainError::UnsupportedMimeType(mime.to_string()))?;

    if size > category.limit() {
        return Err(DomainError::FileTooLarge {
            category,
            limit: category.limit(),
            size,
        });
    }

    Ok(category)
}
