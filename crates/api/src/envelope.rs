// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Uniform response bodies.
//!
//! Every successful response is a [`SuccessEnvelope`] or, for list
//! endpoints, a [`PaginatedEnvelope`]. Failures use [`ErrorEnvelope`], which
//! has the same shape minus `data`.

use hmhy_domain::PageResult;
use serde::Serialize;

/// HTTP 200.
pub const STATUS_OK: u16 = 200;
/// HTTP 201.
pub const STATUS_CREATED: u16 = 201;

/// A message translated into the three platform languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedMessage {
    pub uz: &'static str,
    pub en: &'static str,
    pub ru: &'static str,
}

/// The generic success message.
pub const OPERATION_SUCCEEDED: LocalizedMessage = LocalizedMessage {
    uz: "Amaliyot muvaffaqiyatli bajarildi",
    en: "Operation successfully completed",
    ru: "Операция успешно выполнена",
};

/// Success message: either localized or a free string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Localized(LocalizedMessage),
    Text(String),
}

impl Default for Message {
    fn default() -> Self {
        Self::Localized(OPERATION_SUCCEEDED)
    }
}

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope<T> {
    pub status_code: u16,
    pub message: Message,
    pub data: T,
}

impl<T> SuccessEnvelope<T> {
    /// Replaces the default localized message with a free string.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Message::Text(message.into());
        self
    }
}

/// Body of a successful list response.
///
/// Field names follow the wire contract: `from`/`to` are the 1-based bounds
/// of the page within the full result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEnvelope<T> {
    pub status_code: u16,
    pub message: Message,
    pub data: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub from: u64,
    pub to: u64,
}

/// Failure message: a single string or one entry per validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub message: ErrorMessage,
    /// RFC 3339 time the failure was produced.
    pub timestamp: String,
    pub path: String,
    pub method: String,
}

/// Wraps `data` with the given status and the default message.
#[must_use]
pub fn success<T>(data: T, status_code: u16) -> SuccessEnvelope<T> {
    SuccessEnvelope {
        status_code,
        message: Message::default(),
        data,
    }
}

/// Wraps `data` with status 200.
#[must_use]
pub fn ok<T>(data: T) -> SuccessEnvelope<T> {
    success(data, STATUS_OK)
}

/// Wraps `data` with status 201.
#[must_use]
pub fn created<T>(data: T) -> SuccessEnvelope<T> {
    success(data, STATUS_CREATED)
}

/// Wraps one page of results with status 200 and its pagination metadata.
#[must_use]
pub fn paginated<T>(page: PageResult<T>) -> PaginatedEnvelope<T> {
    PaginatedEnvelope {
        status_code: STATUS_OK,
        message: Message::default(),
        data: page.items,
        total_elements: page.total_count,
        total_pages: page.total_pages,
        page_size: page.page_size,
        current_page: page.current_page,
        from: page.range_start,
        to: page.range_end,
    }
}
