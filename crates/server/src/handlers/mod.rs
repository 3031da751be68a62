// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers, grouped by resource.

pub mod admins;
pub mod auth;
pub mod crud;
pub mod files;
pub mod health;
pub mod students;
pub mod teachers;

use axum::{Json, http::StatusCode};
use hmhy_api::{GetOptions, ListFilter, SuccessEnvelope};
use hmhy_domain::PageRequest;
use serde::{Deserialize, Serialize};

/// Query parameters of list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub limit: Option<i64>,
    pub search: Option<String>,
    /// Restricts `search` to one field.
    pub search_field: Option<String>,
    pub level: Option<String>,
    pub specification: Option<String>,
    pub is_active: Option<bool>,
    pub include_deleted: Option<bool>,
}

impl ListQuery {
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    #[must_use]
    pub fn into_filter(self) -> ListFilter {
        let attributes: Vec<(String, String)> = [
            ("level", self.level),
            ("specification", self.specification),
        ]
        .into_iter()
        .filter_map(|(field, value)| Some((field.to_string(), value?)))
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();

        ListFilter {
            search: self.search,
            search_field: self.search_field,
            attributes,
            is_active: self.is_active,
            include_deleted: self.include_deleted.unwrap_or(false),
        }
    }
}

/// Query parameters of get-by-id endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuery {
    /// Comma-separated field names.
    pub fields: Option<String>,
    pub include_deleted: Option<bool>,
}

impl GetQuery {
    #[must_use]
    pub fn options(&self) -> GetOptions {
        GetOptions::with_field_list(
            self.fields.as_deref(),
            self.include_deleted.unwrap_or(false),
        )
    }
}

/// Query parameters of status toggles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusQuery {
    /// Wire name of the flag; defaults to `isActive`.
    pub field: Option<String>,
}

/// Body of soft-delete requests. The body itself is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SoftDeleteBody {
    pub reason: Option<String>,
}

/// Responds with the envelope's status code and the envelope as body.
pub fn respond<T>(envelope: SuccessEnvelope<T>) -> (StatusCode, Json<SuccessEnvelope<T>>) {
    let status: StatusCode = StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::OK);
    (status, Json(envelope))
}
