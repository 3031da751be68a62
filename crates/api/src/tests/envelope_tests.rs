// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, ErrorEnvelope, ErrorMessage, INTERNAL_SERVER_ERROR, created, ok, paginated, success,
};
use hmhy_domain::{PageRequest, PageResult, ValidationErrors};
use hmhy_persistence::PersistenceError;
use serde_json::{Value, json};

#[test]
fn test_ok_envelope_wire_shape() {
    let body: Value = serde_json::to_value(ok(json!({"name": "x"}))).unwrap();

    assert_eq!(
        body,
        json!({
            "statusCode": 200,
            "message": {
                "uz": "Amaliyot muvaffaqiyatli bajarildi",
                "en": "Operation successfully completed",
                "ru": "Операция успешно выполнена"
            },
            "data": {"name": "x"}
        })
    );
}

#[test]
fn test_created_and_custom_status() {
    assert_eq!(created(()).status_code, 201);
    assert_eq!(success((), 202).status_code, 202);
}

#[test]
fn test_free_text_message() {
    let body: Value = serde_json::to_value(ok(1).with_message("Signed out")).unwrap();

    assert_eq!(body["message"], json!("Signed out"));
}

#[test]
fn test_paginated_envelope_wire_shape() {
    let items: Vec<u32> = vec![21, 22, 23];
    let page: PageResult<u32> = PageResult::new(items, 23, PageRequest::new(Some(3), Some(10)));
    let body: Value = serde_json::to_value(paginated(page)).unwrap();

    assert_eq!(body["statusCode"], json!(200));
    assert_eq!(body["data"], json!([21, 22, 23]));
    assert_eq!(body["totalElements"], json!(23));
    assert_eq!(body["totalPages"], json!(3));
    assert_eq!(body["pageSize"], json!(10));
    assert_eq!(body["currentPage"], json!(3));
    assert_eq!(body["from"], json!(21));
    assert_eq!(body["to"], json!(23));
}

#[test]
fn test_error_envelope_message_forms() {
    let mut errors: ValidationErrors = ValidationErrors::new();
    errors.push("username must not be empty");
    errors.push("password must be at least 6 characters");
    let validation: ApiError = ApiError::from(errors);

    let envelope: ErrorEnvelope = ErrorEnvelope {
        status_code: validation.status_code(),
        message: validation.public_message(),
        timestamp: String::from("2026-03-01T08:00:00Z"),
        path: String::from("/api/v1/admins"),
        method: String::from("POST"),
    };
    let body: Value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(body["statusCode"], json!(422));
    assert_eq!(
        body["message"],
        json!([
            "username must not be empty",
            "password must be at least 6 characters"
        ])
    );
    assert_eq!(body["path"], json!("/api/v1/admins"));
    assert_eq!(body["method"], json!("POST"));
}

#[test]
fn test_store_errors_are_not_leaked() {
    let internal: ApiError =
        ApiError::from(PersistenceError::Query(String::from("no such table: x")));

    assert_eq!(internal.status_code(), 500);
    assert!(internal.is_logged());
    assert_eq!(
        internal.public_message(),
        ErrorMessage::Text(String::from(INTERNAL_SERVER_ERROR))
    );

    let conflict: ApiError = ApiError::from(PersistenceError::ConstraintViolation(String::from(
        "UNIQUE constraint failed: teachers.email",
    )));
    assert_eq!(conflict.status_code(), 409);
    assert!(!conflict.is_logged());
    assert_eq!(
        conflict.public_message(),
        ErrorMessage::Text(String::from("Duplicate entry"))
    );
}

#[test]
fn test_rate_limit_is_logged() {
    assert_eq!(ApiError::RateLimited.status_code(), 429);
    assert!(ApiError::RateLimited.is_logged());
    assert!(
        !ApiError::NotFound {
            message: String::from("Teacher not found")
        }
        .is_logged()
    );
}
