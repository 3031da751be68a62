// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::{Method, StatusCode};
use hmhy_api::{Access, Operation, requirement};
use hmhy_domain::Role;

use super::helpers::{create_test_app, json_request, send};

#[tokio::test]
async fn test_health_is_public() {
    let app = create_test_app();

    let (status, body) = send(
        app.router(),
        json_request(Method::GET, "/api/v1/health", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_missing_bearer_renders_error_envelope() {
    let app = create_test_app();

    let (status, body) = send(
        app.router(),
        json_request(Method::GET, "/api/v1/teachers", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["path"], "/api/v1/teachers");
    assert_eq!(body["method"], "GET");
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_malformed_bearer_is_unauthorized() {
    let app = create_test_app();

    let (status, _) = send(
        app.router(),
        json_request(Method::GET, "/api/v1/teachers", Some("not-a-jwt"), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();

    let (status, body) = send(
        app.router(),
        json_request(Method::GET, "/api/v1/lessons", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "Cannot GET /api/v1/lessons");
    assert_eq!(body["path"], "/api/v1/lessons");
}

#[tokio::test]
async fn test_every_authenticated_operation_rejects_anonymous_requests() {
    let app = create_test_app();

    for op in Operation::ALL {
        if requirement(op) == Access::Public {
            continue;
        }
        let (method, path) = op.route();
        let http_method: Method = match method {
            hmhy_api::Method::Get => Method::GET,
            hmhy_api::Method::Post => Method::POST,
            hmhy_api::Method::Patch => Method::PATCH,
            hmhy_api::Method::Delete => Method::DELETE,
        };
        let uri: String = format!("/api/v1{}", path.replace("{id}", "some-id"));

        let (status, _) = send(app.router(), json_request(http_method, &uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{op:?} {uri}");
    }
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let app = create_test_app();
    let token: String = app.token_for("student-1", Role::Student);

    let (status, body) = send(
        app.router(),
        json_request(Method::GET, "/api/v1/admins", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["statusCode"], 403);
}
