// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    RecordingCookies, create_test_clock, create_test_settings, create_test_token_service,
};
use crate::{
    FixedClock, REFRESH_COOKIE, SameSite, TokenError, TokenKind, TokenPayload, TokenService,
    TokenSettings, attach_cookie, clear_cookie,
};
use serde_json::json;
use std::sync::Arc;
use time::Duration;

fn create_test_payload() -> TokenPayload {
    TokenPayload::new("admin-1", "SUPERADMIN")
}

#[test]
fn test_access_token_round_trip() {
    let tokens: TokenService = create_test_token_service(create_test_clock());
    let token: String = tokens.issue_access(&create_test_payload()).unwrap();

    let payload: TokenPayload = tokens.verify(&token, TokenKind::Access).unwrap();
    assert_eq!(payload, create_test_payload());
}

#[test]
fn test_extra_claims_are_preserved() {
    let tokens: TokenService = create_test_token_service(create_test_clock());
    let mut payload: TokenPayload = create_test_payload();
    payload
        .extra
        .insert(String::from("username"), json!("superadmin"));

    let token: String = tokens.issue_refresh(&payload).unwrap();
    let verified: TokenPayload = tokens.verify(&token, TokenKind::Refresh).unwrap();

    assert_eq!(verified.extra.get("username"), Some(&json!("superadmin")));
}

#[test]
fn test_kinds_do_not_cross_verify() {
    let tokens: TokenService = create_test_token_service(create_test_clock());
    let access: String = tokens.issue_access(&create_test_payload()).unwrap();
    let refresh: String = tokens.issue_refresh(&create_test_payload()).unwrap();

    assert!(matches!(
        tokens.verify(&access, TokenKind::Refresh),
        Err(TokenError::InvalidToken(_))
    ));
    assert!(matches!(
        tokens.verify(&refresh, TokenKind::Access),
        Err(TokenError::InvalidToken(_))
    ));
}

#[test]
fn test_verify_with_secret() {
    let tokens: TokenService = create_test_token_service(create_test_clock());
    let token: String = tokens.issue_access(&create_test_payload()).unwrap();

    assert!(
        tokens
            .verify_with_secret(&token, "access-secret-for-tests")
            .is_ok()
    );
    assert!(matches!(
        tokens.verify_with_secret(&token, "some-other-secret"),
        Err(TokenError::InvalidToken(_))
    ));
}

#[test]
fn test_malformed_token_is_invalid() {
    let tokens: TokenService = create_test_token_service(create_test_clock());

    assert!(matches!(
        tokens.verify("not.a.jwt", TokenKind::Access),
        Err(TokenError::InvalidToken(_))
    ));
    assert!(matches!(
        tokens.verify("", TokenKind::Access),
        Err(TokenError::InvalidToken(_))
    ));
}

#[test]
fn test_access_token_expires_after_lifetime() {
    let clock: Arc<FixedClock> = create_test_clock();
    let tokens: TokenService = create_test_token_service(Arc::clone(&clock));
    let token: String = tokens.issue_access(&create_test_payload()).unwrap();

    clock.advance(Duration::days(1) - Duration::seconds(1));
    assert!(tokens.verify(&token, TokenKind::Access).is_ok());

    clock.advance(Duration::seconds(1));
    assert_eq!(
        tokens.verify(&token, TokenKind::Access),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_refresh_token_outlives_access_token() {
    let clock: Arc<FixedClock> = create_test_clock();
    let tokens: TokenService = create_test_token_service(Arc::clone(&clock));
    let refresh: String = tokens.issue_refresh(&create_test_payload()).unwrap();

    clock.advance(Duration::days(3));
    assert!(tokens.verify(&refresh, TokenKind::Refresh).is_ok());

    clock.advance(Duration::days(4));
    assert_eq!(
        tokens.verify(&refresh, TokenKind::Refresh),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_verify_with_secret_uses_exp_claim() {
    let clock: Arc<FixedClock> = create_test_clock();
    let tokens: TokenService = create_test_token_service(Arc::clone(&clock));
    let token: String = tokens.issue_access(&create_test_payload()).unwrap();

    clock.advance(Duration::days(2));
    assert_eq!(
        tokens.verify_with_secret(&token, "access-secret-for-tests"),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_settings_validation() {
    assert!(create_test_settings().validate().is_ok());

    let same_secrets: TokenSettings = TokenSettings {
        refresh_secret: String::from("access-secret-for-tests"),
        ..create_test_settings()
    };
    assert!(same_secrets.validate().is_err());

    let empty_secret: TokenSettings = TokenSettings {
        access_secret: String::new(),
        ..create_test_settings()
    };
    assert!(empty_secret.validate().is_err());

    let zero_lifetime: TokenSettings = TokenSettings {
        access_lifetime_days: 0,
        ..create_test_settings()
    };
    assert!(zero_lifetime.validate().is_err());
}

#[test]
fn test_settings_debug_redacts_secrets() {
    let rendered: String = format!("{:?}", create_test_settings());

    assert!(!rendered.contains("access-secret-for-tests"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_production_cookie_attributes() {
    let mut cookies: RecordingCookies = RecordingCookies::default();
    attach_cookie(&mut cookies, REFRESH_COOKIE, "token-value", 7, true);

    let cookie = &cookies.set[0];
    assert_eq!(cookie.name, "refreshToken");
    assert_eq!(cookie.value, "token-value");
    assert!(cookie.http_only);
    assert!(cookie.secure);
    assert_eq!(cookie.same_site, SameSite::None);
    assert_eq!(cookie.path, "/");
    assert_eq!(cookie.max_age_seconds, 7 * 86_400);
}

#[test]
fn test_development_cookie_attributes() {
    let mut cookies: RecordingCookies = RecordingCookies::default();
    attach_cookie(&mut cookies, REFRESH_COOKIE, "token-value", 15, false);

    let cookie = &cookies.set[0];
    assert!(cookie.http_only);
    assert!(!cookie.secure);
    assert_eq!(cookie.same_site, SameSite::Lax);
    assert_eq!(cookie.max_age_seconds, 15 * 86_400);
}

#[test]
fn test_clear_cookie_removes_at_root() {
    let mut cookies: RecordingCookies = RecordingCookies::default();
    clear_cookie(&mut cookies, REFRESH_COOKIE);

    assert!(cookies.set.is_empty());
    assert_eq!(
        cookies.removed,
        vec![(String::from("refreshToken"), "/")]
    );
}
