mod common;

use auth::Claims;
use auth::TokenKind;
use axum::http::StatusCode;
use chrono::Duration;
use common::TestApp;
use serde_json::json;
use uuid::Uuid;

fn invalid_grant_body() -> serde_json::Value {
    json!({
        "detail": {
            "error": "invalid_token",
            "error_description": "The access token expired",
        }
    })
}

#[tokio::test]
async fn test_temp_code_exchanges_for_a_session() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();

    let (status, body) = app
        .get(&format!("/api/oauth/temp-code?user_id={user_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let code = body["code"].as_str().expect("code is not a string");
    assert!(!code.is_empty());

    let (status, body) = app
        .post_form(
            "/api/oauth/token",
            format!("grant_type=authorization_code&code={code}"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let access_token = body["access_token"].as_str().unwrap();
    let refresh_token = body["refresh_token"].as_str().unwrap();
    assert!(!access_token.is_empty());
    assert!(!refresh_token.is_empty());
    assert_ne!(access_token, refresh_token);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 30 * 60);

    // The session belongs to the user the code was minted for
    let claims = app.codec.decode(access_token).unwrap();
    assert_eq!(claims.subject().unwrap(), user_id);
    assert_eq!(claims.kind, TokenKind::Access);
}

#[tokio::test]
async fn test_token_missing_grant_type_is_a_validation_error() {
    let app = TestApp::new();

    let (status, body) = app
        .post_form("/api/oauth/token", "code=testcode".to_string())
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "grant_type"]));
    assert_eq!(body["detail"][0]["msg"], "Field required");
    assert_eq!(body["detail"][0]["type"], "missing");
}

#[tokio::test]
async fn test_token_unknown_grant_type_is_a_credentials_failure() {
    let app = TestApp::new();

    let (status, body) = app
        .post_form(
            "/api/oauth/token",
            "grant_type=client_credentials".to_string(),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, invalid_grant_body());
}

#[tokio::test]
async fn test_token_missing_operand_is_a_credentials_failure() {
    let app = TestApp::new();

    let (status, body) = app
        .post_form("/api/oauth/token", "grant_type=authorization_code".to_string())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, invalid_grant_body());

    let (status, body) = app
        .post_form("/api/oauth/token", "grant_type=refresh_token".to_string())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, invalid_grant_body());
}

#[tokio::test]
async fn test_refresh_rotates_without_burning_the_old_token() {
    let app = TestApp::new();
    let session = app
        .session_issuer
        .issue_session(Uuid::new_v4(), Some("junaid"))
        .unwrap();

    let (status, body) = app
        .post_form(
            "/api/oauth/token",
            format!(
                "grant_type=refresh_token&refresh_token={}",
                session.refresh_token
            ),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["access_token"], json!(session.refresh_token));
    assert_ne!(body["refresh_token"], json!(session.refresh_token));
    assert_eq!(body["token_type"], "bearer");

    // No server-side burn: presenting the same refresh token again yields
    // yet another fresh pair.
    let (status, again) = app
        .post_form(
            "/api/oauth/token",
            format!(
                "grant_type=refresh_token&refresh_token={}",
                session.refresh_token
            ),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!again["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_tampered_refresh_token_is_rejected() {
    let app = TestApp::new();
    let session = app
        .session_issuer
        .issue_session(Uuid::new_v4(), None)
        .unwrap();
    let mut tampered = session.refresh_token;
    tampered.pop();
    tampered.push('x');

    let (status, body) = app
        .post_form(
            "/api/oauth/token",
            format!("grant_type=refresh_token&refresh_token={tampered}"),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, invalid_grant_body());
}

#[tokio::test]
async fn test_expired_refresh_token_is_rejected() {
    let app = TestApp::new();
    let claims = Claims::new(TokenKind::Refresh, Uuid::new_v4(), Duration::minutes(-1));
    let expired = app.codec.encode(&claims).unwrap();

    let (status, body) = app
        .post_form(
            "/api/oauth/token",
            format!("grant_type=refresh_token&refresh_token={expired}"),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, invalid_grant_body());
}

#[tokio::test]
async fn test_access_token_cannot_be_replayed_as_refresh_token() {
    let app = TestApp::new();
    let session = app
        .session_issuer
        .issue_session(Uuid::new_v4(), None)
        .unwrap();

    let (status, body) = app
        .post_form(
            "/api/oauth/token",
            format!(
                "grant_type=refresh_token&refresh_token={}",
                session.access_token
            ),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, invalid_grant_body());
}

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/todos", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": "Not authenticated" }));
}

#[tokio::test]
async fn test_protected_route_rejects_refresh_token() {
    let app = TestApp::new();
    let session = app
        .session_issuer
        .issue_session(Uuid::new_v4(), Some("junaid"))
        .unwrap();

    let (status, body) = app
        .get("/api/todos", Some(session.refresh_token.as_str()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": "Invalid authentication credentials" }));
}

#[tokio::test]
async fn test_protected_route_rejects_garbage_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/todos", Some("invalid.token.here")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": "Invalid authentication credentials" }));
}

#[tokio::test]
async fn test_login_with_incomplete_form_is_a_validation_error() {
    let app = TestApp::new();

    let (status, body) = app
        .post_form("/api/oauth/login", "username=junaid".to_string())
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "password"]));
    assert_eq!(body["detail"][0]["msg"], "Field required");
    assert_eq!(body["detail"][0]["type"], "missing");
}
