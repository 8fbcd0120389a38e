use axum::{body::to_bytes, http::StatusCode, response::Response};
use chrono::Utc;
use courtbook_api::middleware::{
    auth::{self, issue_token, Claims},
    error_handling::map_error,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use courtbook_core::{errors::CourtbookError, models::user::Role};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{Authorized, TestContext, JWT_SECRET};

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(CourtbookError::NotFound("Venue missing".into()), StatusCode::NOT_FOUND, "Resource not found")]
#[case(CourtbookError::Validation("Bad date".into()), StatusCode::BAD_REQUEST, "Invalid request")]
#[case(CourtbookError::Authentication("No token".into()), StatusCode::UNAUTHORIZED, "Authentication required")]
#[case(CourtbookError::Authorization("Not yours".into()), StatusCode::FORBIDDEN, "Access denied")]
#[case(CourtbookError::Conflict("Taken".into()), StatusCode::CONFLICT, "Request conflicts with existing data")]
#[tokio::test]
async fn test_error_envelope(
    #[case] error: CourtbookError,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let detail = match &error {
        CourtbookError::NotFound(d)
        | CourtbookError::Validation(d)
        | CourtbookError::Authentication(d)
        | CourtbookError::Authorization(d)
        | CourtbookError::Conflict(d) => d.clone(),
        _ => unreachable!(),
    };

    let response = map_error(error);
    assert_eq!(response.status(), status);
    assert_eq!(
        body_json(response).await,
        json!({ "success": false, "message": message, "error": detail })
    );
}

#[tokio::test]
async fn test_error_handling_database() {
    let response = map_error(CourtbookError::Database(eyre::eyre!("pool timed out")));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Database error");
    assert_eq!(body["error"], "pool timed out");
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = CourtbookError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_hash_password() {
    let hashed = auth::hash_password("test_password").unwrap();

    assert_ne!(hashed, "test_password");
    assert!(hashed.starts_with("$argon2"));
    assert!(auth::verify_password("test_password", &hashed));
    assert!(!auth::verify_password("wrong_password", &hashed));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Access token required");
}

#[tokio::test]
async fn test_invalid_token_is_forbidden() {
    let ctx = TestContext::new();
    let account = ctx.account(Role::User).await;
    let forged = issue_token(account.user.id, Role::Admin, "some-other-secret", 24).unwrap();

    let garbage = ctx.server.get("/api/auth/me").bearer("not.a.jwt").await;
    let wrong_secret = ctx.server.get("/api/auth/me").bearer(&forged).await;

    assert_eq!(garbage.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(wrong_secret.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    let ctx = TestContext::new();
    let account = ctx.account(Role::User).await;
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: account.user.id,
        role: account.user.role,
        iat: now - 3 * 3600,
        exp: now - 2 * 3600,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = ctx.server.get("/api/auth/me").bearer(&expired).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let ctx = TestContext::new();
    let token = issue_token(Uuid::new_v4(), Role::Admin, JWT_SECRET, 24).unwrap();

    let response = ctx.server.get("/api/admin/users").bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stored_role_overrides_token_claim() {
    let ctx = TestContext::new();
    let account = ctx.account(Role::User).await;
    let escalated = issue_token(account.user.id, Role::Admin, JWT_SECRET, 24).unwrap();

    let response = ctx.server.get("/api/admin/users").bearer(&escalated).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/nothing-here").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Resource not found");
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health = ctx.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = ctx.server.get("/version").await;
    assert_eq!(version.json::<Value>()["version"], env!("CARGO_PKG_VERSION"));
}
