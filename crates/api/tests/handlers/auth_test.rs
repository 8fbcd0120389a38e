use axum::http::StatusCode;
use courtbook_core::models::user::Role;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{Authorized, TestContext};

#[test_log::test(tokio::test)]
async fn test_register_login_and_me() {
    let ctx = TestContext::new();

    let registered = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Priya Raman",
            "email": "Priya@Example.com",
            "password": "rallypoint",
            "role": "owner"
        }))
        .await;

    assert_eq!(registered.status_code(), StatusCode::CREATED);
    let body = registered.json::<Value>();
    assert_eq!(body["data"]["user"]["email"], "priya@example.com");
    assert_eq!(body["data"]["user"]["role"], "owner");
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let login = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "priya@example.com", "password": "rallypoint" }))
        .await;
    login.assert_status_ok();
    let token = login.json::<Value>()["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let me = ctx.server.get("/api/auth/me").bearer(&token).await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["data"]["name"], "Priya Raman");
}

#[tokio::test]
async fn test_register_defaults_to_user_role() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Sam", "email": "sam@example.com", "password": "secret1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["data"]["user"]["role"], "user");
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let ctx = TestContext::new();

    let short_password = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Sam", "email": "sam@example.com", "password": "123" }))
        .await;
    let admin = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Sam", "email": "sam@example.com", "password": "secret1", "role": "admin" }))
        .await;
    let bad_email = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Sam", "email": "sam.example.com", "password": "secret1" }))
        .await;

    assert_eq!(short_password.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(admin.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let ctx = TestContext::new();
    let payload = json!({ "name": "Sam", "email": "sam@example.com", "password": "secret1" });

    let first = ctx.server.post("/api/auth/register").json(&payload).await;
    let second = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "Other Sam", "email": "SAM@example.com", "password": "secret2" }))
        .await;

    assert_eq!(first.status_code(), StatusCode::CREATED);
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    assert_eq!(second.json::<Value>()["success"], false);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/auth/register")
        .json(&json!({ "name": "Sam", "email": "sam@example.com", "password": "secret1" }))
        .await
        .assert_status(StatusCode::CREATED);

    let wrong_password = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "sam@example.com", "password": "secret2" }))
        .await;
    let unknown_email = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "secret1" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<Value>()["error"],
        unknown_email.json::<Value>()["error"]
    );
}

#[tokio::test]
async fn test_me_returns_stored_profile() {
    let ctx = TestContext::new();
    let account = ctx.account(Role::Owner).await;

    let response = ctx.server.get("/api/auth/me").bearer(&account.token).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"]["id"], account.user.id.to_string());
    assert_eq!(body["data"]["role"], "owner");
}
