use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use courtbook_core::models::user::{Role, User};
use courtbook_db::mock::repositories::MockStore;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{server_for, Authorized, TestContext, JWT_SECRET};

#[tokio::test]
async fn test_admin_approves_pending_venue() {
    let ctx = TestContext::new();
    let admin = ctx.account(Role::Admin).await;
    let owner = ctx.account(Role::Owner).await;
    let venue = ctx.venue(&owner.user, Some("Jaipur"), false).await;

    let pending = ctx
        .server
        .get("/api/admin/venues/pending")
        .bearer(&admin.token)
        .await
        .json::<Value>();
    assert_eq!(pending["data"][0]["id"], venue.id.to_string());

    let approved = ctx
        .server
        .patch(&format!("/api/admin/venues/{}/approval", venue.id))
        .bearer(&admin.token)
        .json(&json!({ "approved": true }))
        .await;
    approved.assert_status_ok();
    assert_eq!(approved.json::<Value>()["data"]["isApproved"], true);

    let public = ctx
        .server
        .get("/api/venues")
        .add_query_param("city", "jaipur")
        .await
        .json::<Value>();
    assert_eq!(public["data"][0]["id"], venue.id.to_string());

    let still_pending = ctx
        .server
        .get("/api/admin/venues/pending")
        .bearer(&admin.token)
        .await
        .json::<Value>();
    assert_eq!(still_pending["data"], json!([]));
}

#[tokio::test]
async fn test_approval_of_unknown_venue_is_not_found() {
    let ctx = TestContext::new();
    let admin = ctx.account(Role::Admin).await;

    let response = ctx
        .server
        .patch(&format!("/api/admin/venues/{}/approval", Uuid::new_v4()))
        .bearer(&admin.token)
        .json(&json!({ "approved": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_moderation_is_admin_only() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let venue = ctx.venue(&owner.user, None, false).await;

    let listing = ctx
        .server
        .get("/api/admin/venues/pending")
        .bearer(&owner.token)
        .await;
    let self_approval = ctx
        .server
        .patch(&format!("/api/admin/venues/{}/approval", venue.id))
        .bearer(&owner.token)
        .json(&json!({ "approved": true }))
        .await;
    let users = ctx.server.get("/api/admin/users").bearer(&owner.token).await;

    assert_eq!(listing.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(self_approval.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(users.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_hides_password_hashes() {
    let ctx = TestContext::new();
    let admin = ctx.account(Role::Admin).await;
    ctx.account(Role::User).await;
    ctx.account(Role::Owner).await;

    let response = ctx.server.get("/api/admin/users").bearer(&admin.token).await;

    response.assert_status_ok();
    let users = response.json::<Value>()["data"].clone();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|user| user.get("passwordHash").is_none()));
}

#[tokio::test]
async fn test_list_users_database_failure() {
    let admin = User {
        id: Uuid::new_v4(),
        name: "Root".to_string(),
        email: "root@example.com".to_string(),
        password_hash: String::new(),
        role: Role::Admin,
        created_at: Utc::now(),
    };
    let token =
        courtbook_api::middleware::auth::issue_token(admin.id, admin.role, JWT_SECRET, 1).unwrap();

    let mut store = MockStore::new();
    store
        .expect_get_user_by_id()
        .returning(move |_| Ok(Some(admin.clone())));
    store
        .expect_list_users()
        .times(1)
        .returning(|| Err(eyre::eyre!("relation \"users\" does not exist")));
    let server = server_for(Arc::new(store));

    let response = server.get("/api/admin/users").bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["message"], "Database error");
}
