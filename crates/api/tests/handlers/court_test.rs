use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use courtbook_core::models::{
    court::Court,
    user::{Role, User},
    venue::Venue,
};
use courtbook_db::{mock::repositories::MockStore, repositories::TimeSlotRepository};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{next_weekday, server_for, Authorized, TestContext, JWT_SECRET};

#[test_log::test(tokio::test)]
async fn test_courts_by_sport_paginates() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    for _ in 0..25 {
        let venue = ctx.venue(&owner.user, Some("Mumbai"), true).await;
        ctx.court(&venue, "Tennis").await;
    }

    let first = ctx
        .server
        .get("/api/courts/tennis")
        .add_query_param("limit", 20)
        .add_query_param("offset", 0)
        .await;

    first.assert_status_ok();
    let body = first.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 20);
    assert_eq!(
        body["pagination"],
        json!({ "total": 25, "limit": 20, "offset": 0, "hasNext": true })
    );

    let last = ctx
        .server
        .get("/api/courts/TENNIS")
        .add_query_param("limit", 20)
        .add_query_param("offset", 20)
        .await
        .json::<Value>();
    assert_eq!(last["data"].as_array().unwrap().len(), 5);
    assert_eq!(last["pagination"]["hasNext"], false);
}

#[tokio::test]
async fn test_courts_by_sport_clamps_limit() {
    let ctx = TestContext::new();

    let huge = ctx
        .server
        .get("/api/courts/padel")
        .add_query_param("limit", 1000)
        .await
        .json::<Value>();
    let zero = ctx
        .server
        .get("/api/courts/padel")
        .add_query_param("limit", 0)
        .add_query_param("offset", -5)
        .await
        .json::<Value>();

    assert_eq!(huge["pagination"]["limit"], 100);
    assert_eq!(zero["pagination"]["limit"], 1);
    assert_eq!(zero["pagination"]["offset"], 0);
}

#[tokio::test]
async fn test_courts_by_sport_orders_by_rating_and_filters_city() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;

    let modest = ctx.venue(&owner.user, Some("Delhi"), true).await;
    let famous = ctx.venue(&owner.user, Some("New Delhi"), true).await;
    let elsewhere = ctx.venue(&owner.user, Some("Kochi"), true).await;
    let pending = ctx.venue(&owner.user, Some("Delhi"), false).await;
    ctx.store.set_venue_rating(modest.id, 3.5).await;
    ctx.store.set_venue_rating(famous.id, 4.8).await;
    ctx.store.set_venue_rating(elsewhere.id, 5.0).await;

    ctx.court(&modest, "football").await;
    ctx.court(&famous, "football").await;
    ctx.court(&elsewhere, "football").await;
    ctx.court(&pending, "football").await;

    let body = ctx
        .server
        .get("/api/courts/football")
        .add_query_param("city", "delhi")
        .await
        .json::<Value>();

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["venue"]["id"], famous.id.to_string());
    assert_eq!(data[0]["venue"]["rating"], 4.8);
    assert_eq!(data[1]["venue"]["id"], modest.id.to_string());
    assert_eq!(data[0]["sportType"], "football");
    assert!(data[0]["venue"].get("ownerId").is_none());
}

#[tokio::test]
async fn test_courts_by_sport_database_failure() {
    let mut store = MockStore::new();
    store
        .expect_find_courts_by_sport()
        .returning(|_| Err(eyre::eyre!("connection reset by peer")));
    let server = server_for(Arc::new(store));

    let response = server.get("/api/courts/tennis").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Database error");
    assert_eq!(body["error"], "connection reset by peer");
}

#[tokio::test]
async fn test_create_and_list_courts() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let venue = ctx.venue(&owner.user, None, true).await;
    let path = format!("/api/venues/{}/courts", venue.id);

    let created = ctx
        .server
        .post(&path)
        .bearer(&owner.token)
        .json(&json!({ "name": "Court 1", "sportType": "badminton" }))
        .await;

    assert_eq!(created.status_code(), StatusCode::CREATED);
    let court = created.json::<Value>()["data"].clone();
    assert_eq!(court["pricePerHour"], 40.0);
    assert_eq!(court["isActive"], true);

    let listed = ctx.server.get(&path).await.json::<Value>();
    assert_eq!(listed["data"], json!([court]));
}

#[tokio::test]
async fn test_create_court_requires_venue_ownership() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let rival = ctx.account(Role::Owner).await;
    let venue = ctx.venue(&owner.user, None, true).await;

    let response = ctx
        .server
        .post(&format!("/api/venues/{}/courts", venue.id))
        .bearer(&rival.token)
        .json(&json!({ "name": "Court 9", "sportType": "squash", "pricePerHour": 20.0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_court_removes_its_slots() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let venue = ctx.venue(&owner.user, None, true).await;
    let court = ctx.court(&venue, "tennis").await;
    let slot = ctx.slot(&court, 2, "08:00", "09:00", true).await;
    ctx.slot(&court, 3, "08:00", "09:00", true).await;

    let response = ctx
        .server
        .delete(&format!("/api/venues/{}/courts/{}", venue.id, court.id))
        .bearer(&owner.token)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["data"],
        json!({ "deleted": true, "removedTimeSlots": 2 })
    );
    assert!(ctx.store.get_time_slot(slot.id).await.unwrap().is_none());

    let again = ctx
        .server
        .delete(&format!("/api/venues/{}/courts/{}", venue.id, court.id))
        .bearer(&owner.token)
        .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_court_failure_is_a_single_store_call() {
    let owner = User {
        id: Uuid::new_v4(),
        name: "Owner".to_string(),
        email: "owner@example.com".to_string(),
        password_hash: String::new(),
        role: Role::Owner,
        created_at: Utc::now(),
    };
    let venue = Venue {
        id: Uuid::new_v4(),
        name: "Arena".to_string(),
        address: "1 Main St".to_string(),
        city: "Pune".to_string(),
        description: None,
        rating: 0.0,
        price_per_hour: 30.0,
        is_approved: true,
        owner_id: owner.id,
        created_at: Utc::now(),
    };
    let court = Court {
        id: Uuid::new_v4(),
        venue_id: venue.id,
        name: "Court 1".to_string(),
        sport_type: "tennis".to_string(),
        price_per_hour: 30.0,
        is_active: true,
        created_at: Utc::now(),
    };
    let token = courtbook_api::middleware::auth::issue_token(owner.id, owner.role, JWT_SECRET, 1).unwrap();
    let path = format!("/api/venues/{}/courts/{}", venue.id, court.id);

    // Any other store call would panic the mock
    let mut store = MockStore::new();
    store
        .expect_get_user_by_id()
        .returning(move |_| Ok(Some(owner.clone())));
    store
        .expect_get_venue()
        .returning(move |_| Ok(Some(venue.clone())));
    store
        .expect_get_court()
        .returning(move |_| Ok(Some(court.clone())));
    store
        .expect_delete_court()
        .times(1)
        .returning(|_| Err(eyre::eyre!("deadlock detected")));
    let server = server_for(Arc::new(store));

    let response = server.delete(&path).bearer(&token).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["message"], "Database error");
}

#[tokio::test]
async fn test_court_must_belong_to_venue() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let venue = ctx.venue(&owner.user, None, true).await;
    let other_venue = ctx.venue(&owner.user, None, true).await;
    let court = ctx.court(&other_venue, "tennis").await;

    let response = ctx
        .server
        .get(&format!("/api/venues/{}/courts/{}/slots", venue.id, court.id))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_court_bookings_for_owner() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let player = ctx.account(Role::User).await;
    let venue = ctx.venue(&owner.user, None, true).await;
    let court = ctx.court(&venue, "tennis").await;
    ctx.slot(&court, 4, "18:00", "21:00", true).await;
    let date = next_weekday(4);

    ctx.server
        .post("/api/bookings")
        .bearer(&player.token)
        .json(&json!({
            "courtId": court.id,
            "date": date,
            "startTime": "18:00",
            "endTime": "19:00"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let path = format!("/api/venues/{}/courts/{}/bookings", venue.id, court.id);
    let for_owner = ctx
        .server
        .get(&path)
        .add_query_param("date", date.to_string())
        .bearer(&owner.token)
        .await;
    let for_player = ctx
        .server
        .get(&path)
        .add_query_param("date", date.to_string())
        .bearer(&player.token)
        .await;

    for_owner.assert_status_ok();
    let bookings = for_owner.json::<Value>()["data"].clone();
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    assert_eq!(bookings[0]["startTime"], "18:00");
    assert_eq!(for_player.status_code(), StatusCode::FORBIDDEN);
}
