use axum::http::StatusCode;
use chrono::Utc;
use courtbook_core::models::{booking::NewBooking, user::Role};
use courtbook_db::repositories::BookingRepository;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{time, Authorized, TestContext};

#[tokio::test]
async fn test_owner_creates_pending_venue() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;

    let response = ctx
        .server
        .post("/api/venues")
        .bearer(&owner.token)
        .json(&json!({
            "name": "Riverside Sports Hub",
            "address": "12 Quay Road",
            "city": "Pune",
            "description": "Indoor badminton and squash",
            "pricePerHour": 45.0
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["isApproved"], false);
    assert_eq!(body["data"]["ownerId"], owner.user.id.to_string());

    // Not listed until approved
    let listed = ctx.server.get("/api/venues").await.json::<Value>();
    assert_eq!(listed["data"], json!([]));

    let mine = ctx
        .server
        .get("/api/owner/venues")
        .bearer(&owner.token)
        .await
        .json::<Value>();
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_plain_user_cannot_create_venue() {
    let ctx = TestContext::new();
    let user = ctx.account(Role::User).await;

    let response = ctx
        .server
        .post("/api/venues")
        .bearer(&user.token)
        .json(&json!({ "name": "Mine", "address": "x", "city": "y", "pricePerHour": 10.0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_venue_validates_fields() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;

    let response = ctx
        .server
        .post("/api/venues")
        .bearer(&owner.token)
        .json(&json!({ "name": "  ", "address": "x", "city": "y", "pricePerHour": 10.0 }))
        .await;
    let free = ctx
        .server
        .post("/api/venues")
        .bearer(&owner.token)
        .json(&json!({ "name": "Hub", "address": "x", "city": "y", "pricePerHour": 0.0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(free.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_venues_filters_by_city_and_paginates() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    for _ in 0..3 {
        ctx.venue(&owner.user, Some("Bengaluru"), true).await;
    }
    ctx.venue(&owner.user, Some("Chennai"), true).await;

    let response = ctx
        .server
        .get("/api/venues")
        .add_query_param("city", "bengal")
        .add_query_param("limit", 2)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["pagination"],
        json!({ "total": 3, "limit": 2, "offset": 0, "hasNext": true })
    );
}

#[tokio::test]
async fn test_unapproved_venue_visibility() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let stranger = ctx.account(Role::User).await;
    let admin = ctx.account(Role::Admin).await;
    let venue = ctx.venue(&owner.user, None, false).await;
    let path = format!("/api/venues/{}", venue.id);

    let anonymous = ctx.server.get(&path).await;
    let other = ctx.server.get(&path).bearer(&stranger.token).await;
    let own = ctx.server.get(&path).bearer(&owner.token).await;
    let moderator = ctx.server.get(&path).bearer(&admin.token).await;

    assert_eq!(anonymous.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(other.status_code(), StatusCode::NOT_FOUND);
    own.assert_status_ok();
    moderator.assert_status_ok();
}

#[tokio::test]
async fn test_get_unknown_venue_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/venues/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_venue_stats() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let player = ctx.account(Role::User).await;
    let venue = ctx.venue(&owner.user, None, true).await;
    let court = ctx.court(&venue, "badminton").await;
    ctx.court(&venue, "squash").await;
    ctx.slot(&court, 1, "09:00", "10:00", true).await;
    ctx.slot(&court, 1, "10:00", "11:00", false).await;

    let today = Utc::now().date_naive();
    for (start, end) in [("09:00", "10:00"), ("11:00", "12:00")] {
        ctx.store
            .create_booking(NewBooking {
                user_id: player.user.id,
                venue_id: venue.id,
                court_id: court.id,
                booking_date: today,
                start_time: time(start),
                end_time: time(end),
                total_price: 30.0,
            })
            .await
            .unwrap()
            .unwrap();
    }
    let bookings = ctx.store.find_bookings_by_venue(venue.id).await.unwrap();
    ctx.store.cancel_booking(bookings[0].id).await.unwrap();

    let response = ctx
        .server
        .get(&format!("/api/venues/{}/stats", venue.id))
        .bearer(&owner.token)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["data"],
        json!({
            "venueId": venue.id,
            "totalCourts": 2,
            "activeCourts": 2,
            "totalTimeSlots": 2,
            "availableTimeSlots": 1,
            "totalBookings": 2,
            "confirmedBookings": 1,
            "cancelledBookings": 1,
            "revenue": 30.0
        })
    );
}

#[tokio::test]
async fn test_venue_stats_requires_ownership() {
    let ctx = TestContext::new();
    let owner = ctx.account(Role::Owner).await;
    let rival = ctx.account(Role::Owner).await;
    let admin = ctx.account(Role::Admin).await;
    let venue = ctx.venue(&owner.user, None, true).await;
    let path = format!("/api/venues/{}/stats", venue.id);

    let denied = ctx.server.get(&path).bearer(&rival.token).await;
    let anonymous = ctx.server.get(&path).await;
    let allowed = ctx.server.get(&path).bearer(&admin.token).await;

    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
    allowed.assert_status_ok();
}
