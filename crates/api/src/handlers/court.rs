use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use courtbook_core::{
    availability,
    errors::CourtbookError,
    models::{
        booking::Booking,
        common::{ApiResponse, Pagination},
        court::{Court, CourtFilter, CourtWithVenue, CourtsBySportQuery, CreateCourtRequest, NewCourt},
    },
};
use courtbook_db::repositories::{BookingRepository, CourtRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtDeleted {
    pub deleted: bool,
    pub removed_time_slots: u64,
}

/// Active courts of a sport across approved venues, best rated venues first.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn courts_by_sport(
    State(state): State<Arc<ApiState>>,
    Path(sport): Path<String>,
    Query(query): Query<CourtsBySportQuery>,
) -> Result<Json<ApiResponse<Vec<CourtWithVenue>>>, AppError> {
    let sport = super::require_non_empty("Sport", &sport)?;
    let (limit, offset) = query.page().normalize();

    let filter = CourtFilter {
        sport,
        city: query
            .city
            .map(|city| city.trim().to_string())
            .filter(|city| !city.is_empty()),
        limit,
        offset,
    };

    let (courts, total) = state.store.find_courts_by_sport(&filter).await?;
    let pagination = Pagination::new(total, limit, offset, courts.len());

    Ok(Json(ApiResponse::paginated(courts, pagination)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_venue_courts(
    State(state): State<Arc<ApiState>>,
    user: Option<AuthUser>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Court>>>, AppError> {
    let venue = super::load_venue(state.store.as_ref(), venue_id).await?;
    super::ensure_visible(user.as_ref().map(|AuthUser(p)| p), &venue)?;

    let courts = state.store.list_courts_by_venue(venue.id).await?;
    Ok(Json(ApiResponse::ok(courts)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn create_court(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path(venue_id): Path<Uuid>,
    Json(payload): Json<CreateCourtRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Court>>), AppError> {
    let venue = super::load_venue(state.store.as_ref(), venue_id).await?;
    super::authorize_manage(&principal, &venue)?;

    let name = super::require_non_empty("Name", &payload.name)?;
    let sport_type = super::require_non_empty("Sport type", &payload.sport_type)?;
    let price_per_hour = payload.price_per_hour.unwrap_or(venue.price_per_hour);
    if !price_per_hour.is_finite() || price_per_hour <= 0.0 {
        return Err(CourtbookError::Validation("Price per hour must be positive".into()).into());
    }

    let court = state
        .store
        .create_court(NewCourt {
            venue_id: venue.id,
            name,
            sport_type,
            price_per_hour,
            is_active: payload.is_active,
        })
        .await?;

    info!(court_id = %court.id, venue_id = %venue.id, "Created court");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(court))))
}

/// Removes a court together with its time-slot templates.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn delete_court(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<CourtDeleted>>, AppError> {
    let (venue, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;
    super::authorize_manage(&principal, &venue)?;

    let removed_time_slots = state
        .store
        .delete_court(court.id)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Court with ID {} not found", court.id)))?;

    info!(court_id = %court.id, removed_time_slots, "Deleted court");

    Ok(Json(ApiResponse::ok(CourtDeleted {
        deleted: true,
        removed_time_slots,
    })))
}

/// Bookings of a court on one date, today when no date is given.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn court_bookings(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let (venue, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;
    super::authorize_manage(&principal, &venue)?;

    let date = match query.date.as_deref() {
        Some(value) => availability::parse_date(value)?,
        None => Utc::now().date_naive(),
    };

    let bookings = state.store.find_bookings_by_court(court.id, date, date).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}
