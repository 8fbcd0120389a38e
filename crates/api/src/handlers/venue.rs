use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use courtbook_core::{
    errors::CourtbookError,
    models::{
        common::{ApiResponse, Pagination},
        venue::{CreateVenueRequest, NewVenue, Venue, VenueFilter, VenueListQuery, VenueStats},
    },
    policy::{self, Action},
};
use courtbook_db::repositories::{BookingRepository, CourtRepository, TimeSlotRepository, VenueRepository};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_venues(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<VenueListQuery>,
) -> Result<Json<ApiResponse<Vec<Venue>>>, AppError> {
    let (limit, offset) = query.page().normalize();
    let filter = VenueFilter {
        city: query
            .city
            .map(|city| city.trim().to_string())
            .filter(|city| !city.is_empty()),
        limit,
        offset,
    };

    let (venues, total) = state.store.list_approved_venues(&filter).await?;
    let pagination = Pagination::new(total, limit, offset, venues.len());

    Ok(Json(ApiResponse::paginated(venues, pagination)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn create_venue(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Venue>>), AppError> {
    policy::authorize(&principal, &Action::CreateVenue)?;

    let name = super::require_non_empty("Name", &payload.name)?;
    let address = super::require_non_empty("Address", &payload.address)?;
    let city = super::require_non_empty("City", &payload.city)?;
    if !payload.price_per_hour.is_finite() || payload.price_per_hour <= 0.0 {
        return Err(CourtbookError::Validation("Price per hour must be positive".into()).into());
    }

    let venue = state
        .store
        .create_venue(NewVenue {
            name,
            address,
            city,
            description: payload
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            price_per_hour: payload.price_per_hour,
            owner_id: principal.user_id,
        })
        .await?;

    info!(venue_id = %venue.id, owner_id = %venue.owner_id, "Created venue pending approval");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(venue))))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_venue(
    State(state): State<Arc<ApiState>>,
    user: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Venue>>, AppError> {
    let venue = super::load_venue(state.store.as_ref(), id).await?;
    super::ensure_visible(user.as_ref().map(|AuthUser(p)| p), &venue)?;

    Ok(Json(ApiResponse::ok(venue)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn venue_stats(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VenueStats>>, AppError> {
    let venue = super::load_venue(state.store.as_ref(), id).await?;
    super::authorize_manage(&principal, &venue)?;

    let courts = state.store.list_courts_by_venue(venue.id).await?;
    let slots = state.store.find_time_slots_by_venue(venue.id).await?;
    let bookings = state.store.find_bookings_by_venue(venue.id).await?;

    Ok(Json(ApiResponse::ok(VenueStats::compute(
        venue.id, &courts, &slots, &bookings,
    ))))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_owner_venues(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<Vec<Venue>>>, AppError> {
    policy::authorize(&principal, &Action::CreateVenue)?;

    let venues = state.store.list_venues_by_owner(principal.user_id).await?;
    Ok(Json(ApiResponse::ok(venues)))
}
