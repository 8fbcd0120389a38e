use axum::{
    extract::{Path, State},
    Json,
};
use courtbook_core::{
    errors::CourtbookError,
    models::{
        common::ApiResponse,
        user::UserProfile,
        venue::{Venue, VenueApprovalRequest},
    },
    policy::{self, Action},
};
use courtbook_db::repositories::{UserRepository, VenueRepository};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn pending_venues(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<Vec<Venue>>>, AppError> {
    policy::authorize(&principal, &Action::ModerateVenues)?;

    let venues = state.store.list_pending_venues().await?;
    Ok(Json(ApiResponse::ok(venues)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn set_venue_approval(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VenueApprovalRequest>,
) -> Result<Json<ApiResponse<Venue>>, AppError> {
    policy::authorize(&principal, &Action::ModerateVenues)?;

    let venue = state
        .store
        .set_venue_approval(id, payload.approved)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Venue with ID {} not found", id)))?;

    info!(venue_id = %venue.id, approved = venue.is_approved, admin_id = %principal.user_id, "Updated venue approval");

    Ok(Json(ApiResponse::ok(venue)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, AppError> {
    policy::authorize(&principal, &Action::ListUsers)?;

    let users = state.store.list_users().await?;
    Ok(Json(ApiResponse::ok(users.iter().map(|user| user.profile()).collect())))
}
