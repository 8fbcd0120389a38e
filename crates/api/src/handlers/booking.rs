use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use courtbook_core::{
    availability,
    errors::CourtbookError,
    models::{
        booking::{price_for, Booking, BookingStatus, CreateBookingRequest, NewBooking},
        common::ApiResponse,
    },
    policy::{self, Action, Principal},
};
use courtbook_db::repositories::{BookingRepository, CourtRepository, TimeSlotRepository};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Books a window on a court.
///
/// The window must lie inside one available template for the date's
/// weekday and must not overlap another confirmed booking.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    policy::authorize(&principal, &Action::CreateBooking)?;

    let court = state
        .store
        .get_court(payload.court_id)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Court with ID {} not found", payload.court_id)))?;
    if !court.is_active {
        return Err(CourtbookError::Validation("Court is not accepting bookings".into()).into());
    }

    let venue = super::load_venue(state.store.as_ref(), court.venue_id).await?;
    if !venue.is_approved {
        return Err(CourtbookError::Validation("Venue is not open for bookings".into()).into());
    }

    if payload.date < Utc::now().date_naive() {
        return Err(CourtbookError::Validation("Cannot book a date in the past".into()).into());
    }
    if payload.start_time >= payload.end_time {
        return Err(CourtbookError::Validation("Start time must be before end time".into()).into());
    }

    let day_of_week = availability::weekday_index(payload.date);
    let templates = state
        .store
        .find_time_slots_by_court(court.id, Some(day_of_week))
        .await?;
    let fits = templates
        .iter()
        .any(|slot| slot.is_available && slot.contains(payload.start_time, payload.end_time));
    if !fits {
        return Err(CourtbookError::Validation(
            "Requested time is outside the court's available slots".into(),
        )
        .into());
    }

    let existing = state
        .store
        .find_bookings_by_court(court.id, payload.date, payload.date)
        .await?;
    if existing
        .iter()
        .any(|booking| booking.blocks(payload.date, payload.start_time, payload.end_time))
    {
        return Err(CourtbookError::Conflict("Court is already booked for that time".into()).into());
    }

    let booking = state
        .store
        .create_booking(NewBooking {
            user_id: principal.user_id,
            venue_id: venue.id,
            court_id: court.id,
            booking_date: payload.date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            total_price: price_for(court.price_per_hour, payload.start_time, payload.end_time),
        })
        .await?
        .ok_or_else(|| {
            warn!(court_id = %court.id, date = %payload.date, "Lost booking race");
            CourtbookError::Conflict("Court is already booked for that time".into())
        })?;

    info!(booking_id = %booking.id, court_id = %court.id, user_id = %principal.user_id, "Created booking");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_my_bookings(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let bookings = state.store.find_bookings_by_user(principal.user_id).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = load_accessible_booking(&state, &principal, id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = load_accessible_booking(&state, &principal, id).await?;
    if booking.status == BookingStatus::Cancelled {
        return Err(CourtbookError::Validation("Booking is already cancelled".into()).into());
    }

    let cancelled = state
        .store
        .cancel_booking(booking.id)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Booking with ID {} not found", id)))?;

    info!(booking_id = %cancelled.id, "Cancelled booking");

    Ok(Json(ApiResponse::ok(cancelled)))
}

async fn load_accessible_booking(
    state: &ApiState,
    principal: &Principal,
    id: Uuid,
) -> Result<Booking, AppError> {
    let booking = state
        .store
        .get_booking(id)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Booking with ID {} not found", id)))?;

    policy::authorize(
        principal,
        &Action::AccessBooking {
            user_id: booking.user_id,
        },
    )?;

    Ok(booking)
}
