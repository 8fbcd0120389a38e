//! Time-slot templates and their projection onto calendar dates.
//!
//! Templates are recurring weekly windows. Read endpoints are public;
//! creating, toggling and deleting templates requires managing the venue.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Days, Utc};
use courtbook_core::{
    availability,
    errors::CourtbookError,
    models::{
        common::ApiResponse,
        time_slot::{
            validate_day_of_week, AvailableSlotsResponse, CourtStats, CreateTimeSlotsPayload,
            NewTimeSlot, TimeSlot, UpcomingSlot, UpdateAvailabilityRequest,
        },
    },
};
use courtbook_db::repositories::{BookingRepository, TimeSlotRepository};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct SlotListQuery {
    pub day: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<u32>,
    pub from: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimeSlotDeleted {
    pub deleted: bool,
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn create_time_slots(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateTimeSlotsPayload>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<TimeSlot>>>), AppError> {
    let (venue, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;
    super::authorize_manage(&principal, &venue)?;

    let new_slots: Vec<NewTimeSlot> = payload
        .into_requests()
        .into_iter()
        .map(|request| request.into_new(venue.id, court.id))
        .collect();

    if new_slots.is_empty() {
        return Err(CourtbookError::Validation("At least one time slot is required".into()).into());
    }
    for slot in &new_slots {
        slot.validate()?;
    }

    let created = match <[NewTimeSlot; 1]>::try_from(new_slots) {
        Ok([slot]) => vec![state.store.create_time_slot(slot).await?],
        Err(slots) => state.store.create_time_slots(slots).await?,
    };

    info!(court_id = %court.id, count = created.len(), "Created time slots");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// Templates of a court ordered by day and start time, optionally for one weekday.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn list_court_slots(
    State(state): State<Arc<ApiState>>,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<SlotListQuery>,
) -> Result<Json<ApiResponse<Vec<TimeSlot>>>, AppError> {
    if let Some(day) = query.day {
        validate_day_of_week(day)?;
    }
    let (_, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;

    let slots = state.store.find_time_slots_by_court(court.id, query.day).await?;
    Ok(Json(ApiResponse::ok(slots)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<ApiResponse<AvailableSlotsResponse>>, AppError> {
    let raw_date = query
        .date
        .ok_or_else(|| CourtbookError::Validation("Query parameter 'date' is required".into()))?;
    let date = availability::parse_date(&raw_date)?;
    let (_, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;

    let day_of_week = availability::weekday_index(date);
    let templates = state
        .store
        .find_time_slots_by_court(court.id, Some(day_of_week))
        .await?;
    let bookings = state.store.find_bookings_by_court(court.id, date, date).await?;

    let slots = availability::available_on(date, &templates, &bookings);
    debug!(court_id = %court.id, %date, available = slots.len(), "Projected availability");

    Ok(Json(ApiResponse::ok(AvailableSlotsResponse {
        date,
        day_of_week,
        day_name: availability::day_name(day_of_week).to_string(),
        slots,
    })))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn slots_by_day(
    State(state): State<Arc<ApiState>>,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<BTreeMap<i16, Vec<TimeSlot>>>>, AppError> {
    let (_, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;

    let slots = state.store.find_time_slots_by_court(court.id, None).await?;
    Ok(Json(ApiResponse::ok(availability::group_by_day(slots))))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn court_slot_stats(
    State(state): State<Arc<ApiState>>,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<CourtStats>>, AppError> {
    let (_, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;

    let slots = state.store.find_time_slots_by_court(court.id, None).await?;
    Ok(Json(ApiResponse::ok(availability::court_stats(&slots))))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn upcoming_slots(
    State(state): State<Arc<ApiState>>,
    Path((venue_id, court_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<ApiResponse<Vec<UpcomingSlot>>>, AppError> {
    let num_days = availability::upcoming_days(query.days)?;
    let from = match query.from.as_deref() {
        Some(value) => availability::parse_date(value)?,
        None => Utc::now().date_naive(),
    };
    let to = from
        .checked_add_days(Days::new(u64::from(num_days - 1)))
        .ok_or_else(|| CourtbookError::Validation("Date range is out of bounds".into()))?;

    let (_, court) = super::load_court(state.store.as_ref(), venue_id, court_id).await?;

    let templates = state.store.find_time_slots_by_court(court.id, None).await?;
    let bookings = state.store.find_bookings_by_court(court.id, from, to).await?;

    Ok(Json(ApiResponse::ok(availability::upcoming(
        &templates, &bookings, from, num_days,
    ))))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_time_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TimeSlot>>, AppError> {
    let slot = load_slot(&state, id).await?;
    Ok(Json(ApiResponse::ok(slot)))
}

/// Marks a template bookable or blocked. Setting the current value again is a no-op.
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn update_availability(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<ApiResponse<TimeSlot>>, AppError> {
    let slot = load_slot(&state, id).await?;
    let venue = super::load_venue(state.store.as_ref(), slot.venue_id).await?;
    super::authorize_manage(&principal, &venue)?;

    let updated = state
        .store
        .set_time_slot_availability(slot.id, payload.is_available)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Time slot with ID {} not found", id)))?;

    Ok(Json(ApiResponse::ok(updated)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn delete_time_slot(
    State(state): State<Arc<ApiState>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TimeSlotDeleted>>, AppError> {
    let slot = load_slot(&state, id).await?;
    let venue = super::load_venue(state.store.as_ref(), slot.venue_id).await?;
    super::authorize_manage(&principal, &venue)?;

    if !state.store.delete_time_slot(slot.id).await? {
        return Err(CourtbookError::NotFound(format!("Time slot with ID {} not found", id)).into());
    }

    Ok(Json(ApiResponse::ok(TimeSlotDeleted { deleted: true })))
}

async fn load_slot(state: &ApiState, id: Uuid) -> Result<TimeSlot, AppError> {
    state
        .store
        .get_time_slot(id)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Time slot with ID {} not found", id)).into())
}
