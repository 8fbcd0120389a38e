use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

const COURT_SLOTS: &str = "/api/venues/:id/courts/:court_id/slots";

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            COURT_SLOTS,
            get(handlers::time_slot::list_court_slots).post(handlers::time_slot::create_time_slots),
        )
        .route(
            &format!("{COURT_SLOTS}/available"),
            get(handlers::time_slot::available_slots),
        )
        .route(
            &format!("{COURT_SLOTS}/by-day"),
            get(handlers::time_slot::slots_by_day),
        )
        .route(
            &format!("{COURT_SLOTS}/stats"),
            get(handlers::time_slot::court_slot_stats),
        )
        .route(
            &format!("{COURT_SLOTS}/upcoming"),
            get(handlers::time_slot::upcoming_slots),
        )
        .route(
            "/api/time-slots/:id",
            get(handlers::time_slot::get_time_slot).delete(handlers::time_slot::delete_time_slot),
        )
        .route(
            "/api/time-slots/:id/availability",
            patch(handlers::time_slot::update_availability),
        )
}
