use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/courts/:sport", get(handlers::court::courts_by_sport))
        .route(
            "/api/venues/:id/courts",
            get(handlers::court::list_venue_courts).post(handlers::court::create_court),
        )
        .route(
            "/api/venues/:id/courts/:court_id",
            delete(handlers::court::delete_court),
        )
        .route(
            "/api/venues/:id/courts/:court_id/bookings",
            get(handlers::court::court_bookings),
        )
}
