use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/venues",
            get(handlers::venue::list_venues).post(handlers::venue::create_venue),
        )
        .route("/api/venues/:id", get(handlers::venue::get_venue))
        .route("/api/venues/:id/stats", get(handlers::venue::venue_stats))
        .route("/api/owner/venues", get(handlers::venue::list_owner_venues))
}
