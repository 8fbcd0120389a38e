use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/venues/pending", get(handlers::admin::pending_venues))
        .route(
            "/api/admin/venues/:id/approval",
            patch(handlers::admin::set_venue_approval),
        )
        .route("/api/admin/users", get(handlers::admin::list_users))
}
