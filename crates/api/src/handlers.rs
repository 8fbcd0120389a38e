pub mod admin;
pub mod auth;
pub mod booking;
pub mod court;
pub mod time_slot;
pub mod venue;

use courtbook_core::{
    errors::CourtbookError,
    models::{court::Court, venue::Venue},
    policy::{self, Action, Principal},
};
use courtbook_db::{
    repositories::{CourtRepository, VenueRepository},
    Store,
};
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

pub(crate) async fn load_venue(store: &dyn Store, venue_id: Uuid) -> Result<Venue, AppError> {
    store
        .get_venue(venue_id)
        .await?
        .ok_or_else(|| CourtbookError::NotFound(format!("Venue with ID {} not found", venue_id)).into())
}

/// Loads a court, requiring that it belongs to `venue_id`.
pub(crate) async fn load_court(
    store: &dyn Store,
    venue_id: Uuid,
    court_id: Uuid,
) -> Result<(Venue, Court), AppError> {
    let venue = load_venue(store, venue_id).await?;
    let court = store
        .get_court(court_id)
        .await?
        .filter(|court| court.venue_id == venue.id)
        .ok_or_else(|| {
            CourtbookError::NotFound(format!(
                "Court with ID {} not found in venue {}",
                court_id, venue_id
            ))
        })?;

    Ok((venue, court))
}

pub(crate) fn authorize_manage(principal: &Principal, venue: &Venue) -> Result<(), AppError> {
    policy::authorize(
        principal,
        &Action::ManageVenue {
            owner_id: venue.owner_id,
        },
    )?;
    Ok(())
}

/// Approved venues are public; unapproved ones are only visible to
/// principals allowed to manage them.
pub(crate) fn ensure_visible(principal: Option<&Principal>, venue: &Venue) -> Result<(), AppError> {
    let visible = venue.is_approved
        || principal.is_some_and(|p| {
            policy::is_allowed(
                p,
                &Action::ManageVenue {
                    owner_id: venue.owner_id,
                },
            )
        });

    if visible {
        Ok(())
    } else {
        Err(CourtbookError::NotFound(format!("Venue with ID {} not found", venue.id)).into())
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CourtbookError::Validation(format!("{} is required", field)).into());
    }
    Ok(trimmed.to_string())
}
