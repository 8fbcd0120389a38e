//! # Authorization Policy
//!
//! Every protected operation names an [`Action`]; [`authorize`] decides
//! whether a [`Principal`] may perform it. The principal's role comes from
//! the user record loaded for the current request, never from data the
//! client supplied.

use uuid::Uuid;

use crate::{
    errors::{CourtbookError, CourtbookResult},
    models::user::Role,
};

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateVenue,
    /// Mutate or inspect private data of a venue (courts, slots, stats, bookings).
    ManageVenue { owner_id: Uuid },
    ModerateVenues,
    ListUsers,
    CreateBooking,
    /// View or cancel a booking made by `user_id`.
    AccessBooking { user_id: Uuid },
}

pub fn is_allowed(principal: &Principal, action: &Action) -> bool {
    match (principal.role, action) {
        (Role::Admin, _) => true,
        (Role::Owner, Action::CreateVenue) => true,
        (Role::Owner, Action::ManageVenue { owner_id }) => principal.user_id == *owner_id,
        (_, Action::CreateBooking) => true,
        (_, Action::AccessBooking { user_id }) => principal.user_id == *user_id,
        _ => false,
    }
}

pub fn authorize(principal: &Principal, action: &Action) -> CourtbookResult<()> {
    if is_allowed(principal, action) {
        Ok(())
    } else {
        Err(CourtbookError::Authorization(format!(
            "Role '{}' may not {}",
            principal.role,
            action.describe()
        )))
    }
}

impl Action {
    /// Plain description used in denial messages. Never includes ids.
    pub fn describe(&self) -> &'static str {
        match self {
            Action::CreateVenue => "create venues",
            Action::ManageVenue { .. } => "manage this venue",
            Action::ModerateVenues => "moderate venues",
            Action::ListUsers => "list users",
            Action::CreateBooking => "create bookings",
            Action::AccessBooking { .. } => "access this booking",
        }
    }
}
