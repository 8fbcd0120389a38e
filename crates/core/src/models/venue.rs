use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{booking::Booking, common::PageParams, court::Court, time_slot::TimeSlot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub description: Option<String>,
    pub rating: f64,
    pub price_per_hour: f64,
    pub is_approved: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Venue {
    pub fn summary(&self) -> VenueSummary {
        VenueSummary {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            rating: self.rating,
        }
    }
}

/// The subset of a venue shown alongside public court listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSummary {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub address: String,
    pub city: String,
    pub description: Option<String>,
    pub price_per_hour: f64,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub description: Option<String>,
    pub price_per_hour: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueListQuery {
    pub city: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl VenueListQuery {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFilter {
    pub city: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueApprovalRequest {
    pub approved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueStats {
    pub venue_id: Uuid,
    pub total_courts: usize,
    pub active_courts: usize,
    pub total_time_slots: usize,
    pub available_time_slots: usize,
    pub total_bookings: usize,
    pub confirmed_bookings: usize,
    pub cancelled_bookings: usize,
    pub revenue: f64,
}

impl VenueStats {
    /// Aggregates a venue's courts, templates and bookings. Revenue only counts confirmed bookings.
    pub fn compute(venue_id: Uuid, courts: &[Court], slots: &[TimeSlot], bookings: &[Booking]) -> Self {
        let confirmed: Vec<&Booking> = bookings.iter().filter(|b| b.is_active()).collect();
        Self {
            venue_id,
            total_courts: courts.len(),
            active_courts: courts.iter().filter(|c| c.is_active).count(),
            total_time_slots: slots.len(),
            available_time_slots: slots.iter().filter(|s| s.is_available).count(),
            total_bookings: bookings.len(),
            confirmed_bookings: confirmed.len(),
            cancelled_bookings: bookings.len() - confirmed.len(),
            revenue: confirmed.iter().map(|b| b.total_price).sum(),
        }
    }
}
