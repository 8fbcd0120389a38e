//! Row types as stored in Postgres, and their conversion into domain models.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use courtbook_core::models::{
    booking::Booking,
    court::{Court, CourtWithVenue},
    time_slot::TimeSlot,
    user::User,
    venue::{Venue, VenueSummary},
};
use eyre::{eyre, Report};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVenue {
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

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourt {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub name: String,
    pub sport_type: String,
    pub price_per_hour: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourtWithVenue {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub name: String,
    pub sport_type: String,
    pub price_per_hour: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub venue_name: String,
    pub venue_address: String,
    pub venue_city: String,
    pub venue_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub court_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub venue_id: Uuid,
    pub court_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbUser> for User {
    type Error = Report;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            role: row.role.parse().map_err(|e: String| eyre!(e))?,
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

impl From<DbVenue> for Venue {
    fn from(row: DbVenue) -> Self {
        Venue {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            description: row.description,
            rating: row.rating,
            price_per_hour: row.price_per_hour,
            is_approved: row.is_approved,
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

impl From<DbCourt> for Court {
    fn from(row: DbCourt) -> Self {
        Court {
            id: row.id,
            venue_id: row.venue_id,
            name: row.name,
            sport_type: row.sport_type,
            price_per_hour: row.price_per_hour,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

impl From<DbCourtWithVenue> for CourtWithVenue {
    fn from(row: DbCourtWithVenue) -> Self {
        CourtWithVenue {
            venue: VenueSummary {
                id: row.venue_id,
                name: row.venue_name,
                address: row.venue_address,
                city: row.venue_city,
                rating: row.venue_rating,
            },
            court: Court {
                id: row.id,
                venue_id: row.venue_id,
                name: row.name,
                sport_type: row.sport_type,
                price_per_hour: row.price_per_hour,
                is_active: row.is_active,
                created_at: row.created_at,
            },
        }
    }
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        TimeSlot {
            id: row.id,
            venue_id: row.venue_id,
            court_id: row.court_id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Booking {
            status: row.status.parse().map_err(|e: String| eyre!(e))?,
            id: row.id,
            user_id: row.user_id,
            venue_id: row.venue_id,
            court_id: row.court_id,
            booking_date: row.booking_date,
            start_time: row.start_time,
            end_time: row.end_time,
            total_price: row.total_price,
            created_at: row.created_at,
        })
    }
}
