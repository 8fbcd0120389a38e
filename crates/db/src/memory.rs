//! In-memory [`Store`](crate::Store) implementation.
//!
//! Honours the same contract as [`PgStore`](crate::PgStore): ordering,
//! case-insensitive matching, the one-confirmed-booking-per-start rule and
//! duplicate email rejection. Used by the API test-suite and handy for
//! running the server without Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use courtbook_core::models::{
    booking::{Booking, BookingStatus, NewBooking},
    court::{Court, CourtFilter, CourtWithVenue, NewCourt},
    time_slot::{NewTimeSlot, TimeSlot},
    user::{NewUser, User},
    venue::{NewVenue, Venue, VenueFilter},
};
use eyre::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repositories::{
    BookingRepository, CourtRepository, TimeSlotRepository, UserRepository, VenueRepository,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    venues: HashMap<Uuid, Venue>,
    courts: HashMap<Uuid, Court>,
    time_slots: HashMap<Uuid, TimeSlot>,
    bookings: HashMap<Uuid, Booking>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a venue's rating; venues are created with a zero rating.
    pub async fn set_venue_rating(&self, id: Uuid, rating: f64) -> bool {
        let mut tables = self.tables.write().await;
        match tables.venues.get_mut(&id) {
            Some(venue) => {
                venue.rating = rating;
                true
            }
            None => false,
        }
    }
}

fn city_matches(city: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(needle) => city.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn page<T>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

fn sort_slots(slots: &mut [TimeSlot]) {
    slots.sort_by_key(|slot| (slot.day_of_week, slot.start_time, slot.end_time));
}

fn sort_bookings_desc(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        b.booking_date
            .cmp(&a.booking_date)
            .then(a.start_time.cmp(&b.start_time))
    });
}

fn insert_slot(tables: &mut Tables, slot: NewTimeSlot) -> TimeSlot {
    let created = TimeSlot {
        id: Uuid::new_v4(),
        venue_id: slot.venue_id,
        court_id: slot.court_id,
        day_of_week: slot.day_of_week,
        start_time: slot.start_time,
        end_time: slot.end_time,
        is_available: slot.is_available,
        created_at: Utc::now(),
    };
    tables.time_slots.insert(created.id, created.clone());
    created
}

#[async_trait]
impl TimeSlotRepository for InMemoryStore {
    async fn create_time_slot(&self, slot: NewTimeSlot) -> Result<TimeSlot> {
        let mut tables = self.tables.write().await;
        Ok(insert_slot(&mut tables, slot))
    }

    async fn create_time_slots(&self, slots: Vec<NewTimeSlot>) -> Result<Vec<TimeSlot>> {
        let mut tables = self.tables.write().await;
        Ok(slots
            .into_iter()
            .map(|slot| insert_slot(&mut tables, slot))
            .collect())
    }

    async fn get_time_slot(&self, id: Uuid) -> Result<Option<TimeSlot>> {
        Ok(self.tables.read().await.time_slots.get(&id).cloned())
    }

    async fn find_time_slots_by_court(
        &self,
        court_id: Uuid,
        day_of_week: Option<i16>,
    ) -> Result<Vec<TimeSlot>> {
        let tables = self.tables.read().await;
        let mut slots: Vec<TimeSlot> = tables
            .time_slots
            .values()
            .filter(|slot| slot.court_id == court_id)
            .filter(|slot| day_of_week.is_none_or(|day| slot.day_of_week == day))
            .cloned()
            .collect();
        sort_slots(&mut slots);
        Ok(slots)
    }

    async fn find_time_slots_by_venue(&self, venue_id: Uuid) -> Result<Vec<TimeSlot>> {
        let tables = self.tables.read().await;
        let mut slots: Vec<TimeSlot> = tables
            .time_slots
            .values()
            .filter(|slot| slot.venue_id == venue_id)
            .cloned()
            .collect();
        sort_slots(&mut slots);
        Ok(slots)
    }

    async fn set_time_slot_availability(
        &self,
        id: Uuid,
        is_available: bool,
    ) -> Result<Option<TimeSlot>> {
        let mut tables = self.tables.write().await;
        Ok(tables.time_slots.get_mut(&id).map(|slot| {
            slot.is_available = is_available;
            slot.clone()
        }))
    }

    async fn delete_time_slot(&self, id: Uuid) -> Result<bool> {
        Ok(self.tables.write().await.time_slots.remove(&id).is_some())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create_booking(&self, booking: NewBooking) -> Result<Option<Booking>> {
        let mut tables = self.tables.write().await;
        let taken = tables.bookings.values().any(|existing| {
            existing.is_active()
                && existing.court_id == booking.court_id
                && existing.booking_date == booking.booking_date
                && existing.start_time == booking.start_time
        });
        if taken {
            return Ok(None);
        }

        let created = Booking {
            id: Uuid::new_v4(),
            user_id: booking.user_id,
            venue_id: booking.venue_id,
            court_id: booking.court_id,
            booking_date: booking.booking_date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            total_price: booking.total_price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };
        tables.bookings.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn find_bookings_by_court(
        &self,
        court_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|b| b.court_id == court_id && b.booking_date >= from && b.booking_date <= to)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.booking_date, b.start_time));
        Ok(bookings)
    }

    async fn find_bookings_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        sort_bookings_desc(&mut bookings);
        Ok(bookings)
    }

    async fn find_bookings_by_venue(&self, venue_id: Uuid) -> Result<Vec<Booking>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|b| b.venue_id == venue_id)
            .cloned()
            .collect();
        sort_bookings_desc(&mut bookings);
        Ok(bookings)
    }

    async fn cancel_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        let mut tables = self.tables.write().await;
        Ok(tables.bookings.get_mut(&id).map(|booking| {
            booking.status = BookingStatus::Cancelled;
            booking.clone()
        }))
    }
}

#[async_trait]
impl CourtRepository for InMemoryStore {
    async fn create_court(&self, court: NewCourt) -> Result<Court> {
        let created = Court {
            id: Uuid::new_v4(),
            venue_id: court.venue_id,
            name: court.name,
            sport_type: court.sport_type,
            price_per_hour: court.price_per_hour,
            is_active: court.is_active,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .courts
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_court(&self, id: Uuid) -> Result<Option<Court>> {
        Ok(self.tables.read().await.courts.get(&id).cloned())
    }

    async fn list_courts_by_venue(&self, venue_id: Uuid) -> Result<Vec<Court>> {
        let tables = self.tables.read().await;
        let mut courts: Vec<Court> = tables
            .courts
            .values()
            .filter(|court| court.venue_id == venue_id)
            .cloned()
            .collect();
        courts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(courts)
    }

    async fn find_courts_by_sport(&self, filter: &CourtFilter) -> Result<(Vec<CourtWithVenue>, i64)> {
        let tables = self.tables.read().await;
        let sport = filter.sport.to_lowercase();
        let mut matches: Vec<CourtWithVenue> = tables
            .courts
            .values()
            .filter(|court| court.is_active && court.sport_type.to_lowercase() == sport)
            .filter_map(|court| {
                let venue = tables.venues.get(&court.venue_id)?;
                (venue.is_approved && city_matches(&venue.city, filter.city.as_deref())).then(|| {
                    CourtWithVenue {
                        court: court.clone(),
                        venue: venue.summary(),
                    }
                })
            })
            .collect();
        matches.sort_by(|a, b| {
            b.venue
                .rating
                .total_cmp(&a.venue.rating)
                .then_with(|| a.court.name.cmp(&b.court.name))
        });

        let total = matches.len() as i64;
        Ok((page(matches, filter.limit, filter.offset), total))
    }

    async fn delete_court(&self, id: Uuid) -> Result<Option<u64>> {
        let mut tables = self.tables.write().await;
        if tables.courts.remove(&id).is_none() {
            return Ok(None);
        }

        let before = tables.time_slots.len();
        tables.time_slots.retain(|_, slot| slot.court_id != id);
        let removed = (before - tables.time_slots.len()) as u64;
        tables.bookings.retain(|_, booking| booking.court_id != id);
        Ok(Some(removed))
    }
}

#[async_trait]
impl VenueRepository for InMemoryStore {
    async fn create_venue(&self, venue: NewVenue) -> Result<Venue> {
        let created = Venue {
            id: Uuid::new_v4(),
            name: venue.name,
            address: venue.address,
            city: venue.city,
            description: venue.description,
            rating: 0.0,
            price_per_hour: venue.price_per_hour,
            is_approved: false,
            owner_id: venue.owner_id,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .venues
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>> {
        Ok(self.tables.read().await.venues.get(&id).cloned())
    }

    async fn list_approved_venues(&self, filter: &VenueFilter) -> Result<(Vec<Venue>, i64)> {
        let tables = self.tables.read().await;
        let mut venues: Vec<Venue> = tables
            .venues
            .values()
            .filter(|venue| venue.is_approved && city_matches(&venue.city, filter.city.as_deref()))
            .cloned()
            .collect();
        venues.sort_by(|a, b| b.rating.total_cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));

        let total = venues.len() as i64;
        Ok((page(venues, filter.limit, filter.offset), total))
    }

    async fn list_venues_by_owner(&self, owner_id: Uuid) -> Result<Vec<Venue>> {
        let tables = self.tables.read().await;
        let mut venues: Vec<Venue> = tables
            .venues
            .values()
            .filter(|venue| venue.owner_id == owner_id)
            .cloned()
            .collect();
        venues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(venues)
    }

    async fn list_pending_venues(&self) -> Result<Vec<Venue>> {
        let tables = self.tables.read().await;
        let mut venues: Vec<Venue> = tables
            .venues
            .values()
            .filter(|venue| !venue.is_approved)
            .cloned()
            .collect();
        venues.sort_by_key(|venue| venue.created_at);
        Ok(venues)
    }

    async fn set_venue_approval(&self, id: Uuid, is_approved: bool) -> Result<Option<Venue>> {
        let mut tables = self.tables.write().await;
        Ok(tables.venues.get_mut(&id).map(|venue| {
            venue.is_approved = is_approved;
            venue.clone()
        }))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<Option<User>> {
        let mut tables = self.tables.write().await;
        let email = user.email.to_lowercase();
        if tables.users.values().any(|existing| existing.email == email) {
            return Ok(None);
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|user| user.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }
}
