//! Data-access contracts and their Postgres implementation.
//!
//! Each entity has its own repository trait. [`Store`] is the union the API
//! layer depends on, so handlers can run against Postgres ([`PgStore`]),
//! the in-memory fake ([`crate::memory::InMemoryStore`]) or a mock.

pub mod booking;
pub mod court;
pub mod time_slot;
pub mod user;
pub mod venue;

pub use booking::BookingRepository;
pub use court::CourtRepository;
pub use time_slot::TimeSlotRepository;
pub use user::UserRepository;
pub use venue::VenueRepository;

use crate::DbPool;

pub trait Store:
    TimeSlotRepository + BookingRepository + CourtRepository + VenueRepository + UserRepository
{
}

impl<T> Store for T where
    T: TimeSlotRepository + BookingRepository + CourtRepository + VenueRepository + UserRepository
{
}

/// Postgres-backed [`Store`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
