use async_trait::async_trait;
use chrono::NaiveDate;
use courtbook_core::models::{
    booking::{Booking, NewBooking},
    court::{Court, CourtFilter, CourtWithVenue, NewCourt},
    time_slot::{NewTimeSlot, TimeSlot},
    user::{NewUser, User},
    venue::{NewVenue, Venue, VenueFilter},
};
use mockall::mock;
use uuid::Uuid;

use crate::repositories::{
    BookingRepository, CourtRepository, TimeSlotRepository, UserRepository, VenueRepository,
};

// Mock store for testing; implements every repository trait
mock! {
    pub Store {}

    #[async_trait]
    impl TimeSlotRepository for Store {
        async fn create_time_slot(&self, slot: NewTimeSlot) -> eyre::Result<TimeSlot>;
        async fn create_time_slots(&self, slots: Vec<NewTimeSlot>) -> eyre::Result<Vec<TimeSlot>>;
        async fn get_time_slot(&self, id: Uuid) -> eyre::Result<Option<TimeSlot>>;
        async fn find_time_slots_by_court(
            &self,
            court_id: Uuid,
            day_of_week: Option<i16>,
        ) -> eyre::Result<Vec<TimeSlot>>;
        async fn find_time_slots_by_venue(&self, venue_id: Uuid) -> eyre::Result<Vec<TimeSlot>>;
        async fn set_time_slot_availability(
            &self,
            id: Uuid,
            is_available: bool,
        ) -> eyre::Result<Option<TimeSlot>>;
        async fn delete_time_slot(&self, id: Uuid) -> eyre::Result<bool>;
    }

    #[async_trait]
    impl BookingRepository for Store {
        async fn create_booking(&self, booking: NewBooking) -> eyre::Result<Option<Booking>>;
        async fn get_booking(&self, id: Uuid) -> eyre::Result<Option<Booking>>;
        async fn find_bookings_by_court(
            &self,
            court_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> eyre::Result<Vec<Booking>>;
        async fn find_bookings_by_user(&self, user_id: Uuid) -> eyre::Result<Vec<Booking>>;
        async fn find_bookings_by_venue(&self, venue_id: Uuid) -> eyre::Result<Vec<Booking>>;
        async fn cancel_booking(&self, id: Uuid) -> eyre::Result<Option<Booking>>;
    }

    #[async_trait]
    impl CourtRepository for Store {
        async fn create_court(&self, court: NewCourt) -> eyre::Result<Court>;
        async fn get_court(&self, id: Uuid) -> eyre::Result<Option<Court>>;
        async fn list_courts_by_venue(&self, venue_id: Uuid) -> eyre::Result<Vec<Court>>;
        async fn find_courts_by_sport(
            &self,
            filter: &CourtFilter,
        ) -> eyre::Result<(Vec<CourtWithVenue>, i64)>;
        async fn delete_court(&self, id: Uuid) -> eyre::Result<Option<u64>>;
    }

    #[async_trait]
    impl VenueRepository for Store {
        async fn create_venue(&self, venue: NewVenue) -> eyre::Result<Venue>;
        async fn get_venue(&self, id: Uuid) -> eyre::Result<Option<Venue>>;
        async fn list_approved_venues(
            &self,
            filter: &VenueFilter,
        ) -> eyre::Result<(Vec<Venue>, i64)>;
        async fn list_venues_by_owner(&self, owner_id: Uuid) -> eyre::Result<Vec<Venue>>;
        async fn list_pending_venues(&self) -> eyre::Result<Vec<Venue>>;
        async fn set_venue_approval(&self, id: Uuid, is_approved: bool) -> eyre::Result<Option<Venue>>;
    }

    #[async_trait]
    impl UserRepository for Store {
        async fn create_user(&self, user: NewUser) -> eyre::Result<Option<User>>;
        async fn get_user_by_id(&self, id: Uuid) -> eyre::Result<Option<User>>;
        async fn get_user_by_email(&self, email: &str) -> eyre::Result<Option<User>>;
        async fn list_users(&self) -> eyre::Result<Vec<User>>;
    }
}
