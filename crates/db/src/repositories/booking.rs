use async_trait::async_trait;
use chrono::NaiveDate;
use courtbook_core::models::booking::{Booking, NewBooking};
use eyre::Result;
use uuid::Uuid;

use super::PgStore;
use crate::models::DbBooking;

const COLUMNS: &str = "id, user_id, venue_id, court_id, booking_date, start_time, end_time, total_price, status, created_at";

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a confirmed booking. Returns `None` when a confirmed booking
    /// already starts at the same court, date and time.
    async fn create_booking(&self, booking: NewBooking) -> Result<Option<Booking>>;

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>>;

    /// Bookings of any status for a court with `from <= booking_date <= to`.
    async fn find_bookings_by_court(
        &self,
        court_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Booking>>;

    async fn find_bookings_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>>;

    async fn find_bookings_by_venue(&self, venue_id: Uuid) -> Result<Vec<Booking>>;

    async fn cancel_booking(&self, id: Uuid) -> Result<Option<Booking>>;
}

fn into_bookings(rows: Vec<DbBooking>) -> Result<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl BookingRepository for PgStore {
    async fn create_booking(&self, booking: NewBooking) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            INSERT INTO bookings (id, user_id, venue_id, court_id, booking_date, start_time, end_time, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'confirmed')
            ON CONFLICT (court_id, booking_date, start_time) WHERE status = 'confirmed' DO NOTHING
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(booking.user_id)
        .bind(booking.venue_id)
        .bind(booking.court_id)
        .bind(booking.booking_date)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.total_price)
        .fetch_optional(self.pool())
        .await?;

        match &row {
            Some(created) => tracing::debug!("Created booking: id={}", created.id),
            None => tracing::debug!(
                "Booking conflict: court_id={}, date={}",
                booking.court_id,
                booking.booking_date
            ),
        }

        row.map(Booking::try_from).transpose()
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, DbBooking>(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_bookings_by_court(
        &self,
        court_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bookings
            WHERE court_id = $1 AND booking_date BETWEEN $2 AND $3
            ORDER BY booking_date ASC, start_time ASC
            "#
        ))
        .bind(court_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool())
        .await?;

        into_bookings(rows)
    }

    async fn find_bookings_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bookings
            WHERE user_id = $1
            ORDER BY booking_date DESC, start_time ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        into_bookings(rows)
    }

    async fn find_bookings_by_venue(&self, venue_id: Uuid) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bookings
            WHERE venue_id = $1
            ORDER BY booking_date DESC, start_time ASC
            "#
        ))
        .bind(venue_id)
        .fetch_all(self.pool())
        .await?;

        into_bookings(rows)
    }

    async fn cancel_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, DbBooking>(&format!(
            r#"
            UPDATE bookings
            SET status = 'cancelled'
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Booking::try_from).transpose()
    }
}
