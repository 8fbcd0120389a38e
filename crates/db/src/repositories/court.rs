use async_trait::async_trait;
use courtbook_core::models::court::{Court, CourtFilter, CourtWithVenue, NewCourt};
use eyre::Result;
use uuid::Uuid;

use super::PgStore;
use crate::models::{DbCourt, DbCourtWithVenue};

const COLUMNS: &str = "id, venue_id, name, sport_type, price_per_hour, is_active, created_at";

#[async_trait]
pub trait CourtRepository: Send + Sync {
    async fn create_court(&self, court: NewCourt) -> Result<Court>;

    async fn get_court(&self, id: Uuid) -> Result<Option<Court>>;

    async fn list_courts_by_venue(&self, venue_id: Uuid) -> Result<Vec<Court>>;

    /// Active courts of approved venues matching the filter, ordered by
    /// venue rating descending, with the total number of matches.
    async fn find_courts_by_sport(&self, filter: &CourtFilter) -> Result<(Vec<CourtWithVenue>, i64)>;

    /// Deletes a court and its time-slot templates in one transaction.
    /// Returns the number of templates removed, or `None` if the court
    /// did not exist.
    async fn delete_court(&self, id: Uuid) -> Result<Option<u64>>;
}

#[async_trait]
impl CourtRepository for PgStore {
    async fn create_court(&self, court: NewCourt) -> Result<Court> {
        let row = sqlx::query_as::<_, DbCourt>(&format!(
            r#"
            INSERT INTO courts (id, venue_id, name, sport_type, price_per_hour, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(court.venue_id)
        .bind(&court.name)
        .bind(&court.sport_type)
        .bind(court.price_per_hour)
        .bind(court.is_active)
        .fetch_one(self.pool())
        .await?;

        Ok(row.into())
    }

    async fn get_court(&self, id: Uuid) -> Result<Option<Court>> {
        let row = sqlx::query_as::<_, DbCourt>(&format!("SELECT {COLUMNS} FROM courts WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_courts_by_venue(&self, venue_id: Uuid) -> Result<Vec<Court>> {
        let rows = sqlx::query_as::<_, DbCourt>(&format!(
            "SELECT {COLUMNS} FROM courts WHERE venue_id = $1 ORDER BY name ASC"
        ))
        .bind(venue_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_courts_by_sport(&self, filter: &CourtFilter) -> Result<(Vec<CourtWithVenue>, i64)> {
        tracing::debug!(
            "Finding courts: sport={}, city={:?}, limit={}, offset={}",
            filter.sport,
            filter.city,
            filter.limit,
            filter.offset
        );

        let rows = sqlx::query_as::<_, DbCourtWithVenue>(
            r#"
            SELECT c.id, c.venue_id, c.name, c.sport_type, c.price_per_hour, c.is_active, c.created_at,
                   v.name AS venue_name, v.address AS venue_address, v.city AS venue_city,
                   v.rating AS venue_rating
            FROM courts c
            JOIN venues v ON v.id = c.venue_id
            WHERE LOWER(c.sport_type) = LOWER($1)
              AND c.is_active
              AND v.is_approved
              AND ($2::TEXT IS NULL OR POSITION(LOWER($2) IN LOWER(v.city)) > 0)
            ORDER BY v.rating DESC, c.name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&filter.sport)
        .bind(filter.city.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool())
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM courts c
            JOIN venues v ON v.id = c.venue_id
            WHERE LOWER(c.sport_type) = LOWER($1)
              AND c.is_active
              AND v.is_approved
              AND ($2::TEXT IS NULL OR POSITION(LOWER($2) IN LOWER(v.city)) > 0)
            "#,
        )
        .bind(&filter.sport)
        .bind(filter.city.as_deref())
        .fetch_one(self.pool())
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn delete_court(&self, id: Uuid) -> Result<Option<u64>> {
        let mut tx = self.pool().begin().await?;

        let slots = sqlx::query("DELETE FROM time_slots WHERE court_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let court = sqlx::query("DELETE FROM courts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if court.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(slots.rows_affected()))
    }
}
