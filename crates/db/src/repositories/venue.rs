use async_trait::async_trait;
use courtbook_core::models::venue::{NewVenue, Venue, VenueFilter};
use eyre::Result;
use uuid::Uuid;

use super::PgStore;
use crate::models::DbVenue;

const COLUMNS: &str =
    "id, name, address, city, description, rating, price_per_hour, is_approved, owner_id, created_at";

#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Creates an unapproved venue with a zero rating.
    async fn create_venue(&self, venue: NewVenue) -> Result<Venue>;

    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>>;

    /// Approved venues ordered by rating descending, with the total number of matches.
    async fn list_approved_venues(&self, filter: &VenueFilter) -> Result<(Vec<Venue>, i64)>;

    async fn list_venues_by_owner(&self, owner_id: Uuid) -> Result<Vec<Venue>>;

    async fn list_pending_venues(&self) -> Result<Vec<Venue>>;

    async fn set_venue_approval(&self, id: Uuid, is_approved: bool) -> Result<Option<Venue>>;
}

#[async_trait]
impl VenueRepository for PgStore {
    async fn create_venue(&self, venue: NewVenue) -> Result<Venue> {
        let row = sqlx::query_as::<_, DbVenue>(&format!(
            r#"
            INSERT INTO venues (id, name, address, city, description, rating, price_per_hour, is_approved, owner_id)
            VALUES ($1, $2, $3, $4, $5, 0, $6, FALSE, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(venue.description.as_deref())
        .bind(venue.price_per_hour)
        .bind(venue.owner_id)
        .fetch_one(self.pool())
        .await?;

        tracing::debug!("Created venue: id={}, owner_id={}", row.id, row.owner_id);
        Ok(row.into())
    }

    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>> {
        let row = sqlx::query_as::<_, DbVenue>(&format!("SELECT {COLUMNS} FROM venues WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_approved_venues(&self, filter: &VenueFilter) -> Result<(Vec<Venue>, i64)> {
        let rows = sqlx::query_as::<_, DbVenue>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM venues
            WHERE is_approved AND ($1::TEXT IS NULL OR POSITION(LOWER($1) IN LOWER(city)) > 0)
            ORDER BY rating DESC, name ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(filter.city.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool())
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM venues
            WHERE is_approved AND ($1::TEXT IS NULL OR POSITION(LOWER($1) IN LOWER(city)) > 0)
            "#,
        )
        .bind(filter.city.as_deref())
        .fetch_one(self.pool())
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn list_venues_by_owner(&self, owner_id: Uuid) -> Result<Vec<Venue>> {
        let rows = sqlx::query_as::<_, DbVenue>(&format!(
            "SELECT {COLUMNS} FROM venues WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_pending_venues(&self) -> Result<Vec<Venue>> {
        let rows = sqlx::query_as::<_, DbVenue>(&format!(
            "SELECT {COLUMNS} FROM venues WHERE NOT is_approved ORDER BY created_at ASC"
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_venue_approval(&self, id: Uuid, is_approved: bool) -> Result<Option<Venue>> {
        let row = sqlx::query_as::<_, DbVenue>(&format!(
            r#"
            UPDATE venues
            SET is_approved = $2
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(is_approved)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }
}
