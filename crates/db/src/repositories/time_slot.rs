use async_trait::async_trait;
use courtbook_core::models::time_slot::{NewTimeSlot, TimeSlot};
use eyre::Result;
use uuid::Uuid;

use super::PgStore;
use crate::models::DbTimeSlot;

const COLUMNS: &str = "id, venue_id, court_id, day_of_week, start_time, end_time, is_available, created_at";

#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    async fn create_time_slot(&self, slot: NewTimeSlot) -> Result<TimeSlot>;

    /// Inserts all templates or none of them.
    async fn create_time_slots(&self, slots: Vec<NewTimeSlot>) -> Result<Vec<TimeSlot>>;

    async fn get_time_slot(&self, id: Uuid) -> Result<Option<TimeSlot>>;

    /// Templates of a court ordered by day then start time, optionally limited to one weekday.
    async fn find_time_slots_by_court(
        &self,
        court_id: Uuid,
        day_of_week: Option<i16>,
    ) -> Result<Vec<TimeSlot>>;

    async fn find_time_slots_by_venue(&self, venue_id: Uuid) -> Result<Vec<TimeSlot>>;

    async fn set_time_slot_availability(
        &self,
        id: Uuid,
        is_available: bool,
    ) -> Result<Option<TimeSlot>>;

    async fn delete_time_slot(&self, id: Uuid) -> Result<bool>;

}

#[async_trait]
impl TimeSlotRepository for PgStore {
    async fn create_time_slot(&self, slot: NewTimeSlot) -> Result<TimeSlot> {
        let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
            r#"
            INSERT INTO time_slots (id, venue_id, court_id, day_of_week, start_time, end_time, is_available)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(slot.venue_id)
        .bind(slot.court_id)
        .bind(slot.day_of_week)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.is_available)
        .fetch_one(self.pool())
        .await?;

        tracing::debug!("Created time slot: id={}, court_id={}", row.id, row.court_id);
        Ok(row.into())
    }

    async fn create_time_slots(&self, slots: Vec<NewTimeSlot>) -> Result<Vec<TimeSlot>> {
        let mut tx = self.pool().begin().await?;
        let mut created = Vec::with_capacity(slots.len());

        for slot in slots {
            let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
                r#"
                INSERT INTO time_slots (id, venue_id, court_id, day_of_week, start_time, end_time, is_available)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(slot.venue_id)
            .bind(slot.court_id)
            .bind(slot.day_of_week)
            .bind(slot.start_time)
            .bind(slot.end_time)
            .bind(slot.is_available)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row.into());
        }

        tx.commit().await?;
        tracing::debug!("Created {} time slots in bulk", created.len());
        Ok(created)
    }

    async fn get_time_slot(&self, id: Uuid) -> Result<Option<TimeSlot>> {
        let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
            "SELECT {COLUMNS} FROM time_slots WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_time_slots_by_court(
        &self,
        court_id: Uuid,
        day_of_week: Option<i16>,
    ) -> Result<Vec<TimeSlot>> {
        let rows = sqlx::query_as::<_, DbTimeSlot>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM time_slots
            WHERE court_id = $1 AND ($2::SMALLINT IS NULL OR day_of_week = $2)
            ORDER BY day_of_week ASC, start_time ASC
            "#
        ))
        .bind(court_id)
        .bind(day_of_week)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_time_slots_by_venue(&self, venue_id: Uuid) -> Result<Vec<TimeSlot>> {
        let rows = sqlx::query_as::<_, DbTimeSlot>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM time_slots
            WHERE venue_id = $1
            ORDER BY court_id, day_of_week ASC, start_time ASC
            "#
        ))
        .bind(venue_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_time_slot_availability(
        &self,
        id: Uuid,
        is_available: bool,
    ) -> Result<Option<TimeSlot>> {
        let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
            r#"
            UPDATE time_slots
            SET is_available = $2
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(is_available)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_time_slot(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM time_slots WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
