use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CourtbookError, CourtbookResult};

use super::time_format;

/// A recurring weekly availability window for a court.
///
/// `day_of_week` follows the 0 = Sunday … 6 = Saturday convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub court_id: Uuid,
    pub day_of_week: i16,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl TimeSlot {
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && start < self.end_time
    }

    pub fn contains(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time <= start && end <= self.end_time
    }
}

/// Insert payload for the time slot repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeSlot {
    pub venue_id: Uuid,
    pub court_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl NewTimeSlot {
    pub fn validate(&self) -> CourtbookResult<()> {
        validate_day_of_week(self.day_of_week)?;
        if self.start_time >= self.end_time {
            return Err(CourtbookError::Validation(format!(
                "Start time {} must be before end time {}",
                time_format::format(&self.start_time),
                time_format::format(&self.end_time),
            )));
        }
        Ok(())
    }
}

pub fn validate_day_of_week(day_of_week: i16) -> CourtbookResult<()> {
    if (0..=6).contains(&day_of_week) {
        Ok(())
    } else {
        Err(CourtbookError::Validation(format!(
            "Day of week must be between 0 and 6, got {}",
            day_of_week
        )))
    }
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    pub day_of_week: i16,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl CreateTimeSlotRequest {
    pub fn into_new(self, venue_id: Uuid, court_id: Uuid) -> NewTimeSlot {
        NewTimeSlot {
            venue_id,
            court_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            is_available: self.is_available,
        }
    }
}

/// Slot creation accepts either one template or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateTimeSlotsPayload {
    Bulk(Vec<CreateTimeSlotRequest>),
    Single(CreateTimeSlotRequest),
}

impl CreateTimeSlotsPayload {
    pub fn into_requests(self) -> Vec<CreateTimeSlotRequest> {
        match self {
            Self::Bulk(requests) => requests,
            Self::Single(request) => vec![request],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsResponse {
    pub date: NaiveDate,
    pub day_of_week: i16,
    pub day_name: String,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    pub day_of_week: i16,
    pub day_name: String,
    pub total: usize,
    pub available: usize,
    pub blocked: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtStats {
    pub total: usize,
    pub available: usize,
    pub blocked: usize,
    pub by_day: Vec<DayStats>,
}

/// An available template projected onto a concrete calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingSlot {
    pub date: NaiveDate,
    pub day_name: String,
    pub is_booked: bool,
    #[serde(flatten)]
    pub slot: TimeSlot,
}
