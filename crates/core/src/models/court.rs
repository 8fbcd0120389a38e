use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{common::PageParams, venue::VenueSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub name: String,
    pub sport_type: String,
    pub price_per_hour: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCourt {
    pub venue_id: Uuid,
    pub name: String,
    pub sport_type: String,
    pub price_per_hour: f64,
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourtRequest {
    pub name: String,
    pub sport_type: String,
    pub price_per_hour: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// A court with its parent venue's public-facing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtWithVenue {
    #[serde(flatten)]
    pub court: Court,
    pub venue: VenueSummary,
}

/// Query string for `GET /api/courts/:sport`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourtsBySportQuery {
    pub city: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CourtsBySportQuery {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Normalized filter handed to the court repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtFilter {
    pub sport: String,
    pub city: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
