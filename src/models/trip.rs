//! Trip model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::utils::money::Amount;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        TripStatus::Pending,
        TripStatus::InProgress,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TripStatus::Pending => "pending",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TripStatus::Pending => "Pending",
            TripStatus::InProgress => "In Progress",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trip {
    pub id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub start_location: String,
    pub end_location: String,
    /// Kilometres.
    pub distance: Amount,
    pub status: TripStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trip joined with its vehicle number and driver name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TripRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub trip: Trip,
    pub vehicle_number: String,
    pub driver_name: String,
}

#[derive(Debug, Clone)]
pub struct TripFields {
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub start_location: String,
    pub end_location: String,
    pub distance: Amount,
    pub status: TripStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_wire_name() {
        assert_eq!(
            serde_json::to_value(TripStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
        let parsed: TripStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, TripStatus::Cancelled);
    }
}
