//! Driver model
//!
//! A driver may hold at most one vehicle and a vehicle at most one driver.
//! Deleting the vehicle clears `assigned_vehicle_id` and keeps the driver.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub driver_name: String,
    pub phone: String,
    pub license_number: String,
    pub experience: i32,
    pub assigned_vehicle_id: Option<i64>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Driver joined with the number of the vehicle it holds.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriverRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub driver: Driver,
    pub assigned_vehicle_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DriverFields {
    pub driver_name: String,
    pub phone: String,
    pub license_number: String,
    pub experience: i32,
    pub assigned_vehicle_id: Option<i64>,
    pub is_available: bool,
}
