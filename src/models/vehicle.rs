//! Vehicle model
//!
//! Maps the `vehicles` table. `vehicle_number` is unique; capacity is a
//! `DECIMAL(10,2)` amount in tons or liters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::utils::money::Amount;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Truck,
    Van,
    Car,
    Bus,
    Motorcycle,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Truck,
        VehicleType::Van,
        VehicleType::Car,
        VehicleType::Bus,
        VehicleType::Motorcycle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Truck => "truck",
            VehicleType::Van => "van",
            VehicleType::Car => "car",
            VehicleType::Bus => "bus",
            VehicleType::Motorcycle => "motorcycle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Truck => "Truck",
            VehicleType::Van => "Van",
            VehicleType::Car => "Car",
            VehicleType::Bus => "Bus",
            VehicleType::Motorcycle => "Motorcycle",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Active,
        VehicleStatus::Inactive,
        VehicleStatus::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Inactive => "inactive",
            VehicleStatus::Maintenance => "maintenance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleStatus::Active => "Active",
            VehicleStatus::Inactive => "Inactive",
            VehicleStatus::Maintenance => "Under Maintenance",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub capacity: Amount,
    pub purchase_date: Option<NaiveDate>,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field values for an insert or a full-record update.
#[derive(Debug, Clone)]
pub struct VehicleFields {
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub capacity: Amount,
    pub purchase_date: Option<NaiveDate>,
    pub status: VehicleStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names_match_storage_names() {
        for kind in VehicleType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::json!(kind.as_str()));
        }
        for status in VehicleStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(status.as_str()));
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(VehicleType::default(), VehicleType::Truck);
        assert_eq!(VehicleStatus::default(), VehicleStatus::Active);
        assert_eq!(VehicleStatus::Maintenance.label(), "Under Maintenance");
    }
}
