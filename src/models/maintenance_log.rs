//! Maintenance log model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::utils::money::Amount;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MaintenanceType {
    OilChange,
    TireRotation,
    BrakeService,
    EngineService,
    GeneralCheckup,
    Other,
}

impl MaintenanceType {
    pub const ALL: [MaintenanceType; 6] = [
        MaintenanceType::OilChange,
        MaintenanceType::TireRotation,
        MaintenanceType::BrakeService,
        MaintenanceType::EngineService,
        MaintenanceType::GeneralCheckup,
        MaintenanceType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaintenanceType::OilChange => "oil_change",
            MaintenanceType::TireRotation => "tire_rotation",
            MaintenanceType::BrakeService => "brake_service",
            MaintenanceType::EngineService => "engine_service",
            MaintenanceType::GeneralCheckup => "general_checkup",
            MaintenanceType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaintenanceType::OilChange => "Oil Change",
            MaintenanceType::TireRotation => "Tire Rotation",
            MaintenanceType::BrakeService => "Brake Service",
            MaintenanceType::EngineService => "Engine Service",
            MaintenanceType::GeneralCheckup => "General Checkup",
            MaintenanceType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MaintenanceLog {
    pub id: i64,
    pub vehicle_id: i64,
    pub maintenance_type: MaintenanceType,
    pub date: NaiveDate,
    pub cost: Amount,
    pub description: Option<String>,
    pub next_due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceLog {
    /// Due once the next service date has been reached; never due without one.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_due_date.is_some_and(|due| due <= today)
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MaintenanceLogRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub maintenance_log: MaintenanceLog,
    pub vehicle_number: String,
    #[sqlx(skip)]
    pub is_due: bool,
}

impl MaintenanceLogRow {
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.is_due = self.maintenance_log.is_due(today);
        self
    }
}

#[derive(Debug, Clone)]
pub struct MaintenanceLogFields {
    pub vehicle_id: i64,
    pub maintenance_type: MaintenanceType,
    pub date: NaiveDate,
    pub cost: Amount,
    pub description: Option<String>,
    pub next_due_date: Option<NaiveDate>,
}
