use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::utils::money::Amount;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FuelLog {
    pub id: i64,
    pub vehicle_id: i64,
    pub date: NaiveDate,
    /// Liters.
    pub fuel_quantity: Amount,
    pub cost: Amount,
    /// Kilometres.
    pub odometer_reading: Option<Amount>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FuelLogRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fuel_log: FuelLog,
    pub vehicle_number: String,
}

#[derive(Debug, Clone)]
pub struct FuelLogFields {
    pub vehicle_id: i64,
    pub date: NaiveDate,
    pub fuel_quantity: Amount,
    pub cost: Amount,
    pub odometer_reading: Option<Amount>,
}
