//! Dashboard and report documents
//!
//! Computed per request from the current rows, never stored. Field names
//! are the keys the presentation layer reads.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::{fuel_log::FuelLogRow, trip::TripRow, vehicle::Vehicle};
use crate::utils::money::Amount;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub active_vehicles: i64,
    pub active_drivers: i64,
    /// Logs whose next service falls within the coming week, today included.
    pub maintenance_due: i64,
    pub total_vehicles: i64,
    pub total_drivers: i64,
    pub total_trips: i64,
    pub completed_trips: i64,
    pub total_fuel_cost: Amount,
    pub total_maintenance_cost: Amount,
    pub recent_trips: Vec<TripRow>,
    pub recent_fuel_logs: Vec<FuelLogRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct VehicleStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub maintenance: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct DriverStats {
    pub total: i64,
    pub available: i64,
    pub assigned: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct TripStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub total_distance: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct FuelStats {
    pub total_entries: i64,
    pub total_cost: Amount,
    pub total_quantity: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct MaintenanceStats {
    pub total_entries: i64,
    pub total_cost: Amount,
}

/// Fuel totals for one calendar month; `month` is its first day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MonthlyFuel {
    pub month: NaiveDate,
    pub total_cost: Amount,
    pub total_quantity: Amount,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub vehicle_stats: VehicleStats,
    pub driver_stats: DriverStats,
    pub trip_stats: TripStats,
    pub fuel_stats: FuelStats,
    pub maintenance_stats: MaintenanceStats,
    pub monthly_fuel: Vec<MonthlyFuel>,
    pub recent_vehicles: Vec<Vehicle>,
    pub recent_trips: Vec<TripRow>,
}
