//! Dashboard and report aggregation
//!
//! Read-only. Every figure is computed from the current rows on request;
//! an empty store yields zero counts, zero sums and empty lists.

use chrono::{Duration, NaiveDate};
use sqlx::{FromRow, SqlitePool};

use crate::models::analytics::{
    DashboardSummary, DriverStats, FuelStats, MaintenanceStats, MonthlyFuel, ReportSummary,
    TripStats, VehicleStats,
};
use crate::repositories::fuel_log_repository::FuelLogRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::money::Amount;

/// Length of the recency lists on the dashboard and report.
pub const RECENT_LIMIT: i64 = 5;
/// Number of monthly fuel buckets in the report.
pub const MONTHLY_FUEL_BUCKETS: i64 = 6;
/// Days ahead of today that count as "maintenance due".
pub const MAINTENANCE_DUE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, FromRow)]
struct DashboardCounts {
    active_vehicles: i64,
    active_drivers: i64,
    maintenance_due: i64,
    total_vehicles: i64,
    total_drivers: i64,
    total_trips: i64,
    completed_trips: i64,
    total_fuel_cost: Amount,
    total_maintenance_cost: Amount,
}

pub struct AnalyticsService {
    pool: SqlitePool,
    trips: TripRepository,
    fuel_logs: FuelLogRepository,
    vehicles: VehicleRepository,
}

impl AnalyticsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            fuel_logs: FuelLogRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let window_end = today + Duration::days(MAINTENANCE_DUE_WINDOW_DAYS);

        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles WHERE status = 'active') AS active_vehicles,
                (SELECT COUNT(*) FROM drivers WHERE is_available = 1) AS active_drivers,
                (SELECT COUNT(*) FROM maintenance_logs
                  WHERE next_due_date >= ?1 AND next_due_date <= ?2) AS maintenance_due,
                (SELECT COUNT(*) FROM vehicles) AS total_vehicles,
                (SELECT COUNT(*) FROM drivers) AS total_drivers,
                (SELECT COUNT(*) FROM trips) AS total_trips,
                (SELECT COUNT(*) FROM trips WHERE status = 'completed') AS completed_trips,
                (SELECT COALESCE(SUM(cost), 0) FROM fuel_logs) AS total_fuel_cost,
                (SELECT COALESCE(SUM(cost), 0) FROM maintenance_logs) AS total_maintenance_cost
            "#,
        )
        .bind(today)
        .bind(window_end)
        .fetch_one(&self.pool)
        .await?;

        let recent_trips = self.trips.recent(RECENT_LIMIT).await?;
        let recent_fuel_logs = self.fuel_logs.latest(RECENT_LIMIT).await?;

        Ok(DashboardSummary {
            active_vehicles: counts.active_vehicles,
            active_drivers: counts.active_drivers,
            maintenance_due: counts.maintenance_due,
            total_vehicles: counts.total_vehicles,
            total_drivers: counts.total_drivers,
            total_trips: counts.total_trips,
            completed_trips: counts.completed_trips,
            total_fuel_cost: counts.total_fuel_cost,
            total_maintenance_cost: counts.total_maintenance_cost,
            recent_trips,
            recent_fuel_logs,
        })
    }

    pub async fn report(&self) -> Result<ReportSummary, AppError> {
        Ok(ReportSummary {
            vehicle_stats: self.vehicle_stats().await?,
            driver_stats: self.driver_stats().await?,
            trip_stats: self.trip_stats().await?,
            fuel_stats: self.fuel_stats().await?,
            maintenance_stats: self.maintenance_stats().await?,
            monthly_fuel: self.monthly_fuel().await?,
            recent_vehicles: self.vehicles.recent(RECENT_LIMIT).await?,
            recent_trips: self.trips.recent(RECENT_LIMIT).await?,
        })
    }

    async fn vehicle_stats(&self) -> Result<VehicleStats, AppError> {
        let stats = sqlx::query_as::<_, VehicleStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(CASE WHEN status = 'active' THEN 1 END) AS active,
                COUNT(CASE WHEN status = 'inactive' THEN 1 END) AS inactive,
                COUNT(CASE WHEN status = 'maintenance' THEN 1 END) AS maintenance
            FROM vehicles
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn driver_stats(&self) -> Result<DriverStats, AppError> {
        let stats = sqlx::query_as::<_, DriverStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(CASE WHEN is_available = 1 THEN 1 END) AS available,
                COUNT(CASE WHEN is_available = 0 THEN 1 END) AS assigned
            FROM drivers
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn trip_stats(&self) -> Result<TripStats, AppError> {
        let stats = sqlx::query_as::<_, TripStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(CASE WHEN status = 'pending' THEN 1 END) AS pending,
                COUNT(CASE WHEN status = 'in_progress' THEN 1 END) AS in_progress,
                COUNT(CASE WHEN status = 'completed' THEN 1 END) AS completed,
                COUNT(CASE WHEN status = 'cancelled' THEN 1 END) AS cancelled,
                COALESCE(SUM(distance), 0) AS total_distance
            FROM trips
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn fuel_stats(&self) -> Result<FuelStats, AppError> {
        let stats = sqlx::query_as::<_, FuelStats>(
            r#"
            SELECT
                COUNT(*) AS total_entries,
                COALESCE(SUM(cost), 0) AS total_cost,
                COALESCE(SUM(fuel_quantity), 0) AS total_quantity
            FROM fuel_logs
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn maintenance_stats(&self) -> Result<MaintenanceStats, AppError> {
        let stats = sqlx::query_as::<_, MaintenanceStats>(
            r#"
            SELECT
                COUNT(*) AS total_entries,
                COALESCE(SUM(cost), 0) AS total_cost
            FROM maintenance_logs
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// One bucket per calendar month with fuel activity, newest month first.
    async fn monthly_fuel(&self) -> Result<Vec<MonthlyFuel>, AppError> {
        let months = sqlx::query_as::<_, MonthlyFuel>(
            r#"
            SELECT
                date(date, 'start of month') AS month,
                SUM(cost) AS total_cost,
                SUM(fuel_quantity) AS total_quantity
            FROM fuel_logs
            GROUP BY month
            ORDER BY month DESC
            LIMIT ?1
            "#,
        )
        .bind(MONTHLY_FUEL_BUCKETS)
        .fetch_all(&self.pool)
        .await?;

        Ok(months)
    }
}
