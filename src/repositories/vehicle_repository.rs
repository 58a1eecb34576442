use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::vehicle::{Vehicle, VehicleFields};
use crate::utils::errors::{map_unique_violation, AppError};

const UNIQUE_FIELDS: &[(&str, &str, &str)] = &[(
    "vehicles.vehicle_number",
    "vehicle_number",
    "Vehicle with this Vehicle number already exists.",
)];

/// Rows that a vehicle delete would remove or detach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VehicleDependents {
    pub trips: i64,
    pub fuel_logs: i64,
    pub maintenance_logs: i64,
    pub assigned_driver: Option<String>,
}

pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY created_at DESC, id DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// `(id, vehicle_number)` pairs for select inputs.
    pub async fn choices(&self) -> Result<Vec<(i64, String)>, AppError> {
        let choices = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, vehicle_number FROM vehicles ORDER BY vehicle_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Whether another vehicle already uses `vehicle_number`.
    pub async fn number_exists(
        &self,
        vehicle_number: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE vehicle_number = ?1 AND id IS NOT ?2)",
        )
        .bind(vehicle_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, fields: &VehicleFields) -> Result<Vehicle, AppError> {
        let now = Utc::now();
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vehicle_number, vehicle_type, capacity, purchase_date, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING *
            "#,
        )
        .bind(&fields.vehicle_number)
        .bind(fields.vehicle_type)
        .bind(fields.capacity)
        .bind(fields.purchase_date)
        .bind(fields.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        Ok(vehicle)
    }

    pub async fn update(&self, id: i64, fields: &VehicleFields) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_number = ?2, vehicle_type = ?3, capacity = ?4, purchase_date = ?5,
                status = ?6, updated_at = ?7
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.vehicle_number)
        .bind(fields.vehicle_type)
        .bind(fields.capacity)
        .bind(fields.purchase_date)
        .bind(fields.status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        Ok(vehicle)
    }

    pub async fn dependents(&self, id: i64) -> Result<VehicleDependents, AppError> {
        let dependents = sqlx::query_as::<_, VehicleDependents>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM trips WHERE vehicle_id = ?1) AS trips,
                (SELECT COUNT(*) FROM fuel_logs WHERE vehicle_id = ?1) AS fuel_logs,
                (SELECT COUNT(*) FROM maintenance_logs WHERE vehicle_id = ?1) AS maintenance_logs,
                (SELECT driver_name FROM drivers WHERE assigned_vehicle_id = ?1) AS assigned_driver
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(dependents)
    }

    /// Removes the vehicle. The schema cascades to its trips, fuel logs and
    /// maintenance logs and clears the assigned driver's reference.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
