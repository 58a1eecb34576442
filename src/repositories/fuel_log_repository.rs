use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::fuel_log::{FuelLog, FuelLogFields, FuelLogRow};
use crate::utils::errors::AppError;
use crate::utils::money::Amount;

const SELECT_ROWS: &str = r#"
    SELECT f.*, v.vehicle_number
    FROM fuel_logs f
    JOIN vehicles v ON v.id = f.vehicle_id
"#;

/// Sums over every fuel log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct FuelTotals {
    pub total_cost: Amount,
    pub total_quantity: Amount,
}

pub struct FuelLogRepository {
    pool: SqlitePool,
}

impl FuelLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<FuelLogRow>, AppError> {
        let logs = sqlx::query_as::<_, FuelLogRow>(&format!(
            "{SELECT_ROWS} ORDER BY f.date DESC, f.created_at DESC, f.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// The `limit` most recent fill-ups by fuel date.
    pub async fn latest(&self, limit: i64) -> Result<Vec<FuelLogRow>, AppError> {
        let logs = sqlx::query_as::<_, FuelLogRow>(&format!(
            "{SELECT_ROWS} ORDER BY f.date DESC, f.created_at DESC, f.id DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn totals(&self) -> Result<FuelTotals, AppError> {
        let totals = sqlx::query_as::<_, FuelTotals>(
            r#"
            SELECT COALESCE(SUM(cost), 0) AS total_cost,
                   COALESCE(SUM(fuel_quantity), 0) AS total_quantity
            FROM fuel_logs
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<FuelLog>, AppError> {
        let log = sqlx::query_as::<_, FuelLog>("SELECT * FROM fuel_logs WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    pub async fn find_row_by_id(&self, id: i64) -> Result<Option<FuelLogRow>, AppError> {
        let log = sqlx::query_as::<_, FuelLogRow>(&format!("{SELECT_ROWS} WHERE f.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    pub async fn create(&self, fields: &FuelLogFields) -> Result<FuelLog, AppError> {
        let log = sqlx::query_as::<_, FuelLog>(
            r#"
            INSERT INTO fuel_logs (vehicle_id, date, fuel_quantity, cost, odometer_reading, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING *
            "#,
        )
        .bind(fields.vehicle_id)
        .bind(fields.date)
        .bind(fields.fuel_quantity)
        .bind(fields.cost)
        .bind(fields.odometer_reading)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn update(&self, id: i64, fields: &FuelLogFields) -> Result<Option<FuelLog>, AppError> {
        let log = sqlx::query_as::<_, FuelLog>(
            r#"
            UPDATE fuel_logs
            SET vehicle_id = ?2, date = ?3, fuel_quantity = ?4, cost = ?5, odometer_reading = ?6
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.vehicle_id)
        .bind(fields.date)
        .bind(fields.fuel_quantity)
        .bind(fields.cost)
        .bind(fields.odometer_reading)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM fuel_logs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
