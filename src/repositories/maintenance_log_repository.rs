use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::maintenance_log::{MaintenanceLog, MaintenanceLogFields, MaintenanceLogRow};
use crate::utils::errors::AppError;
use crate::utils::money::Amount;

const SELECT_ROWS: &str = r#"
    SELECT m.*, v.vehicle_number
    FROM maintenance_logs m
    JOIN vehicles v ON v.id = m.vehicle_id
"#;

pub struct MaintenanceLogRepository {
    pool: SqlitePool,
}

impl MaintenanceLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceLogRow>, AppError> {
        let logs = sqlx::query_as::<_, MaintenanceLogRow>(&format!(
            "{SELECT_ROWS} ORDER BY m.date DESC, m.created_at DESC, m.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn total_cost(&self) -> Result<Amount, AppError> {
        let total = sqlx::query_scalar::<_, Amount>(
            "SELECT COALESCE(SUM(cost), 0) FROM maintenance_logs",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Logs whose next due date is today or later, soonest first.
    pub async fn upcoming(
        &self,
        today: NaiveDate,
        limit: i64,
    ) -> Result<Vec<MaintenanceLogRow>, AppError> {
        let logs = sqlx::query_as::<_, MaintenanceLogRow>(&format!(
            "{SELECT_ROWS} WHERE m.next_due_date >= ?1 ORDER BY m.next_due_date ASC, m.id ASC LIMIT ?2"
        ))
        .bind(today)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceLog>, AppError> {
        let log =
            sqlx::query_as::<_, MaintenanceLog>("SELECT * FROM maintenance_logs WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(log)
    }

    pub async fn find_row_by_id(&self, id: i64) -> Result<Option<MaintenanceLogRow>, AppError> {
        let log =
            sqlx::query_as::<_, MaintenanceLogRow>(&format!("{SELECT_ROWS} WHERE m.id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(log)
    }

    pub async fn create(&self, fields: &MaintenanceLogFields) -> Result<MaintenanceLog, AppError> {
        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            INSERT INTO maintenance_logs (vehicle_id, maintenance_type, date, cost, description,
                                          next_due_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(fields.vehicle_id)
        .bind(fields.maintenance_type)
        .bind(fields.date)
        .bind(fields.cost)
        .bind(&fields.description)
        .bind(fields.next_due_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn update(
        &self,
        id: i64,
        fields: &MaintenanceLogFields,
    ) -> Result<Option<MaintenanceLog>, AppError> {
        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            UPDATE maintenance_logs
            SET vehicle_id = ?2, maintenance_type = ?3, date = ?4, cost = ?5, description = ?6,
                next_due_date = ?7
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.vehicle_id)
        .bind(fields.maintenance_type)
        .bind(fields.date)
        .bind(fields.cost)
        .bind(&fields.description)
        .bind(fields.next_due_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM maintenance_logs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::in_memory_pool;
    use crate::models::maintenance_log::MaintenanceType;
    use crate::models::vehicle::{VehicleFields, VehicleStatus, VehicleType};
    use crate::repositories::vehicle_repository::VehicleRepository;
    use chrono::Duration;

    async fn vehicle(pool: &SqlitePool) -> i64 {
        VehicleRepository::new(pool.clone())
            .create(&VehicleFields {
                vehicle_number: "V-100".to_string(),
                vehicle_type: VehicleType::Bus,
                capacity: Amount::from_cents(4_000),
                purchase_date: None,
                status: VehicleStatus::Maintenance,
            })
            .await
            .unwrap()
            .id
    }

    fn log(vehicle_id: i64, cost: i64, next_due_date: Option<NaiveDate>) -> MaintenanceLogFields {
        MaintenanceLogFields {
            vehicle_id,
            maintenance_type: MaintenanceType::BrakeService,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            cost: Amount::from_cents(cost),
            description: Some("Front pads".to_string()),
            next_due_date,
        }
    }

    #[tokio::test]
    async fn test_upcoming_skips_past_and_undated() {
        let pool = in_memory_pool().await.unwrap();
        let vehicle_id = vehicle(&pool).await;
        let repo = MaintenanceLogRepository::new(pool);
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        repo.create(&log(vehicle_id, 100, Some(today - Duration::days(1))))
            .await
            .unwrap();
        repo.create(&log(vehicle_id, 100, None)).await.unwrap();
        let later = repo
            .create(&log(vehicle_id, 100, Some(today + Duration::days(30))))
            .await
            .unwrap();
        let soon = repo
            .create(&log(vehicle_id, 100, Some(today)))
            .await
            .unwrap();

        let ids: Vec<i64> = repo
            .upcoming(today, 5)
            .await
            .unwrap()
            .iter()
            .map(|r| r.maintenance_log.id)
            .collect();
        assert_eq!(ids, vec![soon.id, later.id]);
    }

    #[tokio::test]
    async fn test_total_cost() {
        let pool = in_memory_pool().await.unwrap();
        let vehicle_id = vehicle(&pool).await;
        let repo = MaintenanceLogRepository::new(pool);
        assert_eq!(repo.total_cost().await.unwrap(), Amount::ZERO);

        repo.create(&log(vehicle_id, 12_050, None)).await.unwrap();
        repo.create(&log(vehicle_id, 7_950, None)).await.unwrap();
        assert_eq!(repo.total_cost().await.unwrap(), Amount::from_cents(20_000));
    }
}
