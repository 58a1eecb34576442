use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::driver::{Driver, DriverFields, DriverRow};
use crate::utils::errors::{map_unique_violation, AppError};

const UNIQUE_FIELDS: &[(&str, &str, &str)] = &[
    (
        "drivers.license_number",
        "license_number",
        "Driver with this License number already exists.",
    ),
    (
        "drivers.assigned_vehicle_id",
        "assigned_vehicle",
        "Driver with this Assigned vehicle already exists.",
    ),
];

const SELECT_ROWS: &str = r#"
    SELECT d.*, v.vehicle_number AS assigned_vehicle_number
    FROM drivers d
    LEFT JOIN vehicles v ON v.id = d.assigned_vehicle_id
"#;

pub struct DriverRepository {
    pool: SqlitePool,
}

impl DriverRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<DriverRow>, AppError> {
        let drivers = sqlx::query_as::<_, DriverRow>(&format!(
            "{SELECT_ROWS} ORDER BY d.created_at DESC, d.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn choices(&self) -> Result<Vec<(i64, String)>, AppError> {
        let choices = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, driver_name FROM drivers ORDER BY driver_name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_row_by_id(&self, id: i64) -> Result<Option<DriverRow>, AppError> {
        let driver = sqlx::query_as::<_, DriverRow>(&format!("{SELECT_ROWS} WHERE d.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM drivers WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn license_exists(
        &self,
        license_number: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE license_number = ?1 AND id IS NOT ?2)",
        )
        .bind(license_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Name of another driver already holding `vehicle_id`, if any.
    pub async fn holder_of_vehicle(
        &self,
        vehicle_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<Option<String>, AppError> {
        let holder = sqlx::query_scalar::<_, String>(
            "SELECT driver_name FROM drivers WHERE assigned_vehicle_id = ?1 AND id IS NOT ?2",
        )
        .bind(vehicle_id)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(holder)
    }

    pub async fn create(&self, fields: &DriverFields) -> Result<Driver, AppError> {
        let now = Utc::now();
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (driver_name, phone, license_number, experience, assigned_vehicle_id,
                                 is_available, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING *
            "#,
        )
        .bind(&fields.driver_name)
        .bind(&fields.phone)
        .bind(&fields.license_number)
        .bind(fields.experience)
        .bind(fields.assigned_vehicle_id)
        .bind(fields.is_available)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        Ok(driver)
    }

    pub async fn update(&self, id: i64, fields: &DriverFields) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET driver_name = ?2, phone = ?3, license_number = ?4, experience = ?5,
                assigned_vehicle_id = ?6, is_available = ?7, updated_at = ?8
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.driver_name)
        .bind(&fields.phone)
        .bind(&fields.license_number)
        .bind(fields.experience)
        .bind(fields.assigned_vehicle_id)
        .bind(fields.is_available)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_FIELDS))?;

        Ok(driver)
    }

    pub async fn trip_count(&self, id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trips WHERE driver_id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Removes the driver and, through the schema, the driver's trips.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = ?1")
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
    use crate::models::vehicle::{VehicleFields, VehicleStatus, VehicleType};
    use crate::repositories::vehicle_repository::VehicleRepository;
    use crate::utils::money::Amount;

    fn driver(license: &str, vehicle_id: Option<i64>) -> DriverFields {
        DriverFields {
            driver_name: "Dana Reyes".to_string(),
            phone: "555-0100".to_string(),
            license_number: license.to_string(),
            experience: 6,
            assigned_vehicle_id: vehicle_id,
            is_available: true,
        }
    }

    async fn vehicle(pool: &SqlitePool, number: &str) -> i64 {
        VehicleRepository::new(pool.clone())
            .create(&VehicleFields {
                vehicle_number: number.to_string(),
                vehicle_type: VehicleType::Van,
                capacity: Amount::from_cents(150),
                purchase_date: None,
                status: VehicleStatus::Active,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_list_joins_vehicle_number() {
        let pool = in_memory_pool().await.unwrap();
        let vehicle_id = vehicle(&pool, "V-100").await;
        let repo = DriverRepository::new(pool);
        repo.create(&driver("DL-1", Some(vehicle_id))).await.unwrap();
        repo.create(&driver("DL-2", None)).await.unwrap();

        let rows = repo.list().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].driver.license_number, "DL-2");
        assert_eq!(rows[0].assigned_vehicle_number, None);
        assert_eq!(rows[1].assigned_vehicle_number.as_deref(), Some("V-100"));
    }

    #[tokio::test]
    async fn test_duplicate_license_is_a_field_error() {
        let repo = DriverRepository::new(in_memory_pool().await.unwrap());
        repo.create(&driver("DL-1", None)).await.unwrap();

        match repo.create(&driver("DL-1", None)).await.unwrap_err() {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("license_number"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vehicle_holds_one_driver() {
        let pool = in_memory_pool().await.unwrap();
        let vehicle_id = vehicle(&pool, "V-100").await;
        let repo = DriverRepository::new(pool);
        let first = repo.create(&driver("DL-1", Some(vehicle_id))).await.unwrap();

        assert_eq!(
            repo.holder_of_vehicle(vehicle_id, None).await.unwrap().as_deref(),
            Some("Dana Reyes")
        );
        assert!(repo
            .holder_of_vehicle(vehicle_id, Some(first.id))
            .await
            .unwrap()
            .is_none());

        match repo.create(&driver("DL-2", Some(vehicle_id))).await.unwrap_err() {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("assigned_vehicle"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vehicle_delete_clears_assignment() {
        let pool = in_memory_pool().await.unwrap();
        let vehicle_id = vehicle(&pool, "V-100").await;
        let repo = DriverRepository::new(pool.clone());
        let mut fields = driver("DL-1", Some(vehicle_id));
        fields.is_available = false;
        let created = repo.create(&fields).await.unwrap();

        assert!(VehicleRepository::new(pool).delete(vehicle_id).await.unwrap());

        let after = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(after.assigned_vehicle_id, None);
        assert!(!after.is_available);
    }
}
