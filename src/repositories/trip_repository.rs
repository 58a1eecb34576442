use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::trip::{Trip, TripFields, TripRow};
use crate::utils::errors::AppError;

const SELECT_ROWS: &str = r#"
    SELECT t.*, v.vehicle_number, d.driver_name
    FROM trips t
    JOIN vehicles v ON v.id = t.vehicle_id
    JOIN drivers d ON d.id = t.driver_id
"#;

pub struct TripRepository {
    pool: SqlitePool,
}

impl TripRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Trips with their vehicle and driver, most recently started first.
    /// Trips without a start date go last.
    pub async fn list(&self) -> Result<Vec<TripRow>, AppError> {
        let trips = sqlx::query_as::<_, TripRow>(&format!(
            "{SELECT_ROWS} ORDER BY t.start_date DESC NULLS LAST, t.created_at DESC, t.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<TripRow>, AppError> {
        let trips = sqlx::query_as::<_, TripRow>(&format!(
            "{SELECT_ROWS} ORDER BY t.created_at DESC, t.id DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn find_row_by_id(&self, id: i64) -> Result<Option<TripRow>, AppError> {
        let trip = sqlx::query_as::<_, TripRow>(&format!("{SELECT_ROWS} WHERE t.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn create(&self, fields: &TripFields) -> Result<Trip, AppError> {
        let now = Utc::now();
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (vehicle_id, driver_id, start_location, end_location, distance, status,
                               start_date, end_date, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            RETURNING *
            "#,
        )
        .bind(fields.vehicle_id)
        .bind(fields.driver_id)
        .bind(&fields.start_location)
        .bind(&fields.end_location)
        .bind(fields.distance)
        .bind(fields.status)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(&fields.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    pub async fn update(&self, id: i64, fields: &TripFields) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET vehicle_id = ?2, driver_id = ?3, start_location = ?4, end_location = ?5,
                distance = ?6, status = ?7, start_date = ?8, end_date = ?9, notes = ?10,
                updated_at = ?11
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.vehicle_id)
        .bind(fields.driver_id)
        .bind(&fields.start_location)
        .bind(&fields.end_location)
        .bind(fields.distance)
        .bind(fields.status)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(&fields.notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = ?1")
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
    use crate::models::driver::DriverFields;
    use crate::models::trip::TripStatus;
    use crate::models::vehicle::{VehicleFields, VehicleStatus, VehicleType};
    use crate::repositories::driver_repository::DriverRepository;
    use crate::repositories::vehicle_repository::VehicleRepository;
    use crate::utils::money::Amount;
    use chrono::{DateTime, TimeZone};

    async fn seed(pool: &SqlitePool) -> (i64, i64) {
        let vehicle = VehicleRepository::new(pool.clone())
            .create(&VehicleFields {
                vehicle_number: "V-100".to_string(),
                vehicle_type: VehicleType::Truck,
                capacity: Amount::from_cents(1_000),
                purchase_date: None,
                status: VehicleStatus::Active,
            })
            .await
            .unwrap();
        let driver = DriverRepository::new(pool.clone())
            .create(&DriverFields {
                driver_name: "Sam Ortiz".to_string(),
                phone: "555-0111".to_string(),
                license_number: "DL-9".to_string(),
                experience: 3,
                assigned_vehicle_id: None,
                is_available: true,
            })
            .await
            .unwrap();
        (vehicle.id, driver.id)
    }

    fn trip(vehicle_id: i64, driver_id: i64, start: Option<DateTime<Utc>>) -> TripFields {
        TripFields {
            vehicle_id,
            driver_id,
            start_location: "Depot".to_string(),
            end_location: "Harbor".to_string(),
            distance: Amount::from_cents(12_550),
            status: TripStatus::Pending,
            start_date: start,
            end_date: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_start_date_with_missing_last() {
        let pool = in_memory_pool().await.unwrap();
        let (vehicle_id, driver_id) = seed(&pool).await;
        let repo = TripRepository::new(pool);

        let early = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let a = repo.create(&trip(vehicle_id, driver_id, Some(early))).await.unwrap();
        let b = repo.create(&trip(vehicle_id, driver_id, None)).await.unwrap();
        let c = repo.create(&trip(vehicle_id, driver_id, Some(late))).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|r| r.trip.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);

        let rows = repo.recent(2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].trip.id, c.id);
        assert_eq!(rows[0].vehicle_number, "V-100");
        assert_eq!(rows[0].driver_name, "Sam Ortiz");
    }

    #[tokio::test]
    async fn test_update_status() {
        let pool = in_memory_pool().await.unwrap();
        let (vehicle_id, driver_id) = seed(&pool).await;
        let repo = TripRepository::new(pool);
        let created = repo.create(&trip(vehicle_id, driver_id, None)).await.unwrap();

        let mut fields = trip(vehicle_id, driver_id, None);
        fields.status = TripStatus::Completed;
        let updated = repo.update(created.id, &fields).await.unwrap().unwrap();
        assert_eq!(updated.status, TripStatus::Completed);
        assert_eq!(updated.distance, Amount::from_cents(12_550));
    }

    #[tokio::test]
    async fn test_driver_delete_cascades_to_trips() {
        let pool = in_memory_pool().await.unwrap();
        let (vehicle_id, driver_id) = seed(&pool).await;
        let repo = TripRepository::new(pool.clone());
        let created = repo.create(&trip(vehicle_id, driver_id, None)).await.unwrap();

        assert!(DriverRepository::new(pool).delete(driver_id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
