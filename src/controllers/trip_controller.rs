use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::api_dto::{id_choices, ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::trip_dto::{TripForm, TripFormOptions};
use crate::models::trip::{Trip, TripRow};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{add_field_error, collect_errors, ensure_valid, INVALID_CHOICE};

pub struct TripController {
    repository: TripRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
}

impl TripController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<TripRow>, AppError> {
        self.repository.list().await
    }

    pub async fn form_options(&self) -> Result<TripFormOptions, AppError> {
        Ok(TripFormOptions::new(
            id_choices(self.vehicles.choices().await?),
            id_choices(self.drivers.choices().await?),
        ))
    }

    pub async fn get(&self, id: i64) -> Result<TripRow, AppError> {
        self.repository
            .find_row_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", id))
    }

    pub async fn create(&self, form: TripForm) -> Result<ApiResponse<Trip>, AppError> {
        self.check(&form).await?;

        let trip = self.repository.create(&form.into_fields()?).await?;
        info!(
            trip_id = trip.id,
            vehicle_id = trip.vehicle_id,
            driver_id = trip.driver_id,
            "trip added"
        );

        Ok(ApiResponse::success_with_message(trip, "Trip added successfully!"))
    }

    pub async fn update(&self, id: i64, form: TripForm) -> Result<ApiResponse<Trip>, AppError> {
        self.get(id).await?;
        self.check(&form).await?;

        let trip = self
            .repository
            .update(id, &form.into_fields()?)
            .await?
            .ok_or_else(|| not_found_error("Trip", id))?;
        info!(trip_id = id, status = trip.status.as_str(), "trip updated");

        Ok(ApiResponse::success_with_message(trip, "Trip updated successfully!"))
    }

    pub async fn delete_preview(&self, id: i64) -> Result<DeletePreview<TripRow, ()>, AppError> {
        Ok(DeletePreview::record_only(self.get(id).await?))
    }

    pub async fn delete(&self, id: i64, request: DeleteRequest) -> Result<ApiResponse<()>, AppError> {
        self.get(id).await?;
        request.ensure_confirmed()?;

        self.repository.delete(id).await?;
        info!(trip_id = id, "trip deleted");

        Ok(ApiResponse::message("Trip deleted successfully!"))
    }

    async fn check(&self, form: &TripForm) -> Result<(), AppError> {
        let mut errors = collect_errors(form.validate());

        if let Some(vehicle_id) = form.vehicle {
            if !self.vehicles.exists(vehicle_id).await? {
                add_field_error(&mut errors, "vehicle", INVALID_CHOICE);
            }
        }
        if let Some(driver_id) = form.driver {
            if !self.drivers.exists(driver_id).await? {
                add_field_error(&mut errors, "driver", INVALID_CHOICE);
            }
        }

        ensure_valid(errors)
    }
}
