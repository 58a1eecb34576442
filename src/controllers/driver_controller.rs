use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::api_dto::{id_choices, ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::driver_dto::{DriverDependents, DriverForm, DriverFormOptions};
use crate::models::driver::{Driver, DriverRow};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{add_field_error, collect_errors, ensure_valid, INVALID_CHOICE};

pub struct DriverController {
    repository: DriverRepository,
    vehicles: VehicleRepository,
}

impl DriverController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<DriverRow>, AppError> {
        self.repository.list().await
    }

    pub async fn form_options(&self) -> Result<DriverFormOptions, AppError> {
        Ok(DriverFormOptions {
            vehicles: id_choices(self.vehicles.choices().await?),
        })
    }

    pub async fn get(&self, id: i64) -> Result<DriverRow, AppError> {
        self.repository
            .find_row_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))
    }

    pub async fn create(&self, form: DriverForm) -> Result<ApiResponse<Driver>, AppError> {
        self.check(&form, None).await?;

        let driver = self.repository.create(&form.into_fields()?).await?;
        info!(driver_id = driver.id, license = %driver.license_number, "driver added");

        Ok(ApiResponse::success_with_message(
            driver,
            "Driver added successfully!",
        ))
    }

    pub async fn update(&self, id: i64, form: DriverForm) -> Result<ApiResponse<Driver>, AppError> {
        self.get(id).await?;
        self.check(&form, Some(id)).await?;

        let driver = self
            .repository
            .update(id, &form.into_fields()?)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;
        info!(driver_id = id, "driver updated");

        Ok(ApiResponse::success_with_message(
            driver,
            "Driver updated successfully!",
        ))
    }

    pub async fn delete_preview(
        &self,
        id: i64,
    ) -> Result<DeletePreview<DriverRow, DriverDependents>, AppError> {
        let driver = self.get(id).await?;
        let trips = self.repository.trip_count(id).await?;
        Ok(DeletePreview::new(driver, DriverDependents { trips }))
    }

    pub async fn delete(&self, id: i64, request: DeleteRequest) -> Result<ApiResponse<()>, AppError> {
        self.get(id).await?;
        request.ensure_confirmed()?;

        self.repository.delete(id).await?;
        info!(driver_id = id, "driver deleted");

        Ok(ApiResponse::message("Driver deleted successfully!"))
    }

    async fn check(&self, form: &DriverForm, exclude_id: Option<i64>) -> Result<(), AppError> {
        let mut errors = collect_errors(form.validate());

        if let Some(license) = form.license_number.as_deref().map(str::trim) {
            if !license.is_empty() && self.repository.license_exists(license, exclude_id).await? {
                add_field_error(
                    &mut errors,
                    "license_number",
                    "Driver with this License number already exists.",
                );
            }
        }

        if let Some(vehicle_id) = form.assigned_vehicle {
            if !self.vehicles.exists(vehicle_id).await? {
                add_field_error(&mut errors, "assigned_vehicle", INVALID_CHOICE);
            } else if self
                .repository
                .holder_of_vehicle(vehicle_id, exclude_id)
                .await?
                .is_some()
            {
                add_field_error(
                    &mut errors,
                    "assigned_vehicle",
                    "Driver with this Assigned vehicle already exists.",
                );
            }
        }

        ensure_valid(errors)
    }
}
