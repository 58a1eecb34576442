use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::api_dto::{ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::vehicle_dto::{VehicleForm, VehicleFormOptions};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::{VehicleDependents, VehicleRepository};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{add_field_error, collect_errors, ensure_valid};

const DUPLICATE_NUMBER: &str = "Vehicle with this Vehicle number already exists.";

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        self.repository.list().await
    }

    pub fn form_options(&self) -> VehicleFormOptions {
        VehicleFormOptions::new()
    }

    pub async fn get(&self, id: i64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn create(&self, form: VehicleForm) -> Result<ApiResponse<Vehicle>, AppError> {
        self.check(&form, None).await?;

        let vehicle = self.repository.create(&form.into_fields()?).await?;
        info!(vehicle_id = vehicle.id, number = %vehicle.vehicle_number, "vehicle added");

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle added successfully!",
        ))
    }

    pub async fn update(&self, id: i64, form: VehicleForm) -> Result<ApiResponse<Vehicle>, AppError> {
        self.get(id).await?;
        self.check(&form, Some(id)).await?;

        let vehicle = self
            .repository
            .update(id, &form.into_fields()?)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        info!(vehicle_id = id, "vehicle updated");

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle updated successfully!",
        ))
    }

    pub async fn delete_preview(
        &self,
        id: i64,
    ) -> Result<DeletePreview<Vehicle, VehicleDependents>, AppError> {
        let vehicle = self.get(id).await?;
        let dependents = self.repository.dependents(id).await?;
        Ok(DeletePreview::new(vehicle, dependents))
    }

    pub async fn delete(&self, id: i64, request: DeleteRequest) -> Result<ApiResponse<()>, AppError> {
        self.get(id).await?;
        request.ensure_confirmed()?;

        self.repository.delete(id).await?;
        info!(vehicle_id = id, "vehicle deleted");

        Ok(ApiResponse::message("Vehicle deleted successfully!"))
    }

    /// Field rules plus the vehicle number uniqueness check.
    async fn check(&self, form: &VehicleForm, exclude_id: Option<i64>) -> Result<(), AppError> {
        let mut errors = collect_errors(form.validate());

        if let Some(number) = form.vehicle_number.as_deref().map(str::trim) {
            if !number.is_empty() && self.repository.number_exists(number, exclude_id).await? {
                add_field_error(&mut errors, "vehicle_number", DUPLICATE_NUMBER);
            }
        }

        ensure_valid(errors)
    }
}
