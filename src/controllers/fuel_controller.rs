use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::api_dto::{id_choices, ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::fuel_dto::{FuelFormOptions, FuelLogForm, FuelLogList};
use crate::models::fuel_log::{FuelLog, FuelLogRow};
use crate::repositories::fuel_log_repository::FuelLogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{add_field_error, collect_errors, ensure_valid, INVALID_CHOICE};

pub struct FuelController {
    repository: FuelLogRepository,
    vehicles: VehicleRepository,
}

impl FuelController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: FuelLogRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<FuelLogList, AppError> {
        let fuel_logs = self.repository.list().await?;
        let totals = self.repository.totals().await?;

        Ok(FuelLogList {
            fuel_logs,
            total_cost: totals.total_cost,
            total_quantity: totals.total_quantity,
        })
    }

    pub async fn form_options(&self) -> Result<FuelFormOptions, AppError> {
        Ok(FuelFormOptions {
            vehicles: id_choices(self.vehicles.choices().await?),
        })
    }

    pub async fn get(&self, id: i64) -> Result<FuelLogRow, AppError> {
        self.repository
            .find_row_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel log", id))
    }

    pub async fn create(&self, form: FuelLogForm) -> Result<ApiResponse<FuelLog>, AppError> {
        self.check(&form).await?;

        let log = self.repository.create(&form.into_fields()?).await?;
        info!(fuel_log_id = log.id, vehicle_id = log.vehicle_id, cost = %log.cost, "fuel log added");

        Ok(ApiResponse::success_with_message(
            log,
            "Fuel log added successfully!",
        ))
    }

    pub async fn update(&self, id: i64, form: FuelLogForm) -> Result<ApiResponse<FuelLog>, AppError> {
        self.get(id).await?;
        self.check(&form).await?;

        let log = self
            .repository
            .update(id, &form.into_fields()?)
            .await?
            .ok_or_else(|| not_found_error("Fuel log", id))?;
        info!(fuel_log_id = id, "fuel log updated");

        Ok(ApiResponse::success_with_message(
            log,
            "Fuel log updated successfully!",
        ))
    }

    pub async fn delete_preview(&self, id: i64) -> Result<DeletePreview<FuelLogRow, ()>, AppError> {
        Ok(DeletePreview::record_only(self.get(id).await?))
    }

    pub async fn delete(&self, id: i64, request: DeleteRequest) -> Result<ApiResponse<()>, AppError> {
        self.get(id).await?;
        request.ensure_confirmed()?;

        self.repository.delete(id).await?;
        info!(fuel_log_id = id, "fuel log deleted");

        Ok(ApiResponse::message("Fuel log deleted successfully!"))
    }

    async fn check(&self, form: &FuelLogForm) -> Result<(), AppError> {
        let mut errors = collect_errors(form.validate());

        if let Some(vehicle_id) = form.vehicle {
            if !self.vehicles.exists(vehicle_id).await? {
                add_field_error(&mut errors, "vehicle", INVALID_CHOICE);
            }
        }

        ensure_valid(errors)
    }
}
