use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::api_dto::{id_choices, ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::maintenance_dto::{MaintenanceFormOptions, MaintenanceLogForm, MaintenanceLogList};
use crate::models::maintenance_log::{MaintenanceLog, MaintenanceLogRow};
use crate::repositories::maintenance_log_repository::MaintenanceLogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{add_field_error, collect_errors, ensure_valid, INVALID_CHOICE};

const UPCOMING_LIMIT: i64 = 5;

pub struct MaintenanceController {
    repository: MaintenanceLogRepository,
    vehicles: VehicleRepository,
}

impl MaintenanceController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: MaintenanceLogRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, today: NaiveDate) -> Result<MaintenanceLogList, AppError> {
        Ok(MaintenanceLogList {
            maintenance_logs: as_of(self.repository.list().await?, today),
            total_cost: self.repository.total_cost().await?,
            upcoming: as_of(self.repository.upcoming(today, UPCOMING_LIMIT).await?, today),
        })
    }

    pub async fn form_options(&self) -> Result<MaintenanceFormOptions, AppError> {
        Ok(MaintenanceFormOptions::new(id_choices(
            self.vehicles.choices().await?,
        )))
    }

    pub async fn get(&self, id: i64, today: NaiveDate) -> Result<MaintenanceLogRow, AppError> {
        Ok(self.find(id).await?.as_of(today))
    }

    async fn find(&self, id: i64) -> Result<MaintenanceLogRow, AppError> {
        self.repository
            .find_row_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance log", id))
    }

    pub async fn create(
        &self,
        form: MaintenanceLogForm,
    ) -> Result<ApiResponse<MaintenanceLog>, AppError> {
        self.check(&form).await?;

        let log = self.repository.create(&form.into_fields()?).await?;
        info!(
            maintenance_log_id = log.id,
            vehicle_id = log.vehicle_id,
            kind = log.maintenance_type.as_str(),
            "maintenance log added"
        );

        Ok(ApiResponse::success_with_message(
            log,
            "Maintenance log added successfully!",
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        form: MaintenanceLogForm,
    ) -> Result<ApiResponse<MaintenanceLog>, AppError> {
        self.find(id).await?;
        self.check(&form).await?;

        let log = self
            .repository
            .update(id, &form.into_fields()?)
            .await?
            .ok_or_else(|| not_found_error("Maintenance log", id))?;
        info!(maintenance_log_id = id, "maintenance log updated");

        Ok(ApiResponse::success_with_message(
            log,
            "Maintenance log updated successfully!",
        ))
    }

    pub async fn delete_preview(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<DeletePreview<MaintenanceLogRow, ()>, AppError> {
        Ok(DeletePreview::record_only(self.get(id, today).await?))
    }

    pub async fn delete(&self, id: i64, request: DeleteRequest) -> Result<ApiResponse<()>, AppError> {
        self.find(id).await?;
        request.ensure_confirmed()?;

        self.repository.delete(id).await?;
        info!(maintenance_log_id = id, "maintenance log deleted");

        Ok(ApiResponse::message("Maintenance log deleted successfully!"))
    }

    async fn check(&self, form: &MaintenanceLogForm) -> Result<(), AppError> {
        let mut errors = collect_errors(form.validate());

        if let Some(vehicle_id) = form.vehicle {
            if !self.vehicles.exists(vehicle_id).await? {
                add_field_error(&mut errors, "vehicle", INVALID_CHOICE);
            }
        }

        ensure_valid(errors)
    }
}

fn as_of(rows: Vec<MaintenanceLogRow>, today: NaiveDate) -> Vec<MaintenanceLogRow> {
    rows.into_iter().map(|row| row.as_of(today)).collect()
}
