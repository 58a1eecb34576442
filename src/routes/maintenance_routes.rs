use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::api_dto::{ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::maintenance_dto::{MaintenanceFormOptions, MaintenanceLogForm, MaintenanceLogList};
use crate::models::maintenance_log::{MaintenanceLog, MaintenanceLogRow};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::FormJson;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/maintenance/", get(list_maintenance_logs))
        .route(
            "/maintenance/add/",
            get(maintenance_form).post(add_maintenance_log),
        )
        .route(
            "/maintenance/edit/:id/",
            get(get_maintenance_log).post(edit_maintenance_log),
        )
        .route(
            "/maintenance/delete/:id/",
            get(confirm_delete_maintenance_log).post(delete_maintenance_log),
        )
}

async fn list_maintenance_logs(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceLogList>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.list(Utc::now().date_naive()).await?))
}

async fn maintenance_form(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceFormOptions>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.form_options().await?))
}

async fn add_maintenance_log(
    State(state): State<AppState>,
    FormJson(form): FormJson<MaintenanceLogForm>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceLog>>), AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.create(form).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_maintenance_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MaintenanceLogRow>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.get(id, Utc::now().date_naive()).await?))
}

async fn edit_maintenance_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    FormJson(form): FormJson<MaintenanceLogForm>,
) -> Result<Json<ApiResponse<MaintenanceLog>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.update(id, form).await?))
}

async fn confirm_delete_maintenance_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletePreview<MaintenanceLogRow, ()>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.delete_preview(id, Utc::now().date_naive()).await?))
}

async fn delete_maintenance_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<DeleteRequest>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.delete(id, request).await?))
}
