use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::fuel_controller::FuelController;
use crate::dto::api_dto::{ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::fuel_dto::{FuelFormOptions, FuelLogForm, FuelLogList};
use crate::models::fuel_log::{FuelLog, FuelLogRow};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::FormJson;

pub fn create_fuel_router() -> Router<AppState> {
    Router::new()
        .route("/fuel/", get(list_fuel_logs))
        .route("/fuel/add/", get(fuel_form).post(add_fuel_log))
        .route("/fuel/edit/:id/", get(get_fuel_log).post(edit_fuel_log))
        .route(
            "/fuel/delete/:id/",
            get(confirm_delete_fuel_log).post(delete_fuel_log),
        )
}

async fn list_fuel_logs(State(state): State<AppState>) -> Result<Json<FuelLogList>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn fuel_form(State(state): State<AppState>) -> Result<Json<FuelFormOptions>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.form_options().await?))
}

async fn add_fuel_log(
    State(state): State<AppState>,
    FormJson(form): FormJson<FuelLogForm>,
) -> Result<(StatusCode, Json<ApiResponse<FuelLog>>), AppError> {
    let controller = FuelController::new(state.pool.clone());
    let response = controller.create(form).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_fuel_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FuelLogRow>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn edit_fuel_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    FormJson(form): FormJson<FuelLogForm>,
) -> Result<Json<ApiResponse<FuelLog>>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.update(id, form).await?))
}

async fn confirm_delete_fuel_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletePreview<FuelLogRow, ()>>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.delete_preview(id).await?))
}

async fn delete_fuel_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<DeleteRequest>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.delete(id, request).await?))
}
