use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::api_dto::{ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::driver_dto::{DriverDependents, DriverForm, DriverFormOptions};
use crate::models::driver::{Driver, DriverRow};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::FormJson;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/drivers/", get(list_drivers))
        .route("/drivers/add/", get(driver_form).post(add_driver))
        .route("/drivers/edit/:id/", get(get_driver).post(edit_driver))
        .route(
            "/drivers/delete/:id/",
            get(confirm_delete_driver).post(delete_driver),
        )
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<DriverRow>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn driver_form(State(state): State<AppState>) -> Result<Json<DriverFormOptions>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.form_options().await?))
}

async fn add_driver(
    State(state): State<AppState>,
    FormJson(form): FormJson<DriverForm>,
) -> Result<(StatusCode, Json<ApiResponse<Driver>>), AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.create(form).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DriverRow>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn edit_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    FormJson(form): FormJson<DriverForm>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.update(id, form).await?))
}

async fn confirm_delete_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletePreview<DriverRow, DriverDependents>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.delete_preview(id).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<DeleteRequest>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.delete(id, request).await?))
}
