use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_dto::{ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::vehicle_dto::{VehicleForm, VehicleFormOptions};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleDependents;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::FormJson;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles/", get(list_vehicles))
        .route("/vehicles/add/", get(vehicle_form).post(add_vehicle))
        .route("/vehicles/edit/:id/", get(get_vehicle).post(edit_vehicle))
        .route(
            "/vehicles/delete/:id/",
            get(confirm_delete_vehicle).post(delete_vehicle),
        )
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn vehicle_form(State(state): State<AppState>) -> Json<VehicleFormOptions> {
    Json(VehicleController::new(state.pool.clone()).form_options())
}

async fn add_vehicle(
    State(state): State<AppState>,
    FormJson(form): FormJson<VehicleForm>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(form).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn edit_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    FormJson(form): FormJson<VehicleForm>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.update(id, form).await?))
}

async fn confirm_delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletePreview<Vehicle, VehicleDependents>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.delete_preview(id).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<DeleteRequest>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.delete(id, request).await?))
}
