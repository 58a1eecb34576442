use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::trip_controller::TripController;
use crate::dto::api_dto::{ApiResponse, DeletePreview, DeleteRequest};
use crate::dto::trip_dto::{TripForm, TripFormOptions};
use crate::models::trip::{Trip, TripRow};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::FormJson;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/trips/", get(list_trips))
        .route("/trips/add/", get(trip_form).post(add_trip))
        .route("/trips/edit/:id/", get(get_trip).post(edit_trip))
        .route("/trips/delete/:id/", get(confirm_delete_trip).post(delete_trip))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<TripRow>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn trip_form(State(state): State<AppState>) -> Result<Json<TripFormOptions>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.form_options().await?))
}

async fn add_trip(
    State(state): State<AppState>,
    FormJson(form): FormJson<TripForm>,
) -> Result<(StatusCode, Json<ApiResponse<Trip>>), AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.create(form).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TripRow>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn edit_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    FormJson(form): FormJson<TripForm>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.update(id, form).await?))
}

async fn confirm_delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletePreview<TripRow, ()>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.delete_preview(id).await?))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<DeleteRequest>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.delete(id, request).await?))
}
