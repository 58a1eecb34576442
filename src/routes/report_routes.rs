use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;

use crate::controllers::report_controller::ReportController;
use crate::models::analytics::{DashboardSummary, ReportSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/", get(dashboard))
        .route("/reports/", get(reports))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    Ok(Json(controller.dashboard(Utc::now().date_naive()).await?))
}

async fn reports(State(state): State<AppState>) -> Result<Json<ReportSummary>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    Ok(Json(controller.reports().await?))
}
