//! HTTP routes
//!
//! Everything except `/health`, `/login/` and `/register/` sits behind
//! the session middleware.

pub mod auth_routes;
pub mod driver_routes;
pub mod fuel_routes;
pub mod maintenance_routes;
pub mod report_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes::create_session_router())
        .merge(report_routes::create_report_router())
        .merge(vehicle_routes::create_vehicle_router())
        .merge(driver_routes::create_driver_router())
        .merge(trip_routes::create_trip_router())
        .merge(fuel_routes::create_fuel_router())
        .merge(maintenance_routes::create_maintenance_router())
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes::create_auth_router())
        .merge(protected)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
