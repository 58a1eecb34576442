//! FleetFlow
//!
//! Fleet operations service: vehicles, drivers, trips, fuel and maintenance
//! records, a dashboard and reports over them, behind session login.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// The complete application: routes plus tracing, compression and CORS.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config);

    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
