//! Services module
//!
//! Logic that spans several repositories: the dashboard and report
//! aggregation, and password and session handling for authentication.

pub mod analytics_service;
pub mod auth_service;

pub use analytics_service::AnalyticsService;
pub use auth_service::AuthService;
