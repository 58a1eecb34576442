pub mod driver_repository;
pub mod fuel_log_repository;
pub mod maintenance_log_repository;
pub mod session_repository;
pub mod trip_repository;
pub mod user_repository;
pub mod vehicle_repository;
