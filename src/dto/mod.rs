pub mod api_dto;
pub mod auth_dto;
pub mod driver_dto;
pub mod fuel_dto;
pub mod maintenance_dto;
pub mod trip_dto;
pub mod vehicle_dto;
