//! Repositorios de acceso a datos

pub mod customer_form_repository;
pub mod vehicle_repository;

pub use customer_form_repository::CustomerFormRepository;
pub use vehicle_repository::VehicleRepository;
