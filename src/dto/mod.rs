//! DTOs de la API
//!
//! Formas de entrada (formularios ya validados) y de salida de los endpoints.

pub mod auth_dto;
pub mod customer_form_dto;
pub mod vehicle_dto;
