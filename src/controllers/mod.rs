//! Controladores
//!
//! Lógica de cada endpoint sobre repositorios y servicios. Se construyen
//! por request a partir del `AppState`.

pub mod auth_controller;
pub mod customer_form_controller;
pub mod expose_controller;
pub mod vehicle_controller;
