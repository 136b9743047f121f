//! Backend del concesionario
//!
//! API REST para el inventario de vehículos, los formularios de clientes,
//! la autenticación de administradores y la generación de exposés.

pub mod app;
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

pub use app::create_router;
pub use state::AppState;
