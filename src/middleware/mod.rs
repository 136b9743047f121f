//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación, CORS y de
//! saneamiento de errores.

pub mod auth;
pub mod cors;
pub mod error_details;

pub use auth::*;
pub use cors::*;
pub use error_details::*;
