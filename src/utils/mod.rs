//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT, formularios multipart y resolución de URLs.

pub mod errors;
pub mod jwt;
pub mod multipart;
pub mod urls;
pub mod validation;
