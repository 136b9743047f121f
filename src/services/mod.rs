//! Servicios del sistema
//!
//! Colaboradores externos detrás de traits: almacenamiento de objetos,
//! generación de texto, conversión a PDF, y el servicio de exposé que los
//! combina.

pub mod expose_service;
pub mod pdf_service;
pub mod storage_service;
pub mod text_generation_service;
