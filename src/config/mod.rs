//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, almacenamiento,
//! generación de exposés y variables de entorno del sistema.

pub mod database;
pub mod environment;
pub mod expose;
pub mod storage;

pub use environment::*;
