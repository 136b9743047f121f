//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL del inventario y de los formularios de clientes.

pub mod customer_form;
pub mod vehicle;

pub use customer_form::{CustomerFormDraft, CustomerFormRecord, LeadStatus};
pub use vehicle::{VehicleDraft, VehicleRecord, VehicleStatus, DEFAULT_FUEL_TYPE};
