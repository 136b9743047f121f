//! Modelo de Vehicle
//!
//! Vehículo del inventario con sus características y sus imágenes
//! agregadas. Mapea a las tablas `vehicles`, `vehicle_features` y
//! `vehicle_images`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

pub const DEFAULT_FUEL_TYPE: &str = "Benzin";

/// Estado del vehículo - mapea al CHECK de `vehicles.status`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Sold,
    Reserved,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "available" => Ok(VehicleStatus::Available),
            "sold" => Ok(VehicleStatus::Sold),
            "reserved" => Ok(VehicleStatus::Reserved),
            other => Err(AppError::BadRequest(format!(
                "Estado de vehículo inválido: '{}' (available, sold, reserved)",
                other
            ))),
        }
    }
}

/// Fila de vehículo con características e imágenes ya agregadas
#[derive(Debug, Clone, FromRow)]
pub struct VehicleRecord {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub mileage: Option<i32>,
    pub fuel_type: String,
    pub transmission: Option<String>,
    pub power: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub features: Vec<String>,
    pub images: Vec<String>,
}

impl VehicleRecord {
    /// Quitar entradas vacías o solo espacios de las listas agregadas
    pub fn without_blank_entries(mut self) -> Self {
        self.features = clean_list(self.features);
        self.images = clean_list(self.images);
        self
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Datos escalares de un vehículo listos para escribir
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub mileage: Option<i32>,
    pub fuel_type: String,
    pub transmission: Option<String>,
    pub power: Option<String>,
    pub description: Option<String>,
    pub status: VehicleStatus,
    pub features: Vec<String>,
}
