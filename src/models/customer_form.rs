//! Modelo de CustomerForm
//!
//! Solicitud de un cliente que quiere vender su vehículo (lead).
//! Mapea a las tablas `customer_forms` y `customer_form_images`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado del lead. Cualquier estado puede seguir a cualquier otro.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    Neu,
    InBearbeitung,
    Abgeschlossen,
    Abgelehnt,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::Neu,
        LeadStatus::InBearbeitung,
        LeadStatus::Abgeschlossen,
        LeadStatus::Abgelehnt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Neu => "neu",
            LeadStatus::InBearbeitung => "in_bearbeitung",
            LeadStatus::Abgeschlossen => "abgeschlossen",
            LeadStatus::Abgelehnt => "abgelehnt",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Estado inválido: '{}' (neu, in_bearbeitung, abgeschlossen, abgelehnt)",
                    value
                ))
            })
    }
}

/// Fila de lead con sus imágenes agregadas
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerFormRecord {
    pub id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_mileage: i32,
    pub vehicle_price: Decimal,
    pub vehicle_fuel_type: Option<String>,
    pub vehicle_transmission: Option<String>,
    pub vehicle_power: Option<String>,
    pub vehicle_description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub images: Vec<String>,
}

impl CustomerFormRecord {
    pub fn with_trimmed_images(mut self) -> Self {
        self.images = self
            .images
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        self
    }
}

/// Lead validado, listo para insertar
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFormDraft {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_mileage: i32,
    pub vehicle_price: Decimal,
    pub vehicle_fuel_type: Option<String>,
    pub vehicle_transmission: Option<String>,
    pub vehicle_power: Option<String>,
    pub vehicle_description: Option<String>,
}
