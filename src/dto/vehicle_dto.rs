use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{VehicleDraft, VehicleRecord, VehicleStatus, DEFAULT_FUEL_TYPE};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::multipart::{MultipartForm, UploadedFile};
use crate::utils::urls::resolve_image_url;
use crate::utils::validation::{
    check_length, check_price, coerce_decimal, coerce_int, missing_fields, non_blank, parse_features,
    MAX_FEATURE_LENGTH, MAX_NAME_LENGTH, MAX_SHORT_TEXT_LENGTH,
};

const REQUIRED_ON_CREATE: [&str; 2] = ["brand", "model"];
const REQUIRED_ON_UPDATE: [&str; 5] = ["brand", "model", "year", "price", "mileage"];

/// Tipo de escritura sobre el inventario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Formulario multipart de vehículo ya validado
#[derive(Debug, Clone)]
pub struct VehicleForm {
    pub draft: VehicleDraft,
    pub images: Vec<UploadedFile>,
}

impl VehicleForm {
    pub fn from_multipart(form: MultipartForm, mode: WriteMode) -> AppResult<Self> {
        let required: &[&str] = match mode {
            WriteMode::Create => &REQUIRED_ON_CREATE,
            WriteMode::Update => &REQUIRED_ON_UPDATE,
        };
        let missing = missing_fields(required, |field| form.text(field));
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let strict = mode == WriteMode::Update;
        let year = number_field(&form, "year", strict, coerce_int)?;
        let price = number_field(&form, "price", strict, coerce_decimal)?;
        let mileage = number_field(&form, "mileage", strict, coerce_int)?;

        let status = match non_blank(form.text("status")) {
            Some(status) => status.parse::<VehicleStatus>()?,
            None => VehicleStatus::default(),
        };

        let draft = VehicleDraft {
            brand: non_blank(form.text("brand")).unwrap_or_default(),
            model: non_blank(form.text("model")).unwrap_or_default(),
            year,
            price,
            mileage,
            fuel_type: non_blank(form.text_any(&["fuel_type", "fuelType"]))
                .unwrap_or_else(|| DEFAULT_FUEL_TYPE.to_string()),
            transmission: non_blank(form.text("transmission")),
            power: non_blank(form.text("power")),
            description: non_blank(form.text("description")),
            status,
            features: parse_features(form.values("features")),
        };
        check_limits(&draft)?;

        Ok(Self {
            draft,
            images: form.into_files(),
        })
    }
}

/// Los valores deben caber en las columnas de `vehicles` y `vehicle_features`
fn check_limits(draft: &VehicleDraft) -> AppResult<()> {
    check_length("brand", Some(&draft.brand), MAX_NAME_LENGTH)?;
    check_length("model", Some(&draft.model), MAX_NAME_LENGTH)?;
    check_length("fuel_type", Some(&draft.fuel_type), MAX_SHORT_TEXT_LENGTH)?;
    check_length("transmission", draft.transmission.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
    check_length("power", draft.power.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
    check_price("price", draft.price)?;
    for feature in &draft.features {
        check_length("features", Some(feature), MAX_FEATURE_LENGTH)?;
    }
    Ok(())
}

/// Campo numérico: ilegible pasa a `None`, salvo en modo estricto
fn number_field<T>(
    form: &MultipartForm,
    name: &str,
    strict: bool,
    coerce: fn(Option<&str>) -> Option<T>,
) -> AppResult<Option<T>> {
    let raw = form.text(name);
    match coerce(raw) {
        Some(value) => Ok(Some(value)),
        None if strict && non_blank(raw).is_some() => Err(AppError::BadRequest(format!(
            "Valor numérico inválido para '{}'",
            name
        ))),
        None => Ok(None),
    }
}

/// Vehículo tal como lo consume el front end
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
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

impl VehicleResponse {
    /// Las URLs relativas de imágenes se resuelven contra `base_url`
    pub fn from_record(record: VehicleRecord, base_url: &str) -> Self {
        let images = record
            .images
            .iter()
            .map(|url| resolve_image_url(url, base_url))
            .collect();

        Self {
            id: record.id,
            brand: record.brand,
            model: record.model,
            year: record.year,
            price: record.price,
            mileage: record.mileage,
            fuel_type: record.fuel_type,
            transmission: record.transmission,
            power: record.power,
            description: record.description,
            status: record.status,
            created_at: record.created_at,
            features: record.features,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateVehicleResponse {
    pub message: String,
    pub id: Uuid,
    pub images: Vec<String>,
    #[serde(rename = "imageCount")]
    pub image_count: usize,
}

#[derive(Debug, Serialize)]
pub struct UpdateVehicleResponse {
    pub message: String,
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> MultipartForm {
        MultipartForm::default()
            .with_field("brand", "Volkswagen")
            .with_field("model", "Golf")
            .with_field("year", "2018")
            .with_field("price", "14990.00")
            .with_field("mileage", "85000")
    }

    #[test]
    fn test_create_defaults() {
        let form = MultipartForm::default()
            .with_field("brand", "Opel")
            .with_field("model", "Corsa")
            .with_field("year", "unbekannt");
        let parsed = VehicleForm::from_multipart(form, WriteMode::Create).unwrap();

        assert_eq!(parsed.draft.fuel_type, "Benzin");
        assert_eq!(parsed.draft.status, VehicleStatus::Available);
        assert_eq!(parsed.draft.year, None);
        assert!(parsed.draft.features.is_empty());
        assert!(parsed.images.is_empty());
    }

    #[test]
    fn test_create_requires_brand_and_model() {
        let form = MultipartForm::default().with_field("brand", "Opel");
        match VehicleForm::from_multipart(form, WriteMode::Create) {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["model"]),
            other => panic!("unexpected result: {:?}", other.map(|f| f.draft)),
        }
    }

    #[test]
    fn test_update_requires_all_core_fields() {
        let form = MultipartForm::default()
            .with_field("brand", "Opel")
            .with_field("model", "Corsa");
        match VehicleForm::from_multipart(form, WriteMode::Update) {
            Err(AppError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["year", "price", "mileage"])
            }
            other => panic!("unexpected result: {:?}", other.map(|f| f.draft)),
        }
    }

    #[test]
    fn test_update_rejects_unparseable_required_number() {
        let form = base_form().with_field("mileage", "viel");
        assert!(matches!(
            VehicleForm::from_multipart(form, WriteMode::Update),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_fields_are_coerced() {
        let form = base_form()
            .with_field("fuelType", "Diesel")
            .with_field("status", "reserved")
            .with_field("features", r#"["Navi","Sitzheizung"]"#);
        let draft = VehicleForm::from_multipart(form, WriteMode::Update).unwrap().draft;

        assert_eq!(draft.year, Some(2018));
        assert_eq!(draft.mileage, Some(85000));
        assert_eq!(draft.price.map(|p| p.to_string()), Some("14990.00".to_string()));
        assert_eq!(draft.fuel_type, "Diesel");
        assert_eq!(draft.status, VehicleStatus::Reserved);
        assert_eq!(draft.features, vec!["Navi", "Sitzheizung"]);
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let form = base_form().with_field("status", "weg");
        assert!(VehicleForm::from_multipart(form, WriteMode::Create).is_err());
    }

    #[test]
    fn test_values_beyond_column_limits_are_rejected() {
        let cases = [
            base_form().with_field("brand", &"B".repeat(150)),
            base_form().with_field("features", &"F".repeat(300)),
            base_form().with_field("price", "99999999999999"),
            base_form().with_field("power", &"9".repeat(60)),
        ];
        for form in cases {
            assert!(matches!(
                VehicleForm::from_multipart(form, WriteMode::Create),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_values_at_column_limits_are_accepted() {
        let form = base_form()
            .with_field("model", &"M".repeat(100))
            .with_field("features", &"F".repeat(255))
            .with_field("price", "9999999999.99");
        assert!(VehicleForm::from_multipart(form, WriteMode::Update).is_ok());
    }

    #[test]
    fn test_response_resolves_relative_images() {
        let record = VehicleRecord {
            id: Uuid::new_v4(),
            brand: "Audi".into(),
            model: "A4".into(),
            year: None,
            price: None,
            mileage: None,
            fuel_type: "Benzin".into(),
            transmission: None,
            power: None,
            description: None,
            status: "available".into(),
            created_at: Utc::now(),
            features: vec![],
            images: vec![
                "https://cdn.example.com/a.jpg".into(),
                "/uploads/b.jpg".into(),
            ],
        };
        let response = VehicleResponse::from_record(record, "http://localhost:3001");
        assert_eq!(
            response.images,
            vec!["https://cdn.example.com/a.jpg", "http://localhost:3001/uploads/b.jpg"]
        );
    }

    #[test]
    fn test_create_response_uses_image_count_key() {
        let json = serde_json::to_value(CreateVehicleResponse {
            message: "ok".into(),
            id: Uuid::nil(),
            images: vec!["u".into()],
            image_count: 1,
        })
        .unwrap();
        assert_eq!(json["imageCount"], 1);
    }
}
