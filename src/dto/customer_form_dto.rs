use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::CustomerFormDraft;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::multipart::{MultipartForm, UploadedFile};
use crate::utils::validation::{
    check_length, check_price, coerce_decimal, coerce_int, missing_fields, non_blank,
    MAX_FEATURE_LENGTH, MAX_NAME_LENGTH, MAX_SHORT_TEXT_LENGTH,
};

/// Límite de `VARCHAR(200)` del nombre del cliente
const MAX_CUSTOMER_NAME_LENGTH: usize = 200;

pub const REQUIRED_LEAD_FIELDS: [&str; 8] = [
    "customer_name",
    "email",
    "phone",
    "vehicle_brand",
    "vehicle_model",
    "vehicle_year",
    "vehicle_mileage",
    "vehicle_price",
];

/// Formulario de lead ya validado
#[derive(Debug, Clone)]
pub struct CustomerFormSubmission {
    pub draft: CustomerFormDraft,
    pub images: Vec<UploadedFile>,
}

impl CustomerFormSubmission {
    pub fn from_multipart(form: MultipartForm) -> AppResult<Self> {
        let missing = missing_fields(&REQUIRED_LEAD_FIELDS, |field| form.text(field));
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let draft = CustomerFormDraft {
            customer_name: required_text(&form, "customer_name"),
            email: required_text(&form, "email"),
            phone: required_text(&form, "phone"),
            vehicle_brand: required_text(&form, "vehicle_brand"),
            vehicle_model: required_text(&form, "vehicle_model"),
            vehicle_year: coerce_int(form.text("vehicle_year"))
                .ok_or_else(|| invalid_number("vehicle_year"))?,
            vehicle_mileage: coerce_int(form.text("vehicle_mileage"))
                .ok_or_else(|| invalid_number("vehicle_mileage"))?,
            vehicle_price: coerce_decimal(form.text("vehicle_price"))
                .ok_or_else(|| invalid_number("vehicle_price"))?,
            vehicle_fuel_type: non_blank(form.text("vehicle_fuel_type")),
            vehicle_transmission: non_blank(form.text("vehicle_transmission")),
            vehicle_power: non_blank(form.text("vehicle_power")),
            vehicle_description: non_blank(form.text("vehicle_description")),
        };
        check_limits(&draft)?;

        Ok(Self {
            draft,
            images: form.into_files(),
        })
    }
}

/// Los valores deben caber en las columnas de `customer_forms`
fn check_limits(draft: &CustomerFormDraft) -> AppResult<()> {
    let limits = [
        ("customer_name", Some(draft.customer_name.as_str()), MAX_CUSTOMER_NAME_LENGTH),
        ("email", Some(draft.email.as_str()), MAX_FEATURE_LENGTH),
        ("phone", Some(draft.phone.as_str()), MAX_SHORT_TEXT_LENGTH),
        ("vehicle_brand", Some(draft.vehicle_brand.as_str()), MAX_NAME_LENGTH),
        ("vehicle_model", Some(draft.vehicle_model.as_str()), MAX_NAME_LENGTH),
        ("vehicle_fuel_type", draft.vehicle_fuel_type.as_deref(), MAX_SHORT_TEXT_LENGTH),
        ("vehicle_transmission", draft.vehicle_transmission.as_deref(), MAX_SHORT_TEXT_LENGTH),
        ("vehicle_power", draft.vehicle_power.as_deref(), MAX_SHORT_TEXT_LENGTH),
    ];
    for (field, value, max) in limits {
        check_length(field, value, max)?;
    }
    check_price("vehicle_price", Some(draft.vehicle_price))
}

fn required_text(form: &MultipartForm, name: &str) -> String {
    non_blank(form.text(name)).unwrap_or_default()
}

fn invalid_number(field: &str) -> AppError {
    AppError::BadRequest(format!("Valor numérico inválido para '{}'", field))
}

#[derive(Debug, Serialize)]
pub struct CreateCustomerFormResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "formId")]
    pub form_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> MultipartForm {
        MultipartForm::default()
            .with_field("customer_name", "Erika Mustermann")
            .with_field("email", "erika@example.de")
            .with_field("phone", "+49 30 1234567")
            .with_field("vehicle_brand", "Skoda")
            .with_field("vehicle_model", "Octavia")
            .with_field("vehicle_year", "2016")
            .with_field("vehicle_mileage", "120000")
            .with_field("vehicle_price", "8500")
    }

    #[test]
    fn test_complete_submission() {
        let submission = CustomerFormSubmission::from_multipart(
            complete_form().with_field("vehicle_fuel_type", "Diesel"),
        )
        .unwrap();
        assert_eq!(submission.draft.vehicle_year, 2016);
        assert_eq!(submission.draft.vehicle_mileage, 120000);
        assert_eq!(submission.draft.vehicle_fuel_type.as_deref(), Some("Diesel"));
        assert_eq!(submission.draft.vehicle_power, None);
    }

    #[test]
    fn test_missing_email_is_named() {
        let form = MultipartForm::default()
            .with_field("customer_name", "Erika")
            .with_field("phone", "123")
            .with_field("vehicle_brand", "Skoda")
            .with_field("vehicle_model", "Octavia")
            .with_field("vehicle_year", "2016")
            .with_field("vehicle_mileage", "1")
            .with_field("vehicle_price", "1");
        match CustomerFormSubmission::from_multipart(form) {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec!["email"]),
            other => panic!("unexpected result: {:?}", other.map(|s| s.draft)),
        }
    }

    #[test]
    fn test_empty_form_lists_every_required_field() {
        match CustomerFormSubmission::from_multipart(MultipartForm::default()) {
            Err(AppError::MissingFields(fields)) => assert_eq!(fields, REQUIRED_LEAD_FIELDS),
            other => panic!("unexpected result: {:?}", other.map(|s| s.draft)),
        }
    }

    #[test]
    fn test_values_beyond_column_limits_are_named() {
        let cases = [
            ("customer_name", complete_form().with_field("customer_name", &"E".repeat(201))),
            ("vehicle_brand", complete_form().with_field("vehicle_brand", &"S".repeat(101))),
            ("phone", complete_form().with_field("phone", &"1".repeat(51))),
            ("vehicle_price", complete_form().with_field("vehicle_price", "99999999999999")),
        ];
        for (field, form) in cases {
            match CustomerFormSubmission::from_multipart(form) {
                Err(AppError::BadRequest(message)) => assert!(message.contains(field)),
                other => panic!("unexpected result for {}: {:?}", field, other.map(|s| s.draft)),
            }
        }
    }

    #[test]
    fn test_unparseable_price_is_rejected() {
        let form = complete_form().with_field("vehicle_price", "VB");
        match CustomerFormSubmission::from_multipart(form) {
            Err(AppError::BadRequest(message)) => assert!(message.contains("vehicle_price")),
            other => panic!("unexpected result: {:?}", other.map(|s| s.draft)),
        }
    }
}
