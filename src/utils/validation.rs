//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos de
//! formularios y conversión tolerante de tipos.

use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

/// Límite de `VARCHAR(100)` de marca y modelo
pub const MAX_NAME_LENGTH: usize = 100;
/// Límite de `VARCHAR(50)` de combustible, cambio, potencia y teléfono
pub const MAX_SHORT_TEXT_LENGTH: usize = 50;
/// Límite de `VARCHAR(255)` de características y email
pub const MAX_FEATURE_LENGTH: usize = 255;

/// `NUMERIC(12, 2)`: como mucho diez dígitos enteros
const MAX_PRICE_DIGITS: u32 = 10;

/// Devuelve el valor recortado, o `None` si está ausente o en blanco
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Nombres de los campos requeridos que faltan o están en blanco, en el orden dado
pub fn missing_fields<'v, F>(required: &[&str], lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<&'v str>,
{
    required
        .iter()
        .copied()
        .filter(|field| non_blank(lookup(field)).is_none())
        .map(|field| field.to_string())
        .collect()
}

/// Interpretar la lista de características.
///
/// Varios valores se toman como lista estructurada. Un único valor se intenta
/// leer como lista JSON serializada y, si no lo es, se divide por comas.
/// Las entradas vacías se descartan siempre.
pub fn parse_features(values: &[String]) -> Vec<String> {
    match values {
        [] => Vec::new(),
        [single] => parse_feature_string(single),
        many => clean_entries(many.iter().map(String::as_str)),
    }
}

fn parse_feature_string(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => {
            let entries: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect();
            clean_entries(entries.iter().map(String::as_str))
        }
        _ => clean_entries(raw.split(',')),
    }
}

fn clean_entries<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    entries
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prefijo numérico entero: signo opcional seguido de dígitos
fn leading_integer(raw: &str) -> Option<&str> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with('-') || raw.starts_with('+'));
    let digits = raw[sign_len..].chars().take_while(char::is_ascii_digit).count();
    (digits > 0).then(|| &raw[..sign_len + digits])
}

/// Conversión tolerante a entero: "150000 km" -> 150000, "abc" -> None
pub fn coerce_int(value: Option<&str>) -> Option<i32> {
    let raw = value?.trim();
    leading_integer(raw)?.parse().ok()
}

/// Conversión tolerante a decimal: "12500.50" -> 12500.50, "9.990 €" -> 9.990
pub fn coerce_decimal(value: Option<&str>) -> Option<Decimal> {
    let raw = value?.trim();
    if let Ok(decimal) = Decimal::from_str(raw) {
        return Some(decimal);
    }

    let integer = leading_integer(raw)?;
    let rest = &raw[integer.len()..];
    let fraction_len = rest
        .strip_prefix('.')
        .map(|r| r.chars().take_while(char::is_ascii_digit).count())
        .unwrap_or(0);

    let numeric = if fraction_len > 0 {
        &raw[..integer.len() + 1 + fraction_len]
    } else {
        integer
    };
    Decimal::from_str(numeric.trim_start_matches('+')).ok()
}

/// Rechazar textos más largos que la columna (en caracteres, como `VARCHAR`)
pub fn check_length(field: &str, value: Option<&str>, max: usize) -> AppResult<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(bad_request_error(&format!(
            "El campo '{}' admite como máximo {} caracteres",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Rechazar precios que no caben en `NUMERIC(12, 2)`
pub fn check_price(field: &str, price: Option<Decimal>) -> AppResult<()> {
    let limit = Decimal::from(10_i64.pow(MAX_PRICE_DIGITS));
    match price {
        Some(price) if price.round_dp(2).abs() >= limit => Err(bad_request_error(&format!(
            "El campo '{}' está fuera de rango",
            field
        ))),
        _ => Ok(()),
    }
}

/// Id de ruta: un id que no es UUID no puede existir, así que es 404
pub fn parse_resource_id(resource: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| not_found_error(resource, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_features_json_list() {
        assert_eq!(
            parse_features(&strings(&[r#"["Klimaanlage","Navi"," "]"#])),
            vec!["Klimaanlage", "Navi"]
        );
    }

    #[test]
    fn test_parse_features_csv_fallback() {
        assert_eq!(
            parse_features(&strings(&["Klimaanlage, Navi,, Sitzheizung "])),
            vec!["Klimaanlage", "Navi", "Sitzheizung"]
        );
    }

    #[test]
    fn test_parse_features_structured_list() {
        assert_eq!(
            parse_features(&strings(&["ABS", "", "ESP"])),
            vec!["ABS", "ESP"]
        );
    }

    #[test]
    fn test_parse_features_empty_inputs() {
        assert!(parse_features(&[]).is_empty());
        assert!(parse_features(&strings(&["   "])).is_empty());
        assert!(parse_features(&strings(&["[]"])).is_empty());
    }

    #[test]
    fn test_parse_features_keeps_duplicates() {
        assert_eq!(parse_features(&strings(&["A,A"])), vec!["A", "A"]);
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int(Some("2019")), Some(2019));
        assert_eq!(coerce_int(Some(" 150000 km")), Some(150000));
        assert_eq!(coerce_int(Some("12.7")), Some(12));
        assert_eq!(coerce_int(Some("abc")), None);
        assert_eq!(coerce_int(Some("")), None);
        assert_eq!(coerce_int(None), None);
        assert_eq!(coerce_int(Some("99999999999")), None);
    }

    #[test]
    fn test_coerce_decimal() {
        assert_eq!(coerce_decimal(Some("12500.50")), Decimal::from_str("12500.50").ok());
        assert_eq!(coerce_decimal(Some("9990 €")), Decimal::from_str("9990").ok());
        assert_eq!(coerce_decimal(Some("9.5abc")), Decimal::from_str("9.5").ok());
        assert_eq!(coerce_decimal(Some("+7")), Decimal::from_str("7").ok());
        assert_eq!(coerce_decimal(Some("n/a")), None);
        assert_eq!(coerce_decimal(None), None);
    }

    #[test]
    fn test_missing_fields_in_declared_order() {
        let missing = missing_fields(&["customer_name", "email", "phone"], |field| match field {
            "customer_name" => Some("Max"),
            "phone" => Some("  "),
            _ => None,
        });
        assert_eq!(missing, vec!["email", "phone"]);
    }

    #[test]
    fn test_check_length_counts_characters() {
        assert!(check_length("brand", Some(&"ä".repeat(100)), MAX_NAME_LENGTH).is_ok());
        assert!(check_length("brand", None, MAX_NAME_LENGTH).is_ok());
        assert!(matches!(
            check_length("brand", Some(&"a".repeat(101)), MAX_NAME_LENGTH),
            Err(crate::utils::errors::AppError::BadRequest(message)) if message.contains("brand")
        ));
    }

    #[test]
    fn test_check_price_bounds() {
        assert!(check_price("price", Decimal::from_str("9999999999.99").ok()).is_ok());
        assert!(check_price("price", None).is_ok());
        assert!(check_price("price", Decimal::from_str("10000000000").ok()).is_err());
        assert!(check_price("price", Decimal::from_str("-99999999999999").ok()).is_err());
        assert!(check_price("price", Decimal::from_str("9999999999.999").ok()).is_err());
    }

    #[test]
    fn test_parse_resource_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_resource_id("Vehicle", &id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_resource_id("Vehicle", "42"),
            Err(crate::utils::errors::AppError::NotFound(_))
        ));
    }
}
