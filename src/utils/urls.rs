//! Resolución de URLs de imágenes
//!
//! Las URLs absolutas se devuelven intactas; las relativas se prefijan con
//! la URL base elegida para la request.

use axum::http::{header, HeaderMap};

use crate::config::EnvironmentConfig;

const ABSOLUTE_PREFIXES: [&str; 2] = ["http://", "https://"];

pub fn is_absolute_url(url: &str) -> bool {
    ABSOLUTE_PREFIXES
        .iter()
        .any(|prefix| {
            url.get(..prefix.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
        })
}

/// URL base: cabecera `Origin`, si no `API_BASE_URL`, si no localhost
pub fn resolve_base_url(headers: &HeaderMap, config: &EnvironmentConfig) -> String {
    headers
        .get(header::ORIGIN)
        .and_then(|origin| origin.to_str().ok())
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "null")
        .map(str::to_string)
        .unwrap_or_else(|| config.fallback_base_url())
}

/// Resolver una URL de imagen contra la base. Idempotente.
pub fn resolve_image_url(url: &str, base_url: &str) -> String {
    let url = url.trim();
    if is_absolute_url(url) {
        return url.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_absolute_urls_are_unchanged() {
        let url = "https://bucket.s3.eu-central-1.amazonaws.com/a.jpg";
        assert_eq!(resolve_image_url(url, "http://localhost:3001"), url);
        assert_eq!(resolve_image_url("HTTP://cdn.example/a.jpg", "http://x"), "HTTP://cdn.example/a.jpg");
    }

    #[test]
    fn test_relative_urls_are_prefixed_once() {
        let resolved = resolve_image_url("/uploads/vehicles/a.jpg", "http://localhost:3001/");
        assert_eq!(resolved, "http://localhost:3001/uploads/vehicles/a.jpg");
        assert_eq!(resolve_image_url(&resolved, "http://other.example"), resolved);
        assert_eq!(
            resolve_image_url("uploads/a.jpg", "http://localhost:3001"),
            "http://localhost:3001/uploads/a.jpg"
        );
    }

    #[test]
    fn test_base_url_precedence() {
        let mut config = EnvironmentConfig::default();
        let mut headers = HeaderMap::new();
        assert_eq!(resolve_base_url(&headers, &config), "http://localhost:3001");

        config.api_base_url = Some("https://api.kfz.example".to_string());
        assert_eq!(resolve_base_url(&headers, &config), "https://api.kfz.example");

        headers.insert(header::ORIGIN, HeaderValue::from_static("https://www.kfz.example"));
        assert_eq!(resolve_base_url(&headers, &config), "https://www.kfz.example");
    }
}
