//! Lectura de formularios multipart
//!
//! Recoge los campos escalares y las partes de archivo `images` de una
//! request multipart en una estructura en memoria.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::utils::errors::{AppError, AppResult};

pub const IMAGES_FIELD: &str = "images";

/// Archivo recibido en memoria
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Formulario multipart ya leído
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    fields: HashMap<String, Vec<String>>,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Leer todas las partes. Más de `max_images` imágenes es un error 400.
    pub async fn read(mut multipart: Multipart, max_images: usize) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Formulario multipart inválido: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Error leyendo archivo '{}': {}", file_name, e)))?;

                if name != IMAGES_FIELD || (file_name.is_empty() && bytes.is_empty()) {
                    tracing::debug!("📎 Parte de archivo ignorada: campo '{}'", name);
                    continue;
                }

                if form.files.len() >= max_images {
                    return Err(AppError::BadRequest(format!(
                        "Se permiten como máximo {} imágenes",
                        max_images
                    )));
                }

                form.files.push(UploadedFile::new(file_name, content_type, bytes));
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Campo '{}' inválido: {}", name, e)))?;
            form.fields.entry(name).or_default().push(value);
        }

        Ok(form)
    }

    /// Añadir un campo de texto (construcción manual, p. ej. en tests)
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn with_file(mut self, file: UploadedFile) -> Self {
        self.files.push(file);
        self
    }

    /// Último valor de un campo
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Primer campo no vacío entre varios alias
    pub fn text_any(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.text(name))
            .find(|value| !value.trim().is_empty())
    }

    /// Todos los valores de un campo repetido
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_files(self) -> Vec<UploadedFile> {
        self.files
    }
}
