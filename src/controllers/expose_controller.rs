use std::sync::Arc;

use uuid::Uuid;

use crate::repositories::VehicleRepository;
use crate::services::expose_service::{expose_filename, ExposeService};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::urls::resolve_image_url;

/// Documento de exposé listo para servir
pub enum ExposeDocument {
    Html(String),
    Pdf { file_name: String, bytes: Vec<u8> },
}

pub struct ExposeController {
    repository: VehicleRepository,
    service: Arc<ExposeService>,
}

impl ExposeController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state.pool.clone()),
            service: state.expose.clone(),
        }
    }

    pub async fn generate(&self, id: Uuid, base_url: &str, as_html: bool) -> AppResult<ExposeDocument> {
        let mut vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        vehicle.images = vehicle
            .images
            .iter()
            .map(|url| resolve_image_url(url, base_url))
            .collect();

        let html = self.service.render_html(&vehicle).await;
        if as_html {
            return Ok(ExposeDocument::Html(html));
        }

        let bytes = self.service.render_pdf(&html).await?;
        Ok(ExposeDocument::Pdf {
            file_name: expose_filename(&vehicle.brand, &vehicle.model),
            bytes,
        })
    }
}
