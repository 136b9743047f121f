use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::with_transaction;
use crate::dto::customer_form_dto::{
    CreateCustomerFormResponse, CustomerFormSubmission, UpdateStatusRequest, UpdateStatusResponse,
};
use crate::models::{CustomerFormRecord, LeadStatus};
use crate::repositories::CustomerFormRepository;
use crate::services::storage_service::{generate_object_key, SharedStorage};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct CustomerFormController {
    pool: PgPool,
    repository: CustomerFormRepository,
    storage: SharedStorage,
}

impl CustomerFormController {
    pub fn new(state: &AppState) -> Self {
        Self::with_storage(state.pool.clone(), state.storage.clone())
    }

    pub fn with_storage(pool: PgPool, storage: SharedStorage) -> Self {
        Self {
            repository: CustomerFormRepository::new(pool.clone()),
            pool,
            storage,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<CustomerFormRecord>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CustomerFormRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer form", &id.to_string()))
    }

    /// Lead e imágenes en una sola transacción
    pub async fn create(&self, submission: CustomerFormSubmission) -> AppResult<CreateCustomerFormResponse> {
        let CustomerFormSubmission { draft, images } = submission;
        let storage = self.storage.clone();
        let id = Uuid::new_v4();

        let image_count = with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                CustomerFormRepository::insert(conn, id, &draft).await?;

                let count = images.len();
                for image in images {
                    let key = generate_object_key(storage.folder(), &image.file_name);
                    let url = storage
                        .put_object(&key, image.bytes, &image.content_type)
                        .await?;
                    CustomerFormRepository::insert_image(conn, id, &url).await?;
                }
                Ok(count)
            })
        })
        .await?;

        info!("📝 Formulario de cliente recibido: {} ({} imágenes)", id, image_count);
        Ok(CreateCustomerFormResponse {
            success: true,
            message: "Form submitted successfully".to_string(),
            form_id: id,
        })
    }

    /// Sin restricciones de transición entre estados
    pub async fn update_status(&self, id: Uuid, request: UpdateStatusRequest) -> AppResult<UpdateStatusResponse> {
        let status: LeadStatus = request.status.parse()?;

        if !self.repository.update_status(id, status).await? {
            return Err(not_found_error("Customer form", &id.to_string()));
        }

        info!("🔄 Estado del formulario {} -> {}", id, status);
        Ok(UpdateStatusResponse {
            message: "Status updated successfully".to_string(),
            status: status.as_str().to_string(),
        })
    }
}
