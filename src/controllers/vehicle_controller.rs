use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::database::with_transaction;
use crate::dto::vehicle_dto::{
    CreateVehicleResponse, MessageResponse, UpdateVehicleResponse, VehicleForm, VehicleResponse,
};
use crate::repositories::VehicleRepository;
use crate::services::storage_service::{generate_object_key, ObjectStorage, SharedStorage};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::multipart::UploadedFile;

pub struct VehicleController {
    pool: PgPool,
    repository: VehicleRepository,
    storage: SharedStorage,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self::with_storage(state.pool.clone(), state.storage.clone())
    }

    pub fn with_storage(pool: PgPool, storage: SharedStorage) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
            storage,
        }
    }

    pub async fn list(&self, base_url: &str) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles
            .into_iter()
            .map(|vehicle| VehicleResponse::from_record(vehicle, base_url))
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid, base_url: &str) -> AppResult<VehicleResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(VehicleResponse::from_record(vehicle, base_url))
    }

    /// Vehículo, características e imágenes en una sola transacción
    pub async fn create(&self, form: VehicleForm) -> AppResult<CreateVehicleResponse> {
        let VehicleForm { draft, images } = form;
        let storage = self.storage.clone();
        let id = Uuid::new_v4();

        let urls = with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                VehicleRepository::insert(conn, id, &draft).await?;
                VehicleRepository::insert_features(conn, id, &draft.features).await?;
                store_images(conn, storage.as_ref(), id, images).await
            })
        })
        .await?;

        info!("🚗 Vehículo creado: {} ({} imágenes)", id, urls.len());
        Ok(CreateVehicleResponse {
            message: "Vehicle created successfully".to_string(),
            id,
            image_count: urls.len(),
            images: urls,
        })
    }

    /// Reemplazo completo. Sin imágenes nuevas se conservan las guardadas.
    pub async fn update(&self, id: Uuid, form: VehicleForm) -> AppResult<UpdateVehicleResponse> {
        let VehicleForm { draft, images } = form;
        let storage = self.storage.clone();

        let urls = with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                if !VehicleRepository::update(conn, id, &draft).await? {
                    return Err(not_found_error("Vehicle", &id.to_string()));
                }

                VehicleRepository::delete_features(conn, id).await?;
                VehicleRepository::insert_features(conn, id, &draft.features).await?;

                if images.is_empty() {
                    return Ok(Vec::new());
                }
                VehicleRepository::delete_images(conn, id).await?;
                store_images(conn, storage.as_ref(), id, images).await
            })
        })
        .await?;

        info!("✏️ Vehículo actualizado: {} ({} imágenes nuevas)", id, urls.len());
        Ok(UpdateVehicleResponse {
            message: "Vehicle updated successfully".to_string(),
            images: urls,
        })
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                if !VehicleRepository::delete(conn, id).await? {
                    return Err(not_found_error("Vehicle", &id.to_string()));
                }
                VehicleRepository::delete_features(conn, id).await?;
                VehicleRepository::delete_images(conn, id).await?;
                Ok(())
            })
        })
        .await?;

        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(MessageResponse::new("Vehicle deleted successfully"))
    }
}

/// Subir las imágenes en orden; `sort_order` es la posición en la entrada
async fn store_images(
    conn: &mut PgConnection,
    storage: &dyn ObjectStorage,
    vehicle_id: Uuid,
    images: Vec<UploadedFile>,
) -> AppResult<Vec<String>> {
    let mut urls = Vec::with_capacity(images.len());
    for (sort_order, image) in (0_i32..).zip(images) {
        let key = generate_object_key(storage.folder(), &image.file_name);
        let url = storage
            .put_object(&key, image.bytes, &image.content_type)
            .await?;
        VehicleRepository::insert_image(conn, vehicle_id, &url, sort_order).await?;
        urls.push(url);
    }
    Ok(urls)
}
