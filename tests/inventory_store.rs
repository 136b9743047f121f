//! Tests contra PostgreSQL real. Requieren `DATABASE_URL`:
//! `cargo test --test inventory_store -- --ignored`

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use sqlx::PgPool;
use uuid::Uuid;

use dealership_backend::controllers::customer_form_controller::CustomerFormController;
use dealership_backend::controllers::vehicle_controller::VehicleController;
use dealership_backend::dto::customer_form_dto::{CustomerFormSubmission, UpdateStatusRequest};
use dealership_backend::dto::vehicle_dto::{VehicleForm, WriteMode};
use dealership_backend::services::storage_service::ObjectStorage;
use dealership_backend::utils::errors::{AppError, AppResult};
use dealership_backend::utils::multipart::{MultipartForm, UploadedFile};

/// Almacenamiento en memoria que puede fallar en la subida número `fail_at`
#[derive(Default)]
struct MemoryStorage {
    uploaded: Mutex<Vec<String>>,
    fail_at: Option<usize>,
}

impl MemoryStorage {
    fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put_object(&self, key: &str, _bytes: Bytes, _content_type: &str) -> AppResult<String> {
        let mut uploaded = self.uploaded.lock().unwrap();
        if self.fail_at == Some(uploaded.len()) {
            return Err(AppError::Storage(format!("simulated failure for {}", key)));
        }
        let url = format!("https://storage.test/{}", key);
        uploaded.push(url.clone());
        Ok(url)
    }

    fn folder(&self) -> Option<&str> {
        Some("vehicles")
    }
}

fn image(name: &str) -> UploadedFile {
    UploadedFile::new(name, "image/jpeg", Bytes::from_static(b"\xFF\xD8\xFF"))
}

fn vehicle_form(features: &str, images: &[&str]) -> MultipartForm {
    let mut form = MultipartForm::default()
        .with_field("brand", "BMW")
        .with_field("model", "320d")
        .with_field("year", "2019")
        .with_field("price", "23990")
        .with_field("mileage", "68000")
        .with_field("features", features);
    for name in images {
        form = form.with_file(image(name));
    }
    form
}

fn create_form(features: &str, images: &[&str]) -> VehicleForm {
    VehicleForm::from_multipart(vehicle_form(features, images), WriteMode::Create).unwrap()
}

fn update_form(features: &str, images: &[&str]) -> VehicleForm {
    VehicleForm::from_multipart(vehicle_form(features, images), WriteMode::Update).unwrap()
}

async fn count(pool: &PgPool, table: &str, column: &str, id: Uuid) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table, column);
    let (count,): (i64,) = sqlx::query_as(&query).bind(id).fetch_one(pool).await.unwrap();
    count
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_create_stores_images_in_upload_order(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::default());
    let controller = VehicleController::with_storage(pool.clone(), storage.clone());

    let created = controller
        .create(create_form("Navi, Klimaanlage", &["front.jpg", "heck.png", "innen.jpg"]))
        .await
        .unwrap();

    assert_eq!(created.image_count, 3);
    assert_eq!(created.images, storage.uploaded());

    let rows: Vec<(String, i32)> = sqlx::query_as(
        "SELECT image_url, sort_order FROM vehicle_images WHERE vehicle_id = $1 ORDER BY sort_order",
    )
    .bind(created.id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(rows.iter().map(|(_, order)| *order).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(rows.into_iter().map(|(url, _)| url).collect::<Vec<_>>(), created.images);

    let vehicle = controller.get_by_id(created.id, "http://localhost:3001").await.unwrap();
    assert_eq!(vehicle.images, created.images);
    assert_eq!(vehicle.fuel_type, "Benzin");
    assert_eq!(vehicle.status, "available");
    let mut features = vehicle.features.clone();
    features.sort();
    assert_eq!(features, vec!["Klimaanlage", "Navi"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_failed_upload_rolls_back_everything(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::failing_at(1));
    let controller = VehicleController::with_storage(pool.clone(), storage);

    let result = controller
        .create(create_form("Navi", &["a.jpg", "b.jpg", "c.jpg"]))
        .await;
    assert!(matches!(result, Err(AppError::Storage(_))));

    let (vehicles,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles").fetch_one(&pool).await.unwrap();
    let (features,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle_features").fetch_one(&pool).await.unwrap();
    let (images,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle_images").fetch_one(&pool).await.unwrap();
    assert_eq!((vehicles, features, images), (0, 0, 0));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_replaces_features(pool: PgPool) {
    let controller = VehicleController::with_storage(pool.clone(), Arc::new(MemoryStorage::default()));
    let created = controller.create(create_form(r#"["A","B"]"#, &[])).await.unwrap();

    controller.update(created.id, update_form(r#"["C"]"#, &[])).await.unwrap();

    let features: Vec<(String,)> = sqlx::query_as("SELECT feature FROM vehicle_features WHERE vehicle_id = $1")
        .bind(created.id)
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(features, vec![("C".to_string(),)]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_keeps_images_unless_new_ones_are_sent(pool: PgPool) {
    let controller = VehicleController::with_storage(pool.clone(), Arc::new(MemoryStorage::default()));
    let created = controller.create(create_form("", &["a.jpg", "b.jpg"])).await.unwrap();

    let kept = controller.update(created.id, update_form("", &[])).await.unwrap();
    assert!(kept.images.is_empty());
    assert_eq!(count(&pool, "vehicle_images", "vehicle_id", created.id).await, 2);

    let replaced = controller.update(created.id, update_form("", &["neu.jpg"])).await.unwrap();
    assert_eq!(replaced.images.len(), 1);
    let vehicle = controller.get_by_id(created.id, "http://localhost:3001").await.unwrap();
    assert_eq!(vehicle.images, replaced.images);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_failed_upload_on_update_keeps_previous_state(pool: PgPool) {
    let seeded = VehicleController::with_storage(pool.clone(), Arc::new(MemoryStorage::default()));
    let created = seeded.create(create_form("X,Y", &["a.jpg", "b.jpg"])).await.unwrap();
    let before = seeded.get_by_id(created.id, "http://localhost:3001").await.unwrap();

    let failing = VehicleController::with_storage(pool.clone(), Arc::new(MemoryStorage::failing_at(1)));
    let changed = VehicleForm::from_multipart(
        vehicle_form("Z", &["neu1.jpg", "neu2.jpg", "neu3.jpg"]).with_field("brand", "Audi"),
        WriteMode::Update,
    )
    .unwrap();
    let result = failing.update(created.id, changed).await;
    assert!(matches!(result, Err(AppError::Storage(_))));

    let after = seeded.get_by_id(created.id, "http://localhost:3001").await.unwrap();
    assert_eq!(after.brand, "BMW");
    let mut features = after.features.clone();
    features.sort();
    assert_eq!(features, vec!["X", "Y"]);
    assert_eq!(after.images, before.images);
    assert_eq!(count(&pool, "vehicle_images", "vehicle_id", created.id).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_unknown_vehicle_is_not_found(pool: PgPool) {
    let controller = VehicleController::with_storage(pool.clone(), Arc::new(MemoryStorage::default()));
    let result = controller.update(Uuid::new_v4(), update_form("A", &["x.jpg"])).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let (features,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle_features").fetch_one(&pool).await.unwrap();
    assert_eq!(features, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_delete_removes_features_and_images(pool: PgPool) {
    let controller = VehicleController::with_storage(pool.clone(), Arc::new(MemoryStorage::default()));
    let created = controller.create(create_form("A,B", &["a.jpg"])).await.unwrap();

    controller.delete(created.id).await.unwrap();

    assert_eq!(count(&pool, "vehicle_features", "vehicle_id", created.id).await, 0);
    assert_eq!(count(&pool, "vehicle_images", "vehicle_id", created.id).await, 0);
    assert!(matches!(
        controller.get_by_id(created.id, "http://localhost:3001").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(controller.delete(created.id).await, Err(AppError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_read_path_resolves_relative_urls_and_orders_newest_first(pool: PgPool) {
    let controller = VehicleController::with_storage(pool.clone(), Arc::new(MemoryStorage::default()));
    let older = controller.create(create_form("", &[])).await.unwrap();
    sqlx::query("UPDATE vehicles SET created_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(older.id)
        .execute(&pool)
        .await
        .unwrap();
    let newer = controller.create(create_form("", &[])).await.unwrap();

    sqlx::query("INSERT INTO vehicle_images (vehicle_id, image_url, sort_order) VALUES ($1, $2, 1), ($1, $3, 0)")
        .bind(newer.id)
        .bind("/uploads/zwei.jpg")
        .bind("https://cdn.example.com/eins.jpg")
        .execute(&pool)
        .await
        .unwrap();

    let vehicles = controller.list("https://haendler.example").await.unwrap();
    assert_eq!(vehicles.iter().map(|v| v.id).collect::<Vec<_>>(), vec![newer.id, older.id]);
    assert_eq!(
        vehicles[0].images,
        vec!["https://cdn.example.com/eins.jpg", "https://haendler.example/uploads/zwei.jpg"]
    );
    assert!(vehicles[1].images.is_empty());
    assert!(vehicles[1].features.is_empty());
}

fn lead_form(images: &[&str]) -> CustomerFormSubmission {
    let mut form = MultipartForm::default()
        .with_field("customer_name", "Erika Mustermann")
        .with_field("email", "erika@example.de")
        .with_field("phone", "+49 30 1234567")
        .with_field("vehicle_brand", "Skoda")
        .with_field("vehicle_model", "Octavia")
        .with_field("vehicle_year", "2016")
        .with_field("vehicle_mileage", "120000")
        .with_field("vehicle_price", "8500");
    for name in images {
        form = form.with_file(image(name));
    }
    CustomerFormSubmission::from_multipart(form).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_lead_is_created_with_images_and_status_moves_freely(pool: PgPool) {
    let controller = CustomerFormController::with_storage(pool.clone(), Arc::new(MemoryStorage::default()));
    let created = controller.create(lead_form(&["a.jpg", "b.jpg"])).await.unwrap();
    assert!(created.success);

    let lead = controller.get_by_id(created.form_id).await.unwrap();
    assert_eq!(lead.status, "neu");
    assert_eq!(lead.images.len(), 2);

    for status in ["abgeschlossen", "abgelehnt", "neu"] {
        let response = controller
            .update_status(created.form_id, UpdateStatusRequest { status: status.to_string() })
            .await
            .unwrap();
        assert_eq!(response.status, status);
    }

    let missing = controller
        .update_status(Uuid::new_v4(), UpdateStatusRequest { status: "neu".into() })
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_failed_lead_upload_leaves_no_row(pool: PgPool) {
    let controller = CustomerFormController::with_storage(pool.clone(), Arc::new(MemoryStorage::failing_at(0)));
    let result = controller.create(lead_form(&["a.jpg"])).await;
    assert!(matches!(result, Err(AppError::Storage(_))));

    assert!(controller.list().await.unwrap().is_empty());
}
