use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{VehicleDraft, VehicleRecord};
use crate::utils::errors::AppResult;

const SELECT_VEHICLES: &str = r#"
    SELECT v.id, v.brand, v.model, v.year, v.price, v.mileage, v.fuel_type,
           v.transmission, v.power, v.description, v.status, v.created_at,
           COALESCE(
               (SELECT array_agg(DISTINCT f.feature::text)
                  FROM vehicle_features f
                 WHERE f.vehicle_id = v.id),
               '{}'::text[]
           ) AS features,
           COALESCE(
               (SELECT array_agg(i.image_url::text ORDER BY i.sort_order, i.id)
                  FROM vehicle_images i
                 WHERE i.vehicle_id = v.id),
               '{}'::text[]
           ) AS images
      FROM vehicles v
"#;

/// Lecturas con el pool; las escrituras reciben la conexión de la
/// transacción en curso.
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos los vehículos, los más recientes primero
    pub async fn find_all(&self) -> AppResult<Vec<VehicleRecord>> {
        let query = format!("{} ORDER BY v.created_at DESC, v.id", SELECT_VEHICLES);
        let vehicles = sqlx::query_as::<_, VehicleRecord>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles
            .into_iter()
            .map(VehicleRecord::without_blank_entries)
            .collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VehicleRecord>> {
        let query = format!("{} WHERE v.id = $1", SELECT_VEHICLES);
        let vehicle = sqlx::query_as::<_, VehicleRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle.map(VehicleRecord::without_blank_entries))
    }

    pub async fn insert(conn: &mut PgConnection, id: Uuid, draft: &VehicleDraft) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, brand, model, year, price, mileage, fuel_type,
                                  transmission, power, description, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id)
        .bind(&draft.brand)
        .bind(&draft.model)
        .bind(draft.year)
        .bind(draft.price)
        .bind(draft.mileage)
        .bind(&draft.fuel_type)
        .bind(&draft.transmission)
        .bind(&draft.power)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Reemplazar todos los campos escalares. `false` si el id no existe.
    pub async fn update(conn: &mut PgConnection, id: Uuid, draft: &VehicleDraft) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
               SET brand = $2, model = $3, year = $4, price = $5, mileage = $6,
                   fuel_type = $7, transmission = $8, power = $9, description = $10,
                   status = $11
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&draft.brand)
        .bind(&draft.model)
        .bind(draft.year)
        .bind(draft.price)
        .bind(draft.mileage)
        .bind(&draft.fuel_type)
        .bind(&draft.transmission)
        .bind(&draft.power)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// `false` si el id no existe
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn insert_features(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
        features: &[String],
    ) -> AppResult<()> {
        for feature in features {
            sqlx::query("INSERT INTO vehicle_features (vehicle_id, feature) VALUES ($1, $2)")
                .bind(vehicle_id)
                .bind(feature)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    pub async fn delete_features(conn: &mut PgConnection, vehicle_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicle_features WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert_image(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
        image_url: &str,
        sort_order: i32,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO vehicle_images (vehicle_id, image_url, sort_order) VALUES ($1, $2, $3)",
        )
        .bind(vehicle_id)
        .bind(image_url)
        .bind(sort_order)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn delete_images(conn: &mut PgConnection, vehicle_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicle_images WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
