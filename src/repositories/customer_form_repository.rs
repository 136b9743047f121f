use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{CustomerFormDraft, CustomerFormRecord, LeadStatus};
use crate::utils::errors::AppResult;

const SELECT_FORMS: &str = r#"
    SELECT cf.id, cf.customer_name, cf.email, cf.phone,
           cf.vehicle_brand, cf.vehicle_model, cf.vehicle_year, cf.vehicle_mileage,
           cf.vehicle_price, cf.vehicle_fuel_type, cf.vehicle_transmission,
           cf.vehicle_power, cf.vehicle_description, cf.status, cf.created_at,
           COALESCE(
               (SELECT array_agg(i.image_url::text ORDER BY i.id)
                  FROM customer_form_images i
                 WHERE i.form_id = cf.id),
               '{}'::text[]
           ) AS images
      FROM customer_forms cf
"#;

pub struct CustomerFormRepository {
    pool: PgPool,
}

impl CustomerFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<CustomerFormRecord>> {
        let query = format!("{} ORDER BY cf.created_at DESC, cf.id", SELECT_FORMS);
        let forms = sqlx::query_as::<_, CustomerFormRecord>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(forms
            .into_iter()
            .map(CustomerFormRecord::with_trimmed_images)
            .collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CustomerFormRecord>> {
        let query = format!("{} WHERE cf.id = $1", SELECT_FORMS);
        let form = sqlx::query_as::<_, CustomerFormRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(form.map(CustomerFormRecord::with_trimmed_images))
    }

    /// `false` si el formulario no existe
    pub async fn update_status(&self, id: Uuid, status: LeadStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE customer_forms SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insertar el lead con estado `neu`
    pub async fn insert(conn: &mut PgConnection, id: Uuid, draft: &CustomerFormDraft) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO customer_forms (
                id, customer_name, email, phone,
                vehicle_brand, vehicle_model, vehicle_year, vehicle_mileage, vehicle_price,
                vehicle_fuel_type, vehicle_transmission, vehicle_power, vehicle_description,
                status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(id)
        .bind(&draft.customer_name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.vehicle_brand)
        .bind(&draft.vehicle_model)
        .bind(draft.vehicle_year)
        .bind(draft.vehicle_mileage)
        .bind(draft.vehicle_price)
        .bind(&draft.vehicle_fuel_type)
        .bind(&draft.vehicle_transmission)
        .bind(&draft.vehicle_power)
        .bind(&draft.vehicle_description)
        .bind(LeadStatus::Neu.as_str())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    pub async fn insert_image(conn: &mut PgConnection, form_id: Uuid, image_url: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO customer_form_images (form_id, image_url) VALUES ($1, $2)")
            .bind(form_id)
            .bind(image_url)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
