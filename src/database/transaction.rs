//! Transacciones con alcance
//!
//! `with_transaction` toma una conexión del pool, abre una transacción,
//! ejecuta la operación y hace commit si devuelve `Ok` o rollback si
//! devuelve `Err`. La conexión vuelve al pool en todos los caminos de salida;
//! si el futuro se cancela, el `Drop` de la transacción de sqlx hace rollback.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, warn};

use crate::utils::errors::AppResult;

pub async fn with_transaction<T, F>(pool: &PgPool, operation: F) -> AppResult<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, AppResult<T>> + Send,
{
    let mut tx = pool.begin().await?;

    match operation(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            debug!("💾 Transacción confirmada");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("⚠️ Error en rollback: {}", rollback_err);
            }
            debug!("↩️ Transacción revertida: {}", err);
            Err(err)
        }
    }
}
