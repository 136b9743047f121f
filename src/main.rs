use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dealership_backend::config::EnvironmentConfig;
use dealership_backend::database::DatabaseConnection;
use dealership_backend::{create_router, AppState};

const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("🚗 Dealership Backend - Inventario, Leads y Exposés");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);
    for warning in config.insecure_defaults() {
        warn!("⚠️ {}", warning);
    }

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&config.database).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::from_config(pool, config).await?;
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Estado de la base de datos");
    info!("🔑 Admin:");
    info!("   POST /api/admin/login - Login de administrador");
    info!("   GET  /api/admin/profile - Perfil del token (auth)");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   GET  /api/vehicles/:id/expose - Exposé PDF (?html=1 para HTML)");
    info!("   POST /api/vehicles - Crear vehículo (auth, multipart)");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo (auth, multipart)");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo (auth)");
    info!("📝 Formularios de clientes:");
    info!("   POST /api/customer-forms - Enviar formulario (multipart)");
    info!("   GET  /api/customer-forms - Listar formularios");
    info!("   GET  /api/customer-forms/:id - Obtener formulario");
    info!("   PUT  /api/customer-forms/:id/status - Cambiar estado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
