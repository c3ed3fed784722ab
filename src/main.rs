use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use garzon_turismo::cache::{CacheConfig, RedisClient};
use garzon_turismo::config::database::DatabaseConfig;
use garzon_turismo::config::EnvironmentConfig;
use garzon_turismo::database::DatabaseConnection;
use garzon_turismo::middleware::cors_for;
use garzon_turismo::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🏞️ Garzón Turismo - API de contenidos");
    info!("======================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&DatabaseConfig::new(config.database_url.clone())).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    let pool = db_connection.pool().clone();

    // Redis es opcional: si falla, los contadores se calculan siempre
    let cache = match CacheConfig::from_environment(&config) {
        Some(cache_config) => match RedisClient::connect(cache_config).await {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("⚠️ Redis no disponible, se continúa sin caché: {}", e);
                None
            }
        },
        None => {
            info!("ℹ️ REDIS_URL no configurado, caché deshabilitada");
            None
        }
    };

    let cors = cors_for(config.is_development(), &config.cors_origins);
    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config, cache);

    let app = create_app_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors),
    );

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   GET  /api/sites, /api/establishments, /api/events, /api/transport");
    info!("   GET  /api/crafts, /api/activities, /api/photos, /api/posts");
    info!("   GET  /api/routes - Rutas turísticas, mapas, comparación y exportación");
    info!("   GET  /api/search, /api/search/quick - Búsqueda global");
    info!("   GET  /api/map, /api/stats · POST /api/contact");
    info!("🔐 Administración:");
    info!("   POST /api/admin/login - Login de administrador");
    info!("   *    /api/admin/... - CRUD, moderación y bandeja de contacto (JWT)");

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
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
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
