use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use fleet_dashboard::config::EnvironmentConfig;
use fleet_dashboard::repositories::CollectionRepository;
use fleet_dashboard::routes::create_app;
use fleet_dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🗄️ Fleet Mock Server - store REST de colecciones");
    info!("================================================");

    let repository = match &config.db_path {
        Some(path) => CollectionRepository::load(path).await.map_err(|e| {
            error!("❌ Error cargando la semilla {}: {}", path.display(), e);
            e
        })?,
        None => CollectionRepository::with_collections(&["vehicles"]),
    };

    let addr = config.server_url();
    let collections = repository.collection_names().await;
    let app = create_app(AppState::new(config, repository));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health");
    for collection in &collections {
        info!("   GET    /{}", collection);
        info!("   POST   /{}", collection);
        info!("   GET    /{}/:id", collection);
        info!("   PUT    /{}/:id", collection);
        info!("   PATCH  /{}/:id", collection);
        info!("   DELETE /{}/:id", collection);
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
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
            Ok(mut stream) => {
                stream.recv().await;
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
