use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::{DynGalleryService, ServerState}};
use service::{
    auth::repo::seaorm::SeaOrmAdminRepository,
    events::Broadcaster,
    gallery::{lister::ObjectLister, s3::S3ObjectLister, GalleryService},
    packages::repo::seaorm::SeaOrmPackageRepository,
    runtime,
    session::repo::seaorm::SeaOrmSessionStore,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Load and validate configuration; missing required values halt startup.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    if let Some(ca) = &cfg.database.ca_cert_path {
        runtime::require_file(ca).map_err(|e| StartupError::Runtime(e.to_string()))?;
    }
    Ok(cfg)
}

fn build_gallery(cfg: &AppConfig) -> DynGalleryService {
    if !cfg.storage.is_configured() {
        warn!("object storage not configured; /gallery will report storage unavailable");
        return GalleryService::unconfigured();
    }
    let lister: Arc<dyn ObjectLister> = Arc::new(S3ObjectLister::from_config(&cfg.storage));
    GalleryService::new(lister, cfg.storage.public_base_url.clone())
}

async fn shutdown_signal(broadcaster: Arc<Broadcaster>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, closing notification streams");
    broadcaster.close_all();
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging_from_env();
    runtime::ensure_env(&cfg.server.static_dir).await?;

    // DB connection, probe and schema
    let db = models::db::connect_with_config(&cfg.database).await?;
    match models::db::test_connection(&db).await {
        Ok(()) => info!(tls = cfg.database.ca_cert_path.is_some(), "database connection ok"),
        Err(e) => {
            error!(error = %e, "database connection probe failed");
            return Err(e);
        }
    }
    migration::Migrator::up(&db, None).await?;

    let broadcaster = Arc::new(Broadcaster::new());
    let state = ServerState::new(
        Arc::new(SeaOrmPackageRepository { db: db.clone() }),
        Arc::new(SeaOrmAdminRepository { db: db.clone() }),
        Arc::new(SeaOrmSessionStore { db: db.clone() }),
        build_gallery(&cfg),
        Arc::clone(&broadcaster),
        &cfg.session,
    );
    if let Err(e) = state.sessions.purge_expired().await {
        warn!(error = %e, "expired session purge failed");
    }

    // Build router
    let app: Router = routes::build_router(state, build_cors(), &cfg.server.static_dir);

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(broadcaster))
        .await?;
    info!("server stopped");
    Ok(())
}
