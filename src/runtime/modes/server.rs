//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::constants::MAX_PAYLOAD_BYTES;
use crate::api::services::{AppStartTime, configure_routes};
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::AppServices;

/// 注册所有 app data，服务器和集成测试共用
pub fn configure_app_data(
    cfg: &mut web::ServiceConfig,
    storage: std::sync::Arc<crate::storage::SeaOrmStorage>,
    services: &AppServices,
    app_start_time: AppStartTime,
) {
    cfg.app_data(web::Data::new(storage))
        .app_data(web::Data::from(services.auth.clone()))
        .app_data(web::Data::from(services.links.clone()))
        .app_data(web::Data::from(services.pages.clone()))
        .app_data(web::Data::from(services.users.clone()))
        .app_data(web::Data::from(services.dashboard.clone()))
        .app_data(web::Data::new(app_start_time))
        .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .app_data(web::JsonConfig::default().limit(MAX_PAYLOAD_BYTES));
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {}", e))?;

    let storage = startup.storage.clone();
    let services = startup.services.clone();

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let db_for_shutdown = storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(|cfg| {
                configure_app_data(cfg, storage.clone(), &services, app_start_time.clone())
            })
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
