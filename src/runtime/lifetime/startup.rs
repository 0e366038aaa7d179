use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::services::{AuthService, DashboardService, LinkService, PageService, UserService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务器运行所需的共享组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub services: AppServices,
}

/// 各业务服务，以 `web::Data` 形式注入 handler
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub links: Arc<LinkService>,
    pub pages: Arc<PageService>,
    pub users: Arc<UserService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(storage: Arc<SeaOrmStorage>, session_ttl_hours: i64) -> Self {
        Self {
            auth: Arc::new(AuthService::new(storage.clone(), session_ttl_hours)),
            links: Arc::new(LinkService::new(storage.clone())),
            pages: Arc::new(PageService::new(storage.clone())),
            users: Arc::new(UserService::new(storage.clone())),
            dashboard: Arc::new(DashboardService::new(storage)),
        }
    }
}

/// 安装 rustls 加密后端，进程内只需一次
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    install_crypto_provider();

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let config = crate::config::get_config();
    let services = AppServices::new(storage.clone(), config.auth.session_ttl_hours);

    // 清理启动前已过期的会话
    match services.auth.purge_expired().await {
        Ok(0) => {}
        Ok(count) => info!("Purged {} expired sessions", count),
        Err(e) => warn!("Failed to purge expired sessions: {}", e),
    }

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { storage, services })
}
