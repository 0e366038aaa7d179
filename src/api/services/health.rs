use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, trace};

use crate::api::services::v1::{ErrorCode, json_response};
use crate::storage::SeaOrmStorage;

/// 应用启动时间
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Debug)]
pub struct HealthStorageCheck {
    pub status: &'static str,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: i64,
    pub storage: HealthStorageCheck,
}

/// GET /health
///
/// 直接 ping 数据库，不经过业务服务层。
pub async fn health_check(
    storage: web::Data<Arc<SeaOrmStorage>>,
    app_start_time: web::Data<AppStartTime>,
) -> HttpResponse {
    trace!("Received health check request");

    let backend = storage.backend_name().to_string();
    let storage_check = match tokio::time::timeout(Duration::from_secs(5), storage.ping()).await {
        Ok(Ok(())) => HealthStorageCheck {
            status: "healthy",
            backend,
            error: None,
        },
        Ok(Err(e)) => {
            error!("Storage health check failed: {}", e);
            HealthStorageCheck {
                status: "unhealthy",
                backend,
                error: Some(e.to_string()),
            }
        }
        Err(_) => {
            error!("Storage health check timeout");
            HealthStorageCheck {
                status: "unhealthy",
                backend,
                error: Some("timeout".to_string()),
            }
        }
    };

    let healthy = storage_check.error.is_none();
    let uptime_seconds = (chrono::Utc::now() - app_start_time.start_datetime).num_seconds();
    let body = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" },
        uptime_seconds,
        storage: storage_check,
    };

    if healthy {
        json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(body))
    } else {
        json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalServerError,
            "Service unhealthy",
            Some(body),
        )
    }
}
