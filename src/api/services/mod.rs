pub mod health;
pub mod public;
pub mod v1;

pub use health::{AppStartTime, health_check};
pub use public::{public_page, redirect};

use actix_web::web;

use crate::api::constants;
use crate::api::middleware::SessionAuth;

/// 注册全部路由
///
/// 顺序很重要：`/{slug}` 跳转必须最后注册。
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(constants::API_V1_PREFIX)
            .wrap(SessionAuth)
            .configure(v1::api_v1_routes),
    )
    .route("/health", web::get().to(health_check))
    .route(
        &format!("{}/{{slug}}", constants::PUBLIC_PAGE_PREFIX),
        web::get().to(public_page),
    )
    .route("/{slug}", web::get().to(redirect));
}
