//! API v1 路由配置

use actix_web::web;

use super::auth::{login, logout, me};
use super::dashboard::get_dashboard;
use super::links::{check_link_slug, create_link, delete_link, get_link, list_links, update_link};
use super::pages::{
    check_page_slug, create_page, delete_page, get_page, list_pages, replace_page_content,
    set_page_published, update_page,
};
use super::users::{check_username, create_user, delete_user, list_users, update_user};

/// 认证路由 `/auth`
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/me", web::get().to(me))
}

/// 短链接路由 `/links`，`check-slug` 需要排在 `/{id}` 之前
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(list_links))
        .route("", web::post().to(create_link))
        .route("/check-slug", web::post().to(check_link_slug))
        .route("/{id}", web::get().to(get_link))
        .route("/{id}", web::put().to(update_link))
        .route("/{id}", web::delete().to(delete_link))
}

/// 页面路由 `/pages`
pub fn pages_routes() -> actix_web::Scope {
    web::scope("/pages")
        .route("", web::get().to(list_pages))
        .route("", web::post().to(create_page))
        .route("/check-slug", web::post().to(check_page_slug))
        .route("/{id}/published", web::patch().to(set_page_published))
        .route("/{id}/content", web::put().to(replace_page_content))
        .route("/{id}", web::get().to(get_page))
        .route("/{id}", web::put().to(update_page))
        .route("/{id}", web::delete().to(delete_page))
}

/// 用户路由 `/users`
pub fn users_routes() -> actix_web::Scope {
    web::scope("/users")
        .route("", web::get().to(list_users))
        .route("", web::post().to(create_user))
        .route("/check-username", web::post().to(check_username))
        .route("/{id}", web::put().to(update_user))
        .route("/{id}", web::delete().to(delete_user))
}

/// API v1 路由，由调用方挂在 `/api/v1` 下并包裹 [`SessionAuth`](crate::api::middleware::SessionAuth)
pub fn api_v1_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth_routes())
        .route("/dashboard", web::get().to(get_dashboard))
        .service(links_routes())
        .service(pages_routes())
        .service(users_routes());
}
