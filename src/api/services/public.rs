//! 公开端点：已发布页面与短链接跳转

use actix_web::{HttpResponse, web};
use tracing::{debug, error, trace};

use crate::api::services::v1::api_result;
use crate::errors::LinkyError;
use crate::services::{LinkService, PageService};
use crate::utils::slug::is_valid_identifier;

/// GET /p/{slug}
pub async fn public_page(path: web::Path<String>, service: web::Data<PageService>) -> HttpResponse {
    api_result(service.public_page(&path.into_inner()).await)
}

/// GET /{slug}
pub async fn redirect(path: web::Path<String>, service: web::Data<LinkService>) -> HttpResponse {
    let slug = path.into_inner();

    // 非法 slug 直接 404，不查库
    if !is_valid_identifier(&slug) {
        trace!("Invalid slug rejected: {}", slug);
        return not_found_response();
    }

    match service.resolve(&slug).await {
        Ok(link) => {
            debug!("Redirecting {} -> {}", slug, link.link);
            HttpResponse::TemporaryRedirect()
                .insert_header(("Location", link.link))
                .finish()
        }
        Err(LinkyError::LinkNotFound(_)) => not_found_response(),
        Err(e) => {
            error!("Redirect lookup failed for {}: {}", slug, e);
            HttpResponse::InternalServerError()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body("Internal Server Error")
        }
    }
}

fn not_found_response() -> HttpResponse {
    HttpResponse::NotFound()
        .insert_header(("Content-Type", "text/plain; charset=utf-8"))
        .body("Not Found")
}
