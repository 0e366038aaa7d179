//! 短链接 CRUD 端点

use actix_web::{HttpResponse, web};
use tracing::trace;

use crate::services::{CurrentUser, LinkRequest, LinkService};

use super::helpers::api_result;
use super::types::{CheckSlugRequest, DeletedResponse, ExistsResponse};

pub async fn list_links(
    user: web::ReqData<CurrentUser>,
    service: web::Data<LinkService>,
) -> HttpResponse {
    trace!("API: list links for user {}", user.id);
    api_result(service.list_links(&user).await)
}

pub async fn get_link(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    service: web::Data<LinkService>,
) -> HttpResponse {
    api_result(service.get_link(&user, path.into_inner()).await)
}

pub async fn create_link(
    user: web::ReqData<CurrentUser>,
    body: web::Json<LinkRequest>,
    service: web::Data<LinkService>,
) -> HttpResponse {
    api_result(service.create_link(&user, body.into_inner()).await)
}

pub async fn update_link(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    body: web::Json<LinkRequest>,
    service: web::Data<LinkService>,
) -> HttpResponse {
    api_result(
        service
            .update_link(&user, path.into_inner(), body.into_inner())
            .await,
    )
}

pub async fn delete_link(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    service: web::Data<LinkService>,
) -> HttpResponse {
    let id = path.into_inner();
    api_result(
        service
            .delete_link(&user, id)
            .await
            .map(|_| DeletedResponse { id }),
    )
}

/// POST /links/check-slug
pub async fn check_link_slug(
    body: web::Json<CheckSlugRequest>,
    service: web::Data<LinkService>,
) -> HttpResponse {
    api_result(
        service
            .slug_exists(&body.slug, body.exclude_id)
            .await
            .map(|exists| ExistsResponse { exists }),
    )
}
