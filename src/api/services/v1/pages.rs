//! 页面 CRUD 端点
//!
//! 创建、更新和替换内容时，内容不合法会以 422 返回完整的违规列表。

use actix_web::{HttpResponse, web};

use crate::content::ContentList;
use crate::services::{CurrentUser, PageRequest, PageService};

use super::helpers::api_result;
use super::types::{CheckSlugRequest, DeletedResponse, ExistsResponse, PublishedRequest};

pub async fn list_pages(
    user: web::ReqData<CurrentUser>,
    service: web::Data<PageService>,
) -> HttpResponse {
    api_result(service.list_pages(&user).await)
}

pub async fn get_page(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    service: web::Data<PageService>,
) -> HttpResponse {
    api_result(service.get_page(&user, path.into_inner()).await)
}

pub async fn create_page(
    user: web::ReqData<CurrentUser>,
    body: web::Json<PageRequest>,
    service: web::Data<PageService>,
) -> HttpResponse {
    api_result(service.create_page(&user, body.into_inner()).await)
}

/// PUT /pages/{id}
///
/// 请求里缺省的 `content` 和 `published` 保持原值。
pub async fn update_page(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    body: web::Json<PageRequest>,
    service: web::Data<PageService>,
) -> HttpResponse {
    api_result(
        service
            .update_page(&user, path.into_inner(), body.into_inner())
            .await,
    )
}

/// PUT /pages/{id}/content
pub async fn replace_page_content(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    body: web::Json<ContentList>,
    service: web::Data<PageService>,
) -> HttpResponse {
    api_result(
        service
            .replace_content(&user, path.into_inner(), body.into_inner())
            .await,
    )
}

/// PATCH /pages/{id}/published
pub async fn set_page_published(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    body: web::Json<PublishedRequest>,
    service: web::Data<PageService>,
) -> HttpResponse {
    api_result(
        service
            .set_published(&user, path.into_inner(), body.published)
            .await,
    )
}

pub async fn delete_page(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    service: web::Data<PageService>,
) -> HttpResponse {
    let id = path.into_inner();
    api_result(
        service
            .delete_page(&user, id)
            .await
            .map(|_| DeletedResponse { id }),
    )
}

/// POST /pages/check-slug
pub async fn check_page_slug(
    body: web::Json<CheckSlugRequest>,
    service: web::Data<PageService>,
) -> HttpResponse {
    api_result(
        service
            .slug_exists(&body.slug, body.exclude_id)
            .await
            .map(|exists| ExistsResponse { exists }),
    )
}
