//! 用户管理端点

use actix_web::{HttpResponse, web};

use crate::services::{CreateUserRequest, CurrentUser, UpdateUserRequest, UserService};

use super::helpers::api_result;
use super::types::{CheckUsernameRequest, DeletedResponse, ExistsResponse};

pub async fn list_users(
    user: web::ReqData<CurrentUser>,
    service: web::Data<UserService>,
) -> HttpResponse {
    api_result(service.list_users(&user).await)
}

pub async fn create_user(
    user: web::ReqData<CurrentUser>,
    body: web::Json<CreateUserRequest>,
    service: web::Data<UserService>,
) -> HttpResponse {
    api_result(service.create_user(&user, body.into_inner()).await)
}

pub async fn update_user(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    body: web::Json<UpdateUserRequest>,
    service: web::Data<UserService>,
) -> HttpResponse {
    api_result(
        service
            .update_user(&user, path.into_inner(), body.into_inner())
            .await,
    )
}

pub async fn delete_user(
    user: web::ReqData<CurrentUser>,
    path: web::Path<i32>,
    service: web::Data<UserService>,
) -> HttpResponse {
    let id = path.into_inner();
    api_result(
        service
            .delete_user(&user, id)
            .await
            .map(|_| DeletedResponse { id }),
    )
}

/// POST /users/check-username
pub async fn check_username(
    body: web::Json<CheckUsernameRequest>,
    service: web::Data<UserService>,
) -> HttpResponse {
    api_result(
        service
            .username_exists(body.username.trim())
            .await
            .map(|exists| ExistsResponse { exists }),
    )
}
