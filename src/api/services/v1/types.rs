//! API 请求与响应类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::CurrentUser;

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct LoginResponse {
    pub user: CurrentUser,
    pub expires_at: DateTime<Utc>,
}

/// slug 可用性查询，编辑已有条目时传 `exclude_id`
#[derive(Deserialize, Clone, Debug)]
pub struct CheckSlugRequest {
    pub slug: String,
    #[serde(default)]
    pub exclude_id: Option<i32>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CheckUsernameRequest {
    pub username: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PublishedRequest {
    pub published: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct DeletedResponse {
    pub id: i32,
}
