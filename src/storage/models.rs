use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::{ContentList, SerializedContent};

/// 用户（密码哈希不参与序列化）
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub fullname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 登录会话
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i32,
    pub token: String,
    pub data: Option<String>,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub id: i32,
    pub title: String,
    pub slug: String,
    /// 跳转目标
    pub link: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: Option<ContentList>,
    pub published: bool,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 已校验的短链接字段，用于新建和更新
#[derive(Debug, Clone)]
pub struct LinkDraft {
    pub title: String,
    pub slug: String,
    pub link: String,
}

/// 已校验的页面字段，内容已经过编辑会话序列化
///
/// `content` 和 `published` 为 `None` 时：新建取默认值，更新保持原值。
#[derive(Debug, Clone)]
pub struct PageDraft {
    pub title: String,
    pub slug: String,
    pub description: String,
    /// `Some(None)` 表示清空内容
    pub content: Option<Option<SerializedContent>>,
    pub published: Option<bool>,
}

/// 用户更新，`None` 表示保持不变
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub fullname: Option<String>,
}
