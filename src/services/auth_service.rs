//! Session-cookie authentication
//!
//! 登录成功后创建一条会话记录，令牌通过 cookie 下发。每次请求校验令牌：
//! 不存在返回未授权；已过期则删除会话并返回过期；有效则顺延有效期。

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{LinkyError, Result};
use crate::storage::{SeaOrmStorage, User};
use crate::utils::generate_session_token;
use crate::utils::password::verify_password;

/// 管理员账号的固定用户名
pub const ADMIN_USERNAME: &str = "admin";

/// 当前请求的登录用户，由认证中间件注入
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub fullname: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.username == ADMIN_USERNAME
    }

    pub fn require_admin(&self) -> Result<()> {
        if !self.is_admin() {
            return Err(LinkyError::forbidden("Administrator privileges required"));
        }
        Ok(())
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
        }
    }
}

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: CurrentUser,
}

pub struct AuthService {
    storage: Arc<SeaOrmStorage>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(storage: Arc<SeaOrmStorage>, session_ttl_hours: i64) -> Self {
        Self {
            storage,
            session_ttl: Duration::hours(session_ttl_hours.max(1)),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// 用户名 + 密码登录，成功后创建会话
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult> {
        let user = self.storage.find_user_by_username(username).await?;

        let Some(user) = user else {
            debug!("Login rejected: unknown user '{}'", username);
            return Err(LinkyError::auth_failed("Invalid username or password"));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Login rejected: wrong password for '{}'", username);
            return Err(LinkyError::auth_failed("Invalid username or password"));
        }

        let token = generate_session_token();
        let expires_at = Utc::now() + self.session_ttl;
        self.storage
            .create_session(user.id, &token, expires_at)
            .await?;

        info!("User '{}' logged in", user.username);
        Ok(LoginResult {
            token,
            expires_at,
            user: CurrentUser::from(&user),
        })
    }

    /// 校验会话令牌并顺延有效期
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser> {
        let session = self
            .storage
            .find_session(token)
            .await?
            .ok_or_else(|| LinkyError::unauthorized("Not logged in"))?;

        let now = Utc::now();
        if session.is_expired_at(now) {
            self.storage.delete_session(token).await?;
            debug!("Session {} expired at {}", session.id, session.expires_at);
            return Err(LinkyError::session_expired("Session expired, please log in again"));
        }

        let user = self
            .storage
            .find_user_by_id(session.user_id)
            .await?
            .ok_or_else(|| LinkyError::unauthorized("Session user no longer exists"))?;

        self.storage
            .touch_session(session.id, now + self.session_ttl)
            .await?;

        Ok(CurrentUser::from(&user))
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.storage.delete_session(token).await?;
        debug!("Session closed");
        Ok(())
    }

    /// 清理所有已过期的会话
    pub async fn purge_expired(&self) -> Result<u64> {
        self.storage.purge_expired_sessions(Utc::now()).await
    }
}
