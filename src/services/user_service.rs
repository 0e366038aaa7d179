//! User management service
//!
//! 管理员可以查看、创建、删除用户并修改任何人的资料；普通用户只能修改自己，
//! 且修改自己的密码需要提供旧密码。管理员账号的用户名固定为 `admin`。

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::auth_service::{ADMIN_USERNAME, CurrentUser};
use crate::errors::{LinkyError, Result};
use crate::storage::{SeaOrmStorage, User, UserChanges};
use crate::utils::password::{check_password_length, hash_password, verify_password};
use crate::utils::slug::is_valid_identifier;

/// Request to create a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub fullname: String,
    pub password: String,
}

/// Request to update a user, `None` keeps the current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub fullname: Option<String>,
    pub password: Option<String>,
    /// 修改自己的密码时必填
    pub old_password: Option<String>,
}

pub(crate) fn validate_username(username: &str) -> Result<()> {
    if !is_valid_identifier(username) {
        return Err(LinkyError::validation(
            "Username may only contain letters, numbers, @, _ and -",
        ));
    }
    Ok(())
}

pub(crate) fn validate_fullname(fullname: &str) -> Result<()> {
    if fullname.trim().is_empty() {
        return Err(LinkyError::validation("Full name must not be empty"));
    }
    Ok(())
}

pub struct UserService {
    storage: Arc<SeaOrmStorage>,
}

impl UserService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_users(&self, actor: &CurrentUser) -> Result<Vec<User>> {
        actor.require_admin()?;
        self.storage.list_users().await
    }

    pub async fn get_user(&self, id: i32) -> Result<User> {
        self.storage
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| LinkyError::user_not_found(format!("User {} not found", id)))
    }

    pub async fn create_user(&self, actor: &CurrentUser, req: CreateUserRequest) -> Result<User> {
        actor.require_admin()?;
        self.create_user_unchecked(req, true).await
    }

    /// 不做权限检查，供 CLI 和初始化数据使用
    ///
    /// `enforce_password_policy` 为 false 时跳过密码长度检查。
    pub async fn create_user_unchecked(
        &self,
        req: CreateUserRequest,
        enforce_password_policy: bool,
    ) -> Result<User> {
        validate_username(&req.username)?;
        validate_fullname(&req.fullname)?;
        if enforce_password_policy {
            check_password_length(&req.password).map_err(LinkyError::validation)?;
        }

        if self.storage.username_exists(&req.username, None).await? {
            return Err(LinkyError::username_taken(format!(
                "Username '{}' is already taken",
                req.username
            )));
        }

        let hash = hash_password(&req.password)?;
        self.storage
            .insert_user(&req.username, &hash, req.fullname.trim())
            .await
    }

    pub async fn update_user(
        &self,
        actor: &CurrentUser,
        id: i32,
        req: UpdateUserRequest,
    ) -> Result<User> {
        let editing_self = actor.id == id;
        if !editing_self && !actor.is_admin() {
            return Err(LinkyError::forbidden("You can only edit your own account"));
        }

        let target = self.get_user(id).await?;
        let mut changes = UserChanges::default();

        if let Some(username) = req.username.filter(|u| *u != target.username) {
            if target.username == ADMIN_USERNAME {
                return Err(LinkyError::validation(
                    "The administrator account must keep the username 'admin'",
                ));
            }
            validate_username(&username)?;
            if username == ADMIN_USERNAME
                || self.storage.username_exists(&username, Some(id)).await?
            {
                return Err(LinkyError::username_taken(format!(
                    "Username '{}' is already taken",
                    username
                )));
            }
            changes.username = Some(username);
        }

        if let Some(fullname) = req.fullname {
            validate_fullname(&fullname)?;
            changes.fullname = Some(fullname.trim().to_string());
        }

        if let Some(password) = req.password.filter(|p| !p.is_empty()) {
            check_password_length(&password).map_err(LinkyError::validation)?;
            if editing_self {
                let old = req.old_password.unwrap_or_default();
                if !verify_password(&old, &target.password_hash)? {
                    return Err(LinkyError::auth_failed("Current password is incorrect"));
                }
            }
            changes.password_hash = Some(hash_password(&password)?);
        }

        let updated = self.storage.update_user(id, changes).await?;
        info!("User {} updated by {}", id, actor.username);
        Ok(updated)
    }

    /// 不做权限检查的密码重置，供 CLI 使用
    pub async fn reset_password(&self, username: &str, new_password: &str) -> Result<User> {
        check_password_length(new_password).map_err(LinkyError::validation)?;
        let user = self
            .storage
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| LinkyError::user_not_found(format!("User '{}' not found", username)))?;

        let changes = UserChanges {
            password_hash: Some(hash_password(new_password)?),
            ..Default::default()
        };
        self.storage.update_user(user.id, changes).await
    }

    pub async fn delete_user(&self, actor: &CurrentUser, id: i32) -> Result<()> {
        actor.require_admin()?;
        let target = self.get_user(id).await?;
        if target.username == ADMIN_USERNAME {
            return Err(LinkyError::forbidden("The administrator account cannot be deleted"));
        }
        self.storage.delete_user(id).await?;
        info!("User '{}' deleted by {}", target.username, actor.username);
        Ok(())
    }

    /// 用户名是否已被占用
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        self.storage.username_exists(username, None).await
    }
}
