//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait,
    ActiveValue::{Set, Unchanged},
};
use tracing::info;

use super::converters::{
    link_draft_to_active_model, model_to_link, model_to_page, model_to_session, model_to_user,
    page_draft_to_active_model,
};
use super::{SeaOrmStorage, retry};
use crate::content::SerializedContent;
use crate::errors::{LinkyError, Result};
use crate::storage::models::{Link, LinkDraft, Page, PageDraft, Session, User, UserChanges};

use migration::entities::{link, page, session, user};

impl SeaOrmStorage {
    // ---------------------------------------------------------------
    // users
    // ---------------------------------------------------------------

    pub async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        fullname: &str,
    ) -> Result<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password_hash.to_string()),
            fullname: Set(fullname.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let db = &self.db;
        let created = retry::run(
            &format!("insert_user({})", username),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.insert(db).await }
            },
            || LinkyError::username_taken(format!("用户名已存在: {}", username)),
        )
        .await?;

        info!("User created: {}", username);
        Ok(model_to_user(created))
    }

    pub async fn update_user(&self, id: i32, changes: UserChanges) -> Result<User> {
        let mut model = user::ActiveModel {
            id: Unchanged(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(username) = changes.username.clone() {
            model.username = Set(username);
        }
        if let Some(hash) = changes.password_hash {
            model.password = Set(hash);
        }
        if let Some(fullname) = changes.fullname {
            model.fullname = Set(fullname);
        }

        let db = &self.db;
        let updated = retry::run(
            &format!("update_user({})", id),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.update(db).await }
            },
            || {
                LinkyError::username_taken(format!(
                    "用户名已存在: {}",
                    changes.username.unwrap_or_default()
                ))
            },
        )
        .await?;

        info!("User updated: {}", id);
        Ok(model_to_user(updated))
    }

    /// 删除用户及其会话、短链接、页面
    pub async fn delete_user(&self, id: i32) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LinkyError::database_operation(format!("开始事务失败: {}", e)))?;

        session::Entity::delete_many()
            .filter(session::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        link::Entity::delete_many()
            .filter(link::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        page::Entity::delete_many()
            .filter(page::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        let result = user::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(LinkyError::user_not_found(format!("用户不存在: {}", id)));
        }

        txn.commit()
            .await
            .map_err(|e| LinkyError::database_operation(format!("提交事务失败: {}", e)))?;

        info!("User deleted: {}", id);
        Ok(())
    }

    // ---------------------------------------------------------------
    // sessions
    // ---------------------------------------------------------------

    pub async fn create_session(
        &self,
        user_id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let now = Utc::now();
        let model = session::ActiveModel {
            session_token: Set(token.to_string()),
            session_data: Set(None),
            expires_at: Set(expires_at),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let db = &self.db;
        let created = retry::run(
            "create_session",
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.insert(db).await }
            },
            || LinkyError::database_operation("会话令牌冲突"),
        )
        .await?;

        Ok(model_to_session(created))
    }

    /// 顺延会话有效期
    pub async fn touch_session(&self, id: i32, expires_at: DateTime<Utc>) -> Result<()> {
        let model = session::ActiveModel {
            id: Unchanged(id),
            expires_at: Set(expires_at),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let db = &self.db;
        retry::with_retry("touch_session", self.retry_config, || {
            let model = model.clone();
            async move { model.update(db).await }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("更新会话失败: {}", e)))?;
        Ok(())
    }

    pub async fn delete_session(&self, token: &str) -> Result<()> {
        let db = &self.db;
        retry::with_retry("delete_session", self.retry_config, || async {
            session::Entity::delete_many()
                .filter(session::Column::SessionToken.eq(token))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("删除会话失败: {}", e)))?;
        Ok(())
    }

    /// 清理过期会话，返回删除数量
    pub async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let db = &self.db;
        let result = retry::with_retry("purge_expired_sessions", self.retry_config, || async {
            session::Entity::delete_many()
                .filter(session::Column::ExpiresAt.lte(now))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("清理会话失败: {}", e)))?;

        if result.rows_affected > 0 {
            info!("Purged {} expired sessions", result.rows_affected);
        }
        Ok(result.rows_affected)
    }

    // ---------------------------------------------------------------
    // links
    // ---------------------------------------------------------------

    pub async fn insert_link(&self, owner_id: i32, draft: &LinkDraft) -> Result<Link> {
        let model = link_draft_to_active_model(draft, Some(owner_id), Utc::now());

        let db = &self.db;
        let created = retry::run(
            &format!("insert_link({})", draft.slug),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.insert(db).await }
            },
            || LinkyError::slug_taken(format!("Slug 已被占用: {}", draft.slug)),
        )
        .await?;

        info!("Link created: {} -> {}", created.slug, created.link);
        Ok(model_to_link(created))
    }

    pub async fn update_link(&self, owner_id: i32, id: i32, draft: &LinkDraft) -> Result<Link> {
        if self.find_link(owner_id, id).await?.is_none() {
            return Err(LinkyError::link_not_found(format!("短链接不存在: {}", id)));
        }

        let mut model = link_draft_to_active_model(draft, None, Utc::now());
        model.id = Unchanged(id);

        let db = &self.db;
        let updated = retry::run(
            &format!("update_link({})", id),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.update(db).await }
            },
            || LinkyError::slug_taken(format!("Slug 已被占用: {}", draft.slug)),
        )
        .await?;

        info!("Link updated: {}", updated.slug);
        Ok(model_to_link(updated))
    }

    pub async fn delete_link(&self, owner_id: i32, id: i32) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry(
            &format!("delete_link({})", id),
            self.retry_config,
            || async {
                link::Entity::delete_many()
                    .filter(link::Column::Id.eq(id))
                    .filter(link::Column::UserId.eq(owner_id))
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinkyError::database_operation(format!("删除短链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkyError::link_not_found(format!("短链接不存在: {}", id)));
        }

        info!("Link deleted: {}", id);
        Ok(())
    }

    // ---------------------------------------------------------------
    // pages
    // ---------------------------------------------------------------

    pub async fn insert_page(&self, owner_id: i32, draft: &PageDraft) -> Result<Page> {
        let model = page_draft_to_active_model(draft, Some(owner_id), Utc::now());

        let db = &self.db;
        let created = retry::run(
            &format!("insert_page({})", draft.slug),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.insert(db).await }
            },
            || LinkyError::slug_taken(format!("页面 slug 已被占用: {}", draft.slug)),
        )
        .await?;

        info!("Page created: {}", created.slug);
        model_to_page(created)
    }

    pub async fn update_page(&self, owner_id: i32, id: i32, draft: &PageDraft) -> Result<Page> {
        if self.find_page(owner_id, id).await?.is_none() {
            return Err(LinkyError::page_not_found(format!("页面不存在: {}", id)));
        }

        let mut model = page_draft_to_active_model(draft, None, Utc::now());
        model.id = Unchanged(id);

        let db = &self.db;
        let updated = retry::run(
            &format!("update_page({})", id),
            self.retry_config,
            || {
                let model = model.clone();
                async move { model.update(db).await }
            },
            || LinkyError::slug_taken(format!("页面 slug 已被占用: {}", draft.slug)),
        )
        .await?;

        info!("Page updated: {}", updated.slug);
        model_to_page(updated)
    }

    pub async fn set_page_published(
        &self,
        owner_id: i32,
        id: i32,
        published: bool,
    ) -> Result<Page> {
        if self.find_page(owner_id, id).await?.is_none() {
            return Err(LinkyError::page_not_found(format!("页面不存在: {}", id)));
        }

        let model = page::ActiveModel {
            id: Unchanged(id),
            published: Set(published),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let db = &self.db;
        let updated = retry::with_retry(&format!("publish_page({})", id), self.retry_config, || {
            let model = model.clone();
            async move { model.update(db).await }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("更新页面失败: {}", e)))?;

        info!("Page {} published = {}", id, published);
        model_to_page(updated)
    }

    /// 只写入内容列
    pub async fn save_page_content(
        &self,
        owner_id: i32,
        id: i32,
        content: &SerializedContent,
    ) -> Result<()> {
        let db = &self.db;
        let raw = content.as_str().to_string();
        let result = retry::with_retry(&format!("save_content({})", id), self.retry_config, || {
            let raw = raw.clone();
            async move {
                page::Entity::update_many()
                    .col_expr(page::Column::Content, sea_orm::sea_query::Expr::value(raw))
                    .col_expr(
                        page::Column::UpdatedAt,
                        sea_orm::sea_query::Expr::value(Utc::now()),
                    )
                    .filter(page::Column::Id.eq(id))
                    .filter(page::Column::UserId.eq(owner_id))
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("保存页面内容失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkyError::page_not_found(format!("页面不存在: {}", id)));
        }
        Ok(())
    }

    pub async fn delete_page(&self, owner_id: i32, id: i32) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry(
            &format!("delete_page({})", id),
            self.retry_config,
            || async {
                page::Entity::delete_many()
                    .filter(page::Column::Id.eq(id))
                    .filter(page::Column::UserId.eq(owner_id))
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinkyError::database_operation(format!("删除页面失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkyError::page_not_found(format!("页面不存在: {}", id)));
        }

        info!("Page deleted: {}", id);
        Ok(())
    }
}
