//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

use super::converters::{model_to_link, model_to_page, model_to_session, model_to_user};
use super::{SeaOrmStorage, retry};
use crate::errors::{LinkyError, Result};
use crate::storage::models::{Link, Page, Session, User};

use migration::entities::{link, page, session, user};

impl SeaOrmStorage {
    // ---------------------------------------------------------------
    // users
    // ---------------------------------------------------------------

    pub async fn find_user_by_id(&self, id: i32) -> Result<Option<User>> {
        let db = &self.db;
        let model = retry::with_retry(&format!("find_user({})", id), self.retry_config, || async {
            user::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("查询用户失败: {}", e)))?;

        Ok(model.map(model_to_user))
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let db = &self.db;
        let model = retry::with_retry("find_user_by_username", self.retry_config, || async {
            user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("查询用户失败: {}", e)))?;

        Ok(model.map(model_to_user))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let db = &self.db;
        let models = retry::with_retry("list_users", self.retry_config, || async {
            user::Entity::find()
                .order_by_asc(user::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("加载用户列表失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_user).collect())
    }

    /// 用户名是否已被占用，`exclude_id` 用于更新时排除自己
    pub async fn username_exists(&self, username: &str, exclude_id: Option<i32>) -> Result<bool> {
        let mut query = user::Entity::find().filter(user::Column::Username.eq(username));
        if let Some(id) = exclude_id {
            query = query.filter(user::Column::Id.ne(id));
        }

        let db = &self.db;
        let count = retry::with_retry("username_exists", self.retry_config, || {
            let query = query.clone();
            async move { query.count(db).await }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("检查用户名失败: {}", e)))?;

        Ok(count > 0)
    }

    pub async fn count_users(&self) -> Result<u64> {
        let db = &self.db;
        retry::with_retry("count_users", self.retry_config, || async {
            user::Entity::find().count(db).await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("统计用户失败: {}", e)))
    }

    // ---------------------------------------------------------------
    // sessions
    // ---------------------------------------------------------------

    pub async fn find_session(&self, token: &str) -> Result<Option<Session>> {
        let db = &self.db;
        let model = retry::with_retry("find_session", self.retry_config, || async {
            session::Entity::find()
                .filter(session::Column::SessionToken.eq(token))
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("查询会话失败: {}", e)))?;

        Ok(model.map(model_to_session))
    }

    // ---------------------------------------------------------------
    // links
    // ---------------------------------------------------------------

    /// 用户的短链接，最近更新的在前；`limit` 为 `None` 时返回全部
    pub async fn list_links(&self, owner_id: i32, limit: Option<u64>) -> Result<Vec<Link>> {
        let db = &self.db;
        let models = retry::with_retry("list_links", self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::UserId.eq(owner_id))
                .order_by_desc(link::Column::UpdatedAt)
                .order_by_desc(link::Column::Id)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("加载短链接失败: {}", e)))?;

        debug!("Loaded {} links for user {}", models.len(), owner_id);
        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// 统计短链接数量，`owner_id` 为 `None` 时统计全部
    pub async fn count_links(&self, owner_id: Option<i32>) -> Result<u64> {
        let mut query = link::Entity::find();
        if let Some(owner_id) = owner_id {
            query = query.filter(link::Column::UserId.eq(owner_id));
        }

        let db = &self.db;
        retry::with_retry("count_links", self.retry_config, || {
            let query = query.clone();
            async move { query.count(db).await }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("统计短链接失败: {}", e)))
    }

    /// 按 id 查询，只返回属于 `owner_id` 的记录
    pub async fn find_link(&self, owner_id: i32, id: i32) -> Result<Option<Link>> {
        let db = &self.db;
        let model = retry::with_retry(&format!("find_link({})", id), self.retry_config, || async {
            link::Entity::find_by_id(id)
                .filter(link::Column::UserId.eq(owner_id))
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("查询短链接失败: {}", e)))?;

        Ok(model.map(model_to_link))
    }

    pub async fn find_link_by_slug(&self, slug: &str) -> Result<Option<Link>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_link_by_slug({})", slug),
            self.retry_config,
            || async {
                link::Entity::find()
                    .filter(link::Column::Slug.eq(slug))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinkyError::database_operation(format!("查询短链接失败: {}", e)))?;

        Ok(model.map(model_to_link))
    }

    pub async fn link_slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool> {
        let mut query = link::Entity::find().filter(link::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(link::Column::Id.ne(id));
        }

        let db = &self.db;
        let count = retry::with_retry("link_slug_exists", self.retry_config, || {
            let query = query.clone();
            async move { query.count(db).await }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("检查 slug 失败: {}", e)))?;

        Ok(count > 0)
    }

    // ---------------------------------------------------------------
    // pages
    // ---------------------------------------------------------------

    pub async fn list_pages(&self, owner_id: i32, limit: Option<u64>) -> Result<Vec<Page>> {
        let db = &self.db;
        let models = retry::with_retry("list_pages", self.retry_config, || async {
            page::Entity::find()
                .filter(page::Column::UserId.eq(owner_id))
                .order_by_desc(page::Column::UpdatedAt)
                .order_by_desc(page::Column::Id)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("加载页面失败: {}", e)))?;

        models.into_iter().map(model_to_page).collect()
    }

    pub async fn count_pages(&self, owner_id: Option<i32>) -> Result<u64> {
        let mut query = page::Entity::find();
        if let Some(owner_id) = owner_id {
            query = query.filter(page::Column::UserId.eq(owner_id));
        }

        let db = &self.db;
        retry::with_retry("count_pages", self.retry_config, || {
            let query = query.clone();
            async move { query.count(db).await }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("统计页面失败: {}", e)))
    }

    pub async fn find_page(&self, owner_id: i32, id: i32) -> Result<Option<Page>> {
        let db = &self.db;
        let model = retry::with_retry(&format!("find_page({})", id), self.retry_config, || async {
            page::Entity::find_by_id(id)
                .filter(page::Column::UserId.eq(owner_id))
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("查询页面失败: {}", e)))?;

        model.map(model_to_page).transpose()
    }

    /// 公开访问：只返回已发布的页面
    pub async fn find_published_page(&self, slug: &str) -> Result<Option<Page>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_published_page({})", slug),
            self.retry_config,
            || async {
                page::Entity::find()
                    .filter(page::Column::Slug.eq(slug))
                    .filter(page::Column::Published.eq(true))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinkyError::database_operation(format!("查询页面失败: {}", e)))?;

        model.map(model_to_page).transpose()
    }

    pub async fn page_slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool> {
        let mut query = page::Entity::find().filter(page::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(page::Column::Id.ne(id));
        }

        let db = &self.db;
        let count = retry::with_retry("page_slug_exists", self.retry_config, || {
            let query = query.clone();
            async move { query.count(db).await }
        })
        .await
        .map_err(|e| LinkyError::database_operation(format!("检查页面 slug 失败: {}", e)))?;

        Ok(count > 0)
    }
}
